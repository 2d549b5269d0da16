use logos::Logos;

/// A word the shell handles itself instead of evaluating.
///
/// A line is a command only if it consists of exactly one command word,
/// optionally surrounded by whitespace.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Command {
    /// `help`: print the banner again.
    #[token("help")]
    Help,
    /// `exit` or `quit`: stop the session and leave the shell.
    #[token("exit")]
    #[token("quit")]
    Exit,
    /// `reset`: drop any partial expression.
    #[token("reset")]
    Reset,
}

impl Command {
    /// Recognises a command line.
    ///
    /// # Returns
    /// - `Some(command)` if `line` holds exactly one command word.
    /// - `None` otherwise; the line is then an expression.
    ///
    /// # Example
    /// ```
    /// use stepcalc::shell::command::Command;
    ///
    /// assert_eq!(Command::parse("  exit "), Some(Command::Exit));
    /// assert_eq!(Command::parse("1 + 2"), None);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut lexer = Self::lexer(line);
        let command = lexer.next()?.ok()?;
        lexer.next().is_none().then_some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_words_are_commands() {
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("quit\n"), Some(Command::Exit));
        assert_eq!(Command::parse("\treset"), Some(Command::Reset));
    }

    #[test]
    fn anything_else_is_an_expression() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("help me"), None);
        assert_eq!(Command::parse("exit exit"), None);
        assert_eq!(Command::parse("helpx"), None);
        assert_eq!(Command::parse("-(2+3)"), None);
    }
}
