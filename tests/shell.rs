use std::io::Cursor;

use stepcalc::{
    machine::Session,
    shell::{BANNER, PROMPT, Shell},
};

fn run_interactive(input: &str) -> String {
    let mut shell = Shell::new(Cursor::new(input.to_string()), Vec::new(), Session::new());
    shell.run().unwrap();
    String::from_utf8(shell.into_output()).unwrap()
}

#[test]
fn prints_banner_and_results() {
    let output = run_interactive("2+3*4\n(2 + 3) * 4\n");
    assert!(output.starts_with(BANNER));
    assert!(output.contains("Result: 14\n"));
    assert!(output.contains("Result: 20\n"));
    assert_eq!(output.matches(PROMPT).count(), 3);
}

#[test]
fn reports_errors_and_carries_on() {
    let output = run_interactive("5(2)\n7/2\n");
    assert!(output.contains("Error: Character '(' at position 1 is not valid here.\n"));
    assert!(output.contains("Result: 3.5\n"));
}

#[test]
fn exit_stops_reading() {
    let mut shell = Shell::new(Cursor::new("1+1\nexit\n2+2\n"), Vec::new(), Session::new());
    shell.run().unwrap();
    assert!(!shell.session().is_running());
    let output = String::from_utf8(shell.into_output()).unwrap();
    assert!(output.contains("Result: 2\n"));
    assert!(!output.contains("Result: 4"));
}

#[test]
fn help_repeats_the_banner() {
    let output = run_interactive("help\n");
    assert_eq!(output.matches(BANNER).count(), 2);
}

#[test]
fn batch_mode_counts_failures() {
    let mut shell = Shell::new(Cursor::new("1+2\n\n5+\n5 5\n-(1)\n"), Vec::new(), Session::new());
    assert_eq!(shell.run_batch().unwrap(), 2);
    let output = String::from_utf8(shell.into_output()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Result: 3");
    assert!(lines[1].starts_with("Error: Too few operands"));
    assert!(lines[2].starts_with("Error: Too few or too many operators"));
    assert_eq!(lines[3], "Result: -1");
    assert!(!output.contains(PROMPT));
}
