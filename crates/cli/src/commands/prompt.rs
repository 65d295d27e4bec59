//! Line-based prompts on stdin.

use std::io::{self, BufRead, Write};

/// Print `prompt` and read one trimmed line. `None` on end of input.
pub fn ask(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for a number; empty input, end of input or garbage yield `default`.
pub fn ask_number(question: &str, default: u32) -> io::Result<u32> {
    let answer = ask(&format!("{question} (default: {default}): "))?.unwrap_or_default();
    Ok(parse_number(&answer).unwrap_or_else(|| {
        if !answer.is_empty() {
            eprintln!("Invalid number, using default: {default}");
        }
        default
    }))
}

/// Ask a yes/no question. Only "y" or "yes" count as yes.
pub fn confirm(question: &str) -> io::Result<bool> {
    Ok(ask(&format!("{question} (yes/no): "))?.is_some_and(|a| is_yes(&a)))
}

fn parse_number(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
