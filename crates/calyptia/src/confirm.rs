//! Destructive-action confirmation prompt

use std::io::{self, BufRead, Write};

/// Prints `prompt` and reads one line from stdin. Only "y" or "yes"
/// (case-insensitive) confirm; anything else, including an empty line,
/// declines.
pub fn ask(prompt: &str) -> io::Result<bool> {
    print!("{prompt} (y/N) ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(confirmed(&answer))
}

fn confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Like [`ask`] but for mass deletions: only a spelled-out "yes"
/// (case-insensitive) confirms, a bare "y" declines.
pub fn ask_strict(prompt: &str) -> io::Result<bool> {
    print!("{prompt} (yes/N) ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(strictly_confirmed(&answer))
}

fn strictly_confirmed(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_y_and_yes() {
        assert!(confirmed("y\n"));
        assert!(confirmed("YES\n"));
        assert!(confirmed(" yes "));
    }

    #[test]
    fn test_declines_everything_else() {
        assert!(!confirmed("\n"));
        assert!(!confirmed("n\n"));
        assert!(!confirmed("yep"));
    }

    #[test]
    fn test_strict_requires_a_full_yes() {
        assert!(strictly_confirmed("yes\n"));
        assert!(strictly_confirmed(" YES "));
        assert!(!strictly_confirmed("y\n"));
        assert!(!strictly_confirmed("\n"));
    }
}
