//! Interactive yes/no question for the batch-wide `days_between` toggle.

use std::io::{self, BufRead, Write};

/// Ask `question` until the answer is yes or no. Empty input and end of
/// input both mean no.
pub fn ask_yes_no<R, W>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{question} [y/N]: ")?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer yes or no.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answers: &str) -> (bool, String) {
        let mut input = answers.as_bytes();
        let mut output = Vec::new();
        let answer = ask_yes_no(&mut input, &mut output, "Compute days_between?").unwrap();
        (answer, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_and_no() {
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("\n").0);
    }

    #[test]
    fn test_eof_means_no() {
        assert!(!ask("").0);
    }

    #[test]
    fn test_reasks_on_garbage() {
        let (answer, output) = ask("maybe\nyes\n");
        assert!(answer);
        assert_eq!(
            output,
            "Compute days_between? [y/N]: Please answer yes or no.\n\
             Compute days_between? [y/N]: "
        );
    }
}
