//! Interactive date range prompt on standard input.

use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Prompt input errors.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("input ended before the {0} was entered")]
    Eof(&'static str),
}

/// Ask for the start and end date, returning them as entered.
pub fn prompt_dates<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<(String, String), InputError> {
    writeln!(output, "Gib Anfangs- und Enddatum an. (dd.mm.yyyy)")?;

    let start = prompt_line(input, output, "Anfangsdatum: ", "start date")?;
    let end = prompt_line(input, output, "Enddatum: ", "end date")?;

    Ok((start, end))
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    what: &'static str,
) -> Result<String, InputError> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InputError::Eof(what));
    }
    Ok(line.trim().to_string())
}
