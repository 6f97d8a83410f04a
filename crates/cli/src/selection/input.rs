use std::io::{stdin, stdout, BufRead, Write};

use kubermon_core::error::{Error, Result};

/// Asks a yes/no question on the terminal; only `y` (any case) is a yes.
pub fn confirm(message: &str) -> Result<bool> {
    read_confirmation(&mut stdin().lock(), &mut stdout(), message)
}

/// Writes `message`, reads one line and reports whether it was a `y`.
///
/// End of input counts as a no.
pub fn read_confirmation<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
) -> Result<bool> {
    write!(writer, "{message}").map_err(Error::Stdio)?;
    writer.flush().map_err(Error::Stdio)?;

    // Read user input
    let mut input = String::new();
    let read = reader.read_line(&mut input).map_err(Error::Stdio)?;

    if read == 0 {
        writeln!(writer).map_err(Error::Stdio)?;
        return Ok(false);
    }

    Ok(input.trim().to_lowercase() == "y")
}
