//! Line-oriented console input helpers
//!
//! All helpers report end of input as `None`; the session treats that as a
//! request to leave. Invalid answers re-prompt.

use std::io::{self, BufRead, Write};

/// Read one line with the trailing newline stripped, `None` at end of input
pub fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    while buf.ends_with('\n') || buf.ends_with('\r') {
        buf.pop();
    }
    Ok(Some(buf))
}

/// Prompt for a numbered menu action until a number comes back
pub fn read_choice(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<Option<u32>> {
    loop {
        write!(output, "Action: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse() {
            Ok(choice) => return Ok(Some(choice)),
            Err(_) => writeln!(output, "Invalid input.")?,
        }
    }
}

/// Prompt until the answer is literally `yes` or `no`
pub fn read_yes_no(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<Option<bool>> {
    loop {
        write!(output, "(yes/no): ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim() {
            "yes" => return Ok(Some(true)),
            "no" => return Ok(Some(false)),
            _ => writeln!(output, "Please enter 'yes' or 'no' only.")?,
        }
    }
}
