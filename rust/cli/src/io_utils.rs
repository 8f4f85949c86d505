//! Input helpers for interactive commands.

use std::io::BufRead;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// The line is trimmed. `None` means EOF or a read error.
///
/// # Example
///
/// ```rust
/// # use drawpoker_cli::io_utils::read_stdin_line;
/// let mut input = std::io::Cursor::new("  raise 10 \n");
/// assert_eq!(read_stdin_line(&mut input).as_deref(), Some("raise 10"));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}
