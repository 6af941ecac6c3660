//! Terminal output.
//!
//! The merged document is the only thing written to stdout; errors and logs
//! go to stderr.

pub mod colors;
pub mod errors;

use std::io::Write;

use laminate_core::error::{LaminateError, LaminateResult};

/// Write a document to stdout, ending it with exactly one trailing newline
pub fn write_document(bytes: &[u8]) -> LaminateResult<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_to(&mut handle, bytes).map_err(|e| LaminateError::io("Failed to write to stdout".to_string(), e))
}

fn write_to<W: Write>(writer: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    writer.write_all(bytes)?;
    if !bytes.ends_with(b"\n") {
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_newline_added_once() {
        let mut out = Vec::new();
        write_to(&mut out, b"{\n  \"a\": 1\n}").unwrap();
        assert_eq!(out, b"{\n  \"a\": 1\n}\n");

        let mut out = Vec::new();
        write_to(&mut out, b"a: 1\n").unwrap();
        assert_eq!(out, b"a: 1\n");
    }
}
