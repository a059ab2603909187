//! Multi-line message entry from stdin.

use std::io::{self, BufRead};

/// Line that ends a block.
pub const BLOCK_TERMINATOR: &str = ".";

/// Read lines until one containing only [`BLOCK_TERMINATOR`] or EOF.
///
/// The collected lines are joined with `\n` and trimmed.
pub fn read_block(reader: &mut impl BufRead) -> io::Result<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim() == BLOCK_TERMINATOR {
            break;
        }
        lines.push(content.to_string());
    }
    Ok(lines.join("\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stops_at_terminator() {
        let mut input = Cursor::new("first line\nsecond line\n.\nleftover\n");
        assert_eq!(read_block(&mut input).unwrap(), "first line\nsecond line");
        assert_eq!(read_block(&mut input).unwrap(), "leftover");
    }

    #[test]
    fn eof_ends_block() {
        let mut input = Cursor::new("only line");
        assert_eq!(read_block(&mut input).unwrap(), "only line");
        assert_eq!(read_block(&mut input).unwrap(), "");
    }

    #[test]
    fn terminator_may_carry_whitespace() {
        let mut input = Cursor::new("text\r\n  .  \r\nafter");
        assert_eq!(read_block(&mut input).unwrap(), "text");
    }

    #[test]
    fn block_is_trimmed() {
        let mut input = Cursor::new("\n\n  padded  \n\n.\n");
        assert_eq!(read_block(&mut input).unwrap(), "padded");
    }

    #[test]
    fn dot_inside_text_does_not_terminate() {
        let mut input = Cursor::new("ends with a dot.\n. \n");
        assert_eq!(read_block(&mut input).unwrap(), "ends with a dot.");
    }
}
