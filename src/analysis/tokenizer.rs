//! Line-oriented tokenizer for corpus files.

use std::io::BufRead;

use crate::analysis::normalize::{normalize_line, normalize_token};

/// Splits a reader into numbered lines of normalized tokens.
///
/// Line numbers start at zero and count every line, blank or not. Bytes that
/// are not valid UTF-8 are replaced rather than aborting the file.
///
/// ```
/// use diachron::analysis::LineTokenizer;
///
/// let text = "Gallia est omnis\n\ndivisa in partes tres";
/// let lines: Vec<_> = LineTokenizer::new(text.as_bytes())
///     .map(|l| l.unwrap())
///     .collect();
///
/// assert_eq!(lines.len(), 3);
/// assert_eq!(lines[0].1, vec!["gallia", "est", "omnis"]);
/// assert!(lines[1].1.is_empty());
/// assert_eq!(lines[2].0, 2);
/// ```
pub struct LineTokenizer<R> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: BufRead> LineTokenizer<R> {
    pub fn new(reader: R) -> Self {
        LineTokenizer {
            reader,
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    /// Tokenize one already-read line.
    pub fn tokenize(line: &str) -> Vec<String> {
        normalize_line(line)
            .split_whitespace()
            .map(normalize_token)
            .filter(|token| !token.is_empty())
            .collect()
    }
}

impl<R: BufRead> Iterator for LineTokenizer<R> {
    type Item = std::io::Result<(usize, Vec<String>)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
                    self.buffer.pop();
                }
                let line = String::from_utf8_lossy(&self.buffer);
                let tokens = Self::tokenize(&line);
                let number = self.line_number;
                self.line_number += 1;
                Some(Ok((number, tokens)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
