// Primitives for reading the input files line by line.

use snafu::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

use voter_history::line::decode_latin1;

use crate::transform::*;

fn open(path: &Path) -> TransformResult<BufReader<File>> {
    let file = File::open(path).context(OpeningInputSnafu {
        path: path.display().to_string(),
    })?;
    Ok(BufReader::new(file))
}

/// The lines of a UTF-8 text file.
pub fn text_lines(path: &Path) -> TransformResult<Lines<BufReader<File>>> {
    Ok(open(path)?.lines())
}

/// The lines of an ISO-8859-1 text file.
pub fn latin1_lines(path: &Path) -> TransformResult<Latin1Lines<BufReader<File>>> {
    Ok(Latin1Lines::new(open(path)?))
}

/// An iterator over the lines of a reader in ISO-8859-1.
///
/// Lines end with `\n` or `\r\n`; the terminator is not part of the line.
pub struct Latin1Lines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Latin1Lines<R> {
    pub fn new(reader: R) -> Latin1Lines<R> {
        Latin1Lines {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for Latin1Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<io::Result<String>> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(decode_latin1(&self.buf)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_lines_and_terminators() {
        let data: &[u8] = b"\"1\",\"Saint-R\xe9mi\"\r\n\"2\",\"x\"\n\"3\"";
        let lines: Vec<String> = Latin1Lines::new(data).map(|l| l.unwrap()).collect();
        assert_eq!(
            lines,
            vec!["\"1\",\"Saint-Rémi\"", "\"2\",\"x\"", "\"3\""]
        );
    }

    #[test]
    fn empty_input() {
        let data: &[u8] = b"";
        assert_eq!(Latin1Lines::new(data).count(), 0);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            latin1_lines(&dir.path().join("Voter01.txt")),
            Err(TransformError::OpeningInput { .. })
        ));
    }
}
