//! Loader for textual program images
//!
//! An image file holds one byte per line, written in binary.  Anything after
//! a `#` is a comment, and blank lines are skipped:
//!
//! ```text
//! # print8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```
use std::path::{Path, PathBuf};

use crate::MEMORY_SIZE;

/// Errors raised while reading a program image
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read {path:?}")]
    Io {
        /// Path of the image
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A line is not a binary byte
    #[error("line {line}: {text:?} is not a binary byte")]
    Parse {
        /// Line number, starting from 1
        line: usize,
        /// Offending text, with comments and whitespace removed
        text: String,
        /// Underlying error
        source: std::num::ParseIntError,
    },

    /// The image does not fit in memory
    #[error("image is {0} bytes, but memory only holds {max}", max = MEMORY_SIZE)]
    TooLarge(usize),
}

/// Parses the text of a program image into bytes
pub fn parse(text: &str) -> Result<Vec<u8>, LoadError> {
    let mut out = vec![];
    for (i, line) in text.lines().enumerate() {
        let token = line.split('#').next().unwrap_or_default().trim();
        if token.is_empty() {
            continue;
        }
        let v = u8::from_str_radix(token, 2).map_err(|source| LoadError::Parse {
            line: i + 1,
            text: token.to_owned(),
            source,
        })?;
        out.push(v);
    }
    if out.len() > MEMORY_SIZE {
        return Err(LoadError::TooLarge(out.len()));
    }
    Ok(out)
}

/// Reads and parses a program image from disk
pub fn load(path: &Path) -> Result<Vec<u8>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    let image = parse(&text)?;
    log::debug!("loaded {} bytes from {path:?}", image.len());
    Ok(image)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn comments_and_blanks() {
        let text = "
            # print8

            10000010 # LDI R0,8
            00000000
            00001000
            01000111 # PRN R0
            00000000
               # nothing here
            00000001 # HLT
        ";
        assert_eq!(parse(text).unwrap(), [130, 0, 8, 71, 0, 1]);
    }

    #[test]
    fn short_tokens() {
        assert_eq!(parse("1\n10\n11111111").unwrap(), [1, 2, 255]);
    }

    #[test]
    fn invalid_line() {
        match parse("00000001\n\n00000002 # not binary") {
            Err(LoadError::Parse { line, text, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "00000002");
            }
            r => panic!("unexpected result {r:?}"),
        }
        assert!(matches!(
            parse("100000000"),
            Err(LoadError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn too_large() {
        let text = "00000001\n".repeat(MEMORY_SIZE);
        assert_eq!(parse(&text).unwrap().len(), MEMORY_SIZE);
        let text = "00000001\n".repeat(MEMORY_SIZE + 1);
        assert!(matches!(parse(&text), Err(LoadError::TooLarge(257))));
    }

    #[test]
    fn missing_file() {
        let path = Path::new("/nonexistent/ls8/program.ls8");
        match load(path) {
            Err(LoadError::Io { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            r => panic!("unexpected result {r:?}"),
        }
    }
}
