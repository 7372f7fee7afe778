//! Sources of RR interval sample tokens.
//!
//! The pipeline only needs the tokens in measurement order; where they come from is up to the
//! [`SampleSource`] implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Supplies sample tokens, one per RR interval, in measurement order.
#[cfg_attr(test, mockall::automock)]
pub trait SampleSource {
    fn read_tokens(&self) -> Result<Vec<String>>;
}

/// Reads one sample token per line of a text file.
///
/// A trailing newline does not produce an empty token, but blank lines inside the file are kept
/// and later reported as malformed samples.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SampleSource for FileSource {
    fn read_tokens(&self) -> Result<Vec<String>> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("could not open data file {}", self.path.display()))?;
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);
        Ok(contents.lines().map(str::to_owned).collect())
    }
}

impl SampleSource for Vec<String> {
    fn read_tokens(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_reads_lines() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"0.812\r\n0.790\n\n0.805\n").unwrap();
        let source = FileSource::new(temp.path());
        assert_eq!(
            source.read_tokens().unwrap(),
            vec!["0.812", "0.790", "", "0.805"]
        );
    }

    #[test]
    fn test_file_source_strips_byte_order_mark() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all("\u{feff}0.812\n0.790".as_bytes()).unwrap();
        let source = FileSource::new(temp.path());
        assert_eq!(source.read_tokens().unwrap(), vec!["0.812", "0.790"]);
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileSource::new("does/not/exist.txt");
        let err = source.read_tokens().unwrap_err();
        assert!(err.to_string().contains("could not open data file"));
    }

    #[test]
    fn test_vec_source() {
        let tokens = vec!["1.0".to_string(), "2.0".to_string()];
        assert_eq!(tokens.read_tokens().unwrap(), tokens);
    }
}
