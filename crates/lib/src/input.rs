//! Input reading.

#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

const NL: u8 = b'\n';

/// Puzzle input held in memory.
///
/// Trailing whitespace is removed on construction, so a final newline never
/// produces an empty last line.
#[derive(Debug, Clone)]
pub struct Input {
    /// The path the input was read from.
    path: PathBuf,
    /// Trimmed input data.
    data: String,
}

impl Input {
    /// Construct input from data which has already been read.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::Input;
    ///
    /// let input = Input::new("example.txt", "abc\ndef\n\n");
    /// assert_eq!(input.as_str(), "abc\ndef");
    /// assert_eq!(input.lines().collect::<Vec<_>>(), ["abc", "def"]);
    /// ```
    pub fn new<P, D>(path: P, data: D) -> Self
    where
        P: Into<PathBuf>,
        D: Into<String>,
    {
        let mut data = data.into();
        let len = data.trim_end().len();
        data.truncate(len);

        Self {
            path: path.into(),
            data,
        }
    }

    /// Read the input file at the given path.
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let data = fs::read_to_string(path).with_context(|| anyhow!("{}", path.display()))?;
        Ok(Self::new(path, data))
    }

    /// The path the input was read from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Test if the input is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length of the input in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// The whole input as a string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// The whole input as bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Iterate over the lines of the input.
    #[inline]
    pub fn lines(&self) -> Lines<'_> {
        Lines { data: &self.data }
    }
}

/// Iterator over the lines of an [Input].
///
/// Lines are split on `\n` and a trailing `\r` is removed.
pub struct Lines<'a> {
    data: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.is_empty() {
            return None;
        }

        let line = match memchr::memchr(NL, self.data.as_bytes()) {
            Some(at) => {
                let (line, rest) = self.data.split_at(at);
                self.data = &rest[1..];
                line
            }
            None => std::mem::take(&mut self.data),
        };

        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}
