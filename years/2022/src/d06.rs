//! Tuning trouble.
//!
//! Finds the first window of distinct characters in a datastream, which marks
//! the start of a packet (4 characters) or of a message (14 characters).

#[cfg(test)]
mod tests;

use std::collections::hash_map::{Entry, HashMap};

use anyhow::{Context, Result};
use lib::Input;
use thiserror::Error;

/// Window length of a start-of-packet marker.
pub const MARKER: usize = 4;

/// Window length of a start-of-message marker.
pub const MESSAGE: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("window length must be positive")]
    ZeroWindow,
    #[error("no window of {window} distinct characters in {len} character(s)")]
    NotFound { window: usize, len: usize },
}

/// Find the number of characters processed up to and including the first
/// window of `window` pairwise distinct characters.
///
/// Returns `None` if there is no such window, which includes the cases where
/// `window` is zero or longer than `data`.
///
/// # Examples
///
/// ```
/// use y2022::d06::find_marker;
///
/// assert_eq!(find_marker("mjqjpqmgbljsphdztnvjfqwrcgsmlb", 4), Some(7));
/// assert_eq!(find_marker("mjqjpqmgbljsphdztnvjfqwrcgsmlb", 14), Some(19));
/// assert_eq!(find_marker("ééab", 2), Some(3));
/// assert_eq!(find_marker("abc", 4), None);
/// ```
pub fn find_marker(data: &str, window: usize) -> Option<usize> {
    let chars = data.chars().collect::<Vec<_>>();

    if window == 0 || window > chars.len() {
        return None;
    }

    // Occurrences of each character inside the current window.
    let mut counts = HashMap::<char, u32>::new();

    for (n, &c) in chars.iter().enumerate() {
        *counts.entry(c).or_default() += 1;

        if n >= window {
            if let Entry::Occupied(mut e) = counts.entry(chars[n - window]) {
                *e.get_mut() -= 1;

                if *e.get() == 0 {
                    e.remove();
                }
            }
        }

        if counts.len() == window {
            return Some(n + 1);
        }
    }

    None
}

/// Scan for a window of the given length, treating a missing one as an error.
pub fn scan(data: &str, window: usize) -> Result<usize, Error> {
    if window == 0 {
        return Err(Error::ZeroWindow);
    }

    let Some(n) = find_marker(data, window) else {
        return Err(Error::NotFound {
            window,
            len: data.chars().count(),
        });
    };

    log::debug!(
        "unique window {:?} found after {n} characters",
        data.chars().skip(n - window).take(window).collect::<String>()
    );

    Ok(n)
}

/// Characters processed before the first start-of-packet marker.
pub fn part1(data: &str) -> Result<usize, Error> {
    scan(data, MARKER)
}

/// Characters processed before the first start-of-message marker.
pub fn part2(data: &str) -> Result<usize, Error> {
    scan(data, MESSAGE)
}

pub fn solve(input: &Input) -> Result<(usize, usize)> {
    let data = input.as_str();
    let part1 = part1(data).context("part 1")?;
    let part2 = part2(data).context("part 2")?;
    Ok((part1, part2))
}
