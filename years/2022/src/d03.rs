//! Rucksack reorganization.
//!
//! Every line is a rucksack with two equally sized compartments. Part 1 finds
//! the item present in both compartments of each rucksack, part 2 the item
//! carried by all three rucksacks of each consecutive group.


use core::fmt;

use anyhow::{anyhow, Context, Result};
use lib::Input;
use thiserror::Error;

/// Number of rucksacks carried by one group.
const GROUP: usize = 3;

/// Items in priority order, starting at priority 1.
const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Priority of every ASCII character, zero if it's not an item.
static PRIORITIES: [u8; 128] = priorities();

const fn priorities() -> [u8; 128] {
    let mut table = [0; 128];
    let mut n = 0;

    while n < ALPHABET.len() {
        table[ALPHABET[n] as usize] = n as u8 + 1;
        n += 1;
    }

    table
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("unsupported character {0:?}")]
    UnsupportedChar(char),
    #[error("rucksack of odd length {0} can't be split into compartments")]
    OddLength(usize),
    #[error("group {group}: expected exactly one common item, but found {common}")]
    InvalidGroup { group: usize, common: u32 },
    #[error("{lines} line(s) can't be split into groups of {}", GROUP)]
    IncompleteGroup { lines: usize },
}

/// A single item, stored as its priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item(u8);

impl Item {
    /// Look up the item for the given character.
    pub fn new(c: char) -> Result<Self, Error> {
        match PRIORITIES.get(c as usize) {
            Some(&p) if p != 0 => Ok(Self(p)),
            _ => Err(Error::UnsupportedChar(c)),
        }
    }

    #[inline]
    pub fn priority(self) -> u32 {
        u32::from(self.0)
    }

    #[inline]
    pub fn as_char(self) -> char {
        char::from(ALPHABET[usize::from(self.0 - 1)])
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_char(), f)
    }
}

/// Priority of an item character.
///
/// # Examples
///
/// ```
/// use y2022::d03::priority;
///
/// assert_eq!(priority('a').unwrap(), 1);
/// assert_eq!(priority('Z').unwrap(), 52);
/// assert!(priority('!').is_err());
/// ```
pub fn priority(c: char) -> Result<u32, Error> {
    Ok(Item::new(c)?.priority())
}

/// A set of items, one bit per priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemSet(u64);

impl ItemSet {
    /// The set of every item.
    pub const ALL: Self = Self(((1 << ALPHABET.len()) - 1) << 1);

    /// Collect the items of a string.
    pub fn parse(items: &str) -> Result<Self, Error> {
        items
            .chars()
            .try_fold(Self::default(), |set, c| -> Result<Self, Error> {
                Ok(set.with(Item::new(c)?))
            })
    }

    #[inline]
    fn with(self, item: Item) -> Self {
        Self(self.0 | 1 << item.0)
    }

    #[inline]
    pub fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Extract the only member of the set, failing with
    /// [Error::InvalidGroup] if there isn't exactly one.
    pub fn single(self, group: usize) -> Result<Item, Error> {
        if self.len() != 1 {
            return Err(Error::InvalidGroup {
                group,
                common: self.len(),
            });
        }

        Ok(Item(self.0.trailing_zeros() as u8))
    }
}

/// Find the single item common to every part of the given group.
pub fn common_item<'a, I>(group: usize, parts: I) -> Result<Item, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut set = ItemSet::ALL;

    for part in parts {
        set = set.intersect(ItemSet::parse(part)?);
    }

    set.single(group)
}

/// Split a rucksack into its two compartments.
fn compartments(line: &str) -> Result<(&str, &str), Error> {
    if let Some(c) = line.chars().find(|c| !c.is_ascii()) {
        return Err(Error::UnsupportedChar(c));
    }

    if line.len() % 2 != 0 {
        return Err(Error::OddLength(line.len()));
    }

    Ok(line.split_at(line.len() / 2))
}

/// Sum the priorities of the item shared by both compartments of each
/// rucksack.
pub fn part1(lines: &[&str]) -> Result<u32> {
    let mut sum = 0;

    for (n, line) in lines.iter().enumerate() {
        let item = compartments(line)
            .and_then(|(first, second)| common_item(n, [first, second]))
            .with_context(|| anyhow!("line {}", n + 1))?;

        log::trace!("rucksack {n}: {item} ({})", item.priority());
        sum += item.priority();
    }

    Ok(sum)
}

/// Sum the priorities of the badge carried by every group of three.
pub fn part2(lines: &[&str]) -> Result<u32> {
    if lines.len() % GROUP != 0 {
        return Err(Error::IncompleteGroup { lines: lines.len() }.into());
    }

    let mut sum = 0;

    for (n, group) in lines.chunks_exact(GROUP).enumerate() {
        let item = common_item(n, group.iter().copied()).with_context(|| {
            let first = n * GROUP + 1;
            anyhow!("lines {first}-{}", first + GROUP - 1)
        })?;

        log::trace!("group {n}: {item} ({})", item.priority());
        sum += item.priority();
    }

    Ok(sum)
}

pub fn solve(input: &Input) -> Result<(u32, u32)> {
    let lines = input.lines().collect::<Vec<_>>();
    let part1 = part1(&lines).context("part 1")?;
    let part2 = part2(&lines).context("part 2")?;
    Ok((part1, part2))
}
