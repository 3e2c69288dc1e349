use std::collections::HashSet;

use lib::Input;
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::select;

use super::{find_marker, part1, part2, scan, solve, Error, MARKER, MESSAGE};

/// Straightforward rescan of every window.
fn naive(data: &str, window: usize) -> Option<usize> {
    let chars = data.chars().collect::<Vec<_>>();

    chars
        .windows(window)
        .position(|w| w.iter().collect::<HashSet<_>>().len() == window)
        .map(|n| n + window)
}

#[test]
fn test_examples() {
    let examples = [
        ("mjqjpqmgbljsphdztnvjfqwrcgsmlb", 7, 19),
        ("bvwbjplbgvbhsrlpgdmjqwftvncz", 5, 23),
        ("nppdvjthqldpwncqszvftbrmjlhg", 6, 23),
        ("nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg", 10, 29),
        ("zcfzfwzzqfrljwzlrfnpqdbhtmscgvjw", 11, 26),
    ];

    for (data, marker, message) in examples {
        assert_eq!(part1(data), Ok(marker), "{data}");
        assert_eq!(part2(data), Ok(message), "{data}");
    }
}

#[test]
fn test_solve() {
    let input = Input::new("d06.txt", "mjqjpqmgbljsphdztnvjfqwrcgsmlb\n");
    assert_eq!(solve(&input).unwrap(), (7, 19));
}

#[test]
fn test_repeated_calls() {
    let data = "nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg";
    assert_eq!(find_marker(data, MESSAGE), find_marker(data, MESSAGE));
    assert_eq!(scan(data, MARKER), scan(data, MARKER));
}

#[test]
fn test_multibyte_counts_characters() {
    assert_eq!(find_marker("ééab", 2), Some(3));
    assert_eq!(find_marker("aéb", 3), Some(3));
    assert_eq!(find_marker("éé", 2), None);
}

#[test]
fn test_multibyte_without_marker() {
    let input = Input::new("d06.txt", "ééééab");
    assert_eq!(
        part1(input.as_str()),
        Err(Error::NotFound {
            window: MARKER,
            len: 6
        })
    );
}

#[test]
fn test_window_longer_than_input() {
    assert_eq!(find_marker("abc", MARKER), None);
    assert_eq!(
        part1("abc"),
        Err(Error::NotFound {
            window: MARKER,
            len: 3
        })
    );
    assert_eq!(find_marker("", 1), None);
}

#[test]
fn test_exact_length() {
    assert_eq!(find_marker("abcd", MARKER), Some(4));
    assert_eq!(find_marker("abca", MARKER), None);
}

#[test]
fn test_no_distinct_window() {
    let data = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaabc";
    assert_eq!(
        part2(data),
        Err(Error::NotFound {
            window: MESSAGE,
            len: data.len()
        })
    );
}

#[test]
fn test_zero_window() {
    assert_eq!(find_marker("abc", 0), None);
    assert_eq!(scan("abc", 0), Err(Error::ZeroWindow));
}

#[test]
fn test_solve_error() {
    let input = Input::new("d06.txt", "abcdabcd");
    let e = solve(&input).unwrap_err();
    assert_eq!(e.to_string(), "part 2");
    assert!(matches!(
        e.downcast_ref::<Error>(),
        Some(Error::NotFound { window: MESSAGE, .. })
    ));
}

/// Short strings over a small alphabet mixing one and multi-byte characters.
fn stream(len: usize) -> impl Strategy<Value = String> {
    vec(select(vec!['a', 'b', 'c', 'd', 'é', 'ß', 'ж', '中', '🦀']), 0..len)
        .prop_map(|chars| chars.into_iter().collect::<String>())
}

proptest! {
    #[test]
    fn agrees_with_naive_scan(data in stream(64), window in 1..10usize) {
        prop_assert_eq!(find_marker(&data, window), naive(&data, window));
    }

    #[test]
    fn found_window_is_distinct(data in "\\PC{0,128}", window in 1..16usize) {
        if let Some(n) = find_marker(&data, window) {
            let found = data.chars().skip(n - window).take(window).collect::<HashSet<_>>();
            prop_assert_eq!(found.len(), window);
        }
    }
}
