use std::io::Write;

use super::Input;

#[test]
fn test_trailing_whitespace() {
    let input = Input::new("test", "mjqjpqmgbljsphdztnvjfqwrcgsmlb \r\n\n\t");
    assert_eq!(input.as_str(), "mjqjpqmgbljsphdztnvjfqwrcgsmlb");
    assert_eq!(input.len(), 30);
}

#[test]
fn test_lines() {
    let input = Input::new("test", "vJrw\r\njqHR\n\nPmmd\n");
    let lines = input.lines().collect::<Vec<_>>();
    assert_eq!(lines, ["vJrw", "jqHR", "", "Pmmd"]);
}

#[test]
fn test_empty() {
    let input = Input::new("test", " \n\n");
    assert!(input.is_empty());
    assert_eq!(input.lines().count(), 0);
}

#[test]
fn test_open() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "abc").unwrap();
    writeln!(file, "def").unwrap();

    let input = Input::open(file.path()).unwrap();
    assert_eq!(input.path(), file.path());
    assert_eq!(input.lines().collect::<Vec<_>>(), ["abc", "def"]);
}

#[test]
fn test_open_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");

    let error = Input::open(&path).unwrap_err();
    assert_eq!(error.to_string(), path.display().to_string());
    assert!(error.root_cause().downcast_ref::<std::io::Error>().is_some());
}
