use confsync_fs::{DirState, Error, probe_dir};
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

#[rstest]
#[case(&[], DirState::Empty)]
#[case(&["a.txt"], DirState::Populated)]
#[case(&["sub/b.txt"], DirState::Populated)]
fn test_probe_dir_contents(#[case] files: &[&str], #[case] expected: DirState) {
    let temp = TempDir::new().unwrap();
    for file in files {
        let path = temp.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    assert_eq!(probe_dir(temp.path()).unwrap(), expected);
}

#[test]
fn test_probe_dir_missing_nested_path() {
    let temp = TempDir::new().unwrap();
    assert_eq!(
        probe_dir(&temp.path().join("a/b/c")).unwrap(),
        DirState::Missing
    );
}

#[test]
fn test_dir_below_regular_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("plain.txt");
    fs::write(&file, "x").unwrap();

    let err = probe_dir(&file.join("child")).unwrap_err();

    assert!(matches!(err, Error::Io { .. }), "got: {}", err);
    assert!(err.to_string().contains("plain.txt"), "got: {}", err);
}
