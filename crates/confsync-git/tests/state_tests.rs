//! Classification of local paths before synchronization

use confsync_git::{Error, RepoState, classify};
use confsync_test_utils::SourceRepo;
use rstest::rstest;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn layout(kind: &str, root: &Path) -> PathBuf {
    match kind {
        "absent" => root.join("missing"),
        "empty" => root.to_path_buf(),
        "file_entry" => {
            fs::write(root.join("notes.txt"), "x").unwrap();
            root.to_path_buf()
        }
        "hidden_entry" => {
            fs::write(root.join(".keep"), "").unwrap();
            root.to_path_buf()
        }
        "regular_file" => {
            let path = root.join("file");
            fs::write(&path, "x").unwrap();
            path
        }
        _ => unreachable!("unknown layout {}", kind),
    }
}

#[rstest]
#[case::absent("absent", RepoState::Absent)]
#[case::empty("empty", RepoState::Empty)]
#[case::file_entry("file_entry", RepoState::NonEmptyNonRepo)]
#[case::hidden_entry("hidden_entry", RepoState::NonEmptyNonRepo)]
#[case::regular_file("regular_file", RepoState::NonEmptyNonRepo)]
fn test_classify_layouts(#[case] kind: &str, #[case] expected: RepoState) {
    let temp = TempDir::new().unwrap();
    let path = layout(kind, temp.path());

    assert_eq!(classify(&path).unwrap(), expected);
}

#[test]
fn test_subdirectory_of_working_copy_is_foreign() {
    let source = SourceRepo::with_files(&[("nested/app.conf", b"x")]);

    assert_eq!(
        classify(&source.path().join("nested")).unwrap(),
        RepoState::NonEmptyNonRepo
    );
    assert_eq!(classify(source.path()).unwrap(), RepoState::ExistingRepo);
}

#[test]
fn test_path_below_regular_file_is_inspection_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("plain.txt");
    fs::write(&file, "x").unwrap();
    let below_file = file.join("child");

    let err = classify(&below_file).unwrap_err();

    assert!(
        matches!(err, Error::Probe { ref path, .. } if *path == below_file),
        "got: {}",
        err
    );
}
