//! Direct-copy distribution through Updater

use confsync_updater::{Error, Updater, UpdaterConfig};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_config(dir: &Path, entries: &[(&str, &Path)]) {
    let map: serde_json::Map<String, serde_json::Value> = entries
        .iter()
        .map(|(source, dest)| {
            (
                source.to_string(),
                serde_json::Value::String(dest.to_string_lossy().into_owned()),
            )
        })
        .collect();
    fs::write(
        dir.join("config.json"),
        serde_json::to_string(&map).unwrap(),
    )
    .unwrap();
}

fn update(dir: &Path) -> confsync_updater::Result<confsync_updater::UpdateReport> {
    Updater::new(UpdaterConfig::new(dir))?.update()
}

#[test]
fn test_copy_creates_missing_destination() {
    let source = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("nested/dest");
    fs::create_dir(source.path().join("sub")).unwrap();
    fs::write(source.path().join("sub/file.txt"), "hello").unwrap();
    write_config(source.path(), &[("sub/file.txt", dest.as_path())]);

    let report = update(source.path()).unwrap();

    assert_eq!(fs::read_to_string(dest.join("file.txt")).unwrap(), "hello");
    assert_eq!(report.written, vec![dest.join("file.txt")]);
    assert_eq!(report.submitted, 0);
}

#[test]
fn test_copy_overwrites_existing_file() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("app.conf"), "new").unwrap();
    fs::write(dest.path().join("app.conf"), "old").unwrap();
    write_config(source.path(), &[("app.conf", dest.path())]);

    update(source.path()).unwrap();

    assert_eq!(fs::read_to_string(dest.path().join("app.conf")).unwrap(), "new");
}

#[test]
fn test_identical_destination_is_reported_unchanged() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("app.conf"), "same").unwrap();
    fs::write(dest.path().join("app.conf"), "same").unwrap();
    write_config(source.path(), &[("app.conf", dest.path())]);

    let report = update(source.path()).unwrap();

    assert!(report.written.is_empty());
    assert_eq!(report.unchanged, vec![dest.path().join("app.conf")]);
    assert!(report.is_empty());
}

#[test]
fn test_missing_source_aborts_before_any_write() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(source.path().join("a.txt"), "a").unwrap();
    write_config(
        source.path(),
        &[("a.txt", dest.path()), ("z-missing.txt", dest.path())],
    );

    let err = update(source.path()).unwrap_err();

    assert!(matches!(err, Error::SourceRead { .. }), "got: {}", err);
    assert!(err.to_string().contains("z-missing.txt"));
    assert!(!dest.path().join("a.txt").exists());
}

#[test]
fn test_several_files_to_several_destinations() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let etc = dest.path().join("etc");
    let opt = dest.path().join("opt");
    fs::write(source.path().join("one.conf"), "1").unwrap();
    fs::write(source.path().join("two.conf"), "2").unwrap();
    write_config(
        source.path(),
        &[("one.conf", etc.as_path()), ("two.conf", opt.as_path())],
    );

    let report = update(source.path()).unwrap();

    assert_eq!(report.written.len(), 2);
    assert_eq!(fs::read_to_string(etc.join("one.conf")).unwrap(), "1");
    assert_eq!(fs::read_to_string(opt.join("two.conf")).unwrap(), "2");
}

#[cfg(unix)]
#[test]
fn test_overwrite_keeps_destination_mode() {
    use std::os::unix::fs::PermissionsExt;

    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let target = dest.path().join("secret.conf");
    fs::write(source.path().join("secret.conf"), "rotated").unwrap();
    fs::write(&target, "old").unwrap();
    fs::set_permissions(&target, fs::Permissions::from_mode(0o600)).unwrap();
    write_config(source.path(), &[("secret.conf", dest.path())]);

    update(source.path()).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "rotated");
    assert_eq!(
        fs::metadata(&target).unwrap().permissions().mode() & 0o777,
        0o600
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_destination_is_written_through() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let real = TempDir::new().unwrap();
    let real_file = real.path().join("app.conf");
    let link = dest.path().join("app.conf");
    fs::write(source.path().join("app.conf"), "new").unwrap();
    fs::write(&real_file, "old").unwrap();
    std::os::unix::fs::symlink(&real_file, &link).unwrap();
    write_config(source.path(), &[("app.conf", dest.path())]);

    update(source.path()).unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&real_file).unwrap(), "new");
}
