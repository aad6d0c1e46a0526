//! End-to-end runs of the `medarch` binary against scratch directory trees.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn medarch() -> Command {
    Command::cargo_bin("medarch").unwrap()
}

fn write(root: &Path, rel: &str, len: usize) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, vec![b'm'; len]).unwrap();
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_help_and_version_exit_zero() {
    medarch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip-duplicates"))
        .stdout(predicate::str::contains("--exclude-type"));
    medarch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_positional_exits_one() {
    let tmp = tempdir().unwrap();
    medarch().arg(tmp.path()).assert().code(1);
    medarch().assert().code(1);
}

#[test]
fn test_bad_flags_exit_one() {
    let tmp = tempdir().unwrap();
    let dst = tmp.path().join("dst");
    medarch()
        .args(["--min-size", "10X"])
        .arg(tmp.path())
        .arg(&dst)
        .assert()
        .code(1);
    medarch()
        .args(["--exclude-type", "document"])
        .arg(tmp.path())
        .arg(&dst)
        .assert()
        .code(1);
    assert!(!dst.exists());
}

#[test]
fn test_missing_source_exits_one() {
    let tmp = tempdir().unwrap();
    medarch()
        .arg(tmp.path().join("nope"))
        .arg(tmp.path().join("dst"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
    assert!(!tmp.path().join("dst").exists());
}

#[test]
fn test_nothing_to_archive_exits_one() {
    let tmp = tempdir().unwrap();
    medarch()
        .args(["-e", "photo", "-e", "video", "-e", "sound"])
        .arg(tmp.path())
        .arg(tmp.path().join("dst"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nothing to archive"));
}

#[test]
fn test_no_files_found() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write(src.path(), "readme.txt", 4);
    medarch()
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching files found."))
        .stdout(predicate::str::contains("discovered: 0"));
    assert!(file_names(dst.path()).is_empty());
}

#[test]
fn test_preserve_and_flatten() {
    let src = tempdir().unwrap();
    write(src.path(), "2023/trip/img.jpg", 12);

    let preserved = tempdir().unwrap();
    medarch()
        .arg(src.path())
        .arg(preserved.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("copied:     1"));
    assert_eq!(
        fs::read(preserved.path().join("2023/trip/img.jpg")).unwrap(),
        vec![b'm'; 12]
    );

    let flat = tempdir().unwrap();
    medarch()
        .arg("--flatten")
        .arg(src.path())
        .arg(flat.path())
        .assert()
        .success();
    assert_eq!(file_names(flat.path()), vec!["img.jpg"]);
}

#[test]
fn test_collision_numbering_across_runs() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write(src.path(), "a/x.jpg", 10);
    write(src.path(), "b/x.jpg", 20);

    for _ in 0..2 {
        medarch()
            .arg("-f")
            .arg(src.path())
            .arg(dst.path())
            .assert()
            .success();
    }
    assert_eq!(
        file_names(dst.path()),
        vec!["x(1).jpg", "x(2).jpg", "x(3).jpg", "x.jpg"]
    );
    assert_eq!(fs::metadata(dst.path().join("x(3).jpg")).unwrap().len(), 20);
}

#[test]
fn test_skip_duplicates() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write(src.path(), "p.png", 100);
    write(src.path(), "q.png", 100);
    write(src.path(), "zero.png", 0);
    fs::write(dst.path().join("p.png"), vec![b'z'; 100]).unwrap();
    fs::write(dst.path().join("q.png"), vec![b'z'; 50]).unwrap();
    fs::write(dst.path().join("zero.png"), []).unwrap();

    medarch()
        .args(["--skip-duplicates", "--flatten"])
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped:    1"))
        .stdout(predicate::str::contains("copied:     2"));

    assert_eq!(fs::read(dst.path().join("p.png")).unwrap(), vec![b'z'; 100]);
    assert!(!dst.path().join("p(1).png").exists());
    assert_eq!(fs::metadata(dst.path().join("q(1).png")).unwrap().len(), 100);
    assert!(dst.path().join("zero(1).png").exists());
}

#[test]
fn test_size_and_type_filters() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write(src.path(), "tiny.jpg", 100);
    write(src.path(), "ok.jpg", 3 * 1024);
    write(src.path(), "huge.jpg", 9 * 1024);
    write(src.path(), "clip.mp4", 3 * 1024);

    medarch()
        .args(["-f", "-m", "1k", "-M", "8k", "-e", "video"])
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("discovered: 1"));
    assert_eq!(file_names(dst.path()), vec!["ok.jpg"]);
}

#[test]
fn test_dry_run_leaves_destination_untouched() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write(src.path(), "2023/a.jpg", 5);
    write(src.path(), "2024/b.mp3", 5);
    let target = dst.path().join("archive");

    medarch()
        .arg("--dry-run")
        .arg(src.path())
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create destination directory"))
        .stdout(predicate::str::contains("copied:     2"))
        .stdout(predicate::str::contains("dry run"));
    assert!(file_names(dst.path()).is_empty());
}

#[test]
fn test_verbose_logs_each_file() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write(src.path(), "a.jpg", 5);

    medarch()
        .arg("-v")
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("copied"))
        .stderr(predicate::str::contains("a.jpg"));
}

#[cfg(unix)]
#[test]
fn test_copy_error_keeps_exit_zero() {
    use std::os::unix::fs::PermissionsExt;

    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write(src.path(), "a.jpg", 5);
    write(src.path(), "locked/b.jpg", 5);
    fs::create_dir(dst.path().join("locked")).unwrap();
    fs::set_permissions(dst.path().join("locked"), fs::Permissions::from_mode(0o555)).unwrap();

    // root ignores directory permissions
    let probe = dst.path().join("locked/probe");
    if fs::write(&probe, b"").is_ok() {
        return;
    }

    medarch()
        .arg(src.path())
        .arg(dst.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("errors:     1"))
        .stdout(predicate::str::contains("copied:     1"));
    fs::set_permissions(dst.path().join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
}
