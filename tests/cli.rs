//! The huffpack binary, driven through files

use std::{fs, path::Path, process::Command};

use aok::{OK, Void};

const BIN: &str = env!("CARGO_BIN_EXE_huffpack");

const TEXT: &[u8] = b"she sells sea shells by the sea shore";

fn huffpack(args: &[&str]) -> Void {
    let out = Command::new(BIN).args(args).output()?;
    assert!(
        out.status.success(),
        "huffpack {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    OK
}

fn path(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn test_combined_roundtrip() -> Void {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("in.txt");
    let packed = dir.path().join("in.huff");
    let output = dir.path().join("out.txt");
    fs::write(&input, TEXT)?;

    huffpack(&["compress", path(&input), "-o", path(&packed)])?;
    huffpack(&["decompress", path(&packed), "-o", path(&output)])?;

    assert_eq!(fs::read(&output)?, TEXT);
    OK
}

#[test]
fn test_split_roundtrip() -> Void {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("in.txt");
    let packed = dir.path().join("out.bin");
    let book = dir.path().join("out.bin.codebook");
    let output = dir.path().join("out.txt");
    fs::write(&input, TEXT)?;

    huffpack(&["compress", path(&input), "-o", path(&packed), "--split"])?;
    assert!(book.exists());
    huffpack(&[
        "decompress",
        path(&packed),
        "--codebook",
        path(&book),
        "-o",
        path(&output),
    ])?;

    assert_eq!(fs::read(&output)?, TEXT);
    OK
}

#[test]
fn test_split_output_named_like_a_code_book() -> Void {
    // the payload must not overwrite its own code book
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("in.txt");
    let packed = dir.path().join("out.codebook");
    let book = dir.path().join("out.codebook.codebook");
    let output = dir.path().join("out.txt");
    fs::write(&input, TEXT)?;

    huffpack(&["compress", path(&input), "-o", path(&packed), "--split"])?;
    assert_ne!(fs::read(&packed)?, fs::read(&book)?);
    huffpack(&[
        "decompress",
        path(&packed),
        "--codebook",
        path(&book),
        "-o",
        path(&output),
    ])?;

    assert_eq!(fs::read(&output)?, TEXT);
    OK
}

#[test]
fn test_missing_input_fails() -> Void {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.txt");
    let out = Command::new(BIN)
        .args(["compress", path(&missing)])
        .output()?;
    assert!(!out.status.success());
    OK
}
