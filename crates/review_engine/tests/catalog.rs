use std::fs;

use pretty_assertions::assert_eq;
use review_core::Tag;
use review_engine::list_input_files;
use tempfile::TempDir;

#[test]
fn lists_files_partitioned_and_sorted() {
    let temp = TempDir::new().unwrap();
    for name in [
        "b.pdf",
        "【標準】x.docx",
        "a.xlsx",
        "【待審】r.pdf",
        "~$lock.docx",
        ".hidden",
        "part.tmp",
    ] {
        fs::write(temp.path().join(name), b"x").unwrap();
    }
    fs::create_dir(temp.path().join("nested")).unwrap();

    let catalog = list_input_files(temp.path()).unwrap();

    assert_eq!(catalog.untagged, vec!["a.xlsx", "b.pdf"]);
    assert_eq!(catalog.tagged, vec!["【待審】r.pdf", "【標準】x.docx"]);
    assert_eq!(catalog.with_tag(Tag::Review), vec!["【待審】r.pdf"]);
}

#[test]
fn tagging_moves_entries_between_sides() {
    let temp = TempDir::new().unwrap();
    let names = ["one.pdf", "two.pdf", "three.pdf", "four.pdf"];
    for name in names {
        fs::write(temp.path().join(name), b"x").unwrap();
    }
    for name in &names[..3] {
        fs::rename(
            temp.path().join(name),
            temp.path().join(Tag::Template.apply(name)),
        )
        .unwrap();
    }

    let catalog = list_input_files(temp.path()).unwrap();
    assert_eq!(catalog.untagged.len(), 1);
    assert_eq!(catalog.tagged.len(), 3);
    assert_eq!(catalog.len(), names.len());
}

#[test]
fn missing_directory_is_empty() {
    let temp = TempDir::new().unwrap();
    let catalog = list_input_files(&temp.path().join("absent")).unwrap();
    assert!(catalog.is_empty());
}
