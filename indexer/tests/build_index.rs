use common::indexio::load_index;
use common::pageio::save_page;
use common::{DocId, Page};
use std::fs;
use std::path::Path;

fn write_pages(dir: &Path, pages: &[(DocId, &str)]) {
    for (id, body) in pages {
        let html = format!("<html><head><title>Page</title></head><body>{body}</body></html>");
        let page = Page::new(format!("https://site.test/{id}.html"), 1, html);
        save_page(&page, *id, dir).unwrap();
    }
}

fn counts(index: &common::InvertedIndex, word: &str) -> Vec<(DocId, u32)> {
    index
        .lookup(word)
        .map(|e| e.documents.iter().map(|d| (d.doc_id, d.count)).collect())
        .unwrap_or_default()
}

#[test]
fn counts_normalized_words_per_page() {
    let dir = tempfile::tempdir().unwrap();
    write_pages(
        dir.path(),
        &[
            (1, "Cats chase DOGS. cats nap; a cat is ok"),
            (2, "dogs and more dogs, x2 robots R2D2"),
            (10, "cats"),
        ],
    );
    let index = indexer::build_index(dir.path()).unwrap();

    assert_eq!(counts(&index, "cats"), vec![(1, 2), (10, 1)]);
    assert_eq!(counts(&index, "dogs"), vec![(1, 1), (2, 2)]);
    assert_eq!(counts(&index, "page"), vec![(1, 1), (2, 1), (10, 1)]);
    assert!(index.lookup("is").is_none());
    assert!(index.lookup("ok").is_none());
    assert!(index.lookup("r2d2").is_none());
    assert!(index.lookup("x2").is_none());
}

#[test]
fn documents_listed_in_ascending_page_order() {
    let dir = tempfile::tempdir().unwrap();
    // written out of order; ids 2 and 10 sort numerically, not lexically
    write_pages(dir.path(), &[(10, "zebra"), (2, "zebra"), (1, "zebra")]);
    let index = indexer::build_index(dir.path()).unwrap();
    let ids: Vec<DocId> = counts(&index, "zebra").into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![1, 2, 10]);
}

#[test]
fn non_numeric_entries_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_pages(dir.path(), &[(1, "hello world")]);
    fs::write(dir.path().join("README"), "not a page").unwrap();
    let index = indexer::build_index(dir.path()).unwrap();
    assert_eq!(counts(&index, "hello"), vec![(1, 1)]);
}

#[test]
fn broken_page_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_pages(dir.path(), &[(1, "hello")]);
    fs::write(dir.path().join("2"), "https://site.test/\n0\n999\nshort").unwrap();
    assert!(indexer::build_index(dir.path()).is_err());
}

#[test]
fn missing_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    assert!(indexer::build_index(&dir.path().join("absent")).is_err());
}

#[test]
fn run_writes_loadable_index() {
    let dir = tempfile::tempdir().unwrap();
    let pages = dir.path().join("pages");
    fs::create_dir(&pages).unwrap();
    write_pages(&pages, &[(1, "alpha beta"), (2, "beta gamma beta")]);
    let index_file = dir.path().join("index");

    let built = indexer::run(&pages, &index_file).unwrap();
    let loaded = load_index(&index_file).unwrap();
    assert_eq!(loaded.to_sets(), built.to_sets());
    assert_eq!(loaded.lookup("beta").unwrap().count_for(2), Some(2));
}
