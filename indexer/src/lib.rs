use anyhow::{bail, Context, Result};
use common::indexio::save_index;
use common::pageio::{load_page, page_ids};
use common::words::normalize_word;
use common::{DocId, InvertedIndex};
use std::path::Path;

/// Index every page file in `page_dir`, in ascending id order.
///
/// A page that cannot be loaded aborts the build.
pub fn build_index(page_dir: &Path) -> Result<InvertedIndex> {
    if !page_dir.is_dir() {
        bail!("page directory {} does not exist", page_dir.display());
    }
    let mut index = InvertedIndex::new();
    for id in page_ids(page_dir)? {
        index_page(&mut index, page_dir, id)?;
    }
    tracing::info!(words = index.len(), occurrences = index.total_occurrences(), "ingested pages");
    Ok(index)
}

fn index_page(index: &mut InvertedIndex, page_dir: &Path, id: DocId) -> Result<()> {
    let page = load_page(id, page_dir).with_context(|| format!("loading page {id}"))?;
    let mut accepted = 0usize;
    for word in page.words().filter_map(|w| normalize_word(&w)) {
        index.record(&word, id)?;
        accepted += 1;
    }
    tracing::debug!(id, url = %page.url, accepted, "indexed page");
    Ok(())
}

/// Build the index for `page_dir` and write it to `index_file`.
pub fn run(page_dir: &Path, index_file: &Path) -> Result<InvertedIndex> {
    let index = build_index(page_dir)?;
    save_index(&index, index_file).with_context(|| format!("writing index {}", index_file.display()))?;
    tracing::info!(index = %index_file.display(), "index build complete");
    Ok(index)
}
