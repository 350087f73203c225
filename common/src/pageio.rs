//! Page files: `<dir>/<id>` holding the url, depth, html byte length and html,
//! one field per line with the html running to end of file.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::PageError;
use crate::webpage::{Depth, Page};
use crate::DocId;

pub fn page_path(dir: &Path, id: DocId) -> PathBuf { dir.join(id.to_string()) }

pub fn save_page(page: &Page, id: DocId, dir: &Path) -> Result<(), PageError> {
    let mut f = BufWriter::new(File::create(page_path(dir, id))?);
    write!(f, "{}\n{}\n{}\n", page.url, page.depth, page.html_len())?;
    f.write_all(page.html.as_bytes())?;
    f.flush()?;
    Ok(())
}

pub fn load_page(id: DocId, dir: &Path) -> Result<Page, PageError> {
    let raw = match fs::read_to_string(page_path(dir, id)) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(PageError::NotFound(id)),
        Err(e) => return Err(e.into()),
    };
    let mut fields = raw.splitn(4, '\n');
    let url = fields.next().filter(|u| !u.is_empty())
        .ok_or_else(|| PageError::Malformed(id, "missing url".into()))?;
    let depth: Depth = fields.next()
        .and_then(|d| d.trim().parse().ok())
        .ok_or_else(|| PageError::Malformed(id, "bad depth".into()))?;
    let declared: usize = fields.next()
        .and_then(|n| n.trim().parse().ok())
        .ok_or_else(|| PageError::Malformed(id, "bad html length".into()))?;
    let html = fields.next()
        .ok_or_else(|| PageError::Malformed(id, "missing html".into()))?;
    if html.len() != declared {
        return Err(PageError::LengthMismatch { id, declared, actual: html.len() });
    }
    Ok(Page::new(url, depth, html))
}

/// Ids of the page files directly inside `dir`, ascending. Entries whose name
/// is not a decimal id are ignored.
pub fn page_ids(dir: &Path) -> Result<Vec<DocId>, PageError> {
    let mut ids = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| PageError::Io(e.into()))?;
        if !entry.file_type().is_file() { continue; }
        match entry.file_name().to_str().and_then(|n| n.parse::<DocId>().ok()) {
            Some(id) => ids.push(id),
            None => tracing::debug!(path = %entry.path().display(), "not a page file, skipped"),
        }
    }
    ids.sort_unstable();
    Ok(ids)
}
