//! Index files: one line per word, `<word> <docId> <count> <docId> <count> ...`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::IndexFileError;
use crate::index::{same_doc, DocumentCount, IndexEntry, InvertedIndex};
use crate::words::is_alphabetic;

pub fn save_index(index: &InvertedIndex, path: &Path) -> Result<(), IndexFileError> {
    let mut out = BufWriter::new(File::create(path)?);
    for entry in index.entries() {
        out.write_all(entry.word.as_bytes())?;
        for d in entry.documents.iter() {
            write!(out, " {} {}", d.doc_id, d.count)?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()?;
    tracing::debug!(path = %path.display(), words = index.len(), "index saved");
    Ok(())
}

pub fn load_index(path: &Path) -> Result<InvertedIndex, IndexFileError> {
    let reader = BufReader::new(File::open(path)?);
    let mut index = InvertedIndex::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let entry = parse_line(&line).map_err(|reason| IndexFileError::Malformed { line: n + 1, reason })?;
        if index.lookup(&entry.word).is_some() {
            return Err(IndexFileError::Malformed { line: n + 1, reason: format!("duplicate word {}", entry.word) });
        }
        index.insert(entry)?;
    }
    tracing::debug!(path = %path.display(), words = index.len(), "index loaded");
    Ok(index)
}

fn parse_line(line: &str) -> Result<IndexEntry, String> {
    let mut fields = line.split_whitespace();
    let word = fields.next().ok_or("empty line")?;
    if !is_alphabetic(word) || word.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(format!("word {word:?} is not lowercase alphabetic"));
    }
    let mut entry = IndexEntry::new(word);
    let nums = fields
        .map(|f| f.parse::<u32>().ok().filter(|v| *v > 0).ok_or_else(|| format!("{f:?} is not a positive integer")))
        .collect::<Result<Vec<_>, _>>()?;
    if nums.len() % 2 != 0 {
        return Err("odd number of id/count fields".into());
    }
    for pair in nums.chunks_exact(2) {
        if entry.documents.search(same_doc, &pair[0]).is_some() {
            return Err(format!("document {} listed twice", pair[0]));
        }
        entry.documents.put(DocumentCount::new(pair[0], pair[1]));
    }
    Ok(entry)
}
