use common::pageio::load_page;
use common::{DocId, DocumentCount, Queue};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedDocument {
    pub doc_id: DocId,
    pub score: u32,
    /// Empty when the page file could not be read.
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_hits: usize,
    pub results: Vec<RankedDocument>,
}

/// Highest score first; equal scores by ascending id.
pub fn rank(docs: Queue<DocumentCount>) -> Vec<RankedDocument> {
    let mut ranked: Vec<RankedDocument> = docs
        .into_iter()
        .map(|d| RankedDocument { doc_id: d.doc_id, score: d.count, url: String::new() })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));
    ranked
}

pub fn resolve_urls(results: &mut [RankedDocument], page_dir: &Path) {
    for r in results.iter_mut() {
        match load_page(r.doc_id, page_dir) {
            Ok(page) => r.url = page.url,
            Err(e) => tracing::warn!(doc_id = r.doc_id, error = %e, "cannot resolve url"),
        }
    }
}

/// Shown in text output in place of a URL that could not be resolved.
pub const UNKNOWN_URL: &str = "(unknown)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn write_response<W: Write>(out: &mut W, resp: &SearchResponse, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, resp)?;
            writeln!(out)
        }
        OutputFormat::Text if resp.results.is_empty() => writeln!(out, "[no matching documents]"),
        OutputFormat::Text => {
            for r in &resp.results {
                let url = if r.url.is_empty() { UNKNOWN_URL } else { r.url.as_str() };
                writeln!(out, "rank:{} doc:{} : {}", r.score, r.doc_id, url)?;
            }
            Ok(())
        }
    }
}
