pub mod eval;
pub mod query;
pub mod results;

use anyhow::{Context, Result};
use common::indexio::load_index;
use common::InvertedIndex;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub use query::{QueryError, Token};
pub use results::{OutputFormat, RankedDocument, SearchResponse};

/// Answers queries against a loaded index, resolving URLs from the page directory.
pub struct Querier {
    index: InvertedIndex,
    page_dir: PathBuf,
}

impl Querier {
    pub fn new(index: InvertedIndex, page_dir: impl Into<PathBuf>) -> Self {
        Self { index, page_dir: page_dir.into() }
    }

    pub fn open(page_dir: &Path, index_file: &Path) -> Result<Self> {
        let index = load_index(index_file).with_context(|| format!("loading index {}", index_file.display()))?;
        tracing::info!(words = index.len(), index = %index_file.display(), "index loaded");
        Ok(Self::new(index, page_dir))
    }

    /// `Ok(None)` when nothing queryable is left after tokenizing.
    pub fn search(&self, line: &str) -> Result<Option<SearchResponse>, QueryError> {
        let tokens = query::parse(line)?;
        if tokens.is_empty() {
            return Ok(None);
        }
        let query = query::render(&tokens);
        tracing::debug!(%query, "evaluating");
        let mut results = results::rank(eval::evaluate(&tokens, &self.index));
        results::resolve_urls(&mut results, &self.page_dir);
        Ok(Some(SearchResponse { query, total_hits: results.len(), results }))
    }
}

/// Answer one query per input line until end of input.
/// A line that is not UTF-8 is answered with `[invalid query]` like any other
/// bad query; only I/O errors end the loop early.
pub fn run<R: BufRead, W: Write>(querier: &Querier, mut input: R, mut out: W, format: OutputFormat, prompt: bool) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let answer = match std::str::from_utf8(&buf) {
            Ok(line) => querier.search(line.trim_end_matches(['\n', '\r'])),
            Err(e) => Err(QueryError::InvalidQuery(format!("not utf-8: {e}"))),
        };
        match answer {
            Ok(Some(resp)) => results::write_response(&mut out, &resp, format)?,
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(error = %e, "rejected query");
                writeln!(out, "[invalid query]")?;
            }
        }
        out.flush()?;
    }
    if prompt {
        writeln!(out)?;
    }
    Ok(())
}
