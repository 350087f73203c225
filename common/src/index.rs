use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroUsize;

use crate::error::HashTableError;
use crate::hashtable::HashTable;
use crate::queue::Queue;

pub type DocId = u32;

/// Bucket count shared by the indexer and the index loader, so that a loaded
/// index traverses in the same order it was saved in.
pub const INDEX_BUCKETS: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(n) => n,
    None => panic!("bucket count must be non-zero"),
};

/// Occurrences of one word in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentCount {
    pub doc_id: DocId,
    pub count: u32,
}

impl DocumentCount {
    pub fn new(doc_id: DocId, count: u32) -> Self { Self { doc_id, count } }
}

pub fn same_doc(d: &DocumentCount, id: &DocId) -> bool { d.doc_id == *id }

/// A word and the documents it occurs in, in first-seen order.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub word: String,
    pub documents: Queue<DocumentCount>,
}

impl IndexEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into(), documents: Queue::open() }
    }

    pub fn count_for(&self, doc_id: DocId) -> Option<u32> {
        self.documents.search(same_doc, &doc_id).map(|d| d.count)
    }
}

fn same_word(e: &IndexEntry, key: &[u8]) -> bool { e.word.as_bytes() == key }

/// Word → documents inverted index backed by [`HashTable`].
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    table: HashTable<IndexEntry>,
}

impl Default for InvertedIndex {
    fn default() -> Self { Self::new() }
}

impl InvertedIndex {
    pub fn new() -> Self { Self { table: HashTable::with_buckets(INDEX_BUCKETS) } }

    /// Count one more occurrence of `word` in `doc_id`. The word is expected to
    /// be normalized already.
    pub fn record(&mut self, word: &str, doc_id: DocId) -> Result<(), HashTableError> {
        if let Some(entry) = self.table.search_mut(word.as_bytes(), same_word) {
            match entry.documents.search_mut(same_doc, &doc_id) {
                Some(d) => d.count += 1,
                None => entry.documents.put(DocumentCount::new(doc_id, 1)),
            }
            return Ok(());
        }
        let mut entry = IndexEntry::new(word);
        entry.documents.put(DocumentCount::new(doc_id, 1));
        self.table.put(entry, word.as_bytes())
    }

    /// Add a fully built entry. Callers guarantee the word is not present yet.
    pub fn insert(&mut self, entry: IndexEntry) -> Result<(), HashTableError> {
        let key = entry.word.clone();
        self.table.put(entry, key.as_bytes())
    }

    pub fn lookup(&self, word: &str) -> Option<&IndexEntry> {
        self.table.search(word.as_bytes(), same_word)
    }

    pub fn apply<F: FnMut(&IndexEntry)>(&self, f: F) { self.table.apply(f); }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> + '_ { self.table.iter() }

    /// Number of distinct words.
    pub fn len(&self) -> usize { self.table.len() }

    pub fn is_empty(&self) -> bool { self.table.is_empty() }

    /// Sum of every count in the index.
    pub fn total_occurrences(&self) -> u64 {
        let mut total = 0u64;
        self.apply(|e| e.documents.apply(|d| total += u64::from(d.count)));
        total
    }

    /// Order-independent view of the contents, for comparing two indexes.
    pub fn to_sets(&self) -> BTreeMap<String, BTreeSet<(DocId, u32)>> {
        self.entries()
            .map(|e| (e.word.clone(), e.documents.iter().map(|d| (d.doc_id, d.count)).collect()))
            .collect()
    }
}
