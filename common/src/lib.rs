pub mod error;
pub mod hashtable;
pub mod index;
pub mod indexio;
pub mod locked;
pub mod pageio;
pub mod queue;
pub mod webpage;
pub mod words;

pub use error::{HashTableError, IndexFileError, PageError};
pub use hashtable::HashTable;
pub use index::{DocId, DocumentCount, IndexEntry, InvertedIndex, INDEX_BUCKETS};
pub use locked::{LockedHashTable, LockedQueue};
pub use queue::Queue;
pub use webpage::{Depth, Page};
