use std::num::NonZeroUsize;

use crate::error::HashTableError;
use crate::queue::Queue;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the raw key bytes.
pub fn fnv1a(key: &[u8]) -> u32 {
    key.iter().fold(FNV_OFFSET, |h, b| (h ^ u32::from(*b)).wrapping_mul(FNV_PRIME))
}

/// Fixed-size chained hash table.
///
/// The key only selects a bucket; matching inside the bucket is done by the
/// caller's predicate, so elements carry their own identity. There is no
/// rehashing: size the table for the expected cardinality when opening it.
#[derive(Debug, Clone)]
pub struct HashTable<T> {
    buckets: Vec<Queue<T>>,
    len: usize,
}

impl<T> HashTable<T> {
    pub fn open(size: usize) -> Result<Self, HashTableError> {
        let size = NonZeroUsize::new(size).ok_or(HashTableError::ZeroBuckets)?;
        Ok(Self::with_buckets(size))
    }

    pub fn with_buckets(size: NonZeroUsize) -> Self {
        let buckets = (0..size.get()).map(|_| Queue::open()).collect();
        Self { buckets, len: 0 }
    }

    fn bucket_of(&self, key: &[u8]) -> usize {
        fnv1a(key) as usize % self.buckets.len()
    }

    pub fn put(&mut self, element: T, key: &[u8]) -> Result<(), HashTableError> {
        if key.is_empty() {
            return Err(HashTableError::EmptyKey);
        }
        let b = self.bucket_of(key);
        self.buckets[b].put(element);
        self.len += 1;
        Ok(())
    }

    /// First element in `key`'s bucket for which `pred(element, key)` holds.
    pub fn search<P>(&self, key: &[u8], pred: P) -> Option<&T>
    where
        P: Fn(&T, &[u8]) -> bool,
    {
        if key.is_empty() { return None; }
        self.buckets[self.bucket_of(key)].search(pred, key)
    }

    pub fn search_mut<P>(&mut self, key: &[u8], pred: P) -> Option<&mut T>
    where
        P: Fn(&T, &[u8]) -> bool,
    {
        if key.is_empty() { return None; }
        let b = self.bucket_of(key);
        self.buckets[b].search_mut(pred, key)
    }

    pub fn remove<P>(&mut self, key: &[u8], pred: P) -> Option<T>
    where
        P: Fn(&T, &[u8]) -> bool,
    {
        if key.is_empty() { return None; }
        let b = self.bucket_of(key);
        let removed = self.buckets[b].remove(pred, key);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Visit every element, bucket by bucket, in insertion order within a bucket.
    pub fn apply<F: FnMut(&T)>(&self, mut f: F) {
        for bucket in &self.buckets {
            bucket.apply(&mut f);
        }
    }

    pub fn apply_mut<F: FnMut(&mut T)>(&mut self, mut f: F) {
        for bucket in &mut self.buckets {
            bucket.apply_mut(&mut f);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flat_map(|b| b.iter())
    }

    pub fn close(self) {}

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn bucket_count(&self) -> usize { self.buckets.len() }
}

impl<T> IntoIterator for HashTable<T> {
    type Item = T;
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Queue<T>>>;
    fn into_iter(self) -> Self::IntoIter { self.buckets.into_iter().flatten() }
}
