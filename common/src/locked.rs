//! Thread-safe wrappers over [`HashTable`] and [`Queue`].
//!
//! Each instance owns its own mutex, so independent structures never contend.
//! Every call takes the lock once; callbacks passed to `apply`, `update` or
//! `with_match` run while it is held and must not call back into the same
//! instance.

use parking_lot::Mutex;

use crate::error::HashTableError;
use crate::hashtable::HashTable;
use crate::queue::Queue;

#[derive(Debug)]
pub struct LockedHashTable<T> {
    inner: Mutex<HashTable<T>>,
}

impl<T> LockedHashTable<T> {
    pub fn open(size: usize) -> Result<Self, HashTableError> {
        Ok(Self { inner: Mutex::new(HashTable::open(size)?) })
    }

    pub fn put(&self, element: T, key: &[u8]) -> Result<(), HashTableError> {
        self.inner.lock().put(element, key)
    }

    /// Insert `element` unless an element matching `pred` is already present.
    /// Returns `true` when the element was inserted.
    pub fn put_if_absent<P>(&self, element: T, key: &[u8], pred: P) -> Result<bool, HashTableError>
    where
        P: Fn(&T, &[u8]) -> bool,
    {
        let mut table = self.inner.lock();
        if table.search(key, pred).is_some() {
            return Ok(false);
        }
        table.put(element, key)?;
        Ok(true)
    }

    pub fn search<P>(&self, key: &[u8], pred: P) -> Option<T>
    where
        T: Clone,
        P: Fn(&T, &[u8]) -> bool,
    {
        self.inner.lock().search(key, pred).cloned()
    }

    pub fn contains<P>(&self, key: &[u8], pred: P) -> bool
    where
        P: Fn(&T, &[u8]) -> bool,
    {
        self.inner.lock().search(key, pred).is_some()
    }

    /// Run `f` on the matching element under the lock.
    pub fn with_match<P, F, R>(&self, key: &[u8], pred: P, f: F) -> Option<R>
    where
        P: Fn(&T, &[u8]) -> bool,
        F: FnOnce(&T) -> R,
    {
        self.inner.lock().search(key, pred).map(f)
    }

    pub fn update<P, F>(&self, key: &[u8], pred: P, f: F) -> bool
    where
        P: Fn(&T, &[u8]) -> bool,
        F: FnOnce(&mut T),
    {
        match self.inner.lock().search_mut(key, pred) {
            Some(e) => {
                f(e);
                true
            }
            None => false,
        }
    }

    pub fn remove<P>(&self, key: &[u8], pred: P) -> Option<T>
    where
        P: Fn(&T, &[u8]) -> bool,
    {
        self.inner.lock().remove(key, pred)
    }

    pub fn apply<F: FnMut(&T)>(&self, f: F) { self.inner.lock().apply(f); }

    pub fn len(&self) -> usize { self.inner.lock().len() }

    pub fn is_empty(&self) -> bool { self.inner.lock().is_empty() }

    pub fn close(self) {}

    /// Unwrap into the plain table once no other thread holds a reference.
    pub fn into_inner(self) -> HashTable<T> { self.inner.into_inner() }
}

#[derive(Debug)]
pub struct LockedQueue<T> {
    inner: Mutex<Queue<T>>,
}

impl<T> Default for LockedQueue<T> {
    fn default() -> Self { Self { inner: Mutex::new(Queue::open()) } }
}

impl<T> LockedQueue<T> {
    pub fn open() -> Self { Self::default() }

    pub fn put(&self, element: T) { self.inner.lock().put(element); }

    pub fn get(&self) -> Option<T> { self.inner.lock().get() }

    pub fn apply<F: FnMut(&T)>(&self, f: F) { self.inner.lock().apply(f); }

    pub fn search<K: ?Sized, P>(&self, pred: P, key: &K) -> Option<T>
    where
        T: Clone,
        P: Fn(&T, &K) -> bool,
    {
        self.inner.lock().search(pred, key).cloned()
    }

    pub fn remove<K: ?Sized, P>(&self, pred: P, key: &K) -> Option<T>
    where
        P: Fn(&T, &K) -> bool,
    {
        self.inner.lock().remove(pred, key)
    }

    pub fn concat(&self, other: Queue<T>) { self.inner.lock().concat(other); }

    pub fn len(&self) -> usize { self.inner.lock().len() }

    pub fn is_empty(&self) -> bool { self.inner.lock().is_empty() }

    pub fn close(self) {}

    pub fn into_inner(self) -> Queue<T> { self.inner.into_inner() }
}
