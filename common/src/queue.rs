use std::collections::VecDeque;

/// FIFO queue of owned elements.
///
/// `search` and `remove` scan head to tail and never reorder the elements they
/// leave behind.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self { Self { items: VecDeque::new() } }
}

impl<T> Queue<T> {
    pub fn open() -> Self { Self::default() }

    /// Append at the tail.
    pub fn put(&mut self, element: T) { self.items.push_back(element); }

    /// Remove and return the head element, `None` when empty.
    pub fn get(&mut self) -> Option<T> { self.items.pop_front() }

    pub fn apply<F: FnMut(&T)>(&self, f: F) { self.items.iter().for_each(f); }

    pub fn apply_mut<F: FnMut(&mut T)>(&mut self, f: F) { self.items.iter_mut().for_each(f); }

    /// First element for which `pred(element, key)` holds, left in place.
    pub fn search<K: ?Sized, P>(&self, pred: P, key: &K) -> Option<&T>
    where
        P: Fn(&T, &K) -> bool,
    {
        self.items.iter().find(|e| pred(e, key))
    }

    pub fn search_mut<K: ?Sized, P>(&mut self, pred: P, key: &K) -> Option<&mut T>
    where
        P: Fn(&T, &K) -> bool,
    {
        self.items.iter_mut().find(|e| pred(e, key))
    }

    /// Like `search`, but takes the match out of the queue.
    pub fn remove<K: ?Sized, P>(&mut self, pred: P, key: &K) -> Option<T>
    where
        P: Fn(&T, &K) -> bool,
    {
        let pos = self.items.iter().position(|e| pred(e, key))?;
        self.items.remove(pos)
    }

    /// Move every element of `other` onto the tail of `self`, consuming `other`.
    pub fn concat(&mut self, mut other: Queue<T>) { self.items.append(&mut other.items); }

    /// Drop the queue. Elements that should outlive it must be taken out first.
    pub fn close(self) {}

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> { self.items.iter() }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = std::collections::vec_deque::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter { self.items.into_iter() }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}
