//! Explicit memoization cache.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;

/// A lock-guarded memo table for expensive computations.
///
/// Owned by whichever component needs memoization and passed around
/// explicitly; safe to share across the preprocessing worker pool.
#[derive(Debug, Default)]
pub struct Memo<K, V> {
    inner: Mutex<HashMap<K, V>>,
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, computing and storing it on a
    /// miss.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        let mut map = self.inner.lock().expect("memo lock");
        if let Some(value) = map.get(&key) {
            return value.clone();
        }
        let value = compute();
        map.insert(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("memo lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn computes_once_per_key() {
        let memo: Memo<String, usize> = Memo::new();
        let mut calls = 0;

        let first = memo.get_or_insert_with("apple".into(), || {
            calls += 1;
            42
        });
        let second = memo.get_or_insert_with("apple".into(), || {
            calls += 1;
            99
        });

        assert_eq!(first, 42);
        assert_eq!(second, 42);
        assert_eq!(calls, 1);
        assert_eq!(memo.len(), 1);
    }
}
