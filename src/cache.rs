/// Bounded memo table with FIFO eviction (when full, the oldest key goes).
use std::collections::HashMap;
use std::collections::VecDeque;
use std::hash::Hash;

#[derive(Clone)]
pub struct Cache<K, V> {
  capacity: usize,
  /// Insertion order, oldest at the front
  keys_fifo: VecDeque<K>,
  map: HashMap<K, V>,
}

impl<K, V> Cache<K, V>
where
  K: Eq + Hash + Clone,
{
  /// A capacity of 0 means "effectively unbounded" (one million entries).
  pub fn new(capacity: usize) -> Self {
    let capacity = if capacity == 0 { 1_000_000 } else { capacity };
    Cache {
      capacity,
      keys_fifo: VecDeque::new(),
      map: HashMap::new(),
    }
  }

  pub fn get(&self, key: &K) -> Option<&V> {
    self.map.get(key)
  }

  /// Store a value, evicting the oldest key if the table is full.
  pub fn put(&mut self, key: K, value: V) {
    // existing keys keep their place in the queue
    if let Some(slot) = self.map.get_mut(&key) {
      *slot = value;
      return;
    }

    if self.keys_fifo.len() >= self.capacity {
      if let Some(oldest_key) = self.keys_fifo.pop_front() {
        self.map.remove(&oldest_key);
      }
    }

    self.keys_fifo.push_back(key.clone());
    self.map.insert(key, value);
  }

  pub fn has(&self, key: &K) -> bool {
    self.map.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.map.len()
  }

  pub fn is_empty(&self) -> bool {
    self.map.is_empty()
  }

  pub fn clear(&mut self) {
    self.keys_fifo.clear();
    self.map.clear();
  }
}
