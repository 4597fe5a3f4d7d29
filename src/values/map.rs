//! Key-value store
//!
//! Maps are keyed by the hashable projection of a value ([`MemoKey`]), so
//! numbers, text, coordinates and the null sentinel can be keys while
//! containers and callables cannot. Fetching a missing or unhashable key
//! yields `Absent` rather than failing, matching the stack's permissive
//! underflow behavior.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::values::list::List;
use crate::values::{MemoKey, Value};

#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: Rc<RefCell<FxHashMap<MemoKey, Value>>>,
}

impl Map {
    pub fn new() -> Self {
        Map::default()
    }

    pub fn fetch(&self, key: &Value) -> Value {
        match key.memo_key() {
            Some(k) => self
                .entries
                .borrow()
                .get(&k)
                .cloned()
                .unwrap_or(Value::Absent),
            None => Value::Absent,
        }
    }

    /// Insert under a hashable key; unhashable keys are ignored.
    pub fn set(&self, key: &Value, value: Value) {
        if let Some(k) = key.memo_key() {
            self.entries.borrow_mut().insert(k, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Keys in sorted order (the store itself is unordered).
    pub fn keys(&self) -> List {
        let mut keys: Vec<Value> = self
            .entries
            .borrow()
            .keys()
            .cloned()
            .map(MemoKey::into_value)
            .collect();
        keys.sort_by(|a, b| a.compare(b));
        List::new(keys)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.entries, &other.entries) {
            return true;
        }
        *self.entries.borrow() == *other.entries.borrow()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.borrow();
        let mut keys: Vec<&MemoKey> = entries.keys().collect();
        keys.sort_by(|a, b| {
            (*a).clone()
                .into_value()
                .compare(&(*b).clone().into_value())
        });
        let parts: Vec<String> = keys
            .iter()
            .map(|k| format!("{}: {}", k, entries[k]))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_and_set() {
        let map = Map::new();
        map.set(&Value::Number(1), Value::Text("one".to_string()));
        assert_eq!(map.fetch(&Value::Number(1)), Value::Text("one".to_string()));
        assert_eq!(map.fetch(&Value::Number(2)), Value::Absent);
    }

    #[test]
    fn test_unhashable_keys_are_ignored() {
        let map = Map::new();
        let key = Value::List(List::new(vec![]));
        map.set(&key, Value::Number(1));
        assert!(map.is_empty());
        assert_eq!(map.fetch(&key), Value::Absent);
    }
}
