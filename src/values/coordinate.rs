//! Coordinate tuples
//!
//! A coordinate is an immutable tuple of integers used as a grid index.
//! Unlike lists it supports vector arithmetic (element-wise addition,
//! scalar multiplication) and hashes, so it can key a map or a memo cache.

use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    values: Rc<Vec<i64>>,
}

impl Coordinate {
    pub fn new(values: Vec<i64>) -> Self {
        Coordinate {
            values: Rc::new(values),
        }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: i64) -> Option<i64> {
        if index >= 0 {
            self.values.get(index as usize).copied()
        } else {
            None
        }
    }

    /// Element-wise sum; the shorter operand is zero-extended.
    pub fn add(&self, other: &Coordinate) -> Coordinate {
        let len = self.len().max(other.len());
        let values = (0..len)
            .map(|i| {
                self.values.get(i).copied().unwrap_or(0)
                    + other.values.get(i).copied().unwrap_or(0)
            })
            .collect();
        Coordinate::new(values)
    }

    pub fn scale(&self, factor: i64) -> Coordinate {
        Coordinate::new(self.values.iter().map(|v| v * factor).collect())
    }

    /// Manhattan distance from the origin.
    pub fn grid_len(&self) -> i64 {
        self.values.iter().map(|v| v.abs()).sum()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "({})", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let a = Coordinate::new(vec![1, 2]);
        let b = Coordinate::new(vec![3, -1]);
        assert_eq!(a.add(&b), Coordinate::new(vec![4, 1]));
        assert_eq!(a.scale(3), Coordinate::new(vec![3, 6]));
        assert_eq!(b.grid_len(), 4);
    }
}
