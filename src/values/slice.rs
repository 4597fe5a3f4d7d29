//! Slice designators
//!
//! A slice is a `start/stop/step` triple with every part optional. It does
//! double duty: as a subscript it picks regularly spaced slots out of a
//! list or string (zero-based, stop-exclusive), and as a loop source it
//! generates the arithmetic progression `start, start+step, …` while short
//! of `stop`.

use std::fmt;

use crate::values::Value;

/// Value generated for an unbounded slice iterated as a progression.
const UNBOUNDED: i64 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl Slice {
    /// Build from raw parameter values; anything non-numeric means "default".
    pub fn new(start: &Value, stop: &Value, step: &Value) -> Self {
        fn clean(v: &Value) -> Option<i64> {
            match v {
                Value::Absent => None,
                other => other.int_value(),
            }
        }
        Slice {
            start: clean(start),
            stop: clean(stop),
            step: clean(step),
        }
    }

    /// Progression bounds for iteration: `(start, stop, step)` with the
    /// original's defaulting rules. The stop bound is exclusive.
    pub fn progression(&self) -> (i64, i64, i64) {
        let start = self
            .start
            .unwrap_or(if self.stop.unwrap_or(1) > 0 { 1 } else { -1 });
        let stop = self.stop.unwrap_or(if self.step.unwrap_or(1) > 0 {
            UNBOUNDED
        } else {
            -UNBOUNDED
        });
        let step = self.step.unwrap_or(if stop > start { 1 } else { -1 });
        (start, stop, step)
    }

    /// The in-range indices this slice designates on a sequence of `len`
    /// slots. Zero-based, stop-exclusive; a missing step follows the
    /// direction of the bounds.
    pub fn indices(&self, len: usize) -> Vec<usize> {
        let len = len as i64;
        let step = self.step.unwrap_or_else(|| {
            let ascending = self.stop.unwrap_or(len) >= self.start.unwrap_or(0);
            if ascending {
                1
            } else {
                -1
            }
        });
        if step == 0 {
            return Vec::new();
        }

        let (first, last) = if step > 0 {
            (self.start.unwrap_or(0), self.stop.unwrap_or(len))
        } else {
            (self.start.unwrap_or(len - 1), self.stop.unwrap_or(-1))
        };

        let mut out = Vec::new();
        let mut i = first;
        while (step > 0 && i < last) || (step < 0 && i > last) {
            if i >= 0 && i < len {
                out.push(i as usize);
            }
            i += step;
        }
        out
    }

    /// Apply to a string, selecting characters by index.
    pub fn slice_string(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        self.indices(chars.len())
            .into_iter()
            .map(|i| chars[i])
            .collect()
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part(v: &Option<i64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }
        write!(
            f,
            "[{}:{}:{}]",
            part(&self.start),
            part(&self.stop),
            part(&self.step)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Slice {
        Slice { start, stop, step }
    }

    #[test]
    fn test_subscript_indices() {
        // [2::3] over nine slots
        assert_eq!(slice(Some(2), None, Some(3)).indices(9), vec![2, 5, 8]);
        // [1::2] over six slots
        assert_eq!(slice(Some(1), None, Some(2)).indices(6), vec![1, 3, 5]);
        // [2:4] is stop-exclusive
        assert_eq!(slice(Some(2), Some(4), None).indices(6), vec![2, 3]);
    }

    #[test]
    fn test_descending_defaults() {
        assert_eq!(slice(None, None, Some(-1)).indices(4), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_progression_bounds() {
        assert_eq!(slice(Some(3), Some(11), Some(2)).progression(), (3, 11, 2));
        let (start, stop, step) = slice(None, None, None).progression();
        assert_eq!((start, step), (1, 1));
        assert!(stop > 1_000_000);
    }
}
