use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Issues document reference numbers of the form `D<yymmdd>-<seq>`.
///
/// The sequence is shared by templates and documents and resets only on
/// process restart; uniqueness across restarts comes from the database's
/// unique constraint on the column.
pub struct ReferenceNumbers {
    counter: AtomicU64,
}

impl ReferenceNumbers {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }

    /// Returns the next reference number. Safe to call from concurrent
    /// request handlers; no two calls observe the same sequence value.
    pub fn next(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("D{}-{:04}", Utc::now().format("%y%m%d"), seq)
    }
}

impl Default for ReferenceNumbers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn first_reference_number_has_suffix_0002() {
        let refs = ReferenceNumbers::new();
        assert!(refs.next().ends_with("-0002"));
    }

    #[test]
    fn reference_number_matches_expected_shape() {
        let refs = ReferenceNumbers::new();
        let value = refs.next();
        // D + six date digits + dash + four sequence digits
        assert_eq!(value.len(), 12);
        assert!(value.starts_with('D'));
        assert_eq!(&value[7..8], "-");
        assert!(value[1..7].chars().all(|c| c.is_ascii_digit()));
        assert!(value[8..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn sequential_calls_never_repeat() {
        let refs = ReferenceNumbers::new();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            assert!(seen.insert(refs.next()));
        }
    }

    #[test]
    fn concurrent_calls_never_repeat() {
        let refs = Arc::new(ReferenceNumbers::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let refs = Arc::clone(&refs);
            handles.push(std::thread::spawn(move || {
                (0..100).map(|_| refs.next()).collect::<Vec<_>>()
            }));
        }
        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value));
            }
        }
    }
}
