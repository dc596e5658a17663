//! Guard predicates for controlling transitions.
//!
//! A guard is a pure boolean function over some context. The transition
//! rules use guards over the whole [`Game`](crate::core::Game) so they can
//! check the started and accepting-input flags, not only the phase.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a transition may run.
///
/// # Example
///
/// ```rust
/// use pattern_recall::core::Guard;
///
/// let non_empty = Guard::new(|v: &Vec<u8>| !v.is_empty());
///
/// assert!(non_empty.check(&vec![1]));
/// assert!(!non_empty.check(&vec![]));
/// ```
pub struct Guard<T: ?Sized> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Guard<T> {
    /// Create a guard from a pure predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// A guard that always passes.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Evaluate the predicate.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T: ?Sized> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
