//! Combine-latest join over two inputs.

/// Latest value of two independently arriving inputs.
///
/// Nothing is produced until both sides have a value. After that, every
/// update to either side yields the pair of most recent values, so the
/// caller recomputes exactly once per upstream event.
#[derive(Debug, Clone, PartialEq)]
pub struct CombineLatest<A, B> {
    left: Option<A>,
    right: Option<B>,
}

impl<A, B> CombineLatest<A, B> {
    pub fn new() -> Self {
        Self {
            left: None,
            right: None,
        }
    }

    /// Start with the right side already known (a channel with a default value).
    pub fn with_right(right: B) -> Self {
        Self {
            left: None,
            right: Some(right),
        }
    }

    pub fn set_left(&mut self, left: A) -> Option<(&A, &B)> {
        self.left = Some(left);
        self.current()
    }

    pub fn set_right(&mut self, right: B) -> Option<(&A, &B)> {
        self.right = Some(right);
        self.current()
    }

    /// Both latest values, once each side has been set at least once.
    pub fn current(&self) -> Option<(&A, &B)> {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        }
    }
}

impl<A, B> Default for CombineLatest<A, B> {
    fn default() -> Self {
        Self::new()
    }
}
