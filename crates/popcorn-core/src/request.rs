/// Lifecycle of one asynchronous lookup.
///
/// A cancelled lookup has no state of its own: it simply never writes, and
/// whatever superseded it owns the slot.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one issued lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

/// Latest-wins counter: only the most recently issued generation may write.
#[derive(Debug, Default)]
pub struct LatestRequest {
    current: u64,
}

impl LatestRequest {
    /// Issue a new generation, invalidating every earlier one
    pub fn begin(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    /// Invalidate the outstanding generation without issuing a new one
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current == generation.0
    }
}
