use crate::error::CommitError;

/// Highest star a user can give
pub const MAX_RATING: u8 = 10;

/// Rating being picked in the detail pane, before it is committed.
///
/// Every change to a new value counts as one decision; re-picking the current
/// value does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingDraft {
    rating: Option<u8>,
    decisions: u32,
}

impl RatingDraft {
    pub fn set(&mut self, rating: u8) -> Result<(), CommitError> {
        if rating == 0 || rating > MAX_RATING {
            return Err(CommitError::InvalidRating { rating, max: MAX_RATING });
        }
        if self.rating != Some(rating) {
            self.rating = Some(rating);
            self.decisions += 1;
        }
        Ok(())
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn decisions(&self) -> u32 {
        self.decisions
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
