//! Like/dislike toggle semantics.

use serde::Serialize;

/// What a like request did to the stored (user, post) reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeOutcome {
    /// No reaction existed; one was stored.
    Created,
    /// The opposite reaction existed; it was flipped.
    Updated,
    /// The same reaction existed; it was withdrawn.
    Removed,
}

impl LikeOutcome {
    /// Resolve a request against the currently stored status (`true` = like).
    ///
    /// Applying the same status twice cancels itself out.
    pub fn resolve(existing: Option<bool>, requested: bool) -> Self {
        match existing {
            None => Self::Created,
            Some(current) if current == requested => Self::Removed,
            Some(_) => Self::Updated,
        }
    }

    /// Stored status after applying `requested` with this outcome.
    pub fn stored_status(self, requested: bool) -> Option<bool> {
        match self {
            Self::Created | Self::Updated => Some(requested),
            Self::Removed => None,
        }
    }
}
