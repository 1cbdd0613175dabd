use crate::models::ConnectionStatus;

/// Outcome of applying a like to the connection ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The reverse edge already expressed interest: both edges become `matched`
    Matched,
    /// No reciprocal interest yet: the forward edge is recorded as `liked`
    Pending,
}

impl LikeOutcome {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, LikeOutcome::Matched)
    }
}

/// Resolve a like against the reverse edge of the pair
///
/// The ledger is a two-state latch per ordered pair: the first like is a
/// pending proposal, the reciprocal like resolves both edges to `matched`.
/// A reverse edge in `passed` or `blocked` state never produces a match.
/// A reverse edge already `matched` resolves to `Matched` again, which keeps
/// repeated likes idempotent.
///
/// # Arguments
/// * `reverse_status` - Status of the (liked -> liker) edge, if it exists
#[inline]
pub fn resolve_like(reverse_status: Option<ConnectionStatus>) -> LikeOutcome {
    match reverse_status {
        Some(ConnectionStatus::Liked) | Some(ConnectionStatus::Matched) => LikeOutcome::Matched,
        Some(ConnectionStatus::Passed) | Some(ConnectionStatus::Blocked) | None => {
            LikeOutcome::Pending
        }
    }
}
