//! State machine for the cyclic retry loop.
//!
//! One value of [`RetryState`] tracks where the loop stands: which round is
//! about to run, or that a terminal outcome was reached. The engine advances
//! it after every completed round from the round's failure count alone, which
//! keeps the loop's control flow separate from the loading side effects.

/// State of the bounded retry loop over cyclic fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// Round `n` (1-based) is about to run.
    Pending(u32),
    /// A round completed with no failures, or there was nothing to load.
    Succeeded,
    /// All allowed rounds ran and fixtures are still pending. Terminal.
    Failed,
}

impl RetryState {
    /// Initial state for a remainder of the given size under an attempt bound.
    ///
    /// An empty remainder succeeds immediately without consuming a round.
    /// A non-empty remainder with a zero bound fails immediately — no round
    /// may run, so nothing pending can ever load.
    #[must_use]
    pub fn initial(pending: usize, max_attempts: u32) -> Self {
        if pending == 0 {
            Self::Succeeded
        } else if max_attempts == 0 {
            Self::Failed
        } else {
            Self::Pending(1)
        }
    }

    /// Advances the state after a round that left `failures` fixtures pending.
    ///
    /// Terminal states are absorbing. A round with no failures succeeds; a
    /// round with failures re-pends until `max_attempts` rounds have run.
    #[must_use]
    pub fn after_round(self, failures: usize, max_attempts: u32) -> Self {
        match self {
            Self::Pending(_) if failures == 0 => Self::Succeeded,
            Self::Pending(round) if round < max_attempts => Self::Pending(round + 1),
            Self::Pending(_) => Self::Failed,
            terminal => terminal,
        }
    }

    /// Returns true once the loop must stop.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_remainder_starts_succeeded() {
        assert_eq!(RetryState::initial(0, 5), RetryState::Succeeded);
    }

    #[test]
    fn test_nonempty_remainder_starts_at_round_one() {
        assert_eq!(RetryState::initial(3, 5), RetryState::Pending(1));
    }

    #[test]
    fn test_zero_attempt_bound_starts_failed() {
        assert_eq!(RetryState::initial(3, 0), RetryState::Failed);
    }

    #[test]
    fn test_zero_attempt_bound_with_nothing_pending_succeeds() {
        assert_eq!(RetryState::initial(0, 0), RetryState::Succeeded);
    }

    #[test]
    fn test_clean_round_succeeds() {
        let state = RetryState::Pending(2).after_round(0, 5);
        assert_eq!(state, RetryState::Succeeded);
    }

    #[test]
    fn test_failures_advance_to_next_round() {
        let state = RetryState::Pending(1).after_round(2, 5);
        assert_eq!(state, RetryState::Pending(2));
    }

    #[test]
    fn test_failures_on_last_round_fail() {
        let state = RetryState::Pending(5).after_round(1, 5);
        assert_eq!(state, RetryState::Failed);
    }

    #[test]
    fn test_terminal_states_absorb() {
        assert_eq!(RetryState::Succeeded.after_round(9, 5), RetryState::Succeeded);
        assert_eq!(RetryState::Failed.after_round(0, 5), RetryState::Failed);
    }

    #[test]
    fn test_is_terminal() {
        assert!(!RetryState::Pending(1).is_terminal());
        assert!(RetryState::Succeeded.is_terminal());
        assert!(RetryState::Failed.is_terminal());
    }
}
