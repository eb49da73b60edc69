//! Consecutive-failure circuit breaker for one section.
//!
//! The state is passed by value: each step consumes the current state and
//! hands back the next one. A fresh state is created for every section.

pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// What to do with the next package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Attempt,
    /// The breaker tripped on an earlier package.
    AlreadyTripped,
    /// The threshold is reached now; this package is the first one skipped.
    Trip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CircuitBreakerState {
    consecutive_failures: u32,
    tripped: bool,
}

impl CircuitBreakerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Decide whether the next package may be attempted.
    ///
    /// Once tripped the state never goes back to normal.
    pub fn gate(self, threshold: u32) -> (Gate, Self) {
        if self.tripped {
            return (Gate::AlreadyTripped, self);
        }
        if self.consecutive_failures >= threshold {
            return (
                Gate::Trip,
                Self {
                    tripped: true,
                    ..self
                },
            );
        }
        (Gate::Attempt, self)
    }

    pub fn record_success(self) -> Self {
        Self {
            consecutive_failures: 0,
            ..self
        }
    }

    pub fn record_failure(self) -> Self {
        Self {
            consecutive_failures: self.consecutive_failures + 1,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_attempts() {
        let (gate, state) = CircuitBreakerState::new().gate(DEFAULT_FAILURE_THRESHOLD);
        assert_eq!(gate, Gate::Attempt);
        assert_eq!(state, CircuitBreakerState::new());
    }

    #[test]
    fn test_trips_when_threshold_reached() {
        let state = CircuitBreakerState::new()
            .record_failure()
            .record_failure()
            .record_failure();
        assert_eq!(state.consecutive_failures(), 3);

        let (gate, state) = state.gate(3);
        assert_eq!(gate, Gate::Trip);
        assert!(state.tripped);

        let (gate, next) = state.gate(3);
        assert_eq!(gate, Gate::AlreadyTripped);
        assert_eq!(next, state);
    }

    #[test]
    fn test_success_resets_counter() {
        let state = CircuitBreakerState::new()
            .record_failure()
            .record_failure()
            .record_success();
        assert_eq!(state.consecutive_failures(), 0);
        assert_eq!(state.gate(3).0, Gate::Attempt);
    }

    #[test]
    fn test_tripped_state_stays_tripped_after_success() {
        let (_, state) = CircuitBreakerState::new().record_failure().gate(1);
        let state = state.record_success();
        assert_eq!(state.gate(1).0, Gate::AlreadyTripped);
    }

    #[test]
    fn test_two_failures_below_threshold() {
        let state = CircuitBreakerState::new().record_failure().record_failure();
        assert_eq!(state.gate(3).0, Gate::Attempt);
    }
}
