// ⏱️ Simulated latency - one-shot delay standing in for a network call
// Polled cooperatively from the event loop; no threads, no cancellation.

use std::time::{Duration, Instant};

/// Failure of a simulated backend operation.
///
/// The prototype never produces one (every consult, card validation and
/// payment is hardcoded to succeed), but the flow already threads the
/// `Result` through so a real backend can slot in without reshaping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// Backend rejected or could not complete the operation
    Unavailable(String),
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessError::Unavailable(msg) => write!(f, "servicio no disponible: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}

pub type ProcessResult<T> = Result<T, ProcessError>;

/// A one-shot delay that resolves to a fixed outcome.
///
/// Once started it always fires: editing the form while a consult is in
/// flight does not cancel the timer, matching the prototype's behavior.
/// The owning screen's "loading"/"processing" flag is the only thing
/// keeping the user from starting a second one.
#[derive(Debug)]
pub struct SimulatedDelay<T> {
    deadline: Instant,
    outcome: Option<ProcessResult<T>>,
}

impl<T> SimulatedDelay<T> {
    /// Schedule `outcome` to become available after `latency`.
    pub fn start(latency: Duration, outcome: ProcessResult<T>) -> Self {
        SimulatedDelay {
            deadline: Instant::now() + latency,
            outcome: Some(outcome),
        }
    }

    /// Zero-latency delay; resolves on the next poll. Used by tests.
    pub fn immediate(outcome: ProcessResult<T>) -> Self {
        Self::start(Duration::ZERO, outcome)
    }

    pub fn is_elapsed(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Take the outcome once the deadline has passed.
    ///
    /// Returns `None` while still pending, and `None` again after the
    /// outcome has been taken.
    pub fn poll(&mut self) -> Option<ProcessResult<T>> {
        if self.is_elapsed() {
            self.outcome.take()
        } else {
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_resolves_on_first_poll() {
        let mut delay: SimulatedDelay<u32> = SimulatedDelay::immediate(Ok(7));
        assert_eq!(delay.poll(), Some(Ok(7)));
    }

    #[test]
    fn test_outcome_taken_only_once() {
        let mut delay: SimulatedDelay<u32> = SimulatedDelay::immediate(Ok(7));
        assert_eq!(delay.poll(), Some(Ok(7)));
        assert_eq!(delay.poll(), None);
    }

    #[test]
    fn test_pending_until_deadline() {
        let mut delay: SimulatedDelay<()> =
            SimulatedDelay::start(Duration::from_secs(60), Ok(()));
        assert!(!delay.is_elapsed());
        assert_eq!(delay.poll(), None);
    }

    #[test]
    fn test_error_outcome_passes_through() {
        let mut delay: SimulatedDelay<()> =
            SimulatedDelay::immediate(Err(ProcessError::Unavailable("fuera de línea".into())));
        let out = delay.poll().unwrap();
        assert!(out.is_err());
    }
}
