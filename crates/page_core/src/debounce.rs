use std::time::{Duration, Instant};

/// Single-deadline debounce timer. Every schedule replaces the previous
/// deadline, so a burst of events fires once, a quiet period after the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Restarts the quiet period from `at` and returns the new deadline.
    pub fn schedule(&mut self, at: Instant) -> Instant {
        let deadline = at + self.quiet_period;
        self.deadline = Some(deadline);
        deadline
    }

    /// Returns true exactly once per burst, when `now` has reached the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reschedule_pushes_deadline_out() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(150));

        debouncer.schedule(start);
        let deadline = debouncer.schedule(start + Duration::from_millis(100));

        assert_eq!(deadline, start + Duration::from_millis(250));
        assert!(!debouncer.fire(start + Duration::from_millis(200)));
        assert!(debouncer.fire(start + Duration::from_millis(250)));
        assert!(!debouncer.fire(start + Duration::from_millis(400)));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn idle_debouncer_never_fires() {
        let mut debouncer = Debouncer::new(Duration::from_millis(150));
        assert!(!debouncer.fire(Instant::now()));
    }
}
