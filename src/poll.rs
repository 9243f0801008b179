//! Adaptive notification polling schedule.
//!
//! One numeric variable (the next poll delay) driven by two signals:
//! user activity and fetch outcome. Input shortens the delay to the
//! active interval, sustained idleness lengthens it to the idle
//! interval, and failures multiply it by the backoff factor up to the
//! configured cap. The next success resets it. No ordering guarantee
//! beyond eventual consistency with server state.

use std::time::Duration;

use crate::config::PollingConfig;

/// Poll delay state machine. Pure; the caller owns the clock.
#[derive(Debug, Clone)]
pub struct PollBackoff {
    active: Duration,
    idle: Duration,
    idle_after: Duration,
    factor: f64,
    max: Duration,
    current: Duration,
    backing_off: bool,
}

impl PollBackoff {
    pub fn new(cfg: &PollingConfig) -> Self {
        let active = Duration::from_secs(cfg.active_secs);
        Self {
            active,
            idle: Duration::from_secs(cfg.idle_secs),
            idle_after: Duration::from_secs(cfg.idle_after_secs),
            factor: cfg.backoff_factor,
            max: Duration::from_secs(cfg.max_secs),
            current: active,
            backing_off: false,
        }
    }

    /// Delay until the next poll.
    pub fn interval(&self) -> Duration {
        self.current
    }

    /// Whether the last poll failed and the schedule is backed off.
    pub fn is_backing_off(&self) -> bool {
        self.backing_off
    }

    /// User input detected. Shortens an idle-lengthened delay back to
    /// the active interval; a failure backoff is left to recover via
    /// `on_success`.
    pub fn on_activity(&mut self) {
        if !self.backing_off {
            self.current = self.active;
        }
    }

    /// A poll succeeded. `idle_for` is how long the user has been
    /// without input.
    pub fn on_success(&mut self, idle_for: Duration) {
        self.backing_off = false;
        self.current = if idle_for >= self.idle_after {
            self.idle
        } else {
            self.active
        };
    }

    /// A poll failed. Multiplies the delay, capped at the maximum.
    pub fn on_failure(&mut self) {
        self.backing_off = true;
        self.current = self.current.mul_f64(self.factor).min(self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> PollingConfig {
        PollingConfig {
            active_secs: 15,
            idle_secs: 120,
            idle_after_secs: 300,
            backoff_factor: 2.0,
            max_secs: 600,
        }
    }

    #[test]
    fn test_starts_at_active_interval() {
        let sched = PollBackoff::new(&cfg());
        assert_eq!(sched.interval(), Duration::from_secs(15));
    }

    #[test]
    fn test_failure_multiplies_interval() {
        let mut sched = PollBackoff::new(&cfg());
        let before = sched.interval();
        sched.on_failure();
        assert!(sched.interval() >= before.mul_f64(2.0));
        assert_eq!(sched.interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_repeated_failures_cap_at_max() {
        let mut sched = PollBackoff::new(&cfg());
        for _ in 0..20 {
            sched.on_failure();
        }
        assert_eq!(sched.interval(), Duration::from_secs(600));
    }

    #[test]
    fn test_success_resets_to_active() {
        let mut sched = PollBackoff::new(&cfg());
        sched.on_failure();
        sched.on_failure();
        sched.on_success(Duration::from_secs(0));
        assert_eq!(sched.interval(), Duration::from_secs(15));
        assert!(!sched.is_backing_off());
    }

    #[test]
    fn test_success_while_idle_uses_idle_interval() {
        let mut sched = PollBackoff::new(&cfg());
        sched.on_success(Duration::from_secs(300));
        assert_eq!(sched.interval(), Duration::from_secs(120));
    }

    #[test]
    fn test_activity_shortens_idle_interval() {
        let mut sched = PollBackoff::new(&cfg());
        sched.on_success(Duration::from_secs(1000));
        assert_eq!(sched.interval(), Duration::from_secs(120));
        sched.on_activity();
        assert_eq!(sched.interval(), Duration::from_secs(15));
    }

    #[test]
    fn test_activity_does_not_cancel_backoff() {
        let mut sched = PollBackoff::new(&cfg());
        sched.on_failure();
        let backed_off = sched.interval();
        sched.on_activity();
        assert_eq!(sched.interval(), backed_off);
    }
}
