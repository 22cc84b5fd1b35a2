//! Sliding-window request throttle.
//!
//! At most `max_requests` admissions are granted within any trailing `window`. Rejected
//! attempts are not recorded, so hammering the throttle does not extend the wait.
//!
//! ```rust
//! use jobchat_kernel::time::ManualClock;
//! use jobchat_throttle::RequestThrottle;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let throttle = RequestThrottle::with_clock(2, Duration::from_secs(60), clock.clone()).unwrap();
//!
//! assert!(throttle.can_admit());
//! assert!(throttle.can_admit());
//! assert!(!throttle.can_admit());
//! assert_eq!(throttle.time_until_next_slot(), Duration::from_secs(60));
//!
//! clock.advance(Duration::from_secs(60));
//! assert!(throttle.can_admit());
//! ```

mod error;

pub use crate::error::{ThrottleError, ThrottleErrorExt};

use jobchat_domain::config::ThrottleConfig;
use jobchat_domain::constants::{THROTTLE_MAX_REQUESTS_LIMIT, THROTTLE_WINDOW_SECS_LIMIT};
use jobchat_kernel::time::{Clock, SystemClock};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

/// Admission control over a rolling time window.
///
/// All state sits behind one mutex: every call observes and updates the window atomically,
/// so concurrent callers neither double- nor under-count. Share one instance per process
/// behind an `Arc`.
#[derive(Debug)]
pub struct RequestThrottle<C: Clock = SystemClock> {
    max_requests: usize,
    window: Duration,
    clock: C,
    admitted: Mutex<VecDeque<Instant>>,
}

impl RequestThrottle {
    /// # Errors
    /// Returns [`ThrottleError::InvalidConfiguration`] for a cap or window outside the
    /// accepted range.
    pub fn new(max_requests: usize, window: Duration) -> Result<Self, ThrottleError> {
        Self::with_clock(max_requests, window, SystemClock)
    }

    /// A throttle with the cap and window of a [`ThrottleConfig`] section.
    ///
    /// # Errors
    /// Same as [`RequestThrottle::new`].
    pub fn try_from_config(config: &ThrottleConfig) -> Result<Self, ThrottleError> {
        Self::new(config.max_requests, config.window())
    }
}

impl<C: Clock> RequestThrottle<C> {
    /// # Errors
    /// Returns [`ThrottleError::InvalidConfiguration`] if `max_requests` is zero or above
    /// [`THROTTLE_MAX_REQUESTS_LIMIT`], or `window` is zero or longer than
    /// [`THROTTLE_WINDOW_SECS_LIMIT`] seconds.
    pub fn with_clock(max_requests: usize, window: Duration, clock: C) -> Result<Self, ThrottleError> {
        if max_requests == 0 || max_requests > THROTTLE_MAX_REQUESTS_LIMIT {
            return Err(ThrottleError::InvalidConfiguration {
                message: format!(
                    "max_requests must be within 1..={THROTTLE_MAX_REQUESTS_LIMIT}, got {max_requests}"
                )
                .into(),
                context: None,
            });
        }

        if window.is_zero() || window > Duration::from_secs(THROTTLE_WINDOW_SECS_LIMIT) {
            return Err(ThrottleError::InvalidConfiguration {
                message: format!(
                    "window must be within 1..={THROTTLE_WINDOW_SECS_LIMIT} seconds, got {window:?}"
                )
                .into(),
                context: None,
            });
        }

        Ok(Self { max_requests, window, clock, admitted: Mutex::new(VecDeque::new()) })
    }

    /// Records an admission and returns `true` if the window has a free slot.
    ///
    /// Expired entries are pruned first. A rejected attempt leaves the state untouched.
    pub fn can_admit(&self) -> bool {
        let mut admitted = self.admitted.lock();
        let now = self.clock.now();

        self.prune(&mut admitted, now);

        if admitted.len() >= self.max_requests {
            debug!(in_window = admitted.len(), max = self.max_requests, "Request throttled");
            return false;
        }

        admitted.push_back(now);
        true
    }

    /// Time until the oldest recorded admission leaves the window.
    ///
    /// Zero when nothing is recorded or the oldest entry has already expired.
    #[must_use]
    pub fn time_until_next_slot(&self) -> Duration {
        let admitted = self.admitted.lock();
        let now = self.clock.now();
        admitted.front().map_or(Duration::ZERO, |oldest| {
            oldest
                .checked_add(self.window)
                .map_or(self.window, |expires| expires.saturating_duration_since(now))
        })
    }

    /// Number of admissions still available in the current window.
    #[must_use]
    pub fn remaining_slots(&self) -> usize {
        let admitted = self.admitted.lock();
        let now = self.clock.now();
        let in_window = admitted
            .iter().filter(|at| now.duration_since(**at) < self.window).count();
        self.max_requests.saturating_sub(in_window)
    }

    /// Forgets every recorded admission.
    pub fn reset(&self) {
        self.admitted.lock().clear();
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    #[must_use]
    pub const fn max_requests(&self) -> usize {
        self.max_requests
    }

    fn prune(&self, admitted: &mut VecDeque<Instant>, now: Instant) {
        while admitted.front().is_some_and(|at| now.duration_since(*at) >= self.window) {
            admitted.pop_front();
        }
    }
}
