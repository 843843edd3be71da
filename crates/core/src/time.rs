use chrono::{DateTime, Utc};

/// Timestamp source for services.
///
/// Completion records and profile creation dates are stamped through a
/// `Clock` so tests can freeze time and assert exact values.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    frozen_at: Option<DateTime<Utc>>,
}

impl Clock {
    /// A clock that reads the system time.
    #[must_use]
    pub fn system() -> Self {
        Self { frozen_at: None }
    }

    /// A clock that always reports `at`.
    #[must_use]
    pub fn frozen(at: DateTime<Utc>) -> Self {
        Self { frozen_at: Some(at) }
    }

    /// The current instant according to this clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.frozen_at.unwrap_or_else(Utc::now)
    }
}

/// The instant frozen test clocks report: 2023-11-14 22:13:20 UTC.
///
/// # Panics
///
/// Never; the timestamp is in range for `chrono`.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("timestamp in range")
}

/// A clock frozen at [`fixed_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::frozen(fixed_now())
}
