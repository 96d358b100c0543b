//! Shop clock and time tracking for the simulation.
//!
//! The clock is the single source of truth for all temporal state. It
//! holds a wall-clock-like timestamp advanced in fixed one-hour steps
//! and derives everything else from it: the hour of day, whether the
//! shop is open, and whether the current day is a weekend.

use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};

/// Number of weekdays before the weekend (Monday-indexed).
const WEEKEND_START: u32 = 5;

/// Errors that can occur when constructing a clock.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The configured open interval is not a valid `[opening, closing)`
    /// range within a single day.
    #[error("invalid open hours: {reason}")]
    InvalidHours {
        /// Explanation of what is wrong with the hours.
        reason: String,
    },
}

/// Shop clock tracking the simulation's temporal state.
///
/// The open interval is `[opening_hour, closing_hour)`: a shop with
/// hours 8 and 20 sells from 08:00 through 19:59.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopClock {
    /// Current simulated time, advanced one hour per step.
    now: NaiveDateTime,

    /// First hour of the day the shop sells (inclusive).
    opening_hour: u32,

    /// First hour of the day the shop no longer sells (exclusive).
    closing_hour: u32,
}

impl ShopClock {
    /// Create a new clock starting at `start` with the given open hours.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidHours`] unless
    /// `opening_hour < closing_hour <= 24`.
    pub fn new(
        start: NaiveDateTime,
        opening_hour: u32,
        closing_hour: u32,
    ) -> Result<Self, ClockError> {
        if closing_hour > 24 {
            return Err(ClockError::InvalidHours {
                reason: format!("closing_hour {closing_hour} exceeds 24"),
            });
        }
        if opening_hour >= closing_hour {
            return Err(ClockError::InvalidHours {
                reason: format!(
                    "opening_hour {opening_hour} is not before closing_hour {closing_hour}"
                ),
            });
        }
        Ok(Self {
            now: start,
            opening_hour,
            closing_hour,
        })
    }

    /// Advance the clock by one hour. Returns the new timestamp.
    pub fn advance(&mut self) -> NaiveDateTime {
        self.now = self
            .now
            .checked_add_signed(TimeDelta::hours(1))
            .unwrap_or(self.now);
        self.now
    }

    /// Return the current simulated time.
    pub const fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Return the current hour of day (0-23).
    pub fn hour(&self) -> u32 {
        self.now.hour()
    }

    /// Whether the shop is currently inside its open interval.
    pub fn is_open(&self) -> bool {
        let hour = self.hour();
        self.opening_hour <= hour && hour < self.closing_hour
    }

    /// Whether the current day is Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        self.now.weekday().num_days_from_monday() >= WEEKEND_START
    }

    /// First selling hour of the day.
    pub const fn opening_hour(&self) -> u32 {
        self.opening_hour
    }

    /// First non-selling hour of the day.
    pub const fn closing_hour(&self) -> u32 {
        self.closing_hour
    }

    /// Whether the current hour falls on a recommendation boundary
    /// (`hour % interval == 0`). An interval of 0 disables the cycle.
    pub fn on_recommendation_boundary(&self, interval_hours: u32) -> bool {
        interval_hours > 0 && self.hour().checked_rem(interval_hours) == Some(0)
    }
}
