//! # fc-time
//!
//! Dates, tenors, calendars, day counts, and schedules.
//!
//! Everything here is an immutable value type. Failures on malformed input
//! (invalid Gregorian dates, unknown tenors or convention names) surface
//! immediately as [`fc_core::Error::BadInput`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// `Calendar` trait and the built-in jurisdictions.
pub mod calendar;

/// Holiday rule tables and the bespoke calendar.
pub mod calendars;

/// `Date` type.
pub mod date;

/// Date renderings and the per-thread default format.
pub mod date_format;

/// Day-count conventions.
pub mod day_count;

/// Payment / event frequency.
pub mod frequency;

/// Interest rates with compounding conventions.
pub mod interest_rate;

/// `Schedule`: an ordered sequence of coupon dates.
pub mod schedule;

/// `Tenor`: a signed span in a `TimeUnit`.
pub mod tenor;

/// `TimeUnit`: days, weeks, months, years.
pub mod time_unit;

/// `Weekday`: day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, CalendarType};
pub use calendars::bespoke_calendar::BespokeCalendar;
pub use date::Date;
pub use date_format::{date_format, set_date_format, DateFormat, ScopedDateFormat};
pub use day_count::DayCountType;
pub use frequency::Frequency;
pub use interest_rate::InterestRate;
pub use schedule::{DateGeneration, Schedule, ScheduleBuilder};
pub use tenor::Tenor;
pub use time_unit::TimeUnit;
pub use weekday::Weekday;
