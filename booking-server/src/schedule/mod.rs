//! Default departure and arrival times per route.
//!
//! New bookings are pre-filled with the usual timetable for their route.
//! Routes are matched by substring against an ordered rule list, so the
//! more specific "Origin -> Destination" rules must come before single-city
//! fallbacks.

use std::fmt;
use std::str::FromStr;

use crate::domain::{ClockTime, TimeError};

/// A departure/arrival pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Schedule {
    pub departure: ClockTime,
    pub arrival: ClockTime,
}

impl Schedule {
    pub fn new(departure: ClockTime, arrival: ClockTime) -> Self {
        Self {
            departure,
            arrival,
        }
    }
}

/// Error returned when parsing an unknown default schedule name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown default schedule {0:?} (expected \"midnight\" or \"morning\")")]
pub struct UnknownDefaultSchedule(String);

/// The pair used for routes that match no rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DefaultSchedule {
    /// 00:00 / 00:00, so an unmatched route is visibly unset.
    #[default]
    Midnight,
    /// 06:00 / 12:00, the morning service.
    Morning,
}

impl DefaultSchedule {
    pub fn schedule(self) -> Schedule {
        match self {
            DefaultSchedule::Midnight => {
                Schedule::new(ClockTime::midnight(), ClockTime::midnight())
            }
            DefaultSchedule::Morning => Schedule::new(
                ClockTime::after_midnight(6, 0),
                ClockTime::after_midnight(12, 0),
            ),
        }
    }
}

impl FromStr for DefaultSchedule {
    type Err = UnknownDefaultSchedule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "midnight" => Ok(DefaultSchedule::Midnight),
            "morning" => Ok(DefaultSchedule::Morning),
            _ => Err(UnknownDefaultSchedule(s.to_string())),
        }
    }
}

impl fmt::Display for DefaultSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultSchedule::Midnight => f.write_str("midnight"),
            DefaultSchedule::Morning => f.write_str("morning"),
        }
    }
}

/// A substring pattern and the schedule it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduleRule {
    pattern: String,
    schedule: Schedule,
}

/// Ordered route → schedule rules with a fallback.
///
/// # Examples
///
/// ```
/// use booking_server::schedule::{DefaultSchedule, standard_routes};
///
/// let table = standard_routes(DefaultSchedule::Midnight)?;
///
/// let s = table.resolve("Kamarbandha -> Guwahati");
/// assert_eq!(s.departure.to_string(), "06:30");
/// assert_eq!(s.arrival.to_string(), "12:00");
///
/// let s = table.resolve("Unknown Place");
/// assert_eq!(s.departure.to_string(), "00:00");
/// # Ok::<(), booking_server::domain::TimeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTable {
    rules: Vec<ScheduleRule>,
    fallback: Schedule,
}

impl ScheduleTable {
    /// Create an empty table.
    pub fn new(fallback: Schedule) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Start a table from "HH:MM" literals.
    pub fn builder(default: DefaultSchedule) -> ScheduleTableBuilder {
        ScheduleTableBuilder::new(default)
    }

    /// Append a rule. It is checked after every rule already in the table.
    pub fn push(&mut self, pattern: impl Into<String>, schedule: Schedule) {
        self.rules.push(ScheduleRule {
            pattern: pattern.into(),
            schedule,
        });
    }

    /// The schedule for a route: the first rule whose pattern the route
    /// contains, otherwise the fallback.
    pub fn resolve(&self, route: &str) -> Schedule {
        self.matching_pattern(route)
            .map(|(_, schedule)| schedule)
            .unwrap_or(self.fallback)
    }

    /// The first matching rule's pattern and schedule, if any.
    pub fn matching_pattern(&self, route: &str) -> Option<(&str, Schedule)> {
        self.rules
            .iter()
            .find(|rule| route.contains(rule.pattern.as_str()))
            .map(|rule| (rule.pattern.as_str(), rule.schedule))
    }

    pub fn fallback(&self) -> Schedule {
        self.fallback
    }

    /// Rules in priority order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, Schedule)> + '_ {
        self.rules
            .iter()
            .map(|rule| (rule.pattern.as_str(), rule.schedule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for schedule tables from "HH:MM" literals.
#[derive(Debug)]
pub struct ScheduleTableBuilder {
    inner: ScheduleTable,
}

impl ScheduleTableBuilder {
    pub fn new(default: DefaultSchedule) -> Self {
        Self {
            inner: ScheduleTable::new(default.schedule()),
        }
    }

    /// Add a rule after those already added.
    pub fn add(
        mut self,
        pattern: &str,
        departure: &str,
        arrival: &str,
    ) -> Result<Self, TimeError> {
        let departure = ClockTime::parse_hhmm(departure)?;
        let arrival = ClockTime::parse_hhmm(arrival)?;
        self.inner.push(pattern, Schedule::new(departure, arrival));
        Ok(self)
    }

    pub fn build(self) -> ScheduleTable {
        self.inner
    }
}

/// The operator's timetable.
pub fn standard_routes(default: DefaultSchedule) -> Result<ScheduleTable, TimeError> {
    let table = ScheduleTable::builder(default)
        .add("Guwahati -> Golaghat", "14:00", "20:30")?
        .add("Guwahati -> Bokakhat", "15:00", "20:00")?
        .add("Guwahati -> Kamarbandha", "14:30", "20:00")?
        .add("Kamarbandha -> Guwahati", "06:30", "12:00")?
        // Any other route touching Guwahati, e.g. "Golaghat -> Guwahati"
        .add("Guwahati", "06:00", "12:30")?
        .add("Bokakhat", "08:00", "09:00")?
        .add("Kamarbandha", "07:00", "07:30")?
        .build();
    Ok(table)
}
