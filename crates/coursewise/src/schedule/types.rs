/// Value types for timetable clash detection
use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::days::{day_name, DaysSpec};
use super::error::ScheduleError;

/// Identifier of a course, unique within one clash check.
///
/// Course catalogs hand out either numeric keys or string codes, so both are
/// accepted. Ids order numbers before strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseId::Number(n) => write!(f, "{}", n),
            CourseId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        CourseId::Text(value.to_string())
    }
}

impl From<String> for CourseId {
    fn from(value: String) -> Self {
        CourseId::Text(value)
    }
}

impl From<i64> for CourseId {
    fn from(value: i64) -> Self {
        CourseId::Number(value)
    }
}

/// A time of day with minute resolution, stored as minutes since midnight.
///
/// Ranges from 00:00 to 24:00 inclusive. 24:00 is the end of a meeting that
/// runs until midnight; as a start time it can never form a valid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    const MINUTES_PER_DAY: u32 = 24 * 60;

    /// Builds a time from an hour (0-24) and minute (0-59), up to 24:00.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, ScheduleError> {
        let invalid = || ScheduleError::InvalidTime {
            value: format!("{}:{:02}", hour, minute),
        };
        if hour > 24 || minute >= 60 {
            return Err(invalid());
        }
        let minutes = hour * 60 + minute;
        if minutes > Self::MINUTES_PER_DAY {
            return Err(invalid());
        }
        Ok(Self(minutes as u16))
    }

    /// Minutes elapsed since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    /// Parses "HH:MM" or "HH:MM:SS". Seconds, when present, must be zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ScheduleError::InvalidTime {
            value: s.to_string(),
        };

        // chrono has no 24:00, so midnight-as-end is handled here
        if trimmed == "24:00" || trimmed == "24:00:00" {
            return Self::from_hm(24, 0);
        }

        let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map_err(|_| invalid())?;

        if time.second() != 0 || time.nanosecond() != 0 {
            return Err(invalid());
        }

        Self::from_hm(time.hour(), time.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One validated weekly meeting occurrence. Always satisfies `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeSlot {
    /// Creates a slot, rejecting zero- and negative-length intervals.
    pub fn new(day: Weekday, start: TimeOfDay, end: TimeOfDay) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::NonPositiveDuration {
                day: day_name(day).to_string(),
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { day, start, end })
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Intersection of the half-open intervals `[start, end)` of two slots on
    /// the same day. Back-to-back slots do not intersect.
    pub fn overlap_window(&self, other: &TimeSlot) -> Option<(TimeOfDay, TimeOfDay)> {
        if self.day != other.day {
            return None;
        }
        if self.start < other.end && other.start < self.end {
            Some((self.start.max(other.start), self.end.min(other.end)))
        } else {
            None
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", day_name(self.day), self.start, self.end)
    }
}

/// A meeting as supplied by the caller, before validation.
///
/// Days and times stay as the caller wrote them until [`Meeting::to_slots`]
/// parses them. `days` may name several days (e.g. "MWF"); each becomes its
/// own slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(alias = "day")]
    pub days: DaysSpec,
    #[serde(alias = "startTime", alias = "start_time")]
    pub start: String,
    #[serde(alias = "endTime", alias = "end_time")]
    pub end: String,
    /// Meeting type such as "LE", "DI" or "LA", for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<String>,
}

impl Meeting {
    pub fn new(days: Vec<Weekday>, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self::from_raw(days, &start.to_string(), &end.to_string())
    }

    /// Builds a meeting from unparsed day and time strings.
    pub fn from_raw(days: impl Into<DaysSpec>, start: &str, end: &str) -> Self {
        Self {
            days: days.into(),
            start: start.to_string(),
            end: end.to_string(),
            meeting_type: None,
        }
    }

    /// Parses this meeting and expands it into one validated slot per day.
    ///
    /// Every problem is returned: an unparsable day list or time is wrapped in
    /// `InvalidMeeting`, and a non-positive duration yields one
    /// `InvalidTimeSlot` per day the meeting would occupy. `course_id` and
    /// `index` only decorate the errors for reporting.
    pub fn to_slots(
        &self,
        course_id: &CourseId,
        index: usize,
    ) -> Result<Vec<TimeSlot>, Vec<ScheduleError>> {
        let mut errors = Vec::new();
        let days = keep_parsed(self.days.parse(), &mut errors, course_id, index);
        let start = keep_parsed(self.start.parse::<TimeOfDay>(), &mut errors, course_id, index);
        let end = keep_parsed(self.end.parse::<TimeOfDay>(), &mut errors, course_id, index);

        let (Some(days), Some(start), Some(end)) = (days, start, end) else {
            return Err(errors);
        };
        if start >= end {
            return Err(days
                .iter()
                .map(|day| ScheduleError::InvalidTimeSlot {
                    course_id: course_id.clone(),
                    index,
                    day: day_name(*day).to_string(),
                    start: start.to_string(),
                    end: end.to_string(),
                })
                .collect());
        }

        days.iter()
            .map(|day| TimeSlot::new(*day, start, end))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| vec![e])
    }
}

fn keep_parsed<T>(
    result: Result<T, ScheduleError>,
    errors: &mut Vec<ScheduleError>,
    course_id: &CourseId,
    index: usize,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(reason) => {
            errors.push(ScheduleError::InvalidMeeting {
                course_id: course_id.clone(),
                index,
                reason: Box::new(reason),
            });
            None
        }
    }
}

/// The projection of a course the clash check works on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    /// Human-readable label such as "CSE 101"; never compared
    #[serde(default)]
    pub code: String,
    /// Weekly meetings; empty means no fixed meeting time
    #[serde(default)]
    pub schedule: Vec<Meeting>,
}

impl Course {
    pub fn new(id: impl Into<CourseId>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            schedule: Vec::new(),
        }
    }

    /// Adds a meeting, builder style.
    pub fn with_meeting(mut self, meeting: Meeting) -> Self {
        self.schedule.push(meeting);
        self
    }

    /// Label used in reports: the code, or the id when no code was given.
    pub fn label(&self) -> String {
        if self.code.trim().is_empty() {
            self.id.to_string()
        } else {
            self.code.clone()
        }
    }
}

/// The intersecting window of one overlapping slot pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OverlapWindow {
    pub day: Weekday,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// Two slots, one from each course of a [`ConflictPair`], that overlap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SlotOverlap {
    pub first: TimeSlot,
    pub second: TimeSlot,
    pub window: OverlapWindow,
}

impl SlotOverlap {
    /// Returns the overlap of two slots, if they clash.
    pub fn between(first: &TimeSlot, second: &TimeSlot) -> Option<Self> {
        first.overlap_window(second).map(|(start, end)| Self {
            first: *first,
            second: *second,
            window: OverlapWindow {
                day: first.day,
                start,
                end,
            },
        })
    }
}

/// Two courses that clash, with every overlapping slot pair.
///
/// The pair is unordered; `first` always holds the smaller id so the same two
/// courses produce the same value whatever order they were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConflictPair {
    pub first: CourseId,
    pub first_code: String,
    pub second: CourseId,
    pub second_code: String,
    pub overlaps: Vec<SlotOverlap>,
}
