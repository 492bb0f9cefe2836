//! Error types for timetable clash detection.

use serde::Serialize;
use thiserror::Error;

use super::types::CourseId;

/// Broad category of a [`ScheduleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The course collection itself is malformed (duplicate ids, too many courses)
    InvalidInput,
    /// An individual meeting is malformed or has a non-positive duration
    InvalidTimeSlot,
}

/// Errors that can occur while validating or checking a timetable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Two courses in the same input share an identifier
    #[error("Duplicate course id: {id}")]
    DuplicateCourseId { id: CourseId },

    /// A meeting ends at or before the time it starts. Reported once per day
    /// the meeting occupies, since each day is its own slot.
    #[error("Invalid time slot for course {course_id} (meeting {index}, {day}): {start}-{end}")]
    InvalidTimeSlot {
        course_id: CourseId,
        index: usize,
        day: String,
        start: String,
        end: String,
    },

    /// A meeting's days or times could not be parsed
    #[error("Invalid meeting {index} for course {course_id}: {reason}")]
    InvalidMeeting {
        course_id: CourseId,
        index: usize,
        reason: Box<ScheduleError>,
    },

    /// A slot was built with `start >= end`
    #[error("Time slot on {day} has non-positive duration: {start}-{end}")]
    NonPositiveDuration {
        day: String,
        start: String,
        end: String,
    },

    /// Input exceeds the configured course-count ceiling
    #[error("Too many courses: {count} (limit {limit})")]
    TooManyCourses { count: usize, limit: usize },

    /// A time-of-day string or hour/minute pair could not be parsed
    #[error("Invalid time of day: {value}")]
    InvalidTime { value: String },

    /// A day name or day pattern could not be parsed
    #[error("Invalid day: {value}")]
    InvalidDay { value: String },
}

impl ScheduleError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::InvalidTimeSlot { .. }
            | ScheduleError::NonPositiveDuration { .. }
            | ScheduleError::InvalidTime { .. }
            | ScheduleError::InvalidDay { .. } => ErrorKind::InvalidTimeSlot,
            ScheduleError::DuplicateCourseId { .. } | ScheduleError::TooManyCourses { .. } => {
                ErrorKind::InvalidInput
            }
            ScheduleError::InvalidMeeting { reason, .. } => reason.kind(),
        }
    }
}

/// Every validation error found in one pass over the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ScheduleError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ScheduleError>) -> Self {
        Self(errors)
    }

    /// The collected errors, in the order they were found.
    pub fn errors(&self) -> &[ScheduleError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of collected errors of the given kind.
    pub fn count_kind(&self, kind: ErrorKind) -> usize {
        self.0.iter().filter(|e| e.kind() == kind).count()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for err in &self.0 {
            write!(f, "; {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
