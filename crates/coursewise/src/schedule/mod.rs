/// Timetable clash detection for selected courses
mod days;
mod detector;
mod error;
pub mod report;
mod types;

pub use days::{day_name, parse_day, parse_days, DaysSpec};
pub use detector::{find_conflicts, ConflictDetector};
pub use error::{ErrorKind, ScheduleError, ValidationErrors};
pub use types::{
    ConflictPair, Course, CourseId, Meeting, OverlapWindow, SlotOverlap, TimeOfDay, TimeSlot,
};
