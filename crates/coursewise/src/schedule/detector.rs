//! Pairwise clash detection over a student's selected courses.

use std::collections::HashSet;
use tracing::debug;

use super::error::{ScheduleError, ValidationErrors};
use super::types::{ConflictPair, Course, CourseId, SlotOverlap, TimeSlot};

/// A course whose meetings have been expanded into validated slots.
struct PreparedCourse<'a> {
    course: &'a Course,
    slots: Vec<TimeSlot>,
}

/// Finds every pair of courses whose meetings overlap on the same day.
///
/// Stateless apart from the optional course-count ceiling, so one detector can
/// be shared across requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictDetector {
    max_courses: Option<usize>,
}

impl ConflictDetector {
    /// Creates a detector with no course-count ceiling.
    pub fn new() -> Self {
        Self { max_courses: None }
    }

    /// Creates a detector that rejects input with more than `limit` courses.
    pub fn with_max_courses(limit: usize) -> Self {
        Self {
            max_courses: Some(limit),
        }
    }

    pub fn max_courses(&self) -> Option<usize> {
        self.max_courses
    }

    /// Checks a course list for timetable clashes.
    ///
    /// # Arguments
    /// * `courses` - The selected courses, in any order
    ///
    /// # Returns
    /// * `Ok(Vec<ConflictPair>)` - One entry per clashing course pair, sorted by
    ///   course id, each listing every overlapping slot pair
    /// * `Err(ValidationErrors)` - Every duplicate id, invalid slot and ceiling
    ///   violation found in the input
    pub fn find_conflicts(
        &self,
        courses: &[Course],
    ) -> Result<Vec<ConflictPair>, ValidationErrors> {
        let prepared = self.prepare(courses)?;

        let mut conflicts = Vec::new();
        for (i, a) in prepared.iter().enumerate() {
            for b in &prepared[i + 1..] {
                let overlaps: Vec<SlotOverlap> = a
                    .slots
                    .iter()
                    .flat_map(|s1| {
                        b.slots
                            .iter()
                            .filter_map(move |s2| SlotOverlap::between(s1, s2))
                    })
                    .collect();

                if !overlaps.is_empty() {
                    conflicts.push(ConflictPair {
                        first: a.course.id.clone(),
                        first_code: a.course.label(),
                        second: b.course.id.clone(),
                        second_code: b.course.label(),
                        overlaps,
                    });
                }
            }
        }

        debug!(
            "Checked {} courses, found {} conflicting pairs",
            prepared.len(),
            conflicts.len()
        );

        Ok(conflicts)
    }

    /// Validates the whole input in one pass and expands meetings into slots.
    ///
    /// Courses come back sorted by id, which makes the output independent of
    /// input order.
    fn prepare<'a>(
        &self,
        courses: &'a [Course],
    ) -> Result<Vec<PreparedCourse<'a>>, ValidationErrors> {
        let mut errors = Vec::new();

        if let Some(limit) = self.max_courses {
            if courses.len() > limit {
                errors.push(ScheduleError::TooManyCourses {
                    count: courses.len(),
                    limit,
                });
            }
        }

        let mut seen: HashSet<&CourseId> = HashSet::new();
        let mut reported: HashSet<&CourseId> = HashSet::new();
        for course in courses {
            if !seen.insert(&course.id) && reported.insert(&course.id) {
                errors.push(ScheduleError::DuplicateCourseId {
                    id: course.id.clone(),
                });
            }
        }

        let mut prepared = Vec::with_capacity(courses.len());
        for course in courses {
            let mut slots = Vec::new();
            for (index, meeting) in course.schedule.iter().enumerate() {
                match meeting.to_slots(&course.id, index) {
                    Ok(expanded) => slots.extend(expanded),
                    Err(meeting_errors) => errors.extend(meeting_errors),
                }
            }
            prepared.push(PreparedCourse { course, slots });
        }

        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors));
        }

        prepared.sort_by(|a, b| a.course.id.cmp(&b.course.id));
        Ok(prepared)
    }
}

/// Checks a course list for clashes with no course-count ceiling.
///
/// See [`ConflictDetector::find_conflicts`].
pub fn find_conflicts(courses: &[Course]) -> Result<Vec<ConflictPair>, ValidationErrors> {
    ConflictDetector::new().find_conflicts(courses)
}
