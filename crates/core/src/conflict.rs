//! # Schedule Conflict Checking
//!
//! Prevents double-booking a teacher or a location before a class's schedule
//! is saved. The checker is a pure function over data the caller has already
//! fetched; it never fails and never touches storage.
//!
//! ## Algorithm
//!
//! 1. Every proposed slot is compared with every slot the teacher already
//!    teaches. Same day and overlapping times is a teacher clash, whatever
//!    the location.
//! 2. Every proposed slot is compared with every stored slot. Same day, same
//!    location and overlapping times is a location clash, whatever the
//!    teacher.
//! 3. Proposed slots are compared pairwise with each other.
//!
//! Times are compared as minutes since midnight over half-open ranges, so
//! back-to-back slots do not clash. Output order follows the proposed slots,
//! then the reference slots, so identical inputs give identical reports.
//!
//! Cost is O(P × T + P × O + P²). Timetables hold tens to low hundreds of
//! slots, so there is no indexing.

use serde::{Deserialize, Serialize};

use crate::models::{class::ProposedClass, slot::ScheduleSlot};

pub const OWN_CONFLICTS_HEADING: &str = "Overlap with own classes";
pub const OTHER_CONFLICTS_HEADING: &str = "Overlap with other classes";
pub const INTERNAL_CONFLICTS_HEADING: &str = "Overlap within this schedule";

const UNNAMED_CLASS: &str = "another class";

/// Every clash found for one submission, as human-readable messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Clashes with the same teacher's other classes.
    pub own_conflicts: Vec<String>,
    /// Clashes with any class at the same location.
    pub other_conflicts: Vec<String>,
    /// Clashes between slots of the submission itself.
    #[serde(default)]
    pub internal_conflicts: Vec<String>,
}

impl ConflictReport {
    pub fn has_conflicts(&self) -> bool {
        !self.own_conflicts.is_empty()
            || !self.other_conflicts.is_empty()
            || !self.internal_conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.own_conflicts.len() + self.other_conflicts.len() + self.internal_conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_conflicts()
    }

    /// Non-empty message lists under their display headings.
    pub fn sections(&self) -> Vec<(&'static str, &[String])> {
        [
            (OWN_CONFLICTS_HEADING, self.own_conflicts.as_slice()),
            (OTHER_CONFLICTS_HEADING, self.other_conflicts.as_slice()),
            (INTERNAL_CONFLICTS_HEADING, self.internal_conflicts.as_slice()),
        ]
        .into_iter()
        .filter(|(_, messages)| !messages.is_empty())
        .collect()
    }
}

/// Conflict checker with its policy switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictChecker {
    /// Skip stored slots that belong to the class being edited.
    pub exclude_own_class: bool,
    /// Compare the proposed slots with each other.
    pub check_internal: bool,
}

impl Default for ConflictChecker {
    fn default() -> Self {
        Self {
            exclude_own_class: true,
            check_internal: true,
        }
    }
}

impl ConflictChecker {
    pub fn check(
        &self,
        proposed: &ProposedClass,
        teacher_slots: &[ScheduleSlot],
        all_slots: &[ScheduleSlot],
    ) -> ConflictReport {
        let mut report = ConflictReport::default();

        for (index, slot) in proposed.slots.iter().enumerate() {
            for existing in teacher_slots.iter().filter(|s| self.is_reference(proposed, s)) {
                if slot.overlaps(existing) {
                    report.own_conflicts.push(format!(
                        "Schedule {}: overlaps with {} on {} ({})",
                        index + 1,
                        class_label(existing),
                        existing.day,
                        existing.time_range()
                    ));
                }
            }

            for existing in all_slots.iter().filter(|s| self.is_reference(proposed, s)) {
                if slot.location == existing.location && slot.overlaps(existing) {
                    report.other_conflicts.push(format!(
                        "Schedule {}: overlaps with {} at {} on {} ({})",
                        index + 1,
                        class_label(existing),
                        existing.location,
                        existing.day,
                        existing.time_range()
                    ));
                }
            }
        }

        if self.check_internal {
            for (i, first) in proposed.slots.iter().enumerate() {
                for (j, second) in proposed.slots.iter().enumerate().skip(i + 1) {
                    if first.overlaps(second) {
                        report.internal_conflicts.push(format!(
                            "Schedule {}: overlaps with schedule {} on {}",
                            i + 1,
                            j + 1,
                            first.day
                        ));
                    }
                }
            }
        }

        report
    }

    fn is_reference(&self, proposed: &ProposedClass, slot: &ScheduleSlot) -> bool {
        !(self.exclude_own_class
            && proposed.class_id.is_some()
            && slot.class_id == proposed.class_id)
    }
}

/// Checks a proposed schedule with the default policy.
pub fn check_conflicts(
    proposed: &ProposedClass,
    teacher_slots: &[ScheduleSlot],
    all_slots: &[ScheduleSlot],
) -> ConflictReport {
    ConflictChecker::default().check(proposed, teacher_slots, all_slots)
}

fn class_label(slot: &ScheduleSlot) -> &str {
    slot.class_name.as_deref().unwrap_or(UNNAMED_CLASS)
}
