//! Weekly timetable view over a set of slots.

use serde::{Deserialize, Serialize};

use crate::models::slot::{DayOfWeek, ScheduleSlot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableDay {
    pub day: DayOfWeek,
    pub slots: Vec<ScheduleSlot>,
}

/// Groups slots by day, Monday first, dropping days with nothing on.
///
/// Within a day slots are ordered by start, then end, then class name.
pub fn weekly_timetable(slots: impl IntoIterator<Item = ScheduleSlot>) -> Vec<TimetableDay> {
    let mut days: Vec<TimetableDay> = DayOfWeek::ALL
        .into_iter()
        .map(|day| TimetableDay {
            day,
            slots: Vec::new(),
        })
        .collect();

    for slot in slots {
        // DayOfWeek::ALL is in declaration order
        let index = DayOfWeek::ALL
            .iter()
            .position(|day| *day == slot.day)
            .unwrap_or_default();
        days[index].slots.push(slot);
    }

    days.retain(|day| !day.slots.is_empty());
    for day in &mut days {
        day.slots.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then(a.end_time.cmp(&b.end_time))
                .then_with(|| a.class_name.cmp(&b.class_name))
        });
    }

    days
}
