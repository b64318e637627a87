//! Recurring weekly schedule slots.
//!
//! A slot is a block of time on one day of the week at one location. Only the
//! day name and the time of day matter: slots model a weekly timetable, not
//! calendar events.

use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{TuitionError, TuitionResult};

/// Day of the week, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = TuitionError;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| {
                let name = day.as_str().to_ascii_lowercase();
                lower == name || lower == name[..3]
            })
            .ok_or_else(|| TuitionError::Validation(format!("Unknown day of week: {}", s)))
    }
}

impl From<DayOfWeek> for chrono::Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => chrono::Weekday::Mon,
            DayOfWeek::Tuesday => chrono::Weekday::Tue,
            DayOfWeek::Wednesday => chrono::Weekday::Wed,
            DayOfWeek::Thursday => chrono::Weekday::Thu,
            DayOfWeek::Friday => chrono::Weekday::Fri,
            DayOfWeek::Saturday => chrono::Weekday::Sat,
            DayOfWeek::Sunday => chrono::Weekday::Sun,
        }
    }
}

/// Serde adapter for wall-clock times written as `"HH:MM"`.
///
/// Deserialisation also accepts `"HH:MM:SS"`.
pub mod wall_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_clock(&raw).map_err(D::Error::custom)
    }
}

pub fn parse_wall_clock(raw: &str) -> TuitionResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| TuitionError::Validation(format!("Invalid time of day: {}", raw)))
}

/// One recurring weekly block of a class.
///
/// Build new slots with [`ScheduleSlot::new`] so that `start_time < end_time`
/// always holds. Deserialisation goes through the same check. The `class_*`
/// fields annotate slots read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedSlot")]
pub struct ScheduleSlot {
    pub day: DayOfWeek,
    #[serde(with = "wall_clock")]
    pub start_time: NaiveTime,
    #[serde(with = "wall_clock")]
    pub end_time: NaiveTime,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_level: Option<String>,
}

impl ScheduleSlot {
    pub fn new(
        day: DayOfWeek,
        start_time: NaiveTime,
        end_time: NaiveTime,
        location: impl Into<String>,
    ) -> TuitionResult<Self> {
        let location = location.into().trim().to_string();
        if location.is_empty() {
            return Err(TuitionError::Validation(format!(
                "Slot on {} has no location",
                day
            )));
        }
        if start_time >= end_time {
            return Err(TuitionError::Validation(format!(
                "Slot on {} must start before it ends ({} >= {})",
                day,
                start_time.format("%H:%M"),
                end_time.format("%H:%M")
            )));
        }

        Ok(Self {
            day,
            start_time,
            end_time,
            location,
            class_id: None,
            class_name: None,
            academic_level: None,
        })
    }

    /// Attaches the owning class to a slot.
    pub fn for_class(
        mut self,
        class_id: Uuid,
        class_name: impl Into<String>,
        academic_level: Option<String>,
    ) -> Self {
        self.class_id = Some(class_id);
        self.class_name = Some(class_name.into());
        self.academic_level = academic_level;
        self
    }

    /// Start and end as minutes since midnight.
    pub fn minutes_since_midnight(&self) -> (u32, u32) {
        (minutes(self.start_time), minutes(self.end_time))
    }

    /// Same day and overlapping time ranges. Ranges are half-open, so a slot
    /// ending at 15:00 does not overlap one starting at 15:00.
    pub fn overlaps(&self, other: &ScheduleSlot) -> bool {
        if self.day != other.day {
            return false;
        }
        let (start, end) = self.minutes_since_midnight();
        let (other_start, other_end) = other.minutes_since_midnight();
        start < other_end && end > other_start
    }

    /// `"10:00-11:00"`
    pub fn time_range(&self) -> String {
        format!(
            "{}-{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

#[derive(Deserialize)]
struct UncheckedSlot {
    day: DayOfWeek,
    #[serde(with = "wall_clock")]
    start_time: NaiveTime,
    #[serde(with = "wall_clock")]
    end_time: NaiveTime,
    location: String,
    #[serde(default)]
    class_id: Option<Uuid>,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    academic_level: Option<String>,
}

impl TryFrom<UncheckedSlot> for ScheduleSlot {
    type Error = TuitionError;

    fn try_from(raw: UncheckedSlot) -> Result<Self, Self::Error> {
        let mut slot = ScheduleSlot::new(raw.day, raw.start_time, raw.end_time, raw.location)?;
        slot.class_id = raw.class_id;
        slot.class_name = raw.class_name;
        slot.academic_level = raw.academic_level;
        Ok(slot)
    }
}

fn minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Slot as submitted by a client, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRequest {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

impl TryFrom<&SlotRequest> for ScheduleSlot {
    type Error = TuitionError;

    fn try_from(request: &SlotRequest) -> Result<Self, Self::Error> {
        ScheduleSlot::new(
            request.day.parse()?,
            parse_wall_clock(&request.start_time)?,
            parse_wall_clock(&request.end_time)?,
            request.location.as_str(),
        )
    }
}

/// Validates every submitted slot, reporting the 1-based index of the first
/// invalid one.
pub fn validate_slots(requests: &[SlotRequest]) -> TuitionResult<Vec<ScheduleSlot>> {
    requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            ScheduleSlot::try_from(request).map_err(|err| match err {
                TuitionError::Validation(msg) => {
                    TuitionError::Validation(format!("Schedule {}: {}", index + 1, msg))
                }
                other => other,
            })
        })
        .collect()
}
