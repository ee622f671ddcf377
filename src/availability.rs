//! Week-by-hour availability grid for a single field.
//!
//! Everything here is pure: callers hand in the field's live bookings and the
//! current local time, and get back a classified grid. Nothing is fetched or
//! stored.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{BookingStatus, hhmm};

/// Bookable start times, one per hour.
pub const TIME_SLOTS: [&str; 17] = [
    "06:00", "07:00", "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00",
    "16:00", "17:00", "18:00", "19:00", "20:00", "21:00", "22:00",
];

pub const DAYS_PER_WEEK: u64 = 7;

/// Every booking covers exactly one hour.
pub fn slot_duration() -> TimeDelta {
    TimeDelta::hours(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
    Pending,
}

/// The part of a booking the grid needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookedSlot {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub start_time: NaiveTime,
    pub status: BookingStatus,
}

/// One bookable hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Slot {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GridCell {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub time: NaiveTime,
    pub status: SlotStatus,
    pub past: bool,
    pub selectable: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GridRow {
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub time: NaiveTime,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekGrid {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub rows: Vec<GridRow>,
    pub can_go_previous: bool,
    pub previous_week: Option<NaiveDate>,
    pub next_week: NaiveDate,
    pub selected_slot: Option<Slot>,
}

pub fn parse_time_label(label: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(label.trim(), "%H:%M").ok()
}

pub fn format_time_label(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn slot_times() -> impl Iterator<Item = NaiveTime> {
    TIME_SLOTS.iter().filter_map(|label| parse_time_label(label))
}

pub fn is_slot_time(time: NaiveTime) -> bool {
    slot_times().any(|slot| slot == time)
}

/// End of a booking that starts at `start`. `None` if it would cross midnight.
pub fn slot_end(start: NaiveTime) -> Option<NaiveTime> {
    let (end, wrapped) = start.overflowing_add_signed(slot_duration());
    (wrapped == 0).then_some(end)
}

/// Classify one cell. The first matching booking wins.
pub fn slot_status(booked: &[BookedSlot], day: NaiveDate, time: NaiveTime) -> SlotStatus {
    match booked
        .iter()
        .find(|slot| slot.date == day && slot.start_time == time)
    {
        None => SlotStatus::Available,
        Some(slot) if slot.status == BookingStatus::Pending => SlotStatus::Pending,
        Some(_) => SlotStatus::Booked,
    }
}

/// A slot is past once its starting hour is strictly before `now`.
pub fn is_past_slot(day: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
    let start = NaiveTime::from_hms_opt(time.hour(), 0, 0).unwrap_or(time);
    day.and_time(start) < now
}

/// The pair a click on `(day, time)` would select, if the cell is selectable.
pub fn select(
    booked: &[BookedSlot],
    day: NaiveDate,
    time: NaiveTime,
    now: NaiveDateTime,
) -> Option<Slot> {
    let available = slot_status(booked, day, time) == SlotStatus::Available;
    (available && !is_past_slot(day, time, now)).then_some(Slot { date: day, time })
}

/// Start of the previous week, unless it would begin before `today`.
pub fn previous_week(week_start: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    week_start
        .checked_sub_days(Days::new(DAYS_PER_WEEK))
        .filter(|start| *start >= today)
}

pub fn next_week(week_start: NaiveDate) -> NaiveDate {
    week_start
        .checked_add_days(Days::new(DAYS_PER_WEEK))
        .unwrap_or(NaiveDate::MAX)
}

pub fn week_days(week_start: NaiveDate) -> Vec<NaiveDate> {
    week_start
        .iter_days()
        .take(DAYS_PER_WEEK as usize)
        .collect()
}

impl WeekGrid {
    pub fn build(
        week_start: NaiveDate,
        booked: &[BookedSlot],
        now: NaiveDateTime,
        selected: Option<Slot>,
    ) -> Self {
        let days = week_days(week_start);
        let rows = slot_times()
            .map(|time| GridRow {
                time,
                cells: days
                    .iter()
                    .map(|&date| {
                        let status = slot_status(booked, date, time);
                        let past = is_past_slot(date, time, now);
                        GridCell {
                            date,
                            time,
                            status,
                            past,
                            selectable: status == SlotStatus::Available && !past,
                            selected: selected == Some(Slot { date, time }),
                        }
                    })
                    .collect(),
            })
            .collect();

        let previous = previous_week(week_start, now.date());
        Self {
            week_start,
            week_end: days.last().copied().unwrap_or(week_start),
            days,
            rows,
            can_go_previous: previous.is_some(),
            previous_week: previous,
            next_week: next_week(week_start),
            selected_slot: selected,
        }
    }

    pub fn cell(&self, date: NaiveDate, time: NaiveTime) -> Option<&GridCell> {
        self.rows
            .iter()
            .find(|row| row.time == time)
            .and_then(|row| row.cells.iter().find(|cell| cell.date == date))
    }
}
