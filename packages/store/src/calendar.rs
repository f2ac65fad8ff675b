//! # Calendar arithmetic for the appointment screen
//!
//! Appointments have no end time on the wire; for display each one occupies a
//! fixed slot (30 minutes unless configured otherwise) starting at its
//! date-time. [`events_from`] performs that projection.
//!
//! The rest of the module is date bookkeeping for the four calendar views:
//! which days a view shows, how "previous"/"next" move the anchor date, how a
//! month is laid out in Monday-first weeks, and which slots a day is divided
//! into between opening and closing hour.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{Appointment, NameLookup, RecordId};

/// An appointment placed on the calendar.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarEvent {
    pub id: RecordId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub appointment: Appointment,
}

impl CalendarEvent {
    pub fn time_label(&self) -> String {
        format!("{}–{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

pub fn events_from(appointments: &[Appointment], names: &NameLookup, slot_minutes: u32) -> Vec<CalendarEvent> {
    let length = Duration::minutes(i64::from(slot_minutes));
    let mut events: Vec<CalendarEvent> = appointments
        .iter()
        .map(|a| CalendarEvent {
            id: a.id,
            title: format!("{} with {}", names.patient(a.patient_id), names.doctor(a.doctor_id)),
            start: a.appointment_date_time,
            end: a.appointment_date_time + length,
            appointment: a.clone(),
        })
        .collect();
    events.sort_by_key(|e| (e.start, e.id));
    events
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CalendarView {
    Month,
    #[default]
    Week,
    Day,
    Agenda,
}

impl CalendarView {
    pub const ALL: [CalendarView; 4] = [
        CalendarView::Month,
        CalendarView::Week,
        CalendarView::Day,
        CalendarView::Agenda,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CalendarView::Month => "Month",
            CalendarView::Week => "Week",
            CalendarView::Day => "Day",
            CalendarView::Agenda => "Agenda",
        }
    }
}

/// Length of the agenda window.
pub const AGENDA_DAYS: u64 = 30;

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Days the view covers, in order.
pub fn visible_days(view: CalendarView, anchor: NaiveDate) -> Vec<NaiveDate> {
    match view {
        CalendarView::Day => vec![anchor],
        CalendarView::Week => week_start(anchor).iter_days().take(7).collect(),
        CalendarView::Month => month_grid(anchor).into_iter().flatten().collect(),
        CalendarView::Agenda => anchor.iter_days().take(AGENDA_DAYS as usize).collect(),
    }
}

/// Month laid out as full Monday-first weeks, including the spill-over days of
/// the neighbouring months.
pub fn month_grid(anchor: NaiveDate) -> Vec<[NaiveDate; 7]> {
    let first = month_start(anchor);
    let next_month = first + Months::new(1);
    let mut weeks = Vec::new();
    let mut monday = week_start(first);
    while monday < next_month {
        let mut week = [monday; 7];
        for (offset, day) in week.iter_mut().enumerate() {
            *day = monday + Duration::days(offset as i64);
        }
        weeks.push(week);
        monday += Duration::days(7);
    }
    weeks
}

/// Anchor date one period before or after `anchor`.
pub fn shift(view: CalendarView, anchor: NaiveDate, forward: bool) -> NaiveDate {
    let moved = match view {
        CalendarView::Day => Some(step_days(anchor, 1, forward)),
        CalendarView::Week => Some(step_days(anchor, 7, forward)),
        CalendarView::Agenda => Some(step_days(anchor, AGENDA_DAYS as i64, forward)),
        CalendarView::Month if forward => anchor.checked_add_months(Months::new(1)),
        CalendarView::Month => anchor.checked_sub_months(Months::new(1)),
    };
    moved.unwrap_or(anchor)
}

fn step_days(anchor: NaiveDate, days: i64, forward: bool) -> NaiveDate {
    if forward {
        anchor + Duration::days(days)
    } else {
        anchor - Duration::days(days)
    }
}

/// Heading for the toolbar.
pub fn range_label(view: CalendarView, anchor: NaiveDate) -> String {
    match view {
        CalendarView::Month => anchor.format("%B %Y").to_string(),
        CalendarView::Day => anchor.format("%A %b %-d, %Y").to_string(),
        CalendarView::Week => {
            let start = week_start(anchor);
            let end = start + Duration::days(6);
            format!("{} – {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
        }
        CalendarView::Agenda => {
            let end = anchor + Duration::days(AGENDA_DAYS as i64 - 1);
            format!("{} – {}", anchor.format("%b %-d"), end.format("%b %-d, %Y"))
        }
    }
}

/// Opening hours and slot length used to draw week and day views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotGrid {
    pub slot_minutes: u32,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            slot_minutes: 30,
            day_start_hour: 8,
            day_end_hour: 18,
        }
    }
}

impl SlotGrid {
    /// Slot start times for `day`, from opening up to (excluding) closing.
    pub fn slots(&self, day: NaiveDate) -> Vec<NaiveDateTime> {
        let step = Duration::minutes(i64::from(self.slot_minutes.max(1)));
        let (Some(open), Some(close)) = (
            NaiveTime::from_hms_opt(self.day_start_hour.min(23), 0, 0),
            self.close_time(),
        ) else {
            return Vec::new();
        };
        let mut slots = Vec::new();
        let mut at = day.and_time(open);
        let end = day.and_time(close);
        while at < end {
            slots.push(at);
            at += step;
        }
        slots
    }

    fn close_time(&self) -> Option<NaiveTime> {
        if self.day_end_hour >= 24 {
            NaiveTime::from_hms_opt(23, 59, 59)
        } else {
            NaiveTime::from_hms_opt(self.day_end_hour, 0, 0)
        }
    }

    /// Events starting inside the slot beginning at `slot`.
    pub fn events_in_slot<'a>(&self, events: &'a [CalendarEvent], slot: NaiveDateTime) -> Vec<&'a CalendarEvent> {
        let end = slot + Duration::minutes(i64::from(self.slot_minutes.max(1)));
        events
            .iter()
            .filter(|e| e.start >= slot && e.start < end)
            .collect()
    }
}

/// Events starting on `day`, in time order.
pub fn events_on(events: &[CalendarEvent], day: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.start.date() == day).collect()
}

/// Events that fall outside the slot grid on `day` (before opening or after
/// closing), so week and day views can still list them.
pub fn events_off_grid<'a>(events: &'a [CalendarEvent], day: NaiveDate, grid: &SlotGrid) -> Vec<&'a CalendarEvent> {
    let slots = grid.slots(day);
    let (Some(first), Some(last)) = (slots.first(), slots.last()) else {
        return events_on(events, day);
    };
    let close = *last + Duration::minutes(i64::from(grid.slot_minutes.max(1)));
    events_on(events, day)
        .into_iter()
        .filter(|e| e.start < *first || e.start >= close)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentDraft, Doctor, Entity, Patient};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn appointment(id: RecordId, day: NaiveDate, h: u32, m: u32) -> Appointment {
        Appointment::from_draft(
            id,
            &AppointmentDraft {
                doctor_id: 1,
                patient_id: 2,
                appointment_date_time: day.and_hms_opt(h, m, 0).unwrap(),
            },
        )
    }

    #[test]
    fn test_events_span_one_slot() {
        let day = date(2025, 3, 5);
        let names = NameLookup::new(
            &[Doctor { id: 1, name: "Grey".into(), specialization: String::new(), email: String::new(), phone: None }],
            &[Patient { id: 2, name: "Jane".into(), email: String::new(), phone: String::new() }],
        );
        let events = events_from(&[appointment(7, day, 9, 45)], &names, 30);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Jane with Grey");
        assert_eq!(events[0].end, day.and_hms_opt(10, 15, 0).unwrap());
        assert_eq!(events[0].time_label(), "09:45–10:15");

        let unnamed = events_from(&[appointment(7, day, 9, 45)], &NameLookup::default(), 30);
        assert_eq!(unnamed[0].title, "Patient 2 with Doctor 1");
    }

    #[test]
    fn test_week_starts_monday() {
        // 2025-03-05 is a Wednesday.
        assert_eq!(week_start(date(2025, 3, 5)), date(2025, 3, 3));
        assert_eq!(week_start(date(2025, 3, 3)), date(2025, 3, 3));
        assert_eq!(week_start(date(2025, 3, 9)), date(2025, 3, 3));

        let days = visible_days(CalendarView::Week, date(2025, 3, 5));
        assert_eq!(days.len(), 7);
        assert_eq!(days[6], date(2025, 3, 9));
    }

    #[test]
    fn test_month_grid_covers_whole_weeks() {
        // March 2025 starts on a Saturday and ends on a Monday.
        let grid = month_grid(date(2025, 3, 18));
        assert_eq!(grid.first().unwrap()[0], date(2025, 2, 24));
        assert_eq!(grid.last().unwrap()[0], date(2025, 3, 31));
        assert_eq!(grid.len(), 6);
        assert!(grid.iter().flatten().any(|d| *d == date(2025, 3, 1)));
    }

    #[test]
    fn test_shift_by_view() {
        let anchor = date(2025, 1, 31);
        assert_eq!(shift(CalendarView::Day, anchor, true), date(2025, 2, 1));
        assert_eq!(shift(CalendarView::Week, anchor, false), date(2025, 1, 24));
        // Month arithmetic clamps to the end of shorter months.
        assert_eq!(shift(CalendarView::Month, anchor, true), date(2025, 2, 28));
        assert_eq!(shift(CalendarView::Agenda, anchor, true), date(2025, 3, 2));
    }

    #[test]
    fn test_range_labels() {
        let anchor = date(2025, 3, 5);
        assert_eq!(range_label(CalendarView::Month, anchor), "March 2025");
        assert_eq!(range_label(CalendarView::Week, anchor), "Mar 3 – Mar 9, 2025");
        assert_eq!(range_label(CalendarView::Day, anchor), "Wednesday Mar 5, 2025");
    }

    #[test]
    fn test_slot_grid_and_lookup() {
        let day = date(2025, 3, 5);
        let grid = SlotGrid::default();
        let slots = grid.slots(day);
        assert_eq!(slots.len(), 20);
        assert_eq!(slots[0], day.and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(*slots.last().unwrap(), day.and_hms_opt(17, 30, 0).unwrap());

        let events = events_from(
            &[appointment(1, day, 9, 10), appointment(2, day, 19, 0), appointment(3, date(2025, 3, 6), 9, 0)],
            &NameLookup::default(),
            30,
        );
        let in_nine = grid.events_in_slot(&events, day.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(in_nine.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
        assert!(grid.events_in_slot(&events, day.and_hms_opt(9, 30, 0).unwrap()).is_empty());

        assert_eq!(events_on(&events, day).len(), 2);
        let off = events_off_grid(&events, day, &grid);
        assert_eq!(off.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);
    }
}
