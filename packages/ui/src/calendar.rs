//! Appointment calendar with month, week, day and agenda views.
//!
//! Clicking an empty slot reports that slot's start time; clicking an event
//! reports the appointment id. In the month view a click on the day itself
//! reports the day's opening time.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use dioxus::prelude::*;
use store::calendar::{self, events_off_grid, events_on, CalendarEvent, CalendarView, SlotGrid};
use store::RecordId;

use crate::clock::today;
use crate::icons::{FaChevronLeft, FaChevronRight};
use crate::Icon;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[component]
pub fn AppointmentCalendar(
    events: Vec<CalendarEvent>,
    grid: SlotGrid,
    on_select_slot: EventHandler<NaiveDateTime>,
    on_select_event: EventHandler<RecordId>,
) -> Element {
    let mut view = use_signal(CalendarView::default);
    let mut anchor = use_signal(today);

    let current = view();
    let date = anchor();

    rsx! {
        div {
            class: "calendar",
            div {
                class: "calendar-toolbar",
                div {
                    class: "calendar-nav",
                    button { onclick: move |_| anchor.set(today()), "Today" }
                    button {
                        title: "Previous",
                        onclick: move |_| anchor.set(calendar::shift(current, date, false)),
                        Icon { icon: FaChevronLeft, width: 12, height: 12 }
                    }
                    button {
                        title: "Next",
                        onclick: move |_| anchor.set(calendar::shift(current, date, true)),
                        Icon { icon: FaChevronRight, width: 12, height: 12 }
                    }
                }
                span { class: "calendar-range", "{calendar::range_label(current, date)}" }
                div {
                    class: "calendar-views",
                    for mode in CalendarView::ALL {
                        button {
                            key: "{mode.label()}",
                            class: if mode == current { "active" } else { "" },
                            onclick: move |_| view.set(mode),
                            "{mode.label()}"
                        }
                    }
                }
            }
            match current {
                CalendarView::Month => rsx! {
                    MonthView { anchor: date, events, grid, on_select_slot, on_select_event }
                },
                CalendarView::Week | CalendarView::Day => rsx! {
                    SlotView {
                        days: calendar::visible_days(current, date),
                        events,
                        grid,
                        on_select_slot,
                        on_select_event,
                    }
                },
                CalendarView::Agenda => rsx! {
                    AgendaView { days: calendar::visible_days(current, date), events, on_select_event }
                },
            }
        }
    }
}

#[component]
fn EventChip(event: CalendarEvent, on_select_event: EventHandler<RecordId>) -> Element {
    let id = event.id;
    let time = event.start.format("%H:%M").to_string();
    rsx! {
        div {
            class: "calendar-event",
            title: "{event.title}",
            onclick: move |evt: Event<MouseData>| {
                evt.stop_propagation();
                on_select_event.call(id);
            },
            span { class: "calendar-event-time", "{time}" }
            span { " {event.title}" }
        }
    }
}

#[component]
fn MonthView(
    anchor: NaiveDate,
    events: Vec<CalendarEvent>,
    grid: SlotGrid,
    on_select_slot: EventHandler<NaiveDateTime>,
    on_select_event: EventHandler<RecordId>,
) -> Element {
    let month = anchor.month();
    let opening = NaiveTime::from_hms_opt(grid.day_start_hour, 0, 0).unwrap_or_default();
    let now = today();

    rsx! {
        div {
            class: "calendar-month",
            div {
                class: "calendar-month-header",
                for name in WEEKDAYS {
                    div { key: "{name}", "{name}" }
                }
            }
            for week in calendar::month_grid(anchor) {
                div {
                    key: "{week[0]}",
                    class: "calendar-month-week",
                    for day in week {
                        div {
                            key: "{day}",
                            class: match (day.month() == month, day == now) {
                                (_, true) => "calendar-day today",
                                (true, false) => "calendar-day",
                                (false, false) => "calendar-day outside",
                            },
                            onclick: move |_| on_select_slot.call(day.and_time(opening)),
                            span { class: "calendar-day-number", "{day.day()}" }
                            for event in events_on(&events, day) {
                                EventChip { key: "{event.id}", event: event.clone(), on_select_event }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SlotView(
    days: Vec<NaiveDate>,
    events: Vec<CalendarEvent>,
    grid: SlotGrid,
    on_select_slot: EventHandler<NaiveDateTime>,
    on_select_event: EventHandler<RecordId>,
) -> Element {
    let rows: Vec<(NaiveTime, String)> = days
        .first()
        .map(|d| {
            grid.slots(*d)
                .into_iter()
                .map(|s| (s.time(), s.format("%H:%M").to_string()))
                .collect()
        })
        .unwrap_or_default();
    let titles: Vec<(NaiveDate, String)> = days.iter().map(|d| (*d, d.format("%a %-d").to_string())).collect();
    let columns = days.len();
    let now = today();

    rsx! {
        div {
            class: "calendar-slots",
            style: "--calendar-columns: {columns}",
            div {
                class: "calendar-slots-header",
                div { class: "calendar-gutter" }
                for (day, title) in titles {
                    div {
                        key: "{day}",
                        class: if day == now { "calendar-column-title today" } else { "calendar-column-title" },
                        "{title}"
                        for event in events_off_grid(&events, day, &grid) {
                            EventChip { key: "{event.id}", event: event.clone(), on_select_event }
                        }
                    }
                }
            }
            for (time, label) in rows {
                div {
                    key: "{label}",
                    class: "calendar-slot-row",
                    div { class: "calendar-gutter", "{label}" }
                    for day in days.iter().copied() {
                        SlotCell {
                            key: "{day}-{time}",
                            slot: day.and_time(time),
                            occupants: grid.events_in_slot(&events, day.and_time(time)).into_iter().cloned().collect::<Vec<_>>(),
                            on_select_slot,
                            on_select_event,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SlotCell(
    slot: NaiveDateTime,
    occupants: Vec<CalendarEvent>,
    on_select_slot: EventHandler<NaiveDateTime>,
    on_select_event: EventHandler<RecordId>,
) -> Element {
    if occupants.is_empty() {
        return rsx! {
            div {
                class: "calendar-slot empty",
                onclick: move |_| on_select_slot.call(slot),
            }
        };
    }
    rsx! {
        div {
            class: "calendar-slot",
            for event in occupants {
                EventChip { key: "{event.id}", event, on_select_event }
            }
        }
    }
}

#[component]
fn AgendaView(days: Vec<NaiveDate>, events: Vec<CalendarEvent>, on_select_event: EventHandler<RecordId>) -> Element {
    let busy: Vec<(String, Vec<CalendarEvent>)> = days
        .into_iter()
        .map(|day| {
            let list: Vec<CalendarEvent> = events_on(&events, day).into_iter().cloned().collect();
            (day.format("%A, %B %-d").to_string(), list)
        })
        .filter(|(_, list)| !list.is_empty())
        .collect();

    rsx! {
        div {
            class: "calendar-agenda",
            if busy.is_empty() {
                p { class: "empty-state", "No appointments in this range." }
            }
            for (heading, list) in busy {
                div {
                    key: "{heading}",
                    class: "calendar-agenda-day",
                    h3 { "{heading}" }
                    for event in list {
                        div {
                            key: "{event.id}",
                            class: "calendar-agenda-item",
                            onclick: move |_| on_select_event.call(event.id),
                            span { class: "calendar-event-time", "{event.time_label()}" }
                            span { " {event.title}" }
                        }
                    }
                }
            }
        }
    }
}
