//! Appointment screen: calendar or table over the appointment list, with
//! doctor and patient names resolved from their own lists.
//!
//! The three lists load independently and each reports its own failure.
//! Appointment mutations patch local state instead of refetching.

use dioxus::prelude::*;
use store::calendar::events_from;
use store::{
    AppointmentForm, AppointmentSort, EditorState, Entity, ListResource, NameLookup, Reconcile, RecordId,
    SortDirection,
};

use crate::calendar::AppointmentCalendar;
use crate::client::use_clinic;
use crate::components::{Button, ButtonVariant, ErrorBanner, Spinner};
use crate::dialogs::AppointmentDialog;
use crate::icons::{FaCalendarDays, FaPenToSquare, FaPlus, FaTable, FaTrash};
use crate::remote_list::{use_remote_list, SaveOutcome};
use crate::Icon;

#[component]
pub fn AppointmentsView() -> Element {
    let clinic = use_clinic();
    let grid = clinic.config.calendar.slot_grid();
    let appointments = use_remote_list(|| ListResource::new(clinic.client.appointments(), Reconcile::Patch));
    let doctors = use_remote_list(|| ListResource::new(clinic.client.doctors(), Reconcile::Refetch));
    let patients = use_remote_list(|| ListResource::new(clinic.client.patients(), Reconcile::Refetch));
    let mut state = appointments.state;

    let mut editor = use_signal(EditorState::<AppointmentForm>::default);
    let mut busy = use_signal(|| false);
    let mut show_calendar = use_signal(|| true);

    let submit = move |_| {
        let EditorState { form, editing, .. } = editor();
        spawn(async move {
            busy.set(true);
            match appointments.save(editing, form).await {
                SaveOutcome::Saved => editor.write().close(),
                SaveOutcome::Invalid(message) | SaveOutcome::Failed(message) => {
                    editor.write().message = Some(message);
                }
            }
            busy.set(false);
        });
    };

    let close = move |_| {
        editor.write().close();
        state.write().clear_error();
    };

    let mut open_existing = move |id: RecordId| {
        let found = state.read().find(id).map(|a| a.to_form());
        if let Some(form) = found {
            editor.write().open_edit(id, form);
        }
    };

    let mut remove = move |id: RecordId| {
        editor.write().close();
        spawn(appointments.delete(id));
    };

    let doctor_list = doctors.state.read().records.clone();
    let patient_list = patients.state.read().records.clone();
    let names = NameLookup::new(&doctor_list, &patient_list);

    let s = state.read();
    let events = events_from(&s.records, &names, grid.slot_minutes);
    let rows = s.visible();

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Appointments" }
                div {
                    class: "view-header-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| show_calendar.toggle(),
                        if show_calendar() {
                            Icon { icon: FaTable, width: 12, height: 12 }
                            " Table View"
                        } else {
                            Icon { icon: FaCalendarDays, width: 12, height: 12 }
                            " Calendar View"
                        }
                    }
                    Button {
                        onclick: move |_| editor.write().open_create(AppointmentForm::default()),
                        Icon { icon: FaPlus, width: 12, height: 12 }
                        " Schedule Appointment"
                    }
                }
            }
            ErrorBanner {
                message: s.error.clone(),
                on_dismiss: move |_| state.write().clear_error(),
            }
            ErrorBanner { message: doctors.state.read().error.clone() }
            ErrorBanner { message: patients.state.read().error.clone() }

            if s.loading && s.records.is_empty() {
                Spinner {}
            } else if show_calendar() {
                AppointmentCalendar {
                    events,
                    grid,
                    on_select_slot: move |start| editor.write().open_create(AppointmentForm::for_slot(start)),
                    on_select_event: open_existing,
                }
            } else {
                div {
                    class: "table-controls",
                    label { r#for: "appointment-sort", "Sort by" }
                    select {
                        id: "appointment-sort",
                        class: "field-input",
                        value: "{s.sort_field.as_str()}",
                        onchange: move |evt| {
                            if let Some(field) = AppointmentSort::parse(&evt.value()) {
                                state.write().set_sort_field(field);
                            }
                        },
                        for field in AppointmentSort::ALL {
                            option {
                                key: "{field.as_str()}",
                                value: "{field.as_str()}",
                                selected: s.sort_field == field,
                                "{field.label()}"
                            }
                        }
                    }
                    Button {
                        variant: if s.sort_direction == SortDirection::Ascending { ButtonVariant::Secondary } else { ButtonVariant::Outline },
                        onclick: move |_| state.write().set_sort_direction(SortDirection::Ascending),
                        "Asc"
                    }
                    Button {
                        variant: if s.sort_direction == SortDirection::Descending { ButtonVariant::Secondary } else { ButtonVariant::Outline },
                        onclick: move |_| state.write().set_sort_direction(SortDirection::Descending),
                        "Desc"
                    }
                }
                if rows.is_empty() {
                    p { class: "empty-state", "No appointments found." }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Patient" }
                                th { "Doctor" }
                                th { "Date" }
                                th { "Time" }
                                th { class: "actions", "Actions" }
                            }
                        }
                        tbody {
                            for appointment in rows {
                                tr {
                                    key: "{appointment.id}",
                                    td { "{names.patient(appointment.patient_id)}" }
                                    td { "{names.doctor(appointment.doctor_id)}" }
                                    td { "{appointment.date_label()}" }
                                    td { "{appointment.time_label()}" }
                                    td {
                                        class: "actions",
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Edit",
                                            onclick: move |_| open_existing(appointment.id),
                                            Icon { icon: FaPenToSquare, width: 12, height: 12 }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Delete",
                                            onclick: move |_| remove(appointment.id),
                                            Icon { icon: FaTrash, width: 12, height: 12 }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if editor.read().open {
                AppointmentDialog {
                    editor,
                    doctors: doctor_list.clone(),
                    patients: patient_list.clone(),
                    busy: busy(),
                    on_submit: submit,
                    on_close: close,
                    on_delete: remove,
                }
            }
        }
    }
}
