use dioxus::prelude::*;
use store::{DoctorForm, DoctorSort, EditorState, Entity, ListResource, Reconcile};

use crate::client::use_clinic;
use crate::components::{Button, ButtonVariant, ErrorBanner, SearchInput, SortHeader, Spinner};
use crate::debounce::use_debounced;
use crate::dialogs::DoctorDialog;
use crate::icons::{FaPenToSquare, FaPlus, FaTrash};
use crate::remote_list::{use_remote_list, SaveOutcome};
use crate::Icon;

#[component]
pub fn DoctorsView() -> Element {
    let clinic = use_clinic();
    let list = use_remote_list(|| ListResource::new(clinic.client.doctors(), Reconcile::Refetch));
    let mut state = list.state;
    let mut editor = use_signal(EditorState::<DoctorForm>::default);
    let mut busy = use_signal(|| false);
    let mut search = use_debounced(clinic.config.list.search_debounce_ms, move |text: String| {
        state.write().apply_search(text);
    });

    let submit = move |_| {
        let EditorState { form, editing, .. } = editor();
        spawn(async move {
            busy.set(true);
            match list.save(editing, form).await {
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

    let s = state.read();
    let rows = s.visible();

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Doctors" }
                Button {
                    onclick: move |_| editor.write().open_create(DoctorForm::default()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Add Doctor"
                }
            }
            ErrorBanner {
                message: s.error.clone(),
                on_dismiss: move |_| state.write().clear_error(),
            }
            SearchInput {
                value: s.search.clone(),
                placeholder: "Search doctors…",
                oninput: move |text: String| {
                    state.write().set_search(text.clone());
                    search.call(text);
                },
            }
            if s.loading && s.records.is_empty() {
                Spinner {}
            } else if rows.is_empty() {
                p { class: "empty-state", "No doctors found." }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            SortHeader {
                                label: "Name",
                                indicator: s.indicator(DoctorSort::Name),
                                onclick: move |_| state.write().toggle_sort(DoctorSort::Name),
                            }
                            SortHeader {
                                label: "Specialization",
                                indicator: s.indicator(DoctorSort::Specialization),
                                onclick: move |_| state.write().toggle_sort(DoctorSort::Specialization),
                            }
                            SortHeader {
                                label: "Email",
                                indicator: s.indicator(DoctorSort::Email),
                                onclick: move |_| state.write().toggle_sort(DoctorSort::Email),
                            }
                            SortHeader {
                                label: "Phone",
                                indicator: s.indicator(DoctorSort::Phone),
                                onclick: move |_| state.write().toggle_sort(DoctorSort::Phone),
                            }
                            th { class: "actions", "Actions" }
                        }
                    }
                    tbody {
                        for doctor in rows {
                            tr {
                                key: "{doctor.id}",
                                td { "{doctor.name}" }
                                td { "{doctor.specialization}" }
                                td { "{doctor.email}" }
                                td { "{doctor.display_phone()}" }
                                td {
                                    class: "actions",
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        title: "Edit",
                                        onclick: {
                                            let doctor = doctor.clone();
                                            move |_| editor.write().open_edit(doctor.id, doctor.to_form())
                                        },
                                        Icon { icon: FaPenToSquare, width: 12, height: 12 }
                                    }
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        title: "Delete",
                                        onclick: move |_| {
                                            spawn(list.delete(doctor.id));
                                        },
                                        Icon { icon: FaTrash, width: 12, height: 12 }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            if editor.read().open {
                DoctorDialog {
                    editor,
                    busy: busy(),
                    on_submit: submit,
                    on_close: close,
                }
            }
        }
    }
}
