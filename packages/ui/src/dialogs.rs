//! Add/edit dialogs. Each one edits the form inside an [`EditorState`] signal
//! owned by its screen and asks the screen to submit; validation and the
//! network call happen there.

use dioxus::prelude::*;
use store::form::PHONE_DIGITS;
use store::{AppointmentForm, Doctor, DoctorForm, EditorState, Patient, PatientForm, RecordId};

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::views::ModalOverlay;

const PHONE_INPUT_ID: &str = "patient-phone";

/// Apply a typed phone value. Returns the stored number when the keystroke was
/// rejected and the input must be put back.
fn accept_phone(form: &mut PatientForm, typed: &str) -> Option<String> {
    if form.set_phone(typed) {
        None
    } else {
        Some(form.phone.clone())
    }
}

fn restore_input_script(id: &str, value: &str) -> String {
    format!(
        "(function() {{ var el = document.getElementById({id:?}); if (el) {{ el.value = {value:?}; }} }})();"
    )
}

#[component]
fn InlineMessage(message: Option<String>) -> Element {
    match message {
        Some(text) => rsx! { p { class: "dialog-message", role: "alert", "{text}" } },
        None => rsx! {},
    }
}

#[component]
fn DialogActions(
    editing: bool,
    busy: bool,
    on_submit: EventHandler<()>,
    on_close: EventHandler<()>,
    on_delete: Option<EventHandler<()>>,
) -> Element {
    rsx! {
        div {
            class: "dialog-actions",
            if let (true, Some(delete)) = (editing, on_delete) {
                Button {
                    variant: ButtonVariant::Destructive,
                    class: "dialog-delete",
                    disabled: busy,
                    onclick: move |_| delete.call(()),
                    "Delete"
                }
            }
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| on_close.call(()),
                "Cancel"
            }
            Button {
                variant: ButtonVariant::Primary,
                disabled: busy,
                onclick: move |_| on_submit.call(()),
                if editing { "Update" } else { "Create" }
            }
        }
    }
}

#[component]
pub fn PatientDialog(
    editor: Signal<EditorState<PatientForm>>,
    busy: bool,
    on_submit: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let state = editor();
    let title = if state.is_editing() { "Edit Patient" } else { "Add Patient" }.to_string();

    rsx! {
        ModalOverlay {
            title,
            on_close,
            div {
                class: "dialog-body",
                div {
                    class: "field",
                    Label { html_for: "patient-name", "Name" }
                    Input {
                        id: "patient-name",
                        value: state.form.name.clone(),
                        oninput: move |evt: FormEvent| editor.write().form.name = evt.value(),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "patient-email", "Email" }
                    Input {
                        id: "patient-email",
                        r#type: "email",
                        value: state.form.email.clone(),
                        oninput: move |evt: FormEvent| editor.write().form.email = evt.value(),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: PHONE_INPUT_ID, "Phone" }
                    Input {
                        id: PHONE_INPUT_ID,
                        r#type: "tel",
                        inputmode: "numeric",
                        placeholder: "10 digits",
                        maxlength: PHONE_DIGITS,
                        value: state.form.phone.clone(),
                        oninput: move |evt: FormEvent| {
                            let restore = accept_phone(&mut editor.write().form, &evt.value());
                            if let Some(stored) = restore {
                                // The value attribute is unchanged, so the DOM keeps the typed text.
                                document::eval(&restore_input_script(PHONE_INPUT_ID, &stored));
                            }
                        },
                    }
                }
                InlineMessage { message: state.message.clone() }
                DialogActions {
                    editing: state.is_editing(),
                    busy,
                    on_submit,
                    on_close,
                }
            }
        }
    }
}

#[component]
pub fn DoctorDialog(
    editor: Signal<EditorState<DoctorForm>>,
    busy: bool,
    on_submit: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let state = editor();
    let title = if state.is_editing() { "Edit Doctor" } else { "Add Doctor" }.to_string();

    rsx! {
        ModalOverlay {
            title,
            on_close,
            div {
                class: "dialog-body",
                div {
                    class: "field",
                    Label { html_for: "doctor-name", "Name" }
                    Input {
                        id: "doctor-name",
                        value: state.form.name.clone(),
                        oninput: move |evt: FormEvent| editor.write().form.name = evt.value(),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "doctor-specialization", "Specialization" }
                    Input {
                        id: "doctor-specialization",
                        value: state.form.specialization.clone(),
                        oninput: move |evt: FormEvent| editor.write().form.specialization = evt.value(),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "doctor-email", "Email" }
                    Input {
                        id: "doctor-email",
                        r#type: "email",
                        value: state.form.email.clone(),
                        oninput: move |evt: FormEvent| editor.write().form.email = evt.value(),
                    }
                }
                InlineMessage { message: state.message.clone() }
                DialogActions {
                    editing: state.is_editing(),
                    busy,
                    on_submit,
                    on_close,
                }
            }
        }
    }
}

#[component]
pub fn AppointmentDialog(
    editor: Signal<EditorState<AppointmentForm>>,
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    busy: bool,
    on_submit: EventHandler<()>,
    on_close: EventHandler<()>,
    on_delete: EventHandler<RecordId>,
) -> Element {
    let state = editor();
    let title = if state.is_editing() { "Edit Appointment" } else { "Schedule Appointment" }.to_string();
    let editing_id = state.editing;

    rsx! {
        ModalOverlay {
            title,
            on_close,
            div {
                class: "dialog-body",
                div {
                    class: "field",
                    Label { html_for: "appointment-doctor", "Doctor" }
                    select {
                        id: "appointment-doctor",
                        class: "field-input",
                        value: "{state.form.doctor_id}",
                        onchange: move |evt| editor.write().form.doctor_id = evt.value(),
                        option { value: "", disabled: true, selected: state.form.doctor_id.is_empty(), "Select a doctor" }
                        for doctor in doctors {
                            option {
                                key: "{doctor.id}",
                                value: "{doctor.id}",
                                selected: state.form.doctor_id == doctor.id.to_string(),
                                "{doctor.name}"
                            }
                        }
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "appointment-patient", "Patient" }
                    select {
                        id: "appointment-patient",
                        class: "field-input",
                        value: "{state.form.patient_id}",
                        onchange: move |evt| editor.write().form.patient_id = evt.value(),
                        option { value: "", disabled: true, selected: state.form.patient_id.is_empty(), "Select a patient" }
                        for patient in patients {
                            option {
                                key: "{patient.id}",
                                value: "{patient.id}",
                                selected: state.form.patient_id == patient.id.to_string(),
                                "{patient.name}"
                            }
                        }
                    }
                }
                div {
                    class: "field-row",
                    div {
                        class: "field",
                        Label { html_for: "appointment-date", "Date" }
                        Input {
                            id: "appointment-date",
                            r#type: "date",
                            value: state.form.date.clone(),
                            oninput: move |evt: FormEvent| editor.write().form.date = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "appointment-time", "Time" }
                        Input {
                            id: "appointment-time",
                            r#type: "time",
                            value: state.form.time.clone(),
                            oninput: move |evt: FormEvent| editor.write().form.time = evt.value(),
                        }
                    }
                }
                InlineMessage { message: state.message.clone() }
                DialogActions {
                    editing: state.is_editing(),
                    busy,
                    on_submit,
                    on_close,
                    on_delete: move |_| {
                        if let Some(id) = editing_id {
                            on_delete.call(id);
                        }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_phone_keystroke_restores_stored_value() {
        let mut form = PatientForm::default();
        assert_eq!(accept_phone(&mut form, "123"), None);
        assert_eq!(accept_phone(&mut form, "123a"), Some("123".to_string()));
        assert_eq!(form.phone, "123");
        assert_eq!(accept_phone(&mut form, "12345678901"), Some("123".to_string()));
        assert_eq!(accept_phone(&mut form, "12"), None);
        assert_eq!(form.phone, "12");
    }

    #[test]
    fn test_restore_script_targets_input() {
        let js = restore_input_script(PHONE_INPUT_ID, "123");
        assert!(js.contains(r#"document.getElementById("patient-phone")"#));
        assert!(js.contains(r#"el.value = "123";"#));
    }
}
