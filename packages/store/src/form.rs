//! # Draft forms and client-side validation
//!
//! Each dialog edits a form of raw strings. [`DraftForm::validate`] turns a form
//! into the payload the backend accepts, or explains which field is missing or
//! malformed. Validation only blocks obviously incomplete input; the backend
//! stays the authority on everything else (email syntax, scheduling conflicts,
//! duplicates).
//!
//! [`EditorState`] is the dialog around a form: whether it is open, the draft
//! being edited, and the id of the record under edit (`None` in create mode).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::models::{wire_datetime, AppointmentDraft, DoctorDraft, PatientDraft, RecordId};

/// Number of digits a patient phone number must have.
pub const PHONE_DIGITS: usize = 10;

/// Why a form cannot be submitted.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Phone number must be exactly 10 digits")]
    Phone,
    #[error("{0} must be selected from the list")]
    InvalidId(&'static str),
    #[error("Date must be in YYYY-MM-DD format")]
    InvalidDate,
    #[error("Time must be in HH:mm format")]
    InvalidTime,
}

/// Raw dialog input that can be checked and converted into a payload.
pub trait DraftForm {
    type Draft;

    fn validate(&self) -> Result<Self::Draft, ValidationError>;
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Whether `value` is an acceptable in-progress phone input: digits only, at
/// most [`PHONE_DIGITS`] of them.
pub fn is_partial_phone(value: &str) -> bool {
    value.len() <= PHONE_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl PatientForm {
    /// Replace the phone input if `value` is still a valid partial number.
    ///
    /// Returns `false` (leaving the field untouched) for non-digits or for
    /// anything past ten digits.
    pub fn set_phone(&mut self, value: &str) -> bool {
        if !is_partial_phone(value) {
            return false;
        }
        self.phone = value.to_string();
        true
    }
}

impl DraftForm for PatientForm {
    type Draft = PatientDraft;

    fn validate(&self) -> Result<PatientDraft, ValidationError> {
        let name = required(&self.name, "Name")?;
        let email = required(&self.email, "Email")?;
        let phone = required(&self.phone, "Phone")?;
        if phone.len() != PHONE_DIGITS || !is_partial_phone(&phone) {
            return Err(ValidationError::Phone);
        }
        Ok(PatientDraft { name, email, phone })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DoctorForm {
    pub name: String,
    pub specialization: String,
    pub email: String,
}

impl DraftForm for DoctorForm {
    type Draft = DoctorDraft;

    fn validate(&self) -> Result<DoctorDraft, ValidationError> {
        Ok(DoctorDraft {
            name: required(&self.name, "Name")?,
            specialization: required(&self.specialization, "Specialization")?,
            email: required(&self.email, "Email")?,
        })
    }
}

/// Appointment dialog input. Ids are the selected `<option>` values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppointmentForm {
    pub doctor_id: String,
    pub patient_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:mm`
    pub time: String,
}

impl AppointmentForm {
    /// Empty selection pre-filled with a calendar slot's date and time.
    pub fn for_slot(start: NaiveDateTime) -> Self {
        let start = wire_datetime::truncate_to_minute(start);
        Self {
            date: start.format("%Y-%m-%d").to_string(),
            time: start.format("%H:%M").to_string(),
            ..Self::default()
        }
    }
}

fn parse_id(value: &str, field: &'static str) -> Result<RecordId, ValidationError> {
    required(value, field)?
        .parse()
        .map_err(|_| ValidationError::InvalidId(field))
}

impl DraftForm for AppointmentForm {
    type Draft = AppointmentDraft;

    fn validate(&self) -> Result<AppointmentDraft, ValidationError> {
        let doctor_id = parse_id(&self.doctor_id, "Doctor")?;
        let patient_id = parse_id(&self.patient_id, "Patient")?;
        let date = required(&self.date, "Date")?;
        let time = required(&self.time, "Time")?;
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate)?;
        let time = NaiveTime::parse_from_str(&time, "%H:%M")
            .map_err(|_| ValidationError::InvalidTime)?;
        Ok(AppointmentDraft {
            doctor_id,
            patient_id,
            appointment_date_time: date.and_time(time),
        })
    }
}

/// State of an add/edit dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorState<F> {
    pub open: bool,
    pub form: F,
    /// Record under edit; `None` means the dialog creates a new record.
    pub editing: Option<RecordId>,
    /// Inline message shown inside the dialog.
    pub message: Option<String>,
}

impl<F: Default> EditorState<F> {
    pub fn open_create(&mut self, form: F) {
        *self = Self {
            open: true,
            form,
            editing: None,
            message: None,
        };
    }

    pub fn open_edit(&mut self, id: RecordId, form: F) {
        *self = Self {
            open: true,
            form,
            editing: Some(id),
            message: None,
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}
