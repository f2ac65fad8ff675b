//! # Domain models for patients, doctors and appointments
//!
//! Defines the records the clinic backend returns and the payloads it accepts.
//! Records carry the backend-assigned `id`; drafts are the create/update bodies
//! and never include one. Field names follow the backend's camelCase JSON.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Patient`] / [`PatientDraft`] | A patient and its `{name, email, phone}` payload. |
//! | [`Doctor`] / [`DoctorDraft`] | A doctor and its `{name, specialization, email}` payload. The record may carry a `phone` the payload never sends. |
//! | [`Appointment`] / [`AppointmentDraft`] | A doctor/patient pairing at a date-time. |
//! | [`SortKey`] | A comparable projection of one record field, used by [`crate::list::ListState`]. |
//!
//! ## [`Entity`]
//!
//! Every record type implements [`Entity`], which is what lets one generic list
//! state, one reconciliation controller and one HTTP client serve all three
//! screens. It names the collection path, the display nouns used in error
//! messages, the searchable text, the sort key for each sortable field, and how
//! a draft becomes (or patches) a record.

use std::fmt::Debug;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::form::{AppointmentForm, DoctorForm, DraftForm, PatientForm};

/// Backend-assigned record identifier.
pub type RecordId = i64;

/// A record type managed by a list screen.
pub trait Entity: Clone + Debug + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Create/update payload.
    type Draft: Clone + Debug + PartialEq + Serialize + 'static;
    /// Raw dialog input that validates into a [`Entity::Draft`].
    type Form: DraftForm<Draft = Self::Draft> + Clone + Debug + Default + PartialEq + 'static;
    /// Columns the list can be sorted by.
    type SortField: Copy + Debug + PartialEq + 'static;

    /// Path segment under the API base: `"patients"`.
    const COLLECTION: &'static str;
    /// Singular noun for messages: `"patient"`.
    const NOUN: &'static str;
    /// Plural noun for messages: `"patients"`.
    const PLURAL: &'static str;

    fn id(&self) -> RecordId;

    /// Searchable display fields, space separated.
    fn search_text(&self) -> String;

    fn sort_key(&self, field: Self::SortField) -> SortKey;

    /// Build the record the backend would return for `draft`.
    fn from_draft(id: RecordId, draft: &Self::Draft) -> Self;

    /// Overwrite the fields `draft` carries, keeping everything else.
    fn apply_draft(&mut self, draft: &Self::Draft);

    /// Dialog input pre-filled from this record.
    fn to_form(&self) -> Self::Form;
}

/// Comparable projection of a record field.
///
/// Text keys are case-folded on construction so comparisons are
/// case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Text(String),
    Number(i64),
    DateTime(NaiveDateTime),
}

impl SortKey {
    pub fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatientSort {
    #[default]
    Name,
    Email,
    Phone,
}

impl Entity for Patient {
    type Draft = PatientDraft;
    type Form = PatientForm;
    type SortField = PatientSort;

    const COLLECTION: &'static str = "patients";
    const NOUN: &'static str = "patient";
    const PLURAL: &'static str = "patients";

    fn id(&self) -> RecordId {
        self.id
    }

    fn search_text(&self) -> String {
        [self.name.as_str(), self.email.as_str(), self.phone.as_str()].join(" ")
    }

    fn sort_key(&self, field: PatientSort) -> SortKey {
        match field {
            PatientSort::Name => SortKey::text(&self.name),
            PatientSort::Email => SortKey::text(&self.email),
            PatientSort::Phone => SortKey::text(&self.phone),
        }
    }

    fn from_draft(id: RecordId, draft: &PatientDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
        }
    }

    fn apply_draft(&mut self, draft: &PatientDraft) {
        self.name = draft.name.clone();
        self.email = draft.email.clone();
        self.phone = draft.phone.clone();
    }

    fn to_form(&self) -> PatientForm {
        PatientForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Doctors
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoctorDraft {
    pub name: String,
    pub specialization: String,
    pub email: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DoctorSort {
    #[default]
    Name,
    Specialization,
    Email,
    Phone,
}

impl Doctor {
    /// Phone for display; doctors without one show `N/A`.
    pub fn display_phone(&self) -> &str {
        self.phone.as_deref().unwrap_or("N/A")
    }
}

impl Entity for Doctor {
    type Draft = DoctorDraft;
    type Form = DoctorForm;
    type SortField = DoctorSort;

    const COLLECTION: &'static str = "doctors";
    const NOUN: &'static str = "doctor";
    const PLURAL: &'static str = "doctors";

    fn id(&self) -> RecordId {
        self.id
    }

    fn search_text(&self) -> String {
        [
            self.name.as_str(),
            self.specialization.as_str(),
            self.email.as_str(),
            self.phone.as_deref().unwrap_or_default(),
        ]
        .join(" ")
    }

    fn sort_key(&self, field: DoctorSort) -> SortKey {
        match field {
            DoctorSort::Name => SortKey::text(&self.name),
            DoctorSort::Specialization => SortKey::text(&self.specialization),
            DoctorSort::Email => SortKey::text(&self.email),
            DoctorSort::Phone => SortKey::text(self.phone.as_deref().unwrap_or_default()),
        }
    }

    fn from_draft(id: RecordId, draft: &DoctorDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            specialization: draft.specialization.clone(),
            email: draft.email.clone(),
            phone: None,
        }
    }

    fn apply_draft(&mut self, draft: &DoctorDraft) {
        self.name = draft.name.clone();
        self.specialization = draft.specialization.clone();
        self.email = draft.email.clone();
    }

    fn to_form(&self) -> DoctorForm {
        DoctorForm {
            name: self.name.clone(),
            specialization: self.specialization.clone(),
            email: self.email.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: RecordId,
    pub doctor_id: RecordId,
    pub patient_id: RecordId,
    #[serde(with = "wire_datetime")]
    pub appointment_date_time: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    pub doctor_id: RecordId,
    pub patient_id: RecordId,
    #[serde(with = "wire_datetime")]
    pub appointment_date_time: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppointmentSort {
    PatientId,
    DoctorId,
    #[default]
    DateTime,
}

impl AppointmentSort {
    pub const ALL: [AppointmentSort; 3] = [
        AppointmentSort::PatientId,
        AppointmentSort::DoctorId,
        AppointmentSort::DateTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AppointmentSort::PatientId => "Patient ID",
            AppointmentSort::DoctorId => "Doctor ID",
            AppointmentSort::DateTime => "Date",
        }
    }

    /// Stable value for `<select>` options.
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentSort::PatientId => "patientId",
            AppointmentSort::DoctorId => "doctorId",
            AppointmentSort::DateTime => "date",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

impl Appointment {
    pub fn date_label(&self) -> String {
        self.appointment_date_time.format("%Y-%m-%d").to_string()
    }

    pub fn time_label(&self) -> String {
        self.appointment_date_time.format("%H:%M").to_string()
    }
}

impl Entity for Appointment {
    type Draft = AppointmentDraft;
    type Form = AppointmentForm;
    type SortField = AppointmentSort;

    const COLLECTION: &'static str = "appointments";
    const NOUN: &'static str = "appointment";
    const PLURAL: &'static str = "appointments";

    fn id(&self) -> RecordId {
        self.id
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.patient_id,
            self.doctor_id,
            wire_datetime::format(&self.appointment_date_time)
        )
    }

    fn sort_key(&self, field: AppointmentSort) -> SortKey {
        match field {
            AppointmentSort::PatientId => SortKey::Number(self.patient_id),
            AppointmentSort::DoctorId => SortKey::Number(self.doctor_id),
            AppointmentSort::DateTime => SortKey::DateTime(self.appointment_date_time),
        }
    }

    fn from_draft(id: RecordId, draft: &AppointmentDraft) -> Self {
        Self {
            id,
            doctor_id: draft.doctor_id,
            patient_id: draft.patient_id,
            appointment_date_time: draft.appointment_date_time,
        }
    }

    fn apply_draft(&mut self, draft: &AppointmentDraft) {
        self.doctor_id = draft.doctor_id;
        self.patient_id = draft.patient_id;
        self.appointment_date_time = draft.appointment_date_time;
    }

    fn to_form(&self) -> AppointmentForm {
        AppointmentForm {
            doctor_id: self.doctor_id.to_string(),
            patient_id: self.patient_id.to_string(),
            date: self.appointment_date_time.format("%Y-%m-%d").to_string(),
            time: self.appointment_date_time.format("%H:%M").to_string(),
        }
    }
}

/// Appointment date-times on the wire.
///
/// Always written as `YYYY-MM-DDTHH:mm:00`. Read leniently: the backend's
/// `LocalDateTime` drops zero seconds and may add a fraction.
pub mod wire_datetime {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    const READ_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

    pub fn format(value: &NaiveDateTime) -> String {
        value.format("%Y-%m-%dT%H:%M:00").to_string()
    }

    pub fn parse(value: &str) -> Option<NaiveDateTime> {
        READ_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value.trim(), fmt).ok())
    }

    /// Drop seconds and sub-second precision.
    pub fn truncate_to_minute(value: NaiveDateTime) -> NaiveDateTime {
        value
            .with_second(0)
            .and_then(|v| v.with_nanosecond(0))
            .unwrap_or(value)
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date-time: {raw}")))
    }
}

/// Id → display name lookup for doctor and patient dropdowns, calendar titles
/// and table cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NameLookup {
    pub doctors: std::collections::HashMap<RecordId, String>,
    pub patients: std::collections::HashMap<RecordId, String>,
}

impl NameLookup {
    pub fn new(doctors: &[Doctor], patients: &[Patient]) -> Self {
        Self {
            doctors: doctors.iter().map(|d| (d.id, d.name.clone())).collect(),
            patients: patients.iter().map(|p| (p.id, p.name.clone())).collect(),
        }
    }

    pub fn doctor(&self, id: RecordId) -> String {
        self.doctors
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Doctor {id}"))
    }

    pub fn patient(&self, id: RecordId) -> String {
        self.patients
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Patient {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_appointment_wire_names() {
        let draft = AppointmentDraft {
            doctor_id: 2,
            patient_id: 5,
            appointment_date_time: at(9, 30),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "doctorId": 2,
                "patientId": 5,
                "appointmentDateTime": "2025-03-01T09:30:00"
            })
        );
    }

    #[test]
    fn test_appointment_reads_backend_datetimes() {
        for raw in [
            "2025-03-01T09:30",
            "2025-03-01T09:30:00",
            "2025-03-01T09:30:00.000",
        ] {
            let json = format!(
                r#"{{"id":1,"doctorId":2,"patientId":5,"appointmentDateTime":"{raw}"}}"#
            );
            let appt: Appointment = serde_json::from_str(&json).unwrap();
            assert_eq!(appt.appointment_date_time, at(9, 30), "{raw}");
        }

        let bad = r#"{"id":1,"doctorId":2,"patientId":5,"appointmentDateTime":"tomorrow"}"#;
        assert!(serde_json::from_str::<Appointment>(bad).is_err());
    }

    #[test]
    fn test_doctor_phone_is_optional() {
        let doc: Doctor =
            serde_json::from_str(r#"{"id":3,"name":"House","specialization":"Diagnostics","email":"h@x.com"}"#)
                .unwrap();
        assert_eq!(doc.phone, None);
        assert_eq!(doc.search_text(), "House Diagnostics h@x.com ");
        assert_eq!(doc.display_phone(), "N/A");
    }

    #[test]
    fn test_patient_draft_payload_has_no_id() {
        let draft = PatientDraft {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "1234567890".into(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Jane Doe", "email": "jane@x.com", "phone": "1234567890"})
        );
    }

    #[test]
    fn test_apply_draft_keeps_identity() {
        let mut appt = Appointment::from_draft(
            42,
            &AppointmentDraft {
                doctor_id: 1,
                patient_id: 1,
                appointment_date_time: at(8, 0),
            },
        );
        appt.apply_draft(&AppointmentDraft {
            doctor_id: 7,
            patient_id: 9,
            appointment_date_time: at(14, 30),
        });
        assert_eq!(appt.id, 42);
        assert_eq!(appt.doctor_id, 7);
        assert_eq!(appt.to_form().time, "14:30");
    }

    #[test]
    fn test_sort_keys_fold_case() {
        let a = Patient { id: 1, name: "alice".into(), email: String::new(), phone: String::new() };
        let b = Patient { id: 2, name: "Bob".into(), email: String::new(), phone: String::new() };
        assert!(a.sort_key(PatientSort::Name) < b.sort_key(PatientSort::Name));
    }

    #[test]
    fn test_name_lookup_falls_back_to_ids() {
        let names = NameLookup::new(
            &[Doctor { id: 1, name: "Grey".into(), specialization: String::new(), email: String::new(), phone: None }],
            &[],
        );
        assert_eq!(names.doctor(1), "Grey");
        assert_eq!(names.doctor(2), "Doctor 2");
        assert_eq!(names.patient(5), "Patient 5");
    }

    #[test]
    fn test_appointment_sort_select_values() {
        for field in AppointmentSort::ALL {
            assert_eq!(AppointmentSort::parse(field.as_str()), Some(field));
        }
        assert_eq!(AppointmentSort::parse("nope"), None);
    }
}
