pub mod calendar;
pub mod config;
pub mod form;
pub mod list;
pub mod models;
pub mod resource;

mod memory;
pub use memory::{Call, MemoryBackend, MemoryError};

pub use calendar::{CalendarEvent, CalendarView, SlotGrid};
pub use config::ClinicConfig;
pub use form::{AppointmentForm, DoctorForm, DraftForm, EditorState, PatientForm, ValidationError};
pub use list::{FetchTicket, ListState, Reconciliation, SortDirection};
pub use models::{
    Appointment, AppointmentDraft, AppointmentSort, Doctor, DoctorDraft, DoctorSort, Entity, NameLookup, Patient,
    PatientDraft, PatientSort, RecordId,
};
pub use resource::{ListResource, Reconcile, RecordSource, SaveError};
