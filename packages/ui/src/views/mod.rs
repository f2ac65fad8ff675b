mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod patients;
pub use patients::PatientsView;

mod doctors;
pub use doctors::DoctorsView;

mod appointments;
pub use appointments::AppointmentsView;
