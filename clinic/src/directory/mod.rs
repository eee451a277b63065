// Patients and dentists
pub mod dentist_service;
pub mod models;
pub mod patient_service;
pub mod repository;
pub mod sled_repository;

pub use dentist_service::DentistService;
pub use models::{Dentist, DentistPatch, NewDentist, NewPatient, Patient, PatientPatch};
pub use patient_service::PatientService;
pub use repository::{DentistRepository, PatientRepository};
pub use sled_repository::{SledDentistRepository, SledPatientRepository};
