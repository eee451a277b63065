use clinic::auth::{IdentityService, SledUserRepository, TokenService};
use clinic::booking::{BookingService, SledTurnRepository};
use clinic::directory::{
    DentistService, PatientService, SledDentistRepository, SledPatientRepository,
};
use clinic::SledStore;
use std::sync::Arc;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub patients: Arc<PatientService>,
    pub dentists: Arc<DentistService>,
    pub booking: Arc<BookingService>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wire repositories and services over one database handle.
    pub fn new(store: SledStore, tokens: TokenService) -> Self {
        let tokens = Arc::new(tokens);

        let user_repo = Arc::new(SledUserRepository::new(store.clone()));
        let patient_repo = Arc::new(SledPatientRepository::new(store.clone()));
        let dentist_repo = Arc::new(SledDentistRepository::new(store.clone()));
        let turn_repo = Arc::new(SledTurnRepository::new(store));

        Self {
            identity: Arc::new(IdentityService::new(user_repo, tokens.clone())),
            patients: Arc::new(PatientService::new(patient_repo.clone())),
            dentists: Arc::new(DentistService::new(dentist_repo.clone())),
            booking: Arc::new(BookingService::new(turn_repo, patient_repo, dentist_repo)),
            tokens,
        }
    }
}
