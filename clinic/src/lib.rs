pub mod auth;
pub mod booking;
pub mod directory;
pub mod error;
pub mod persistence;

pub use error::{ClinicError, ResourceKind, Result};
pub use persistence::SledStore;
