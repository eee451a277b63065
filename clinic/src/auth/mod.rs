// Public API
pub mod identity_service;
pub mod models;
pub mod password;
pub mod repository;
pub mod sled_repository;
pub mod token;

// Re-export commonly used types
pub use identity_service::IdentityService;
pub use models::{NewUser, User};
pub use repository::UserRepository;
pub use sled_repository::SledUserRepository;
pub use token::{ACCESS_TOKEN_TTL_MINUTES, Claims, INVALID_TOKEN_MESSAGE, TokenService};
