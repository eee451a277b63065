pub mod authorization;

pub use authorization::{require_bearer_token, TOKEN_REQUIRED_MESSAGE};
