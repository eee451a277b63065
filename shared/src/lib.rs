// shared/src/lib.rs

pub mod config;

pub use config::{Config, TokenSigning};
