// Turn bookings
pub mod booking_service;
pub mod models;
pub mod repository;
pub mod sled_repository;

pub use booking_service::BookingService;
pub use models::{NewTurn, Turn, TurnRecord, TurnUpdate};
pub use repository::TurnRepository;
pub use sled_repository::SledTurnRepository;
