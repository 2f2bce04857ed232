pub mod chain;
pub mod characters;
pub mod demo;
pub mod error;
pub mod health;
pub mod payment;

pub use error::{error_response, AppError};
