//! peanuts_client - CLI client and traffic generator for the peanuts service.

pub mod cli;
pub mod client;
pub mod error;
pub mod load;
pub mod output;

pub use client::PeanutsClient;
pub use error::{ClientError, Result};
