//! Pure domain types for the peanuts service.
//!
//! Nothing in this crate performs I/O. Storage and cache backends live in the
//! `peanuts` binary crate and implement the traits defined here.

pub mod cache;
pub mod character;
pub mod simulation;
pub mod storage;
