//! API endpoint handlers.
//!
//! Handlers stay thin: request validation here, all analysis in
//! `crate::analysis`.

pub mod analyze;
pub mod drugs;
pub mod health;
