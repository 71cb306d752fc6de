//! HTTP transport for the analyzer.
//!
//! Request validation (age range, JSON shape) happens here. Everything
//! else is delegated to `crate::analysis`.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_api_server, ApiServer};
pub use types::{AnalyzeRequest, AnalyzeResponse, ApiContext};
