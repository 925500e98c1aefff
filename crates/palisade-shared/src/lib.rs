//! # Palisade Shared
//!
//! Request/response types shared between the moderation service and the
//! forum backend that calls it.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
