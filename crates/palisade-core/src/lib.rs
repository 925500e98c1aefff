//! # Palisade Core
//!
//! The domain layer of the Palisade moderation service.
//! This crate contains the moderation pipeline with zero infrastructure
//! dependencies: every external collaborator (counter store, persistence,
//! audit sink, token validation) is reached through a port trait.

pub mod domain;
pub mod error;
pub mod moderation;
pub mod ports;

pub use error::DomainError;
