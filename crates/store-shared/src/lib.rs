//! # Store Shared
//!
//! Wire types shared by the API and its clients: request/response DTOs and
//! the problem-details error body.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldMessage};
