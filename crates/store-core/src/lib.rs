//! # Store Core
//!
//! The domain layer of the store backend.
//! Entities, paging, ports and services live here; this crate has zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod paging;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use paging::{Direction, Page, PageRequest};
