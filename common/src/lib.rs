//! Shared model and core logic of the form builder.
//!
//! The `backend` service and any client embed this crate: it owns the field
//! registry, validation, the backend DTO mapping, submission storage on top of
//! a key-value store, CSV/JSON export and the editing workspace.

pub mod export;
pub mod mapper;
pub mod model;
pub mod requests;
pub mod storage;
pub mod validation;
pub mod workspace;
