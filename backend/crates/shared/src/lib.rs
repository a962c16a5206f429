//! Shared Kernel - Cross-crate vocabulary
//!
//! The smallest shared core used by every crate in the workspace:
//! - The unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//! - Typed ID wrappers for persisted entities
//!
//! Only things whose meaning is identical in every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
