//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - The unified error type and its HTTP classification
//! - Typed identifiers
//!
//! Only things with the same meaning in every bounded context belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
