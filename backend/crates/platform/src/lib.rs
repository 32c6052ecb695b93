//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no knowledge of the medical domain:
//! - Password hashing (Argon2id) and the password strength policy
//! - Random secret generation
pub mod crypto;
pub mod password;
