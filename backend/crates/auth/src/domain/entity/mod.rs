//! Domain Entities

pub mod refresh_token;
pub mod user;
