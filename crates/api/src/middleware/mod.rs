pub mod auth;
pub mod capability;
