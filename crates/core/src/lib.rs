//! Domain logic for the SAKAP platform.
//!
//! Pure, I/O-free building blocks shared by the DB and API layers: common
//! type aliases, the domain error taxonomy, the role/capability model,
//! content-kind validation, and the rule-based chatbot dispatcher.

pub mod chatbot;
pub mod content;
pub mod error;
pub mod roles;
pub mod types;
