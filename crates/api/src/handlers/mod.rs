pub mod activity;
pub mod auth;
pub mod chatbot;
pub mod content;
pub mod engagement;
pub mod users;
