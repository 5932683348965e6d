pub mod aggregate;
pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod models;
pub mod notify;
pub mod session;
pub mod store;
