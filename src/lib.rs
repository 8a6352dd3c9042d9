//! Personnel Console
//!
//! Client-side core for the personnel records REST API: typed models, a remote client,
//! a reducer-driven local store, the view-mode controller and the list/form/detail
//! screens, plus a terminal front-end built on top of them.

pub mod client;
pub mod config;
pub mod console;
pub mod controller;
pub mod errors;
pub mod models;
pub mod notify;
pub mod session;
pub mod store;
pub mod views;

pub use client::{HttpPersonnelClient, PersonnelApi};
pub use config::Config;
pub use errors::AppError;
pub use session::Session;
