//! tattoo-api - Tattoo catalogue API
//!
//! CRUD over tattoo records and categories, with a multipart image intake
//! that validates, names and stores uploaded images before the record
//! handler runs.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod tattoo;
pub mod upload;
pub mod web;

pub use config::Config;
pub use db::Database;
pub use error::{Result, TattooError};
pub use tattoo::{SqliteTattooModel, TattooModel};
pub use upload::{UploadConfig, UploadGate};
pub use web::WebServer;
