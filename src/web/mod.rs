//! Web API module for the tattoo catalogue.
//!
//! This module provides the REST API over tattoo records and categories,
//! including multipart image intake for create and update.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::{create_router, create_tattoo_router};
pub use server::WebServer;
