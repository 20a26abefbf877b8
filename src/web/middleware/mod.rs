//! Middleware for Web API.

pub mod auth;
pub mod cors;
pub mod upload;

pub use auth::{user_extractor, CurrentUser, JwtClaims, JwtState, OptionalUser};
pub use cors::create_cors_layer;
pub use upload::{receive, ImageUpload};
