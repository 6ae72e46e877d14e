//! # Auth Module
//!
//! Email/password accounts and stateless bearer tokens:
//! - Registration with bcrypt password hashing
//! - Login issuing short-lived HS256 JWTs
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod tokens;
pub mod validators;


pub use extractors::AuthedUser;
pub use routes::auth_routes;
