// src/words/mod.rs
//! Word listing, word detail, and the per-word favorite/viewed actions

pub mod handlers;
pub mod models;
pub mod routes;


pub use routes::words_routes;
