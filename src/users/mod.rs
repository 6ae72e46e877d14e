// src/users/mod.rs
//! The signed-in user's profile placeholder, favorites and history

pub mod handlers;
pub mod routes;

#[cfg(test)]
mod tests;

pub use routes::users_routes;
