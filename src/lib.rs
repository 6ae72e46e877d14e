//! Dictionary API: word corpus browsing, definition lookup, and per-user
//! favorites/history behind bearer-token auth.

pub mod app;
pub mod auth;
pub mod client;
pub mod common;
pub mod logging_middleware;
pub mod services;
pub mod users;
pub mod words;

#[cfg(test)]
pub(crate) mod test_support;
