//! # Client Module
//!
//! Consumer side of the REST API:
//! - `ApiClient`: typed HTTP calls with bearer-token handling
//! - `DashboardState`: the browse/search/favorites view as one state struct
//!   driven by a single update function
//! - `RequestSlot`: superseding in-flight fetches so stale pages never land
//! - `Dashboard`: wires the three together on a tokio runtime

pub mod api;
pub mod dashboard;
pub mod requests;
pub mod state;


pub use api::{ApiClient, ClientError};
pub use dashboard::{Dashboard, Event};
pub use requests::RequestSlot;
pub use state::{Action, Command, DashboardState, ViewMode, WordsRequest, PAGE_SIZE};
