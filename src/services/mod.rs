// src/services/mod.rs
//
// Persistence and outbound services shared by the route modules

pub mod corpus;
pub mod dictionary;
pub mod user_store;
pub mod word_store;

// Re-export commonly used types for convenience
pub use corpus::CorpusLoader;
pub use dictionary::DictionaryService;
pub use user_store::UserStore;
pub use word_store::WordStore;
