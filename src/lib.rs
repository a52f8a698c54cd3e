pub mod cli;
pub mod config;
pub mod notes;
pub mod session;
pub mod store;
pub mod tracker;

pub use config::Config;
pub use store::NotesStore;
pub use tracker::Tracker;
