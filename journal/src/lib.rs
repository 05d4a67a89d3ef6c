// Persistent daily meal journal:
// - Date-keyed append-only entry collection
// - Whole-file JSON persistence with tolerant loading
// - Calendar-month indexing for the history view

pub mod entry;
pub use entry::*;

pub mod store;
pub use store::*;

pub mod calendar;
pub use calendar::*;

pub mod paths;
pub use paths::*;

pub mod errors;
pub use errors::*;
