pub mod entry;
pub mod store;

pub use entry::HistoryEntry;
pub use store::HistoryStore;
