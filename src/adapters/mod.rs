// Adapters layer: concrete storage backends for the `Storage` port.

pub mod storage;

pub use storage::{LocalStorage, MemoryStorage};
