pub mod collection;
pub mod flow;
pub mod form;

pub use crate::domain::model::{SourceTag, StorageKey, Submission, WaitlistEntry};
pub use crate::domain::ports::{ConfigProvider, EntryStore, Storage};
pub use crate::utils::error::Result;
