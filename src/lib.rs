pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use crate::core::{
    collection::JsonEntryStore,
    flow::WaitlistFlow,
    form::{FormState, WaitlistForm},
};
pub use adapters::{LocalStorage, MemoryStorage};
pub use config::WaitlistConfig;
pub use domain::model::{SourceTag, StorageKey, Submission, WaitlistEntry};
pub use utils::error::{ErrorCategory, Result, WaitlistError};
