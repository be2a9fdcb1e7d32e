use crate::config::toml_config::WaitlistConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "waitlist")]
#[command(about = "Join and inspect a product waitlist")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding the stored collection (overrides the config file)
    #[arg(long, global = true)]
    pub storage_path: Option<String>,

    /// Storage key of the collection (overrides the config file)
    #[arg(long, global = true)]
    pub storage_key: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add an email address to the waitlist
    Join {
        email: String,

        /// Page surface the signup came from
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Print every stored entry as JSON
    List,
    /// Print the number of stored entries
    Count,
}

impl CliConfig {
    /// 載入設定檔（若有）並套用命令列覆蓋
    pub fn resolve(&self) -> Result<WaitlistConfig> {
        let mut config = match &self.config {
            Some(path) => WaitlistConfig::from_file(path)?,
            None => WaitlistConfig::default(),
        };

        if let Some(path) = &self.storage_path {
            config.storage.path = path.clone();
        }
        if let Some(key) = &self.storage_key {
            config.storage.key = key.clone();
        }

        Ok(config)
    }
}
