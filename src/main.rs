use clap::Parser;
use waitlist::config::cli::{CliConfig, Command};
use waitlist::core::ConfigProvider;
use waitlist::utils::error::ErrorCategory;
use waitlist::utils::{logger, validation::Validate};
use waitlist::{JsonEntryStore, LocalStorage, SourceTag, StorageKey, WaitlistError, WaitlistFlow};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }
    tracing::debug!("Resolved config: {:?}", config);

    let storage = LocalStorage::new(config.storage_path());
    let store = JsonEntryStore::new(storage, StorageKey::new(config.storage_key()));
    let flow = WaitlistFlow::with_default_source(store, SourceTag::new(config.default_source()));

    let outcome = match &cli.command {
        Command::Join { email, source } => flow
            .submit(email, source.as_deref())
            .await
            .map(|submission| {
                println!("✅ You're on the list! We'll notify you when we launch.");
                println!(
                    "   {} (#{}, source: {})",
                    submission.entry.id, submission.position, submission.entry.source
                );
            }),
        Command::List => flow.entries().await.and_then(|entries| {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(())
        }),
        Command::Count => flow.count().await.map(|count| println!("{}", count)),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "Waitlist command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

fn exit_code(error: &WaitlistError) -> i32 {
    match error.category() {
        ErrorCategory::Validation | ErrorCategory::Configuration => 1,
        ErrorCategory::Duplicate => 2,
        ErrorCategory::Storage => 3,
    }
}
