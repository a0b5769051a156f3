use clap::Parser;
use truelist::utils::error::ErrorSeverity;
use truelist::utils::{logger, validation::Validate};
use truelist::{CliArgs, VerificationClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::debug!("CLI args: {:?}", args);

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let client = VerificationClient::new(config);
    let emails: Vec<&str> = args.emails.iter().map(String::as_str).collect();

    let mut worst: Option<ErrorSeverity> = None;
    for (email, outcome) in emails.iter().zip(client.validate_many(&emails).await) {
        match outcome {
            Ok(result) => {
                println!("{}", serde_json::to_string(&result.to_map())?);
            }
            Err(e) => {
                tracing::error!(
                    "❌ {}: {} (Kind: {:?}, Severity: {:?})",
                    email,
                    e,
                    e.kind(),
                    e.severity()
                );
                eprintln!("❌ {}: {}", email, e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());

                let severity = e.severity();
                worst = Some(worst.map_or(severity, |w| w.max(severity)));
            }
        }
    }

    let exit_code = match worst {
        None => 0,
        Some(ErrorSeverity::Medium) => 2,
        Some(ErrorSeverity::High) => 1,
        Some(ErrorSeverity::Critical) => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
