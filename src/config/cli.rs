use crate::config::toml_config::VerifierConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "truelist")]
#[command(about = "Check email deliverability against the Truelist verification API")]
pub struct CliArgs {
    /// Email addresses to verify
    #[arg(required = true)]
    pub emails: Vec<String>,

    /// Path to TOML configuration file (defaults to TRUELIST_* environment variables)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Fail on API errors instead of reporting an unknown result
    #[arg(long)]
    pub raise_on_error: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliArgs {
    /// 載入配置並套用命令列覆蓋設定
    pub fn load_config(&self) -> Result<VerifierConfig> {
        let mut config = match &self.config {
            Some(path) => VerifierConfig::from_file(path)?,
            None => VerifierConfig::from_env(),
        };

        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if self.raise_on_error {
            config.raise_on_error = true;
        }

        Ok(config)
    }
}
