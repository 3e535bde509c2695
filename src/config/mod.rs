pub mod cli;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use clap::Parser;

pub const SECRET_ENV: &str = "NOTION_SECRET";
pub const DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";

#[derive(Debug, Clone, Parser)]
#[command(name = "notion-export")]
#[command(about = "Export a Notion database to flat files for the storefront")]
pub struct CliArgs {
    #[arg(long, default_value = "https://api.notion.com")]
    pub api_base_url: String,

    #[arg(long, default_value_t = 100)]
    pub page_size: u32,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 啟動時組好的完整設定。機密一律走環境變數，不進命令列。
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub secret: String,
    pub database_id: String,
    pub api_base_url: String,
    pub page_size: u32,
    pub output_path: String,
}

impl ExportConfig {
    /// 從環境變數補上機密後組出設定。缺 NOTION_SECRET 或
    /// NOTION_DATABASE_ID 就直接失敗，完全不會碰網路。
    pub fn from_env(args: &CliArgs) -> Result<Self> {
        let secret = require_env(SECRET_ENV)?;
        let database_id = require_env(DATABASE_ID_ENV)?;

        Ok(Self {
            secret,
            database_id,
            api_base_url: args.api_base_url.clone(),
            page_size: args.page_size,
            output_path: args.output_path.clone(),
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ExportError::MissingConfigError {
            field: name.to_string(),
        })
}

impl ConfigProvider for ExportConfig {
    fn secret(&self) -> &str {
        &self.secret
    }

    fn database_id(&self) -> &str {
        &self.database_id
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("secret", &self.secret)?;
        validate_non_empty_string("database_id", &self.database_id)?;
        validate_url("api_base_url", &self.api_base_url)?;
        validate_positive_number("page_size", self.page_size as usize, 1)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
