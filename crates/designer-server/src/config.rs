//! Server configuration
//!
//! Read once at startup from the environment (after `.env` is loaded) and
//! handed to the adapters explicitly.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::adapters::openai::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_DESIGNS_FILE: &str = "data/designs.json";
const DEFAULT_PROMPTS_FILE: &str = "data/prompts.json";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub designs_file: PathBuf,
    pub prompts_file: PathBuf,
    pub cors_origins: Vec<String>,
    pub openai: OpenAiConfig,
}

impl ServerConfig {
    /// Build from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("DESIGNER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid DESIGNER_PORT: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let timeout = match get("OPENAI_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("Invalid OPENAI_TIMEOUT_SECS: {raw}"))?,
            )),
            None => None,
        };

        let cors_origins = get("DESIGNER_CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            host: get("DESIGNER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            designs_file: get("DESIGNER_DESIGNS_FILE")
                .unwrap_or_else(|| DEFAULT_DESIGNS_FILE.to_string())
                .into(),
            prompts_file: get("DESIGNER_PROMPTS_FILE")
                .unwrap_or_else(|| DEFAULT_PROMPTS_FILE.to_string())
                .into(),
            cors_origins,
            openai: OpenAiConfig {
                api_key: get("OPENAI_API_KEY"),
                base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
