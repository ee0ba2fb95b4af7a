use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub google_api_key: String,
    pub google_cse_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub gemini_api_key: String,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
            },
            search: SearchConfig {
                google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
                google_cse_id: env::var("GOOGLE_CSE_ID").unwrap_or_default(),
            },
            llm: LlmConfig {
                gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            },
        })
    }

    /// All three upstream API keys are present.
    ///
    /// Missing keys do not prevent startup; requests that need them are
    /// rejected with an error body instead.
    pub fn has_all_keys(&self) -> bool {
        !self.search.google_api_key.is_empty()
            && !self.search.google_cse_id.is_empty()
            && !self.llm.gemini_api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys(google: &str, cse: &str, gemini: &str) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            search: SearchConfig {
                google_api_key: google.to_string(),
                google_cse_id: cse.to_string(),
            },
            llm: LlmConfig {
                gemini_api_key: gemini.to_string(),
                model: "gemini-2.5-flash".to_string(),
            },
        }
    }

    #[test]
    fn test_has_all_keys() {
        assert!(config_with_keys("a", "b", "c").has_all_keys());
        assert!(!config_with_keys("", "b", "c").has_all_keys());
        assert!(!config_with_keys("a", "", "c").has_all_keys());
        assert!(!config_with_keys("a", "b", "").has_all_keys());
    }
}
