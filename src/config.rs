use std::env;

pub const DEFAULT_OFFICIAL_EMAIL: &str = "your_email@chitkara.edu.in";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub official_email: String,
    /// `None` disables the `AI` operation.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub ai_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let official_email =
            lookup("OFFICIAL_EMAIL").unwrap_or_else(|| DEFAULT_OFFICIAL_EMAIL.to_string());

        let gemini_api_key = lookup("GEMINI_API_KEY")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let gemini_model =
            lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let gemini_api_base = lookup("GEMINI_API_BASE")
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string());

        let ai_timeout_ms = lookup("AI_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(20_000);

        Self {
            port,
            official_email,
            gemini_api_key,
            gemini_model,
            gemini_api_base,
            ai_timeout_ms,
        }
    }
}
