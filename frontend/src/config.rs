const DEFAULT_API_BASE_URL: &str = "https://expense-tracker-backend-q9it.onrender.com";
const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_FIREBASE_API_KEY: &str = "";

/// Endpoints the client talks to. Values are baked in at build time
/// (`EXPENSE_API_BASE_URL`, `IDENTITY_BASE_URL`, `FIREBASE_API_KEY`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub identity_base_url: String,
    pub firebase_api_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_API_BASE_URL,
            DEFAULT_IDENTITY_URL,
            DEFAULT_FIREBASE_API_KEY,
        )
    }
}

impl AppConfig {
    pub fn new(api_base_url: &str, identity_base_url: &str, firebase_api_key: &str) -> Self {
        Self {
            api_base_url: normalize_base(api_base_url),
            identity_base_url: normalize_base(identity_base_url),
            firebase_api_key: firebase_api_key.trim().to_string(),
        }
    }

    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("EXPENSE_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL),
            option_env!("IDENTITY_BASE_URL").unwrap_or(DEFAULT_IDENTITY_URL),
            option_env!("FIREBASE_API_KEY").unwrap_or(DEFAULT_FIREBASE_API_KEY),
        )
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    pub fn identity_url(&self, action: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.identity_base_url, action, self.firebase_api_key
        )
    }
}

fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
