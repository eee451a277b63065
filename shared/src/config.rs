use tracing::warn;

/// How access tokens are signed and verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSigning {
    /// HS256 with a shared secret
    Secret(String),
    /// RS256 with PEM encoded RSA keys read from disk
    RsaPem {
        private_key_path: String,
        public_key_path: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub data_dir: String,
    pub allowed_origins: Vec<String>,
    pub token_issuer: String,
    pub token_signing: TokenSigning,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_DATA_DIR: &str = "./data";
    const DEFAULT_TOKEN_ISSUER: &str = "clinic-backend";
    const DEFAULT_TOKEN_SECRET: &str = "clinic-development-secret";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("CLINIC_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
        let http_port = lookup("CLINIC_HTTP_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(Self::DEFAULT_HTTP_PORT);

        let token_signing = match (
            lookup("TOKEN_PRIVATE_KEY_PATH"),
            lookup("TOKEN_PUBLIC_KEY_PATH"),
        ) {
            (Some(private_key_path), Some(public_key_path)) => TokenSigning::RsaPem {
                private_key_path,
                public_key_path,
            },
            _ => TokenSigning::Secret(lookup("TOKEN_SECRET_KEY").unwrap_or_else(|| {
                warn!("TOKEN_SECRET_KEY not set, using the development secret");
                warn!("Set TOKEN_SECRET_KEY before exposing this server");
                Self::DEFAULT_TOKEN_SECRET.to_string()
            })),
        };

        Self {
            host,
            http_port,
            data_dir: lookup("CLINIC_DATA_DIR")
                .unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_string()),
            allowed_origins: lookup("CLINIC_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            token_issuer: lookup("TOKEN_ISSUER")
                .unwrap_or_else(|| Self::DEFAULT_TOKEN_ISSUER.to_string()),
            token_signing,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}
