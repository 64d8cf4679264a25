// Client configuration: credentials, default restaurant, target
// environment and where the bearer token is persisted.

use std::path::PathBuf;

use crate::error::{Result, ToastError};

pub const PRODUCTION_BASE_URL: &str = "https://ws-api.toasttab.com/";
pub const SANDBOX_BASE_URL: &str = "https://ws-sandbox-api.eng.toasttab.com/";

/// Default token file, relative to the working directory.
pub const DEFAULT_TOKEN_PATH: &str = "toast-token.txt";

/// Vendor-issued API identity.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Which Toast deployment the client talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub restaurant_guid: Option<String>,
    pub environment: Environment,
    pub token_path: PathBuf,
}

impl ClientConfig {
    /// Production config with no default restaurant and the default token path.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        ClientConfig {
            credentials: Credentials {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
            },
            restaurant_guid: None,
            environment: Environment::Production,
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
        }
    }

    pub fn with_restaurant(mut self, guid: impl Into<String>) -> Self {
        self.restaurant_guid = Some(guid.into());
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Build a config from `TOAST_CLIENT_ID`, `TOAST_CLIENT_SECRET`,
    /// `TOAST_RESTAURANT_GUID`, `TOAST_SANDBOX` and `TOAST_TOKEN_PATH`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = non_empty("TOAST_CLIENT_ID").ok_or(ToastError::MissingConfig("TOAST_CLIENT_ID"))?;
        let client_secret =
            non_empty("TOAST_CLIENT_SECRET").ok_or(ToastError::MissingConfig("TOAST_CLIENT_SECRET"))?;

        let mut config = ClientConfig::new(client_id, client_secret);
        config.restaurant_guid = non_empty("TOAST_RESTAURANT_GUID");
        if non_empty("TOAST_SANDBOX").is_some_and(|v| is_truthy(&v)) {
            config.environment = Environment::Sandbox;
        }
        if let Some(path) = non_empty("TOAST_TOKEN_PATH") {
            config.token_path = PathBuf::from(path);
        }
        Ok(config)
    }

    pub fn base_url(&self) -> &'static str {
        self.environment.base_url()
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
