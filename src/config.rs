use std::env;

/// AppConfig
///
/// The application's configuration, immutable once loaded. This service has
/// deliberately few knobs: the bind address and the runtime environment
/// marker that switches the log output format.
#[derive(Clone)]
pub struct AppConfig {
    // Interface the HTTP listener binds to.
    pub host: String,
    // Port the HTTP listener binds to.
    pub port: u16,
    // Runtime environment marker. Controls the logging format.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between human-readable local
/// output and JSON logs for production aggregation.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Provides a safe, non-panicking AppConfig instance primarily used for
    /// test setup.
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Initializes the configuration from environment variables at startup.
    ///
    /// # Panics
    /// Panics when `PORT` is set but not a valid port number, so a
    /// misconfigured deployment fails at startup rather than binding
    /// somewhere unexpected.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .expect("FATAL: PORT must be a valid port number");

        Self { host, port, env }
    }

    /// The `host:port` string the TCP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
