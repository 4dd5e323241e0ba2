use std::env;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub mongodb_collection: String,
    pub mongodb_app_name: Option<String>,
    pub mongodb_connect_timeout_secs: u64,
    pub mongodb_server_selection_timeout_secs: u64,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mongodb_uri = env::var("MONGODB_URI")
            .context("MONGODB_URI environment variable is required")?;

        let mongodb_database = env::var("MONGODB_DATABASE")
            .unwrap_or_else(|_| "foodapp".to_string());

        let mongodb_collection = env::var("MONGODB_COLLECTION")
            .unwrap_or_else(|_| "items".to_string());

        let mongodb_app_name = env::var("MONGODB_APP_NAME").ok();

        let mongodb_connect_timeout_secs = env::var("MONGODB_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .context("MONGODB_CONNECT_TIMEOUT_SECS must be a whole number of seconds")?;

        let mongodb_server_selection_timeout_secs =
            env::var("MONGODB_SERVER_SELECTION_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context(
                    "MONGODB_SERVER_SELECTION_TIMEOUT_SECS must be a whole number of seconds",
                )?;

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3500".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            mongodb_uri,
            mongodb_database,
            mongodb_collection,
            mongodb_app_name,
            mongodb_connect_timeout_secs,
            mongodb_server_selection_timeout_secs,
            service_port,
            service_host,
        })
    }

    /// Address the HTTP listener binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  MongoDB hosts: {}", redact_uri(&self.mongodb_uri));
        tracing::info!("  MongoDB database: {}", self.mongodb_database);
        tracing::info!("  MongoDB collection: {}", self.mongodb_collection);
        tracing::info!("  MongoDB app name: {}",
            self.mongodb_app_name.as_deref().unwrap_or("not set"));
        tracing::info!("  MongoDB connect timeout: {}s", self.mongodb_connect_timeout_secs);
        tracing::info!("  MongoDB server selection timeout: {}s",
            self.mongodb_server_selection_timeout_secs);
        tracing::info!("  Service listening on: {}", self.listen_addr());
    }
}

/// Strip credentials, path and options from a connection string so it can be logged
fn redact_uri(uri: &str) -> String {
    let (scheme, rest) = match uri.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => return "<unparseable connection string>".to_string(),
    };

    let hosts = rest.rsplit_once('@').map_or(rest, |(_, hosts)| hosts);
    let hosts = hosts.split(['/', '?']).next().unwrap_or_default();

    format!("{}://{}", scheme, hosts)
}
