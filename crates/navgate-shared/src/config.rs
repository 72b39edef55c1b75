//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants;
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct NavConfig {
    pub api: ApiSettings,
    pub cache: CacheSettings,
    pub routes: RouteSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub menu_path: String,
    pub counts_path: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    pub tree_key_prefix: String,
    pub mapping_ttl_seconds: u64,
    pub refresh_interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RouteSettings {
    pub entry_allowlist: Vec<String>,
    pub unauthorized_route: String,
}

impl NavConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let allowlist: Vec<String> = constants::ENTRY_ROUTE_ALLOWLIST
            .iter()
            .map(|p| p.to_string())
            .collect();

        let config = Config::builder()
            .set_default("api.base_url", "http://127.0.0.1:8080")?
            .set_default("api.menu_path", "/api/v1/menus")?
            .set_default("api.counts_path", "/api/v1/notifications/counts")?
            .set_default("api.timeout_seconds", 30)?
            .set_default("cache.tree_key_prefix", constants::TREE_CACHE_KEY_PREFIX)?
            .set_default(
                "cache.mapping_ttl_seconds",
                constants::DEFAULT_MAPPING_TTL_SECS,
            )?
            .set_default(
                "cache.refresh_interval_seconds",
                constants::DEFAULT_REFRESH_INTERVAL_SECS,
            )?
            .set_default("routes.entry_allowlist", allowlist)?
            .set_default("routes.unauthorized_route", constants::UNAUTHORIZED_ROUTE)?
            .add_source(File::with_name("config/navgate").required(false))
            .add_source(Environment::with_prefix("NAVGATE").separator("__").try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
