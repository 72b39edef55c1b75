// ============================================================================
// Navgate Session - HTTP API Clients
// File: crates/navgate-session/src/clients/http.rs
// Description: reqwest implementations of the outbound API ports
// ============================================================================

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use navgate_core::{DomainError, MenuRecord};
use navgate_shared::config::ApiSettings;
use navgate_shared::types::MenuCode;

use super::{MenuPermissionApi, NotificationCountApi};

fn build_client(timeout_seconds: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct HttpMenuPermissionApi {
    client: Client,
    base_url: String,
    menu_path: String,
}

impl HttpMenuPermissionApi {
    pub fn new(settings: &ApiSettings) -> Self {
        Self {
            client: build_client(settings.timeout_seconds),
            base_url: settings.base_url.clone(),
            menu_path: settings.menu_path.clone(),
        }
    }

    async fn fetch_internal(&self, role: &str) -> Result<Vec<MenuRecord>> {
        debug!("Fetching menu records for role {}", role);

        let url = format!("{}{}", self.base_url, self.menu_path);
        let response = self
            .client
            .get(&url)
            .query(&[("role", role)])
            .send()
            .await
            .context("Failed to reach menu permission endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Menu permission API error ({}): {}", status, body);
        }

        let records: Vec<MenuRecord> = response
            .json()
            .await
            .context("Failed to parse menu record list")?;

        debug!("Received {} menu records for role {}", records.len(), role);
        Ok(records)
    }
}

#[async_trait]
impl MenuPermissionApi for HttpMenuPermissionApi {
    async fn fetch_menu_records(&self, role: &str) -> Result<Vec<MenuRecord>, DomainError> {
        self.fetch_internal(role)
            .await
            .map_err(|e| DomainError::MenuFetchFailed(e.to_string()))
    }
}

#[derive(Clone)]
pub struct HttpNotificationCountApi {
    client: Client,
    base_url: String,
    counts_path: String,
}

impl HttpNotificationCountApi {
    pub fn new(settings: &ApiSettings) -> Self {
        Self {
            client: build_client(settings.timeout_seconds),
            base_url: settings.base_url.clone(),
            counts_path: settings.counts_path.clone(),
        }
    }

    async fn fetch_internal(&self) -> Result<HashMap<MenuCode, i64>> {
        let url = format!("{}{}", self.base_url, self.counts_path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach notification count endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Notification count API error ({}): {}", status, body);
        }

        let counts: HashMap<MenuCode, i64> = response
            .json()
            .await
            .context("Failed to parse notification counts")?;

        debug!("Received counts for {} menu codes", counts.len());
        Ok(counts)
    }
}

#[async_trait]
impl NotificationCountApi for HttpNotificationCountApi {
    async fn fetch_counts(&self) -> Result<HashMap<MenuCode, i64>, DomainError> {
        self.fetch_internal()
            .await
            .map_err(|e| DomainError::CountFetchFailed(e.to_string()))
    }
}
