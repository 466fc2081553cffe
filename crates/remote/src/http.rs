//! HTTP transport for the external store's command bridge.
//!
//! Every operation is a form-encoded POST carrying a `command`, an `action`,
//! the group credentials, and action-specific parameters. The bridge answers
//! with the flat key/value format handled by [`crate::wire`].

use crate::entity::Entity;
use crate::error::{ErrorKind, Result};
use crate::service::InventoryService;
use crate::wire::{self, Response};
use async_trait::async_trait;
use std::time::Duration;
use tracing::instrument;

/// Root prefix the bridge expects on absolute paths.
const ROOT_PREFIX: &str = "/My Inventory";

/// Inventory operations take noticeably longer than the bridge's other
/// commands on large accounts.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// An [`InventoryService`] backed by the store's HTTP command bridge.
pub struct HttpBackend {
    client: reqwest::Client,
    url: String,
    group: String,
    password: String,
}

impl HttpBackend {
    pub fn new(
        url: impl Into<String>,
        group: impl Into<String>,
        password: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let client = match reqwest::Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
        {
            Ok(client) => client,
            Err(error) => exn::bail!(ErrorKind::Transport(error.to_string())),
        };
        Ok(Self {
            client,
            url: url.into(),
            group: group.into(),
            password: password.into(),
        })
    }

    /// Sends one command to the bridge and parses the flat response.
    ///
    /// Transport failures (timeout, connection refused, non-2xx status) are
    /// the only errors raised here; a parsed response is returned even when
    /// the store reports failure, because what a `success=false` means
    /// depends on the action.
    async fn send(&self, action: &str, params: &[(&str, &str)]) -> Result<Response> {
        let mut form: Vec<(&str, &str)> = vec![
            ("command", "inventory"),
            ("action", action),
            ("group", &self.group),
            ("password", &self.password),
        ];
        form.extend_from_slice(params);

        let response = match self.client.post(&self.url).form(&form).send().await {
            Ok(response) => response,
            Err(error) if error.is_timeout() => {
                exn::bail!(ErrorKind::Transport(format!("{action}: request timed out")))
            },
            Err(error) => exn::bail!(ErrorKind::Transport(error.to_string())),
        };
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Transport(format!("{action}: HTTP {status}")));
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => exn::bail!(ErrorKind::Transport(error.to_string())),
        };
        Ok(Response::parse(&body))
    }
}

/// Prefixes a logical path with the root the bridge expects. Paths that are
/// already absolute pass through untouched.
fn absolute(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else if path.is_empty() {
        ROOT_PREFIX.to_string()
    } else {
        format!("{ROOT_PREFIX}/{path}")
    }
}

#[async_trait]
impl InventoryService for HttpBackend {
    #[instrument(level = "trace", skip(self))]
    async fn list(&self, path: &str) -> Result<Vec<Entity>> {
        let full = absolute(path);
        let response = self.send("ls", &[("path", &full)]).await?;
        if !response.success() {
            exn::bail!(ErrorKind::NotFound(format!(
                "{path}: {}",
                response.error().unwrap_or("unknown")
            )));
        }
        Ok(wire::parse_listing(response.data().unwrap_or(""), path))
    }

    #[instrument(level = "trace", skip(self))]
    async fn create_folder(&self, parent: &str, name: &str) -> Result<()> {
        let full = absolute(parent);
        let response = self
            .send("mkdir", &[("name", name), ("path", &full)])
            .await?;
        // The bridge gives no distinct signal for a name collision, so a
        // rejection here is not authoritative: callers confirm the folder by
        // listing the parent afterwards.
        if !response.success() {
            exn::bail!(ErrorKind::Rejected(format!(
                "mkdir {parent}/{name}: {}",
                response.error().unwrap_or("unknown")
            )));
        }
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    async fn move_entity(&self, source: &str, target: &str) -> Result<()> {
        let source_full = absolute(source);
        let target_full = absolute(target);
        let response = self
            .send("mv", &[("source", &source_full), ("target", &target_full)])
            .await?;
        if !response.success() {
            exn::bail!(ErrorKind::Rejected(format!(
                "mv {source} -> {target}: {}",
                response.error().unwrap_or("unknown")
            )));
        }
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    async fn delete_folder(&self, path: &str) -> Result<()> {
        let full = absolute(path);
        let response = self.send("rm", &[("path", &full)]).await?;
        if !response.success() {
            exn::bail!(ErrorKind::Rejected(format!(
                "rm {path}: {}",
                response.error().unwrap_or("unknown")
            )));
        }
        Ok(())
    }
}
