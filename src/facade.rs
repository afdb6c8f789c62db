//! Top-level admin client.

use std::sync::Arc;

use crate::error::Result;
use crate::path::TreePath;
use crate::routes::{PortSpec, RouteManager};
use crate::tls::{dns_token_from_env, TlsManager};
use crate::transport::{EndpointConfig, HttpRemoteTree, RemoteTree};
use crate::tree::TreeValue;

/// Options for [`ProxyAdmin::setup`].
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// DNS provider credential for ACME issuance. When absent, the
    /// environment is consulted; when that is empty too, issuance is left
    /// unconfigured.
    pub dns_token: Option<String>,

    /// Local development mode: use the internal CA instead of ACME.
    pub local: bool,

    /// CA trust-store installation flag; unset means "do not touch".
    pub install_trust: Option<bool>,
}

/// Unified client for the remote server's admin configuration tree.
///
/// Thin composition over the per-subsystem managers; construct one per
/// endpoint. There is no process-wide default instance.
pub struct ProxyAdmin {
    tree: Arc<dyn RemoteTree>,
    /// Route list management.
    pub routes: RouteManager,
    /// Certificate issuance and PKI trust management.
    pub tls: TlsManager,
}

impl ProxyAdmin {
    /// Connect to an admin endpoint, managing the default server entry.
    pub fn connect(config: &EndpointConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpRemoteTree::new(config)?)))
    }

    /// Client over an explicit transport, managing the default server
    /// entry.
    pub fn with_transport(tree: Arc<dyn RemoteTree>) -> Self {
        Self {
            routes: RouteManager::new(Arc::clone(&tree)),
            tls: TlsManager::new(Arc::clone(&tree)),
            tree,
        }
    }

    /// Client over an explicit transport, managing a named server entry.
    pub fn with_server(tree: Arc<dyn RemoteTree>, server: impl Into<String>) -> Self {
        Self {
            routes: RouteManager::with_server(Arc::clone(&tree), server),
            tls: TlsManager::new(Arc::clone(&tree)),
            tree,
        }
    }

    /// One-shot bootstrap: certificate issuance policy, optional PKI
    /// trust, and the routing skeleton.
    ///
    /// Local mode configures the internal CA; otherwise ACME is configured
    /// when a DNS credential is available (argument first, environment
    /// second). Each step aborts the sequence on its first error.
    pub async fn setup(&self, opts: SetupOptions) -> Result<()> {
        if opts.local {
            self.tls.ensure_internal_issuer().await?;
        } else if let Some(token) = opts.dns_token.or_else(dns_token_from_env) {
            self.tls.ensure_acme_issuer(token).await?;
        } else {
            tracing::warn!("no dns credential available, skipping acme issuer setup");
        }

        self.tls.set_pki_trust(opts.install_trust).await?;
        self.routes.init().await
    }

    /// Upsert a reverse-proxy route from `from_host` to `to_target`.
    pub async fn add_reverse_proxy(&self, from_host: &str, to_target: &str) -> Result<()> {
        self.routes.add_reverse_proxy(from_host, to_target).await
    }

    /// Upsert the wildcard subdomain route for `domain`.
    pub async fn add_wildcard_route(&self, domain: &str) -> Result<()> {
        self.routes.add_wildcard_route(domain).await
    }

    /// Append a subdomain reverse-proxy under `domain`'s wildcard route.
    pub async fn add_sub_reverse_proxy(
        &self,
        domain: &str,
        subdomain: &str,
        ports: impl Into<PortSpec>,
        host: Option<&str>,
    ) -> Result<()> {
        self.routes
            .add_sub_reverse_proxy(domain, subdomain, ports, host)
            .await
    }

    /// Delete the route carrying `id`.
    pub async fn delete_route(&self, id: &str) -> Result<()> {
        self.routes.delete_route(id).await
    }

    /// Whether an entry with the given `@id` exists.
    pub async fn has_id(&self, id: &str) -> Result<bool> {
        self.tree.exists_id(id).await
    }

    /// Whether the given path exists in the tree.
    pub async fn has_path(&self, path: &str) -> Result<bool> {
        self.tree.exists_path(&TreePath::parse(path)?).await
    }

    /// Fetch the subtree at `path`.
    pub async fn get_config(&self, path: &str) -> Result<TreeValue> {
        self.tree.read(&TreePath::parse(path)?).await
    }
}
