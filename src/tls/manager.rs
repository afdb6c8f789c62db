//! TLS automation and PKI trust management.

use std::env;
use std::sync::Arc;

use crate::error::Result;
use crate::path::TreePath;
use crate::provision::PathInitializer;
use crate::tls::entities::{AutomationPolicy, Issuer, PkiTrust};
use crate::transport::{RemoteTree, WriteMode};
use crate::tree::to_tree;

/// Path of the TLS automation namespace.
pub const AUTOMATION_PATH: &str = "/apps/tls/automation";

/// Path of the local certificate authority entry.
pub const PKI_LOCAL_CA_PATH: &str = "/apps/pki/certificate_authorities/local";

/// Primary environment variable consulted for the DNS provider credential.
pub const DNS_TOKEN_ENV: &str = "PROXY_ADMIN_DNS_TOKEN";

/// Fallback environment variable for the DNS provider credential.
pub const DNS_TOKEN_FALLBACK_ENV: &str = "CLOUDFLARE_API_TOKEN";

/// DNS provider credential from the environment, primary variable first.
pub fn dns_token_from_env() -> Option<String> {
    [DNS_TOKEN_ENV, DNS_TOKEN_FALLBACK_ENV]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|token| !token.is_empty())
}

/// Configures certificate issuance policy and PKI trust in the remote tree.
#[derive(Clone)]
pub struct TlsManager {
    tree: Arc<dyn RemoteTree>,
    init: PathInitializer,
}

impl TlsManager {
    /// Build a manager over the given transport.
    pub fn new(tree: Arc<dyn RemoteTree>) -> Self {
        Self {
            init: PathInitializer::new(Arc::clone(&tree)),
            tree,
        }
    }

    /// Install a single-issuer policy list, unless issuance is already
    /// configured. First writer wins: an existing automation subtree is
    /// left untouched.
    async fn ensure_issuer(&self, issuer: Issuer) -> Result<()> {
        let automation = TreePath::parse(AUTOMATION_PATH)?;
        if self.tree.exists_path(&automation).await? {
            tracing::debug!("tls automation already configured, leaving as-is");
            return Ok(());
        }

        self.init.ensure_root().await?;
        self.init.ensure_path(&automation, 0).await?;

        let policies = vec![AutomationPolicy::single(issuer)];
        let policies_path = automation.join("policies")?;
        self.tree
            .write(&policies_path, to_tree(&policies)?, WriteMode::Insert)
            .await
    }

    /// Configure the internal CA as the sole certificate issuer, for
    /// local development setups.
    pub async fn ensure_internal_issuer(&self) -> Result<()> {
        tracing::info!("configuring internal certificate issuer");
        self.ensure_issuer(Issuer::Internal).await
    }

    /// Configure ACME issuance with a DNS challenge as the sole issuer,
    /// using the given provider credential.
    pub async fn ensure_acme_issuer(&self, dns_token: impl Into<String>) -> Result<()> {
        tracing::info!("configuring acme certificate issuer");
        self.ensure_issuer(Issuer::acme_with_dns_token(dns_token))
            .await
    }

    /// Write the CA trust-installation flag.
    ///
    /// Trust installation is opt-in: `None` is a no-op that issues no
    /// remote operations at all. With a flag present, the PKI path is
    /// materialized (the top-level namespace is assumed to pre-exist, so
    /// one leading level is skipped) and the flag written.
    pub async fn set_pki_trust(&self, install: Option<bool>) -> Result<()> {
        let Some(install_trust) = install else {
            return Ok(());
        };

        let pki = TreePath::parse(PKI_LOCAL_CA_PATH)?;
        self.init.ensure_path(&pki, 1).await?;

        tracing::info!(install_trust, "writing pki trust flag");
        self.tree
            .write(&pki, to_tree(&PkiTrust { install_trust })?, WriteMode::Insert)
            .await
    }
}
