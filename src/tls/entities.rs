//! TLS automation and PKI wire entities.

use serde::{Deserialize, Serialize};

/// DNS challenge provider name used for ACME issuance.
pub const DNS_PROVIDER: &str = "cloudflare";

/// One certificate automation policy: an ordered list of issuers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationPolicy {
    /// Issuers tried in order.
    pub issuers: Vec<Issuer>,
}

impl AutomationPolicy {
    /// Policy with a single issuer.
    pub fn single(issuer: Issuer) -> Self {
        Self {
            issuers: vec![issuer],
        }
    }
}

/// A certificate issuer, discriminated by its `module` field on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "module")]
pub enum Issuer {
    /// The server's internal CA; no parameters.
    #[serde(rename = "internal")]
    Internal,

    /// ACME issuance with a DNS challenge.
    #[serde(rename = "acme")]
    Acme {
        /// Challenge configuration.
        challenges: AcmeChallenges,
    },
}

impl Issuer {
    /// ACME issuer using the fixed DNS provider with the given credential.
    pub fn acme_with_dns_token(api_token: impl Into<String>) -> Self {
        Issuer::Acme {
            challenges: AcmeChallenges {
                dns: DnsChallenge {
                    provider: DnsProvider {
                        name: DNS_PROVIDER.to_string(),
                        api_token: api_token.into(),
                    },
                },
            },
        }
    }
}

/// ACME challenge configuration; only the DNS challenge is modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcmeChallenges {
    /// DNS-01 challenge settings.
    pub dns: DnsChallenge,
}

/// DNS challenge settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsChallenge {
    /// Provider solving the challenge.
    pub provider: DnsProvider,
}

/// DNS provider credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsProvider {
    /// Provider name.
    pub name: String,
    /// Provider API credential.
    pub api_token: String,
}

/// Trust-installation flag for the locally generated CA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PkiTrust {
    /// Whether the CA root should be installed into the system trust
    /// store.
    pub install_trust: bool,
}
