//! Route list management against the remote tree.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::path::TreePath;
use crate::provision::PathInitializer;
use crate::routes::entities::{Handler, Route, RouteMatch, Upstream};
use crate::routes::ports::PortSpec;
use crate::transport::remote::APPEND_MARKER;
use crate::transport::{RemoteTree, WriteMode};
use crate::tree::{to_tree, TreeValue};

/// Path of the ordered server list in the routing namespace.
pub const SERVERS_PATH: &str = "/apps/http/servers";

/// Server entry used when the caller does not name one.
pub const DEFAULT_SERVER: &str = "srv0";

/// Host used for upstream targets when the caller does not name one.
const DEFAULT_UPSTREAM_HOST: &str = "localhost";

/// The `@id` under which a domain's wildcard route is registered.
pub fn wildcard_id(domain: &str) -> String {
    format!("wildcard-{}", domain)
}

/// Terminal reverse-proxy route for a single host, identified by that host.
///
/// Terminal because a proxied match must not fall through to later routes
/// for the same request.
pub fn reverse_proxy_route(from_host: &str, to_target: &str) -> Route {
    Route {
        id: Some(from_host.to_string()),
        matchers: vec![RouteMatch::host(from_host)],
        handle: vec![Handler::ReverseProxy {
            upstreams: vec![Upstream {
                dial: to_target.to_string(),
            }],
        }],
        terminal: true,
    }
}

/// Terminal route matching `*.domain`, holding an initially empty nested
/// route list for subdomains added later.
pub fn wildcard_route(domain: &str) -> Route {
    Route {
        id: Some(wildcard_id(domain)),
        matchers: vec![RouteMatch::host(format!("*.{}", domain))],
        handle: vec![Handler::SubRoute { routes: vec![] }],
        terminal: true,
    }
}

/// Child route proxying `subdomain.domain` to `host:port` for each port,
/// in port order.
pub fn sub_route(domain: &str, subdomain: &str, ports: &[String], host: &str) -> Route {
    let route_host = format!("{}.{}", subdomain, domain);
    let upstreams = ports.iter().map(|port| Upstream::new(host, port)).collect();
    Route {
        id: Some(route_host.clone()),
        matchers: vec![RouteMatch::host(route_host)],
        handle: vec![Handler::ReverseProxy { upstreams }],
        terminal: false,
    }
}

/// Composes and applies routing rules for one server's route list.
///
/// Routes carrying an `@id` are replaced on re-add (delete-then-append, see
/// [`upsert_route`](Self::upsert_route)); the delete and append are two
/// separate exchanges and are not atomic.
#[derive(Clone)]
pub struct RouteManager {
    tree: Arc<dyn RemoteTree>,
    init: PathInitializer,
    server: String,
}

impl RouteManager {
    /// Manager for the default server entry.
    pub fn new(tree: Arc<dyn RemoteTree>) -> Self {
        Self::with_server(tree, DEFAULT_SERVER)
    }

    /// Manager for a named server entry.
    pub fn with_server(tree: Arc<dyn RemoteTree>, server: impl Into<String>) -> Self {
        Self {
            init: PathInitializer::new(Arc::clone(&tree)),
            tree,
            server: server.into(),
        }
    }

    fn routes_path(&self) -> Result<TreePath> {
        TreePath::parse(SERVERS_PATH)?.join(&self.server)?.join("routes")
    }

    /// Bootstrap the routing namespace: when the server list already
    /// exists, this is a no-op; otherwise the namespace is materialized
    /// (the top level is assumed to pre-exist) and a server skeleton
    /// listening on `:80`/`:443` with an empty route list is written.
    pub async fn init(&self) -> Result<()> {
        let servers = TreePath::parse(SERVERS_PATH)?;
        if self.tree.exists_path(&servers).await? {
            return Ok(());
        }
        self.init.ensure_path(&servers, 1).await?;

        let skeleton = to_tree(&serde_json::json!({
            "listen": [":80", ":443"],
            "routes": [],
            "protocols": ["h1", "h2"],
        }))?;
        let server_path = servers.join(&self.server)?;
        tracing::info!(server = %self.server, "creating http server skeleton");
        self.tree
            .write(&server_path, skeleton, WriteMode::Insert)
            .await
    }

    /// Append a route to the server's route list.
    pub async fn add_route(&self, route: &Route) -> Result<()> {
        self.tree
            .write(&self.routes_path()?, to_tree(route)?, WriteMode::Insert)
            .await
    }

    /// Insert-or-replace keyed by the route's `@id`: an existing occupant
    /// of the ID is deleted before the new route is appended, so re-adding
    /// never duplicates the identifier.
    ///
    /// A `NotFound` from the pre-delete is tolerated (a concurrent delete
    /// got there first; the append still proceeds). A route without an ID
    /// is appended as-is and cannot be replaced later.
    pub async fn upsert_route(&self, route: &Route) -> Result<()> {
        if let Some(id) = &route.id {
            if self.tree.exists_id(id).await? {
                match self.tree.delete_by_id(id).await {
                    Ok(()) | Err(Error::NotFound(_)) => {}
                    Err(err) => return Err(err),
                }
                tracing::debug!(id = %id, "replaced existing route");
            }
        }
        self.add_route(route).await
    }

    /// Delete the route carrying `id`.
    ///
    /// Deleting an ID the remote tree does not hold is reported as
    /// [`Error::NotFound`]; an explicit delete of a missing route is a
    /// caller bug worth surfacing. Upsert flows never hit this, their
    /// pre-delete only runs after a successful existence probe.
    pub async fn delete_route(&self, id: &str) -> Result<()> {
        self.tree.delete_by_id(id).await?;
        tracing::info!(id = %id, "route deleted");
        Ok(())
    }

    /// Upsert a terminal reverse-proxy route from `from_host` to
    /// `to_target`.
    pub async fn add_reverse_proxy(&self, from_host: &str, to_target: &str) -> Result<()> {
        tracing::info!(host = %from_host, target = %to_target, "adding reverse proxy route");
        self.upsert_route(&reverse_proxy_route(from_host, to_target))
            .await
    }

    /// Upsert the wildcard route for `domain`, with an empty subdomain
    /// list.
    pub async fn add_wildcard_route(&self, domain: &str) -> Result<()> {
        tracing::info!(domain = %domain, "adding wildcard route");
        self.upsert_route(&wildcard_route(domain)).await
    }

    /// Append a subdomain reverse-proxy under `domain`'s wildcard route.
    ///
    /// `ports` is normalized via [`PortSpec`]; upstreams pair `host`
    /// (default `localhost`) with each port in input order. The child lands
    /// in the wildcard route's nested list through an append-at-end write;
    /// two callers appending concurrently are not serialized here.
    pub async fn add_sub_reverse_proxy(
        &self,
        domain: &str,
        subdomain: &str,
        ports: impl Into<PortSpec>,
        host: Option<&str>,
    ) -> Result<()> {
        let ports = ports.into().normalize()?;
        let host = host.unwrap_or(DEFAULT_UPSTREAM_HOST);
        let child = sub_route(domain, subdomain, &ports, host);
        tracing::info!(
            subdomain = %subdomain,
            domain = %domain,
            upstreams = ports.len(),
            "appending subdomain route"
        );

        // Append into handle[0].routes of the wildcard route.
        let suffix = TreePath::parse("/handle/0/routes")?.join(APPEND_MARKER)?;
        self.tree
            .write_by_id(
                &wildcard_id(domain),
                &suffix,
                TreeValue::List(vec![to_tree(&child)?]),
                WriteMode::Insert,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_proxy_route_shape() {
        let route = reverse_proxy_route("a.com", "localhost:3000");
        assert_eq!(route.id.as_deref(), Some("a.com"));
        assert_eq!(route.matchers, vec![RouteMatch::host("a.com")]);
        assert!(route.terminal);
        match &route.handle[..] {
            [Handler::ReverseProxy { upstreams }] => {
                assert_eq!(upstreams, &[Upstream { dial: "localhost:3000".to_string() }]);
            }
            other => panic!("unexpected handler chain: {:?}", other),
        }
    }

    #[test]
    fn test_wildcard_route_shape() {
        let route = wildcard_route("example.com");
        assert_eq!(route.id.as_deref(), Some("wildcard-example.com"));
        assert_eq!(route.matchers, vec![RouteMatch::host("*.example.com")]);
        assert_eq!(route.handle, vec![Handler::SubRoute { routes: vec![] }]);
        assert!(route.terminal);
    }

    #[test]
    fn test_sub_route_pairs_host_with_each_port() {
        let ports = vec!["8080".to_string(), "8081".to_string()];
        let route = sub_route("example.com", "api", &ports, "127.0.0.1");
        assert_eq!(route.id.as_deref(), Some("api.example.com"));
        assert_eq!(route.matchers, vec![RouteMatch::host("api.example.com")]);
        assert!(!route.terminal);
        match &route.handle[..] {
            [Handler::ReverseProxy { upstreams }] => {
                let dials: Vec<&str> = upstreams.iter().map(|u| u.dial.as_str()).collect();
                assert_eq!(dials, ["127.0.0.1:8080", "127.0.0.1:8081"]);
            }
            other => panic!("unexpected handler chain: {:?}", other),
        }
    }
}
