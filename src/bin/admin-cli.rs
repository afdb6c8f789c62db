use clap::{Parser, Subcommand};
use proxy_admin::{EndpointConfig, ProxyAdmin, SetupOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "admin-cli")]
#[command(about = "Management CLI for the proxy admin configuration tree", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:2019")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap issuance policy, PKI trust, and the routing skeleton
    Setup {
        /// DNS provider credential for ACME (falls back to the environment)
        #[arg(long)]
        dns_token: Option<String>,
        /// Use the internal CA instead of ACME
        #[arg(long)]
        local: bool,
        /// Install the local CA into the system trust store
        #[arg(long)]
        install_trust: Option<bool>,
    },
    /// Upsert a reverse-proxy route
    AddProxy {
        from_host: String,
        to_target: String,
    },
    /// Upsert a wildcard subdomain route for a domain
    AddWildcard { domain: String },
    /// Append a subdomain reverse-proxy under a wildcard route
    AddSub {
        domain: String,
        subdomain: String,
        /// Comma-separated ports
        ports: String,
        #[arg(long)]
        host: Option<String>,
    },
    /// Delete a route by its @id
    DeleteRoute { id: String },
    /// Print the config subtree at a path
    Get {
        #[arg(default_value = "/")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proxy_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = EndpointConfig {
        base_url: cli.url,
        ..EndpointConfig::default()
    };
    let admin = ProxyAdmin::connect(&config)?;

    match cli.command {
        Commands::Setup {
            dns_token,
            local,
            install_trust,
        } => {
            admin
                .setup(SetupOptions {
                    dns_token,
                    local,
                    install_trust,
                })
                .await?;
            println!("setup complete");
        }
        Commands::AddProxy {
            from_host,
            to_target,
        } => {
            admin.add_reverse_proxy(&from_host, &to_target).await?;
            println!("route '{}' -> {}", from_host, to_target);
        }
        Commands::AddWildcard { domain } => {
            admin.add_wildcard_route(&domain).await?;
            println!("wildcard route for *.{}", domain);
        }
        Commands::AddSub {
            domain,
            subdomain,
            ports,
            host,
        } => {
            let ports: Vec<String> = ports.split(',').map(str::to_string).collect();
            admin
                .add_sub_reverse_proxy(&domain, &subdomain, ports, host.as_deref())
                .await?;
            println!("subdomain route {}.{}", subdomain, domain);
        }
        Commands::DeleteRoute { id } => {
            admin.delete_route(&id).await?;
            println!("deleted route '{}'", id);
        }
        Commands::Get { path } => {
            let value = admin.get_config(&path).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}
