use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use api_ingress::{ApiIngress, ApiIngressConfig};
use tickets::domain::{
    seed::demo_tickets,
    service::{Service, ServiceConfig},
};
use tickets::TicketsConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Helpdesk Server - in-memory support ticket tracker
#[derive(Parser)]
#[command(name = "helpdesk-server")]
#[command(about = "Helpdesk Server - in-memory support ticket tracker")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(
        &logging_config,
        Path::new(&config.server.home_dir),
    );
    tracing::info!("Helpdesk Server starting");

    // Print config and exit if requested
    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// `api_ingress` section, with `server.timeout_sec` as the request timeout
/// when the section does not set its own.
fn ingress_config(config: &AppConfig) -> ApiIngressConfig {
    let mut cfg: ApiIngressConfig = config.module_config("api_ingress");
    let explicit = config
        .modules
        .get("api_ingress")
        .is_some_and(|v| v.get("request_timeout_secs").is_some());
    if !explicit && config.server.timeout_sec > 0 {
        cfg.request_timeout_secs = config.server.timeout_sec;
    }
    cfg
}

/// Build the ticket service from the `tickets` module section.
fn build_tickets_service(config: &AppConfig) -> Result<Arc<Service>> {
    let tickets_cfg: TicketsConfig = config.module_config("tickets");
    let service_cfg = ServiceConfig::from(&tickets_cfg);

    let service = if tickets_cfg.seed_demo_data {
        let seed = demo_tickets().context("Failed to build demo tickets")?;
        tracing::info!(count = seed.len(), "Seeding demo tickets");
        Service::with_tickets(seed, service_cfg)
    } else {
        Service::new(service_cfg)
    };
    Ok(Arc::new(service))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let ingress = ApiIngress::new(ingress_config(&config));
    let service = build_tickets_service(&config)?;

    let routes = tickets::api::rest::routes::register_routes(Router::new(), service)
        .context("Failed to register ticket routes")?;
    let router = ingress.build_router(routes);

    let listener = ingress.bind(&config.server.bind_addr()).await?;

    // Fire the token on SIGINT/SIGTERM; the server drains and returns.
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = api_ingress::wait_for_shutdown().await {
            tracing::error!(error = %e, "Signal handling failed; shutting down");
        }
        trigger.cancel();
    });

    ingress.serve(listener, router, cancel).await?;
    tracing::info!("Helpdesk Server stopped");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // Strict parse of the module sections that are present
    if config.modules.contains_key("api_ingress") {
        let ingress_cfg: ApiIngressConfig = config.module_config_required("api_ingress")?;
        ApiIngress::new(ingress_cfg).bind_addr(&config.server.bind_addr())?;
    } else {
        ApiIngress::default().bind_addr(&config.server.bind_addr())?;
    }
    if config.modules.contains_key("tickets") {
        let _: TicketsConfig = config.module_config_required("tickets")?;
    }

    // AppConfig::load_* already normalized & created home_dir
    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
