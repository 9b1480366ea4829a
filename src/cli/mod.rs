//! CLI command definitions and handlers

mod calculate;
mod doctor;
pub(crate) mod interactive;
mod serve;

use crate::config::UserConfig;
use crate::reporters::OutputFormat;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// netimpact - NetBox impact scoring
#[derive(Parser, Debug)]
#[command(name = "netimpact")]
#[command(
    version,
    about = "Score the impact of work on NetBox devices, circuits and interfaces",
    long_about = "netimpact computes a weighted impact score for a set of network elements \
pulled from NetBox. Devices weigh 5, circuits 3 (2.4 when both ends land on the same node, \
which also counts that node as an affected device), interfaces 1. The sum is scaled by the \
work type: planned-work 1.0, fiber-works 1.5, electrical-work 2.0, incident-work 10.0.\n\n\
Run without a subcommand to start the HTTP service.",
    after_help = "\
Examples:
  netimpact serve --port 8080                          Start the HTTP service
  netimpact interactive                                Pick elements from NetBox at a prompt
  netimpact calculate --devices 1,2 --interfaces 10    One-shot calculation
  netimpact calculate --circuits 5 --impact-type incident-work --format text
  netimpact config init                                Write an example config file"
)]
pub struct Cli {
    /// NetBox base URL (overrides NETBOX_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub netbox_url: Option<String>,

    /// NetBox API token (overrides NETBOX_TOKEN and the config file)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub netbox_token: Option<String>,

    /// Config file (default: ~/.config/netimpact/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP service (POST /calculateImpact)
    #[command(after_help = "\
Examples:
  netimpact serve                                     Listen on 0.0.0.0:80
  netimpact serve --bind 127.0.0.1 --port 8080        Local only

  curl -X POST localhost:8080/calculateImpact \\
    -d '{\"device_ids\":[1,2],\"circuit_ids\":[5],\"interface_ids\":[10],\"impact_type\":\"fiber-works\"}'")]
    Serve {
        /// Listen address (default: 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,

        /// Listen port (default: 80)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// List inventory and prompt for the elements to score
    #[command(alias = "cli")]
    Interactive {
        /// Output format: json, text
        #[arg(long, short = 'f', default_value = "json", value_parser = ["json", "text"])]
        format: String,
    },

    /// Score a set of elements given on the command line
    #[command(after_help = "\
Examples:
  netimpact calculate --devices 1,2 --interfaces 10
  netimpact calculate --circuits 5,6 --impact-type incident-work
  netimpact calculate --circuits 5 --format text")]
    Calculate {
        /// Comma-separated device ids
        #[arg(long, default_value = "")]
        devices: String,

        /// Comma-separated circuit ids
        #[arg(long, default_value = "")]
        circuits: String,

        /// Comma-separated interface ids
        #[arg(long, default_value = "")]
        interfaces: String,

        /// Work type: planned-work, fiber-works, electrical-work, incident-work
        #[arg(long, short = 't', default_value = "")]
        impact_type: String,

        /// Output format: json, text
        #[arg(long, short = 'f', default_value = "json", value_parser = ["json", "text"])]
        format: String,
    },

    /// Manage configuration (init, show, path)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check configuration and NetBox reachability
    Doctor,

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example config file
    Init,
    /// Show effective settings (token masked)
    Show,
    /// Print the config file location
    Path,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // Commands that must work without a loadable config
    match &cli.command {
        Some(Commands::Version) => {
            println!("netimpact {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(Commands::Config {
            action: ConfigAction::Init,
        }) => return config_init(&cli),
        Some(Commands::Config {
            action: ConfigAction::Path,
        }) => return config_path(&cli),
        _ => {}
    }

    let config = load_config(&cli)?;

    match &cli.command {
        Some(Commands::Serve { bind, port }) => serve::run(&config, bind.clone(), *port),

        Some(Commands::Interactive { format }) => {
            interactive::run(&config, format.parse::<OutputFormat>()?)
        }

        Some(Commands::Calculate {
            devices,
            circuits,
            interfaces,
            impact_type,
            format,
        }) => calculate::run(
            &config,
            devices,
            circuits,
            interfaces,
            impact_type,
            format.parse::<OutputFormat>()?,
        ),

        Some(Commands::Config { .. }) => show_config(&cli, &config),

        Some(Commands::Doctor) => doctor::run(&config),

        Some(Commands::Version) => Ok(()),

        // Default run mode is the service
        None => serve::run(&config, None, None),
    }
}

/// File + env, then CLI flags on top
fn load_config(cli: &Cli) -> Result<UserConfig> {
    let mut config = UserConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.netbox_url {
        config.inventory.url = Some(url.clone());
    }
    if let Some(token) = &cli.netbox_token {
        config.inventory.token = Some(token.clone());
    }
    Ok(config)
}

fn config_init(cli: &Cli) -> Result<()> {
    let path = UserConfig::init_user_config(cli.config.as_deref())?;
    println!("✅ Config initialized at: {}", path.display());
    println!("\nEdit to add your NetBox URL and token:");
    println!("  {}", path.display());
    println!("\nOr set via environment:");
    println!("  export NETBOX_URL=\"https://netbox.example.net\"");
    println!("  export NETBOX_TOKEN=\"...\"");
    Ok(())
}

fn config_path(cli: &Cli) -> Result<()> {
    let path = cli
        .config
        .clone()
        .or_else(UserConfig::user_config_path)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
    println!("{}", path.display());
    Ok(())
}

fn show_config(cli: &Cli, config: &UserConfig) -> Result<()> {
    println!("📁 Config file:");
    let path = cli.config.clone().or_else(UserConfig::user_config_path);
    if let Some(path) = path {
        let status = if path.exists() { "✓" } else { "(not found)" };
        println!("  {} {}", path.display(), status);
    }
    println!();
    println!("🌐 Inventory:");
    println!("  URL:         {}", config.netbox_url());
    println!(
        "  Token:       {}",
        config
            .masked_token()
            .unwrap_or_else(|| "✗ not set".to_string())
    );
    match config.auth_scheme() {
        Ok(scheme) => println!("  Auth scheme: {}", scheme),
        Err(e) => println!("  Auth scheme: ✗ {}", e),
    }
    println!("  Timeout:     {}s", config.timeout().as_secs());
    println!();
    println!("🖧  Server:      {}:{}", config.bind(), config.port());
    println!();
    let w = &config.scoring;
    println!("⚖️  Weights:");
    println!("  device={}  circuit={}  interface={}  redundancy_discount={}",
        w.device_weight, w.circuit_weight, w.interface_weight, w.redundancy_discount
    );
    if let Err(e) = config.weights() {
        println!("  ✗ {}", e);
    }
    Ok(())
}
