//! gwctl - Command-line tool for the gateway registry
//!
//! Manages gateways and their peripherals through the REST API.

mod commands;
mod output;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use gateway_client::{Gateway, GatewayClient, Peripheral, PeripheralUid};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::gateways::parse_peripheral_spec;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "gwctl")]
#[command(author, version, about = "Gateway registry CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Server URL
    #[arg(
        short,
        long,
        env = "GWCTL_SERVER",
        default_value = "http://localhost:8080"
    )]
    server: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage gateways
    #[command(subcommand)]
    Gateways(GatewayCommand),

    /// Manage peripherals
    #[command(subcommand)]
    Peripherals(PeripheralCommand),
}

#[derive(Subcommand)]
enum GatewayCommand {
    /// List all gateways
    List,

    /// Show a gateway and its peripherals
    Get {
        /// Gateway serial number
        serial: String,
    },

    /// Create a gateway
    Create {
        /// Gateway serial number
        serial: String,

        /// Human-readable name
        name: String,

        /// IPv4 address (dotted quad)
        ipv4: String,

        /// Peripheral to create with the gateway, as UID:VENDOR (repeatable)
        #[arg(long = "peripheral", value_name = "UID:VENDOR", value_parser = parse_peripheral_spec)]
        peripherals: Vec<Peripheral>,
    },

    /// Change a gateway's name and address
    Update {
        /// Gateway serial number
        serial: String,

        /// New human-readable name
        name: String,

        /// New IPv4 address
        ipv4: String,
    },

    /// Delete a gateway; its peripherals become unassigned
    Delete {
        /// Gateway serial number
        serial: String,
    },

    /// List peripherals owned by a gateway
    Peripherals {
        /// Gateway serial number
        serial: String,
    },

    /// Create a new peripheral under a gateway
    Attach {
        /// Gateway serial number
        serial: String,

        #[command(flatten)]
        peripheral: PeripheralArgs,
    },

    /// Move an existing peripheral under a gateway
    Associate {
        /// Gateway serial number
        serial: String,

        /// Peripheral UID
        uid: PeripheralUid,
    },

    /// Delete a peripheral through the gateway that owns it
    Detach {
        /// Gateway serial number
        serial: String,

        /// Peripheral UID
        uid: PeripheralUid,
    },
}

#[derive(Subcommand)]
enum PeripheralCommand {
    /// List peripherals
    List {
        /// Only peripherals that do (true) or do not (false) belong to a gateway
        #[arg(long, value_name = "BOOL")]
        associated: Option<bool>,
    },

    /// Show one peripheral
    Get {
        /// Peripheral UID
        uid: PeripheralUid,
    },

    /// Create an unassigned peripheral
    Create {
        #[command(flatten)]
        peripheral: PeripheralArgs,
    },

    /// Overwrite a peripheral; its owner is kept
    Update {
        /// Peripheral UID
        uid: PeripheralUid,

        /// New vendor (empty keeps the current one when --date is given)
        #[arg(long, default_value = "")]
        vendor: String,

        /// Creation date (YYYY-MM-DD); omitted keeps the current one
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Mark the peripheral online
        #[arg(long)]
        online: bool,
    },

    /// Delete a peripheral
    Delete {
        /// Peripheral UID
        uid: PeripheralUid,
    },
}

#[derive(Args)]
struct PeripheralArgs {
    /// Peripheral UID
    uid: PeripheralUid,

    /// Vendor name
    vendor: String,

    /// Creation date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Mark the peripheral online
    #[arg(long)]
    online: bool,
}

impl PeripheralArgs {
    fn into_peripheral(self) -> Peripheral {
        build_peripheral(self.uid, self.vendor, self.date, self.online)
    }
}

fn build_peripheral(
    uid: PeripheralUid,
    vendor: String,
    date: Option<NaiveDate>,
    online: bool,
) -> Peripheral {
    let mut peripheral = Peripheral::new(uid, vendor).with_status(online);
    peripheral.date_created = date;
    peripheral
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let ctx = OutputContext::new(cli.output, cli.no_color, cli.quiet);

    if let Err(e) = run(cli.server, cli.command, &ctx).await {
        ctx.error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

async fn run(server: String, command: Commands, ctx: &OutputContext) -> Result<()> {
    let client = create_client(&server)?;
    tracing::debug!(server = %client.base_url(), "Using gateway registry");

    match command {
        Commands::Gateways(command) => match command {
            GatewayCommand::List => commands::gateways::list(&client, ctx).await?,

            GatewayCommand::Get { serial } => {
                commands::gateways::get(&client, &serial, ctx).await?
            }

            GatewayCommand::Create {
                serial,
                name,
                ipv4,
                peripherals,
            } => {
                let gateway = Gateway::new(serial, name, ipv4).with_peripherals(peripherals);
                commands::gateways::create(&client, gateway, ctx).await?
            }

            GatewayCommand::Update { serial, name, ipv4 } => {
                commands::gateways::update(&client, &serial, &name, &ipv4, ctx).await?
            }

            GatewayCommand::Delete { serial } => {
                commands::gateways::delete(&client, &serial, ctx).await?
            }

            GatewayCommand::Peripherals { serial } => {
                commands::gateways::peripherals(&client, &serial, ctx).await?
            }

            GatewayCommand::Attach { serial, peripheral } => {
                commands::gateways::attach(&client, &serial, peripheral.into_peripheral(), ctx)
                    .await?
            }

            GatewayCommand::Associate { serial, uid } => {
                commands::gateways::associate(&client, &serial, uid, ctx).await?
            }

            GatewayCommand::Detach { serial, uid } => {
                commands::gateways::detach(&client, &serial, uid, ctx).await?
            }
        },

        Commands::Peripherals(command) => match command {
            PeripheralCommand::List { associated } => {
                commands::peripherals::list(&client, associated, ctx).await?
            }

            PeripheralCommand::Get { uid } => commands::peripherals::get(&client, uid, ctx).await?,

            PeripheralCommand::Create { peripheral } => {
                commands::peripherals::create(&client, peripheral.into_peripheral(), ctx).await?
            }

            PeripheralCommand::Update {
                uid,
                vendor,
                date,
                online,
            } => {
                let details = build_peripheral(uid, vendor, date, online);
                commands::peripherals::update(&client, uid, details, ctx).await?
            }

            PeripheralCommand::Delete { uid } => {
                commands::peripherals::delete(&client, uid, ctx).await?
            }
        },
    }

    Ok(())
}

/// Create a client for the given server URL
fn create_client(server: &str) -> Result<GatewayClient> {
    GatewayClient::new(server).context("Failed to create gateway client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_with_peripherals() {
        let cli = Cli::try_parse_from([
            "gwctl",
            "gateways",
            "create",
            "RECM12345M8C",
            "Admon RRHH",
            "192.168.10.254",
            "--peripheral",
            "20013:ASUS",
            "--peripheral",
            "20014:HP",
        ])
        .unwrap();

        match cli.command {
            Commands::Gateways(GatewayCommand::Create { peripherals, .. }) => {
                assert_eq!(peripherals.len(), 2);
                assert_eq!(peripherals[1].vendor, "HP");
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_parse_peripheral_filters() {
        let cli = Cli::try_parse_from(["gwctl", "-o", "json", "peripherals", "list", "--associated", "false"])
            .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Peripherals(PeripheralCommand::List {
                associated: Some(false)
            })
        ));

        assert!(Cli::try_parse_from(["gwctl", "peripherals", "get", "abc"]).is_err());
    }

    #[test]
    fn test_parse_attach_date() {
        let cli = Cli::try_parse_from([
            "gwctl", "gateways", "attach", "GW-1", "7", "ASUS", "--date", "2020-01-11", "--online",
        ])
        .unwrap();

        match cli.command {
            Commands::Gateways(GatewayCommand::Attach { peripheral, .. }) => {
                let peripheral = peripheral.into_peripheral();
                assert_eq!(peripheral.uid, 7);
                assert_eq!(peripheral.date_created, NaiveDate::from_ymd_opt(2020, 1, 11));
                assert!(peripheral.status);
            }
            _ => panic!("unexpected command"),
        }
    }
}
