//! Output formatting for gwctl (table, json)

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use gateway_client::{Gateway, Peripheral};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print a section heading (table output only)
    pub fn heading(&self, msg: &str) {
        if !self.quiet && self.format == OutputFormat::Table {
            println!("{}", msg.bold());
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print rows in the configured format
    pub fn print<T: Tabled + Serialize>(&self, data: &[T]) {
        match self.format {
            OutputFormat::Table => {
                if data.is_empty() {
                    if !self.quiet {
                        println!("No data");
                    }
                } else {
                    println!("{}", Table::new(data));
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
        }
    }

    /// Print a single row in the configured format
    pub fn print_one<T: Tabled + Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Table => println!("{}", Table::new([data])),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
    }

    /// Print a gateway with its peripherals
    ///
    /// Tables get a summary row and a peripheral table. JSON gets the gateway
    /// as one document, peripherals nested.
    pub fn print_gateway(&self, gateway: &Gateway) {
        match self.format {
            OutputFormat::Table => {
                self.print_one(&GatewayRow::from(gateway));
                self.heading("Peripherals");
                self.print(&peripheral_rows(&gateway.peripherals));
            }
            OutputFormat::Json => println!("{}", gateway_json(gateway)),
        }
    }
}

fn gateway_json(gateway: &Gateway) -> String {
    serde_json::to_string_pretty(gateway).unwrap_or_else(|_| "{}".to_string())
}

// =============================================================================
// Display types
// =============================================================================

/// Gateway display row
#[derive(Debug, Tabled, Serialize)]
pub struct GatewayRow {
    #[tabled(rename = "Serial Number")]
    pub serial_number: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "IPv4 Address")]
    pub ipv4_address: String,
    #[tabled(rename = "Peripherals")]
    pub peripherals: usize,
}

impl From<&Gateway> for GatewayRow {
    fn from(gateway: &Gateway) -> Self {
        Self {
            serial_number: gateway.serial_number.clone(),
            name: gateway.human_readable_name.clone(),
            ipv4_address: gateway.ipv4_address.clone(),
            peripherals: gateway.peripherals.len(),
        }
    }
}

/// Peripheral display row
#[derive(Debug, Tabled, Serialize)]
pub struct PeripheralRow {
    #[tabled(rename = "UID")]
    pub uid: i32,
    #[tabled(rename = "Vendor")]
    pub vendor: String,
    #[tabled(rename = "Created")]
    pub date_created: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&Peripheral> for PeripheralRow {
    fn from(peripheral: &Peripheral) -> Self {
        Self {
            uid: peripheral.uid,
            vendor: peripheral.vendor.clone(),
            date_created: peripheral
                .date_created
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            status: if peripheral.status { "online" } else { "offline" }.to_string(),
        }
    }
}

pub fn peripheral_rows(peripherals: &[Peripheral]) -> Vec<PeripheralRow> {
    peripherals.iter().map(PeripheralRow::from).collect()
}
