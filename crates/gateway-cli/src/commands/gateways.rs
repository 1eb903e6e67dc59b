//! Gateway commands

use anyhow::{Context, Result};
use gateway_client::{Gateway, GatewayClient, Peripheral, PeripheralUid};

use crate::output::{peripheral_rows, GatewayRow, OutputContext};

/// Parse `UID:VENDOR` into an unassigned peripheral
pub fn parse_peripheral_spec(spec: &str) -> std::result::Result<Peripheral, String> {
    let (uid, vendor) = spec
        .split_once(':')
        .ok_or_else(|| format!("expected UID:VENDOR, got '{}'", spec))?;
    let uid: PeripheralUid = uid
        .trim()
        .parse()
        .map_err(|e| format!("invalid uid '{}': {}", uid, e))?;
    Ok(Peripheral::new(uid, vendor.trim()))
}

pub async fn list(client: &GatewayClient, ctx: &OutputContext) -> Result<()> {
    let gateways = client.list_gateways().await?;
    let rows: Vec<GatewayRow> = gateways.iter().map(GatewayRow::from).collect();
    ctx.print(&rows);
    Ok(())
}

/// Show one gateway and its peripherals
pub async fn get(client: &GatewayClient, serial_number: &str, ctx: &OutputContext) -> Result<()> {
    let gateway = client.get_gateway(serial_number).await?;
    ctx.print_gateway(&gateway);
    Ok(())
}

pub async fn create(
    client: &GatewayClient,
    gateway: Gateway,
    ctx: &OutputContext,
) -> Result<()> {
    let created = client
        .create_gateway(&gateway)
        .await
        .context("Failed to create gateway")?;
    ctx.success(&format!(
        "Created gateway {} with {} peripheral(s)",
        created.serial_number,
        created.peripherals.len()
    ));
    Ok(())
}

pub async fn update(
    client: &GatewayClient,
    serial_number: &str,
    name: &str,
    ipv4_address: &str,
    ctx: &OutputContext,
) -> Result<()> {
    let details = Gateway::new(serial_number, name, ipv4_address);
    let updated = client
        .update_gateway(serial_number, &details)
        .await
        .context("Failed to update gateway")?;
    ctx.print_one(&GatewayRow::from(&updated));
    Ok(())
}

pub async fn delete(client: &GatewayClient, serial_number: &str, ctx: &OutputContext) -> Result<()> {
    client
        .delete_gateway(serial_number)
        .await
        .context("Failed to delete gateway")?;
    ctx.success(&format!("Deleted gateway {}", serial_number));
    Ok(())
}

pub async fn peripherals(
    client: &GatewayClient,
    serial_number: &str,
    ctx: &OutputContext,
) -> Result<()> {
    let peripherals = client.list_gateway_peripherals(serial_number).await?;
    ctx.print(&peripheral_rows(&peripherals));
    Ok(())
}

/// Create a new peripheral under the gateway
pub async fn attach(
    client: &GatewayClient,
    serial_number: &str,
    peripheral: Peripheral,
    ctx: &OutputContext,
) -> Result<()> {
    let created = client
        .attach_peripheral(serial_number, &peripheral)
        .await
        .context("Failed to attach peripheral")?;
    ctx.success(&format!(
        "Attached peripheral {} to gateway {}",
        created.uid, serial_number
    ));
    Ok(())
}

/// Move an existing peripheral under the gateway
pub async fn associate(
    client: &GatewayClient,
    serial_number: &str,
    uid: PeripheralUid,
    ctx: &OutputContext,
) -> Result<()> {
    client
        .associate_peripheral(serial_number, uid)
        .await
        .context("Failed to associate peripheral")?;
    ctx.success(&format!(
        "Associated peripheral {} with gateway {}",
        uid, serial_number
    ));
    Ok(())
}

/// Delete a peripheral through its owning gateway
pub async fn detach(
    client: &GatewayClient,
    serial_number: &str,
    uid: PeripheralUid,
    ctx: &OutputContext,
) -> Result<()> {
    client
        .remove_peripheral(serial_number, uid)
        .await
        .context("Failed to remove peripheral")?;
    ctx.success(&format!(
        "Removed peripheral {} from gateway {}",
        uid, serial_number
    ));
    Ok(())
}
