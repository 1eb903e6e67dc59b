//! Peripheral commands

use anyhow::{Context, Result};
use gateway_client::{GatewayClient, Peripheral, PeripheralUid};

use crate::output::{peripheral_rows, OutputContext, PeripheralRow};

/// List peripherals, optionally filtered by association state
pub async fn list(
    client: &GatewayClient,
    associated: Option<bool>,
    ctx: &OutputContext,
) -> Result<()> {
    let peripherals = match associated {
        Some(flag) => client.list_peripherals_by_association(flag).await?,
        None => client.list_peripherals().await?,
    };
    ctx.print(&peripheral_rows(&peripherals));
    Ok(())
}

pub async fn get(client: &GatewayClient, uid: PeripheralUid, ctx: &OutputContext) -> Result<()> {
    let peripheral = client.get_peripheral(uid).await?;
    ctx.print_one(&PeripheralRow::from(&peripheral));
    Ok(())
}

pub async fn create(
    client: &GatewayClient,
    peripheral: Peripheral,
    ctx: &OutputContext,
) -> Result<()> {
    let created = client
        .create_peripheral(&peripheral)
        .await
        .context("Failed to create peripheral")?;
    ctx.success(&format!("Created peripheral {}", created.uid));
    Ok(())
}

pub async fn update(
    client: &GatewayClient,
    uid: PeripheralUid,
    details: Peripheral,
    ctx: &OutputContext,
) -> Result<()> {
    let updated = client
        .update_peripheral(uid, &details)
        .await
        .context("Failed to update peripheral")?;
    ctx.print_one(&PeripheralRow::from(&updated));
    Ok(())
}

pub async fn delete(client: &GatewayClient, uid: PeripheralUid, ctx: &OutputContext) -> Result<()> {
    client
        .delete_peripheral(uid)
        .await
        .context("Failed to delete peripheral")?;
    ctx.success(&format!("Deleted peripheral {}", uid));
    Ok(())
}
