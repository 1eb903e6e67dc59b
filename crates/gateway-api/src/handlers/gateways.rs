//! Gateway handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use gateway_core::{Gateway, Peripheral, PeripheralUid};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/gateways
pub async fn list_gateways(State(state): State<AppState>) -> Result<Json<Vec<Gateway>>, ApiError> {
    let gateways = state.gateways.list_gateways().await?;
    Ok(Json(gateways))
}

/// POST /api/v1/gateways
pub async fn create_gateway(
    State(state): State<AppState>,
    Json(gateway): Json<Gateway>,
) -> Result<Json<Gateway>, ApiError> {
    let created = state.gateways.create_gateway(gateway).await?;
    Ok(Json(created))
}

/// GET /api/v1/gateways/{serial_number}
pub async fn get_gateway(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> Result<Json<Gateway>, ApiError> {
    let gateway = state.gateways.get_gateway(&serial_number).await?;
    Ok(Json(gateway))
}

/// PUT /api/v1/gateways/{serial_number}
pub async fn update_gateway(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
    Json(details): Json<Gateway>,
) -> Result<Json<Gateway>, ApiError> {
    let updated = state
        .gateways
        .update_gateway(&serial_number, details)
        .await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/gateways/{serial_number}
pub async fn delete_gateway(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.gateways.delete_gateway(&serial_number).await?;
    Ok(StatusCode::OK)
}

/// GET /api/v1/gateways/{serial_number}/peripherals
pub async fn list_gateway_peripherals(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> Result<Json<Vec<Peripheral>>, ApiError> {
    let peripherals = state.gateways.list_peripherals(&serial_number).await?;
    Ok(Json(peripherals))
}

/// POST /api/v1/gateways/{serial_number}/peripherals
///
/// Creates a new peripheral already owned by the gateway.
pub async fn attach_peripheral(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
    Json(peripheral): Json<Peripheral>,
) -> Result<Json<Peripheral>, ApiError> {
    let created = state
        .gateways
        .attach_peripheral(&serial_number, peripheral)
        .await?;
    Ok(Json(created))
}

/// PUT /api/v1/gateways/{serial_number}/peripherals/{uid}
///
/// Moves an existing peripheral under the gateway.
pub async fn associate_peripheral(
    State(state): State<AppState>,
    Path((serial_number, uid)): Path<(String, PeripheralUid)>,
) -> Result<StatusCode, ApiError> {
    state
        .gateways
        .associate_peripheral(&serial_number, uid)
        .await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/v1/gateways/{serial_number}/peripherals/{uid}
pub async fn remove_peripheral(
    State(state): State<AppState>,
    Path((serial_number, uid)): Path<(String, PeripheralUid)>,
) -> Result<StatusCode, ApiError> {
    state.gateways.remove_peripheral(&serial_number, uid).await?;
    Ok(StatusCode::OK)
}
