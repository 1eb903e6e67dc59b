//! Peripheral handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use gateway_core::{Peripheral, PeripheralUid};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/peripherals
pub async fn list_peripherals(
    State(state): State<AppState>,
) -> Result<Json<Vec<Peripheral>>, ApiError> {
    let peripherals = state.peripherals.list_peripherals().await?;
    Ok(Json(peripherals))
}

/// GET /api/v1/peripherals/associates/{associated}
pub async fn list_by_association(
    State(state): State<AppState>,
    Path(associated): Path<bool>,
) -> Result<Json<Vec<Peripheral>>, ApiError> {
    let peripherals = state.peripherals.list_by_association(associated).await?;
    Ok(Json(peripherals))
}

/// POST /api/v1/peripherals
pub async fn create_peripheral(
    State(state): State<AppState>,
    Json(peripheral): Json<Peripheral>,
) -> Result<Json<Peripheral>, ApiError> {
    let created = state.peripherals.create_peripheral(peripheral).await?;
    Ok(Json(created))
}

/// GET /api/v1/peripherals/{uid}
pub async fn get_peripheral(
    State(state): State<AppState>,
    Path(uid): Path<PeripheralUid>,
) -> Result<Json<Peripheral>, ApiError> {
    let peripheral = state.peripherals.get_peripheral(uid).await?;
    Ok(Json(peripheral))
}

/// PUT /api/v1/peripherals/{uid}
pub async fn update_peripheral(
    State(state): State<AppState>,
    Path(uid): Path<PeripheralUid>,
    Json(details): Json<Peripheral>,
) -> Result<Json<Peripheral>, ApiError> {
    let updated = state.peripherals.update_peripheral(uid, details).await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/peripherals/{uid}
pub async fn delete_peripheral(
    State(state): State<AppState>,
    Path(uid): Path<PeripheralUid>,
) -> Result<StatusCode, ApiError> {
    state.peripherals.delete_peripheral(uid).await?;
    Ok(StatusCode::OK)
}
