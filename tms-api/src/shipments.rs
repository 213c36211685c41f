use axum::{
    extract::{Path, State},
    Json,
};

use tms_shared::carrier::CarrierResult;
use tms_shared::confirmation::ShipmentConfirmation;

use crate::error::AppError;
use crate::state::AppState;

/// GET /shipments/{shipment_id}/export
/// Export the shipment data for one order without submitting it.
pub async fn get_shipment_export(
    State(state): State<AppState>,
    Path(shipment_id): Path<String>,
) -> Result<Json<CarrierResult>, AppError> {
    let result = state.exporter.shipment_data(&shipment_id).await?;
    Ok(Json(result))
}

/// POST /shipments/{shipment_id}
/// Export and submit a new shipment to the carrier.
pub async fn submit_shipment(
    State(state): State<AppState>,
    Path(shipment_id): Path<String>,
) -> Result<Json<ShipmentConfirmation>, AppError> {
    let confirmation = state.exporter.submit(&shipment_id).await?;
    Ok(Json(confirmation))
}
