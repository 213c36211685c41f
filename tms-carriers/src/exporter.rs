use std::sync::Arc;

use tms_core::carrier::Carrier;
use tms_core::error::ExportError;
use tms_core::store::OrderStore;
use tms_shared::carrier::CarrierResult;
use tms_shared::confirmation::ShipmentConfirmation;
use tms_shared::order::OrderHeader;

/// Drives export and submission for one shipment id.
///
/// The carrier set is closed and known at build time; dispatch is a match
/// over the carrier name read from the order store, not a mutable registry.
pub struct Exporter {
    store: Arc<dyn OrderStore>,
    transmission: Arc<dyn Carrier>,
    gls: Arc<dyn Carrier>,
}

impl Exporter {
    pub fn new(
        store: Arc<dyn OrderStore>,
        transmission: Arc<dyn Carrier>,
        gls: Arc<dyn Carrier>,
    ) -> Self {
        Self {
            store,
            transmission,
            gls,
        }
    }

    fn carrier_for(&self, name: &str) -> Option<Arc<dyn Carrier>> {
        match name {
            "GLS" => Some(self.gls.clone()),
            "TMS" => Some(self.transmission.clone()),
            _ => None,
        }
    }

    /// Resolve which carrier handles the shipment. Unknown shipments,
    /// orders and carrier names are all hard not-found errors.
    pub async fn resolve_carrier(
        &self,
        shipment_id: &str,
    ) -> Result<(Arc<dyn Carrier>, OrderHeader), ExportError> {
        let Some(header) = self.store.fetch_order_header(shipment_id).await? else {
            return Err(ExportError::NotFound(format!(
                "Shipment {shipment_id} not found in the order store"
            )));
        };

        let Some(carrier_name) = self.store.fetch_carrier_name(&header.key).await? else {
            return Err(ExportError::NotFound(format!(
                "Order {} with row {} not found in the order store for company {}",
                header.key.order_number, header.key.row_number, header.key.company_code
            )));
        };

        let Some(carrier) = self.carrier_for(&carrier_name) else {
            return Err(ExportError::NotFound(format!(
                "Carrier with name {carrier_name} not configured in integration"
            )));
        };

        Ok((carrier, header))
    }

    /// Export the shipment document for one order. A pipeline failure is a
    /// recoverable error carrying the tagged description and trace.
    pub async fn shipment_data(&self, shipment_id: &str) -> Result<CarrierResult, ExportError> {
        let (carrier, header) = self.resolve_carrier(shipment_id).await?;
        tracing::info!(shipment_id, carrier = carrier.name(), "exporting shipment data");

        let result = carrier.shipment_data(&header.key.shipment_id).await?;
        match result {
            CarrierResult::Failure(details) => Err(ExportError::Recoverable(details)),
            success => Ok(success),
        }
    }

    /// Export and hand the payload to the carrier. A non-success
    /// confirmation status is a hard error carrying the full confirmation.
    pub async fn submit(&self, shipment_id: &str) -> Result<ShipmentConfirmation, ExportError> {
        let (carrier, header) = self.resolve_carrier(shipment_id).await?;
        tracing::info!(shipment_id, carrier = carrier.name(), "submitting shipment");

        let result = carrier.shipment_data(&header.key.shipment_id).await?;
        let payload = match result {
            CarrierResult::Success(payload) => payload,
            CarrierResult::Failure(details) => return Err(ExportError::Recoverable(details)),
        };

        let confirmation = carrier.create_shipment(&payload, &header).await?;
        if !confirmation.is_success() {
            tracing::error!(
                shipment_id,
                status = confirmation.status,
                "carrier rejected the shipment"
            );
            return Err(ExportError::SubmissionRejected(confirmation));
        }

        Ok(confirmation)
    }
}
