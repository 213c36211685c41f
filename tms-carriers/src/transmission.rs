use std::sync::Arc;

use async_trait::async_trait;

use tms_core::carrier::{Carrier, TransmissionTransport};
use tms_core::error::ExportError;
use tms_core::store::OrderStore;
use tms_export::assemble::{AssemblyOutcome, FieldAssembler};
use tms_export::config::{ChainOutcome, ConfigResolver};
use tms_export::validate::validate_document;
use tms_shared::carrier::{CarrierPayload, CarrierResult, ErrorDetails};
use tms_shared::confirmation::ShipmentConfirmation;
use tms_shared::order::OrderHeader;

/// Generic-document carrier. Export runs the full configuration chain,
/// assembles the carrier-agnostic shipment document and validates it
/// before anything leaves the process.
pub struct Transmission {
    store: Arc<dyn OrderStore>,
    transport: Arc<dyn TransmissionTransport>,
}

impl std::fmt::Debug for Transmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transmission").finish_non_exhaustive()
    }
}

impl Transmission {
    pub fn new(store: Arc<dyn OrderStore>, transport: Arc<dyn TransmissionTransport>) -> Self {
        Self { store, transport }
    }
}

#[async_trait]
impl Carrier for Transmission {
    fn name(&self) -> &'static str {
        "TMS"
    }

    async fn shipment_data(&self, shipment_id: &str) -> Result<CarrierResult, ExportError> {
        let resolver = ConfigResolver::new(self.store.as_ref());
        let (config, trace) = match resolver.resolve(shipment_id).await? {
            ChainOutcome::Resolved(config, trace) => (config, trace),
            ChainOutcome::Failed(trace) => {
                tracing::warn!(
                    shipment_id,
                    error = %trace.error_description,
                    "configuration chain failed"
                );
                return Ok(CarrierResult::Failure(ErrorDetails::from_trace(trace)));
            }
        };

        let assembler = FieldAssembler::new(self.store.as_ref());
        let (document, trace) = match assembler.assemble(&config, trace).await? {
            AssemblyOutcome::Assembled(document, trace) => (document, trace),
            AssemblyOutcome::Failed(trace) => {
                tracing::warn!(
                    shipment_id,
                    error = %trace.error_description,
                    "document assembly failed"
                );
                return Ok(CarrierResult::Failure(ErrorDetails::from_trace(trace)));
            }
        };

        match validate_document(*document) {
            Ok(document) => {
                tracing::debug!(
                    shipment_id,
                    order_type = trace.order_type.as_deref().unwrap_or(""),
                    depot = trace.depot_number.as_deref().unwrap_or(""),
                    "shipment document ready"
                );
                Ok(CarrierResult::Success(CarrierPayload::Generic(document)))
            }
            Err(violations) => Ok(CarrierResult::Failure(ErrorDetails::from_violations(
                violations,
                Some(trace),
            ))),
        }
    }

    async fn create_shipment(
        &self,
        payload: &CarrierPayload,
        _header: &OrderHeader,
    ) -> Result<ShipmentConfirmation, ExportError> {
        let CarrierPayload::Generic(shipment) = payload else {
            return Err(ExportError::Transport {
                message: "payload does not match this carrier".to_string(),
                code: None,
                endpoint: None,
            });
        };
        let confirmation = self.transport.submit(shipment).await?;
        Ok(confirmation)
    }
}
