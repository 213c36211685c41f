use async_trait::async_trait;

use tms_shared::carrier::{CarrierPayload, CarrierResult};
use tms_shared::confirmation::{ShipmentConfirmation, ShipmentMeta};
use tms_shared::gls::GlsShipment;
use tms_shared::order::OrderHeader;
use tms_shared::shipment::GenericShipment;

use crate::error::ExportError;

/// One registered carrier integration.
///
/// `shipment_data` runs the carrier's export pipeline against the order
/// store and reports pipeline failures inside the `CarrierResult`, not as
/// an `Err`; `Err` is reserved for store faults. `create_shipment` hands a
/// successful payload to the carrier and returns its confirmation.
#[async_trait]
pub trait Carrier: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    async fn shipment_data(&self, shipment_id: &str) -> Result<CarrierResult, ExportError>;

    async fn create_shipment(
        &self,
        payload: &CarrierPayload,
        header: &OrderHeader,
    ) -> Result<ShipmentConfirmation, ExportError>;
}

/// Fault raised by a carrier transport on submission.
#[derive(Debug, thiserror::Error)]
pub enum TransportFault {
    #[error("{message}")]
    Fault {
        message: String,
        code: Option<String>,
        endpoint: Option<String>,
    },

    /// Carrier-side payload validation rejected the request outright.
    #[error("carrier rejected the shipment payload")]
    InvalidPayload,
}

impl From<TransportFault> for ExportError {
    fn from(fault: TransportFault) -> Self {
        match fault {
            TransportFault::Fault {
                message,
                code,
                endpoint,
            } => ExportError::Transport {
                message,
                code,
                endpoint,
            },
            TransportFault::InvalidPayload => ExportError::Transport {
                message: "No parcels found for this shipment!".to_string(),
                code: None,
                endpoint: None,
            },
        }
    }
}

/// Outbound channel to the generic-document carrier API.
#[async_trait]
pub trait TransmissionTransport: Send + Sync {
    async fn submit(&self, shipment: &GenericShipment)
        -> Result<ShipmentConfirmation, TransportFault>;
}

/// Outbound channel to the GLS web service.
#[async_trait]
pub trait GlsTransport: Send + Sync {
    /// Register the shipment and return the carrier's shipment number.
    async fn create_shipment(&self, shipment: &GlsShipment) -> Result<String, TransportFault>;

    async fn fetch_parcel_numbers(
        &self,
        shipment_number: &str,
    ) -> Result<Vec<String>, TransportFault>;

    /// Raw label bytes ready to stream to a label printer.
    async fn fetch_label(&self, shipment_number: &str) -> Result<Vec<u8>, TransportFault>;
}

/// Device seam for label printing. Printing never fails a submission; the
/// implementation reports problems through the returned meta block.
#[async_trait]
pub trait LabelPrinter: Send + Sync {
    async fn print(&self, label: &[u8], printer_ip: Option<&str>) -> ShipmentMeta;
}
