use tms_shared::carrier::ErrorDetails;
use tms_shared::confirmation::ShipmentConfirmation;

use crate::store::StoreError;

/// Error taxonomy of the export/submission flow.
///
/// `NotFound` and `SubmissionRejected` are hard errors; `Recoverable` and
/// `Transport` describe conditions the operator can fix (missing
/// configuration, carrier-side rejection) and map to a conflict at the HTTP
/// boundary. No variant is ever retried internally.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("{0}")]
    NotFound(String),

    #[error("shipment export failed")]
    Recoverable(ErrorDetails),

    #[error("carrier transport fault: {message}")]
    Transport {
        message: String,
        code: Option<String>,
        endpoint: Option<String>,
    },

    #[error("carrier rejected the shipment with status {}", .0.status)]
    SubmissionRejected(ShipmentConfirmation),

    #[error(transparent)]
    Store(#[from] StoreError),
}
