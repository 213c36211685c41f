use serde::ser::SerializeStruct;
use serde::Serialize;
use serde_json::Value;

use crate::gls::GlsShipment;
use crate::shipment::GenericShipment;
use crate::trace::ExportTrace;
use crate::violation::FieldViolation;

/// Carrier-specific shipment request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CarrierPayload {
    Generic(GenericShipment),
    Gls(GlsShipment),
}

/// Description of a failed export, with the diagnostic trace attached when
/// the pipeline produced one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetails {
    pub error_details: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<ExportTrace>,
}

impl ErrorDetails {
    pub fn from_trace(trace: ExportTrace) -> Self {
        Self {
            error_details: Value::String(trace.error_description.clone()),
            trace: Some(trace),
        }
    }

    pub fn from_violations(violations: Vec<FieldViolation>, trace: Option<ExportTrace>) -> Self {
        Self {
            error_details: serde_json::to_value(violations).unwrap_or(Value::Null),
            trace,
        }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            error_details: Value::String(message.into()),
            trace: None,
        }
    }
}

/// Outcome of one carrier export.
///
/// A failed result always carries an error description and a successful one
/// always carries the domain payload; there is no way to construct a failed
/// result holding a payload or vice versa.
#[derive(Debug, Clone, PartialEq)]
pub enum CarrierResult {
    Success(CarrierPayload),
    Failure(ErrorDetails),
}

impl CarrierResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CarrierResult::Success(_))
    }

    pub fn payload(&self) -> Option<&CarrierPayload> {
        match self {
            CarrierResult::Success(payload) => Some(payload),
            CarrierResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ErrorDetails> {
        match self {
            CarrierResult::Success(_) => None,
            CarrierResult::Failure(details) => Some(details),
        }
    }
}

// Serialized as `{"success": bool, "message": ...}` to match the response
// body consumed by the warehouse clients.
impl Serialize for CarrierResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CarrierResult", 2)?;
        match self {
            CarrierResult::Success(payload) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("message", payload)?;
            }
            CarrierResult::Failure(details) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("message", details)?;
            }
        }
        state.end()
    }
}
