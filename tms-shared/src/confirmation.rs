use serde::{Deserialize, Serialize};

/// Non-fatal diagnostics collected while finishing a submission, e.g. a
/// label that could not be printed. Never fails the submission itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentMeta {
    #[serde(default)]
    pub error_list: Vec<String>,
}

impl ShipmentMeta {
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error_list: vec![message.into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentData {
    pub transport_number: String,
}

/// Carrier response to a submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentConfirmation {
    pub status: u16,
    #[serde(default)]
    pub result_code: String,
    #[serde(default)]
    pub message: String,
    pub data: Option<ShipmentData>,
    pub meta: Option<ShipmentMeta>,
}

impl ShipmentConfirmation {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
