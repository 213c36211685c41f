use serde::Serialize;

use crate::order::{OrderKey, ShipmentDetails};

/// Diagnostic envelope carried through the export pipeline.
///
/// Every stage records what it resolved before moving on, so a failure
/// anywhere in the chain still reports the values resolved up to that
/// point. The envelope is attached to the error, never reconstructed by
/// poking at pipeline internals after the fact.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportTrace {
    pub order: Option<OrderKey>,
    pub inventory_stock_type: String,
    pub shipment_details: Option<ShipmentDetails>,
    pub order_type: Option<String>,
    pub depot_number: Option<String>,
    pub customer_number: String,
    pub service_code: String,
    /// "1" when the measures fields are computed for this order type, else "".
    pub measures: String,
    pub loading_meter: String,
    pub volume: String,
    pub extra_text: String,
    pub error: bool,
    pub error_description: String,
}

impl ExportTrace {
    /// Mark the trace failed with the given description and hand it back.
    pub fn failed(mut self, description: impl Into<String>) -> Self {
        self.error = true;
        self.error_description = description.into();
        self
    }
}
