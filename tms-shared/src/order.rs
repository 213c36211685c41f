use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity of one exportable order row. Immutable once fetched; every
/// pipeline stage keys its lookups off this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderKey {
    pub company_code: i32,
    pub order_number: i64,
    pub row_number: i32,
    pub shipment_id: String,
}

impl OrderKey {
    /// Reference value shared by the shipment and every unit/parcel,
    /// `"{order_number}_{row_number}"`.
    pub fn composite_reference(&self) -> String {
        format!("{}_{}", self.order_number, self.row_number)
    }
}

/// The order-store header row behind a shipment id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHeader {
    #[serde(flatten)]
    pub key: OrderKey,
    pub printer_ip: Option<String>,
}

/// Shipment-level details fetched once the stock type is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDetails {
    /// Counterpart company id (delivery place when set, customer otherwise).
    pub counterpart_id: String,
    pub earliest_delivery: Option<String>,
    pub latest_delivery: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub gross_weight: f64,
    pub order_type_code: Option<i32>,
    pub guarantee_id: i32,
}

/// Name and address block of the receiving company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub address_line: Option<String>,
    pub country_code: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
}

/// Delivery contact details and service markers for one order row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInfo {
    pub contact_person: Option<String>,
    pub contact_details: Option<String>,
    pub notify_email: Option<String>,
    pub guarantee_id: Option<i32>,
    /// Read from the order store but does not gate any field today.
    #[serde(default)]
    pub return_document: bool,
    pub goods_marking: Option<String>,
}

/// One physical package belonging to an order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub package_number: i64,
    pub gross_weight: f64,
}
