use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Carrier-agnostic shipment document assembled from one order row.
///
/// Field names follow the generic submission wire format, so the document
/// serializes straight into the carrier request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericShipment {
    #[serde(rename = "type")]
    pub kind: String,
    pub depot_number: String,
    pub customer_number: Option<i64>,
    pub date: Option<NaiveDate>,
    pub created_by: String,
    pub references: Vec<Reference>,
    pub addresses: Vec<Address>,
    pub text_messages: Option<Vec<TextMessage>>,
    #[serde(rename = "Shipment_services")]
    pub services: Option<Vec<ShipmentService>>,
    pub shipment_units: Vec<ShipmentUnit>,
    pub labels: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type")]
    pub kind: String,
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: Option<String>,
    pub phonenumber: Option<String>,
    pub email_address: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub time_from: Option<String>,
    pub time_to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub name2: Option<String>,
    pub address1: String,
    pub housenumber: String,
    pub postalcode: String,
    pub city: String,
    pub country_code: String,
    pub contact: Option<Contact>,
    pub date: Option<NaiveDate>,
    pub timeframes: Option<Vec<Timeframe>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentService {
    pub service_code: String,
}

/// Weight is the only required measurement; absent dimensions stay `None`
/// and are never defaulted to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub weight: f64,
    pub length: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub loadingmeter: Option<f64>,
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentUnit {
    pub unit_number: i64,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub contains_packages: Option<i64>,
    pub unit_type: String,
    pub measurements: Measurements,
    pub references: Vec<Reference>,
}
