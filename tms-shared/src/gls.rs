use serde::{Deserialize, Serialize};

/// GLS delivery-service switches derived from the guarantee id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlsServiceFlags {
    /// Return-of-documents service.
    pub rod: bool,
    /// Delivery before 10:00.
    pub s10: bool,
    /// Delivery before 12:00.
    pub s12: bool,
    /// Saturday delivery.
    pub sat: bool,
    /// Pick-up at depot.
    pub ow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlsParcel {
    pub reference: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlsParcelList {
    pub items: Vec<GlsParcel>,
}

/// Receiver block and parcels of one GLS shipment request.
///
/// Text fields are already trimmed and clipped to the carrier's column
/// widths when this struct is built; only the fields without a clipping
/// rule (country, zipcode, city) can still fail length validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlsShipment {
    pub rname1: String,
    pub rname2: Option<String>,
    pub rname3: Option<String>,
    pub rcountry: String,
    pub rzipcode: String,
    pub rcity: String,
    pub rstreet: String,
    pub rphone: Option<String>,
    pub rcontact: Option<String>,
    pub references: Option<String>,
    pub notes: Option<String>,
    pub srv_bool: GlsServiceFlags,
    pub parcels: GlsParcelList,
}
