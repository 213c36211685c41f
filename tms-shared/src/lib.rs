pub mod carrier;
pub mod confirmation;
pub mod gls;
pub mod order;
pub mod shipment;
pub mod trace;
pub mod violation;

pub use carrier::{CarrierPayload, CarrierResult, ErrorDetails};
pub use confirmation::{ShipmentConfirmation, ShipmentData, ShipmentMeta};
pub use trace::ExportTrace;
pub use violation::FieldViolation;
