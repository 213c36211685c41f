pub mod carrier;
pub mod error;
pub mod store;

pub use carrier::{Carrier, GlsTransport, LabelPrinter, TransmissionTransport, TransportFault};
pub use error::ExportError;
pub use store::{OrderStore, StoreError};
