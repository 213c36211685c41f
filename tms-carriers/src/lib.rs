pub mod exporter;
pub mod gls;
pub mod label;
pub mod transmission;
pub mod transport;

pub use exporter::Exporter;
pub use gls::Gls;
pub use label::TcpLabelPrinter;
pub use transmission::Transmission;
pub use transport::{GlsApiConfig, HttpGlsTransport, HttpTransmissionTransport, TransmissionApiConfig};
