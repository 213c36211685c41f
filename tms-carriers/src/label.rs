use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use tms_core::carrier::LabelPrinter;
use tms_shared::confirmation::ShipmentMeta;

/// Streams label bytes to a warehouse label printer over a raw socket.
///
/// Printing is strictly best-effort: any problem lands in the returned
/// meta block and the submission that requested it carries on.
pub struct TcpLabelPrinter {
    port: u16,
}

impl TcpLabelPrinter {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

impl Default for TcpLabelPrinter {
    fn default() -> Self {
        Self::new(9100)
    }
}

#[async_trait]
impl LabelPrinter for TcpLabelPrinter {
    async fn print(&self, label: &[u8], printer_ip: Option<&str>) -> ShipmentMeta {
        let Some(ip) = printer_ip.filter(|ip| !ip.trim().is_empty()) else {
            return ShipmentMeta::with_error("Printer IP not provided");
        };

        match TcpStream::connect((ip, self.port)).await {
            Ok(mut stream) => {
                if let Err(err) = stream.write_all(label).await {
                    tracing::warn!(printer_ip = ip, %err, "label write failed");
                    return ShipmentMeta::with_error("Error with the connection");
                }
                ShipmentMeta::default()
            }
            Err(err) => {
                tracing::warn!(printer_ip = ip, %err, "printer connection failed");
                ShipmentMeta::with_error("Error with the connection")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn missing_printer_ip_is_reported() {
        let printer = TcpLabelPrinter::default();
        let meta = printer.print(b"label", None).await;
        assert_eq!(meta.error_list, vec!["Printer IP not provided"]);
    }

    #[tokio::test]
    async fn empty_printer_ip_is_reported() {
        let printer = TcpLabelPrinter::default();
        let meta = printer.print(b"label", Some("")).await;
        assert_eq!(meta.error_list, vec!["Printer IP not provided"]);
    }

    #[tokio::test]
    async fn unreachable_printer_is_reported_as_connection_error() {
        // Port 1 is reserved and closed on any sane host.
        let printer = TcpLabelPrinter::new(1);
        let meta = printer.print(b"label", Some("127.0.0.1")).await;
        assert_eq!(meta.error_list, vec!["Error with the connection"]);
    }

    #[tokio::test]
    async fn label_bytes_reach_the_printer() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let accept = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        let printer = TcpLabelPrinter::new(port);
        let meta = printer.print(b"ZPL-LABEL", Some("127.0.0.1")).await;
        assert!(meta.error_list.is_empty());
        assert_eq!(accept.await.unwrap(), b"ZPL-LABEL");
    }
}
