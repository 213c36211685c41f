use async_trait::async_trait;
use serde_json::Value;

use tms_core::carrier::{GlsTransport, TransmissionTransport, TransportFault};
use tms_shared::confirmation::ShipmentConfirmation;
use tms_shared::gls::GlsShipment;
use tms_shared::shipment::GenericShipment;

#[derive(Debug, Clone)]
pub struct TransmissionApiConfig {
    pub root_url: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct GlsApiConfig {
    pub root_url: String,
    pub user: String,
    pub password: String,
}

fn request_fault(err: reqwest::Error) -> TransportFault {
    TransportFault::Fault {
        message: err.to_string(),
        code: err.status().map(|status| status.as_u16().to_string()),
        endpoint: err.url().map(|url| url.to_string()),
    }
}

/// HTTP client for the generic-document carrier API. Token-based: each
/// submission authenticates, then posts the document as JSON.
pub struct HttpTransmissionTransport {
    client: reqwest::Client,
    config: TransmissionApiConfig,
}

impl HttpTransmissionTransport {
    pub fn new(config: TransmissionApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn token(&self) -> Result<String, TransportFault> {
        let endpoint = format!("{}/token", self.config.root_url);
        let response = self
            .client
            .post(&endpoint)
            .form(&[
                ("grant_type", "password"),
                ("username", self.config.user.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await
            .map_err(request_fault)?;
        let body: Value = response.json().await.map_err(request_fault)?;

        match body.get("access_token").and_then(Value::as_str) {
            Some(token) => Ok(token.to_string()),
            None => Err(TransportFault::Fault {
                message: format!("Problem with getting token > {body}"),
                code: None,
                endpoint: Some(endpoint),
            }),
        }
    }
}

#[async_trait]
impl TransmissionTransport for HttpTransmissionTransport {
    async fn submit(
        &self,
        shipment: &GenericShipment,
    ) -> Result<ShipmentConfirmation, TransportFault> {
        let token = self.token().await?;
        let response = self
            .client
            .post(format!("{}/shipments/shipment", self.config.root_url))
            .bearer_auth(token)
            .json(shipment)
            .send()
            .await
            .map_err(request_fault)?;
        response.json().await.map_err(request_fault)
    }
}

/// HTTP client for the GLS web service.
pub struct HttpGlsTransport {
    client: reqwest::Client,
    config: GlsApiConfig,
}

impl HttpGlsTransport {
    pub fn new(config: GlsApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn session(&self) -> Result<String, TransportFault> {
        let endpoint = format!("{}/auth", self.config.root_url);
        let response = self
            .client
            .post(&endpoint)
            .json(&serde_json::json!({
                "user_name": self.config.user,
                "password": self.config.password,
            }))
            .send()
            .await
            .map_err(request_fault)?;
        let body: Value = response.json().await.map_err(request_fault)?;

        match body.get("session").and_then(Value::as_str) {
            Some(session) => Ok(session.to_string()),
            None => Err(TransportFault::Fault {
                message: format!("Problem with getting session > {body}"),
                code: None,
                endpoint: Some(endpoint),
            }),
        }
    }
}

#[async_trait]
impl GlsTransport for HttpGlsTransport {
    async fn create_shipment(&self, shipment: &GlsShipment) -> Result<String, TransportFault> {
        let session = self.session().await?;
        let endpoint = format!("{}/shipments", self.config.root_url);
        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(session)
            .json(shipment)
            .send()
            .await
            .map_err(request_fault)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Err(TransportFault::InvalidPayload);
        }
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(TransportFault::Fault {
                message: body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("carrier rejected the shipment")
                    .to_string(),
                code: Some(status.as_u16().to_string()),
                endpoint: Some(endpoint),
            });
        }

        let body: Value = response.json().await.map_err(request_fault)?;
        match body.get("id") {
            Some(Value::String(id)) => Ok(id.clone()),
            Some(Value::Number(id)) => Ok(id.to_string()),
            _ => Err(TransportFault::Fault {
                message: format!("shipment id missing from carrier response > {body}"),
                code: None,
                endpoint: Some(endpoint),
            }),
        }
    }

    async fn fetch_parcel_numbers(
        &self,
        shipment_number: &str,
    ) -> Result<Vec<String>, TransportFault> {
        let response = self
            .client
            .get(format!(
                "{}/shipments/{shipment_number}/parcels",
                self.config.root_url
            ))
            .send()
            .await
            .map_err(request_fault)?;
        let body: Value = response.json().await.map_err(request_fault)?;

        let numbers = body["parcels"]["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["number"].as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(numbers)
    }

    async fn fetch_label(&self, shipment_number: &str) -> Result<Vec<u8>, TransportFault> {
        let response = self
            .client
            .get(format!(
                "{}/shipments/{shipment_number}/label",
                self.config.root_url
            ))
            .send()
            .await
            .map_err(request_fault)?;
        let bytes = response.bytes().await.map_err(request_fault)?;
        Ok(bytes.to_vec())
    }
}
