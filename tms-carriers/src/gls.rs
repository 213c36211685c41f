use std::sync::Arc;

use async_trait::async_trait;

use tms_core::carrier::{Carrier, GlsTransport, LabelPrinter};
use tms_core::error::ExportError;
use tms_core::store::OrderStore;
use tms_shared::carrier::{CarrierPayload, CarrierResult, ErrorDetails};
use tms_shared::confirmation::ShipmentConfirmation;
use tms_shared::gls::{GlsParcel, GlsParcelList, GlsServiceFlags, GlsShipment};
use tms_shared::order::{CompanyInfo, DeliveryInfo, OrderHeader, Package};
use tms_shared::trace::ExportTrace;
use tms_shared::violation::{check_str_max, FieldViolation};

// Column widths of the GLS receiver block.
const WIDTH_NAME: usize = 40;
const WIDTH_STREET: usize = 50;
const WIDTH_PHONE: usize = 20;
const WIDTH_NOTES: usize = 80;
const WIDTH_REFERENCE: usize = 25;

const MAX_COUNTRY: u64 = 3;
const MAX_ZIPCODE: u64 = 16;
const MAX_CITY: u64 = 30;

/// Service switches for a guarantee id. Closed mapping: unknown ids mean
/// plain delivery with every switch off, never an error.
pub fn guarantee_flags(guarantee_id: i32) -> GlsServiceFlags {
    match guarantee_id {
        1 => GlsServiceFlags {
            rod: true,
            s10: true,
            ..Default::default()
        },
        2 => GlsServiceFlags {
            s12: true,
            ..Default::default()
        },
        3 => GlsServiceFlags {
            rod: true,
            sat: true,
            ..Default::default()
        },
        4 => GlsServiceFlags {
            ow: true,
            ..Default::default()
        },
        _ => GlsServiceFlags::default(),
    }
}

fn clipped(value: Option<&str>, width: usize) -> Option<String> {
    value.map(|v| v.trim().chars().take(width).collect())
}

fn trimmed(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Build the GLS request from the company, delivery and package rows.
///
/// Optional text fields are trimmed and clipped to the carrier's column
/// widths here, ahead of validation; fields without a clipping rule pass
/// through trimmed only.
pub fn map_to_gls(
    company: &CompanyInfo,
    delivery: &DeliveryInfo,
    packages: &[Package],
    reference: &str,
) -> GlsShipment {
    let items = packages
        .iter()
        .map(|package| GlsParcel {
            reference: reference.to_string(),
            weight: package.gross_weight,
        })
        .collect();

    GlsShipment {
        rname1: clipped(company.name.as_deref(), WIDTH_NAME).unwrap_or_default(),
        rname2: clipped(company.address_line.as_deref(), WIDTH_NAME),
        rname3: clipped(delivery.contact_person.as_deref(), WIDTH_NAME),
        rcountry: trimmed(company.country_code.as_deref()),
        rzipcode: trimmed(company.postal_code.as_deref()),
        rcity: trimmed(company.city.as_deref()),
        rstreet: clipped(company.street.as_deref(), WIDTH_STREET).unwrap_or_default(),
        rphone: clipped(delivery.contact_details.as_deref(), WIDTH_PHONE),
        rcontact: clipped(delivery.notify_email.as_deref(), WIDTH_NAME),
        references: clipped(Some(reference), WIDTH_REFERENCE),
        notes: clipped(delivery.goods_marking.as_deref(), WIDTH_NOTES),
        srv_bool: guarantee_flags(delivery.guarantee_id.unwrap_or(0)),
        parcels: GlsParcelList { items },
    }
}

/// Length checks for the fields that have no clipping rule.
pub fn validate_gls(shipment: &GlsShipment) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    check_str_max(
        &mut out,
        vec!["rcountry".to_string()],
        Some(&shipment.rcountry),
        MAX_COUNTRY,
    );
    check_str_max(
        &mut out,
        vec!["rzipcode".to_string()],
        Some(&shipment.rzipcode),
        MAX_ZIPCODE,
    );
    check_str_max(
        &mut out,
        vec!["rcity".to_string()],
        Some(&shipment.rcity),
        MAX_CITY,
    );
    out
}

/// GLS carrier. Export walks the receiver-side prerequisite chain and maps
/// the rows onto the parcel request; submission registers the shipment and
/// finishes with label printing, which never fails the submission.
pub struct Gls {
    store: Arc<dyn OrderStore>,
    transport: Arc<dyn GlsTransport>,
    printer: Arc<dyn LabelPrinter>,
}

impl std::fmt::Debug for Gls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gls").finish_non_exhaustive()
    }
}

impl Gls {
    pub fn new(
        store: Arc<dyn OrderStore>,
        transport: Arc<dyn GlsTransport>,
        printer: Arc<dyn LabelPrinter>,
    ) -> Self {
        Self {
            store,
            transport,
            printer,
        }
    }
}

#[async_trait]
impl Carrier for Gls {
    fn name(&self) -> &'static str {
        "GLS"
    }

    async fn shipment_data(&self, shipment_id: &str) -> Result<CarrierResult, ExportError> {
        let mut trace = ExportTrace::default();

        let Some(header) = self.store.fetch_order_header(shipment_id).await? else {
            return Ok(CarrierResult::Failure(ErrorDetails::from_trace(
                trace.failed(format!(
                    "Order with shipment id {shipment_id} not found in the order store"
                )),
            )));
        };
        let key = header.key.clone();
        trace.order = Some(key.clone());

        let Some(company_id) = self.store.fetch_company_id(&key).await? else {
            return Ok(CarrierResult::Failure(ErrorDetails::from_trace(
                trace.failed(format!(
                    "Cannot find company id for order {} in the order store",
                    key.order_number
                )),
            )));
        };

        let Some(company) = self
            .store
            .fetch_company_info(key.company_code, &company_id)
            .await?
        else {
            return Ok(CarrierResult::Failure(ErrorDetails::from_trace(
                trace.failed(format!(
                    "Cannot fetch company info for customer {company_id} from the order store"
                )),
            )));
        };

        let Some(delivery) = self.store.fetch_delivery_info(&key).await? else {
            return Ok(CarrierResult::Failure(ErrorDetails::from_trace(
                trace.failed(format!(
                    "Cannot fetch delivery info for order {} from the order store",
                    key.order_number
                )),
            )));
        };

        let packages = self.store.fetch_packages(&key).await?;
        let shipment = map_to_gls(&company, &delivery, &packages, &key.composite_reference());

        let violations = validate_gls(&shipment);
        if !violations.is_empty() {
            return Ok(CarrierResult::Failure(ErrorDetails::from_violations(
                violations,
                Some(trace),
            )));
        }

        Ok(CarrierResult::Success(CarrierPayload::Gls(shipment)))
    }

    async fn create_shipment(
        &self,
        payload: &CarrierPayload,
        header: &OrderHeader,
    ) -> Result<ShipmentConfirmation, ExportError> {
        let CarrierPayload::Gls(shipment) = payload else {
            return Err(ExportError::Transport {
                message: "payload does not match this carrier".to_string(),
                code: None,
                endpoint: None,
            });
        };

        let shipment_number = self.transport.create_shipment(shipment).await?;
        let parcel_numbers = self.transport.fetch_parcel_numbers(&shipment_number).await?;
        let tracking = parcel_numbers.join(",");

        let label = self.transport.fetch_label(&shipment_number).await?;
        let meta = self
            .printer
            .print(&label, header.printer_ip.as_deref())
            .await;

        tracing::info!(
            shipment_id = %header.key.shipment_id,
            tracking = %tracking,
            "shipment registered with GLS"
        );

        Ok(ShipmentConfirmation {
            status: 201,
            result_code: String::new(),
            message: tracking,
            data: None,
            meta: Some(meta),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tms_core::carrier::TransportFault;
    use tms_shared::confirmation::ShipmentMeta;
    use tms_shared::order::OrderKey;
    use tms_store::memory::MemoryOrderStore;

    fn company() -> CompanyInfo {
        CompanyInfo {
            name: Some("Receiver name".to_string()),
            address_line: Some("Receiver line two".to_string()),
            country_code: Some("PL".to_string()),
            postal_code: Some("00-001".to_string()),
            city: Some("Warszawa".to_string()),
            street: Some("Prosta 1".to_string()),
        }
    }

    fn delivery(guarantee_id: i32) -> DeliveryInfo {
        DeliveryInfo {
            contact_person: Some("Contact person".to_string()),
            contact_details: Some("555 100 200".to_string()),
            notify_email: Some("notify@example.com".to_string()),
            guarantee_id: Some(guarantee_id),
            return_document: false,
            goods_marking: None,
        }
    }

    fn one_package() -> Vec<Package> {
        vec![Package {
            package_number: 1,
            gross_weight: 1.01,
        }]
    }

    #[test]
    fn guarantee_mapping_is_exhaustive() {
        let g1 = guarantee_flags(1);
        assert!(g1.rod && g1.s10 && !g1.s12 && !g1.sat && !g1.ow);

        let g2 = guarantee_flags(2);
        assert!(!g2.rod && !g2.s10 && g2.s12 && !g2.sat && !g2.ow);

        let g3 = guarantee_flags(3);
        assert!(g3.rod && !g3.s10 && !g3.s12 && g3.sat && !g3.ow);

        let g4 = guarantee_flags(4);
        assert!(!g4.rod && !g4.s10 && !g4.s12 && !g4.sat && g4.ow);

        for other in [0, 5, 42, -1] {
            assert_eq!(guarantee_flags(other), GlsServiceFlags::default());
        }
    }

    #[test]
    fn guarantee_mapping_is_idempotent() {
        assert_eq!(guarantee_flags(2), guarantee_flags(2));
        assert_eq!(guarantee_flags(7), guarantee_flags(7));
    }

    #[test]
    fn maps_company_and_delivery_rows() {
        let shipment = map_to_gls(&company(), &delivery(1), &one_package(), "654321_1");
        assert_eq!(shipment.rname1, "Receiver name");
        assert_eq!(shipment.rname2.as_deref(), Some("Receiver line two"));
        assert_eq!(shipment.rname3.as_deref(), Some("Contact person"));
        assert_eq!(shipment.rcountry, "PL");
        assert_eq!(shipment.rzipcode, "00-001");
        assert_eq!(shipment.rcity, "Warszawa");
        assert_eq!(shipment.rstreet, "Prosta 1");
        assert_eq!(shipment.rphone.as_deref(), Some("555 100 200"));
        assert_eq!(shipment.rcontact.as_deref(), Some("notify@example.com"));
        assert_eq!(shipment.references.as_deref(), Some("654321_1"));
        assert_eq!(shipment.notes, None);
        assert!(shipment.srv_bool.rod && shipment.srv_bool.s10);
        assert_eq!(shipment.parcels.items.len(), 1);
        assert_eq!(shipment.parcels.items[0].reference, "654321_1");
        assert_eq!(shipment.parcels.items[0].weight, 1.01);
    }

    #[test]
    fn whitespace_is_trimmed_before_clipping() {
        let mut company = company();
        company.name = Some("Receiver name               ".to_string());
        company.address_line = Some("Receiver line two          ".to_string());
        let shipment = map_to_gls(&company, &delivery(4), &one_package(), "654321_1");
        assert_eq!(shipment.rname1, "Receiver name");
        assert_eq!(shipment.rname2.as_deref(), Some("Receiver line two"));
        assert!(shipment.srv_bool.ow);
    }

    #[test]
    fn long_notes_are_clipped_to_eighty_characters() {
        let mut delivery = delivery(2);
        delivery.goods_marking = Some("x".repeat(109));
        let shipment = map_to_gls(&company(), &delivery, &one_package(), "654321_1");
        assert_eq!(shipment.notes.as_ref().unwrap().chars().count(), 80);
        assert!(validate_gls(&shipment).is_empty());
    }

    #[test]
    fn country_code_has_no_clipping_rule() {
        let mut company = company();
        company.country_code = Some("POLAND".to_string());
        let shipment = map_to_gls(&company, &delivery(1), &one_package(), "654321_1");
        assert_eq!(shipment.rcountry, "POLAND");
        let violations = validate_gls(&shipment);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].loc, vec!["rcountry"]);
        assert_eq!(violations[0].ctx.as_ref().unwrap().limit_value, 3);
        assert_eq!(violations[0].kind, "value_error.any_str.max_length");
    }

    #[test]
    fn long_reference_is_clipped_to_parcel_width() {
        let shipment = map_to_gls(
            &company(),
            &delivery(1),
            &one_package(),
            "123456789012345678901234567890",
        );
        assert_eq!(shipment.references.as_ref().unwrap().chars().count(), 25);
    }

    struct NoopTransport;

    #[async_trait]
    impl GlsTransport for NoopTransport {
        async fn create_shipment(&self, _shipment: &GlsShipment) -> Result<String, TransportFault> {
            Ok("900001".to_string())
        }

        async fn fetch_parcel_numbers(
            &self,
            _shipment_number: &str,
        ) -> Result<Vec<String>, TransportFault> {
            Ok(vec![])
        }

        async fn fetch_label(&self, _shipment_number: &str) -> Result<Vec<u8>, TransportFault> {
            Ok(vec![])
        }
    }

    struct NoopPrinter;

    #[async_trait]
    impl LabelPrinter for NoopPrinter {
        async fn print(&self, _label: &[u8], _printer_ip: Option<&str>) -> ShipmentMeta {
            ShipmentMeta::default()
        }
    }

    fn carrier(store: Arc<MemoryOrderStore>) -> Gls {
        Gls::new(store, Arc::new(NoopTransport), Arc::new(NoopPrinter))
    }

    fn store_with_header() -> Arc<MemoryOrderStore> {
        let store = MemoryOrderStore::default();
        store.set_header(OrderHeader {
            key: OrderKey {
                company_code: 1810,
                order_number: 654321,
                row_number: 1,
                shipment_id: "123456-789".to_string(),
            },
            printer_ip: None,
        });
        Arc::new(store)
    }

    #[tokio::test]
    async fn missing_company_id_is_tagged() {
        let store = store_with_header();
        let result = carrier(store).shipment_data("123456-789").await.unwrap();
        let details = result.failure().expect("export should fail");
        assert_eq!(
            details.error_details,
            "Cannot find company id for order 654321 in the order store"
        );
        let trace = details.trace.as_ref().unwrap();
        assert_eq!(trace.order.as_ref().unwrap().order_number, 654321);
    }

    #[tokio::test]
    async fn missing_company_info_is_tagged() {
        let store = store_with_header();
        store.set_company_id("00001");
        let result = carrier(store).shipment_data("123456-789").await.unwrap();
        let details = result.failure().expect("export should fail");
        assert_eq!(
            details.error_details,
            "Cannot fetch company info for customer 00001 from the order store"
        );
    }

    #[tokio::test]
    async fn missing_delivery_info_is_tagged() {
        let store = store_with_header();
        store.set_company_id("00001");
        store.set_company_info(company());
        let result = carrier(store).shipment_data("123456-789").await.unwrap();
        let details = result.failure().expect("export should fail");
        assert_eq!(
            details.error_details,
            "Cannot fetch delivery info for order 654321 from the order store"
        );
    }

    #[tokio::test]
    async fn untruncatable_field_fails_export_with_violations() {
        let store = store_with_header();
        store.set_company_id("00001");
        let mut info = company();
        info.country_code = Some("POLAND".to_string());
        store.set_company_info(info);
        store.set_delivery_info(delivery(1));
        store.set_packages(vec![Package {
            package_number: 1,
            gross_weight: 1.01,
        }]);

        let result = carrier(store).shipment_data("123456-789").await.unwrap();
        let details = result.failure().expect("export should fail");
        let violations = details.error_details.as_array().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0]["loc"][0], "rcountry");
        assert_eq!(violations[0]["ctx"]["limit_value"], 3);
    }

    #[test]
    fn notes_pass_through_regardless_of_return_document_flag() {
        let mut with_flag = delivery(1);
        with_flag.return_document = true;
        with_flag.goods_marking = Some("marked goods".to_string());
        let mut without_flag = with_flag.clone();
        without_flag.return_document = false;

        let a = map_to_gls(&company(), &with_flag, &one_package(), "1_1");
        let b = map_to_gls(&company(), &without_flag, &one_package(), "1_1");
        assert_eq!(a.notes.as_deref(), Some("marked goods"));
        assert_eq!(a.notes, b.notes);
    }
}
