use chrono::Local;

use tms_core::store::{OrderStore, StoreError};
use tms_shared::shipment::{
    GenericShipment, Measurements, Reference, ShipmentService, ShipmentUnit, Timeframe,
};
use tms_shared::trace::ExportTrace;

use crate::config::{ResolvedConfig, VisiblePart};

/// Outcome of document assembly. Failures keep the trace, including the
/// derived-field switches computed before the failing fetch.
#[derive(Debug)]
pub enum AssemblyOutcome {
    Assembled(Box<GenericShipment>, ExportTrace),
    Failed(ExportTrace),
}

/// Builds the generic shipment document from a fully resolved
/// configuration chain plus the order's nested detail rows.
pub struct FieldAssembler<'a> {
    store: &'a dyn OrderStore,
}

impl<'a> FieldAssembler<'a> {
    pub fn new(store: &'a dyn OrderStore) -> Self {
        Self { store }
    }

    pub async fn assemble(
        &self,
        config: &ResolvedConfig,
        mut trace: ExportTrace,
    ) -> Result<AssemblyOutcome, StoreError> {
        let key = &config.header.key;
        let company_code = key.company_code;

        let contact = self.store.fetch_contact(key).await?;
        let Some(mut address) = self.store.fetch_delivery_address(key).await? else {
            return Ok(AssemblyOutcome::Failed(trace.failed(format!(
                "Cannot fetch delivery address for order {} from the order store",
                key.order_number
            ))));
        };
        let remark = self.store.fetch_remark(key).await?;

        let parts = &config.visible_parts;
        trace.measures = parts.flag(VisiblePart::Measures).to_string();
        trace.loading_meter = parts.flag(VisiblePart::LoadingMeter).to_string();
        trace.volume = parts.flag(VisiblePart::Volume).to_string();
        trace.service_code = parts.unit_measure_key.clone();

        let (unit_type, measurements) = if parts.unit_measure_key.is_empty() {
            // No package-level unit lookup configured: the whole row ships
            // as one standard unit carrying the order's gross weight.
            (
                "EP".to_string(),
                Measurements {
                    weight: config.details.gross_weight,
                    ..Default::default()
                },
            )
        } else {
            let package_type_code = match self.store.fetch_package_type_code(key).await? {
                Some(code) if !code.trim().is_empty() => code,
                _ => {
                    return Ok(AssemblyOutcome::Failed(
                        trace.failed("Package type code is empty"),
                    ))
                }
            };
            let Some(unit_type) = self
                .store
                .fetch_package_type(company_code, &package_type_code)
                .await?
            else {
                return Ok(AssemblyOutcome::Failed(
                    trace.failed("Missing configuration - Package type"),
                ));
            };
            let Some(measurements) = self
                .store
                .fetch_unit_measure(company_code, &parts.unit_measure_key)
                .await?
            else {
                return Ok(AssemblyOutcome::Failed(
                    trace.failed("Missing configuration - Unit measure"),
                ));
            };
            (unit_type, measurements)
        };

        let reference = key.composite_reference();
        let unit_rows = self.store.fetch_shipment_units(key).await?;
        let shipment_units = unit_rows
            .iter()
            .enumerate()
            .map(|(index, row)| ShipmentUnit {
                unit_number: index as i64 + 1,
                barcode: Some(String::new()),
                description: Some(String::new()),
                contains_packages: row.packages,
                unit_type: unit_type.clone(),
                measurements: measurements.clone(),
                references: vec![Reference {
                    kind: "delivery_note".to_string(),
                    reference: reference.clone(),
                }],
            })
            .collect();

        address.contact = contact;
        address.timeframes = Some(vec![Timeframe {
            time_from: config.details.earliest_delivery.clone(),
            time_to: config.details.latest_delivery.clone(),
        }]);

        // An unset delivery date falls back to today; anything the store
        // resolved, including future dates, passes through verbatim.
        let date = config
            .details
            .delivery_date
            .unwrap_or_else(|| Local::now().date_naive());

        let services = if parts.unit_measure_key.is_empty() {
            None
        } else {
            Some(vec![ShipmentService {
                service_code: parts.unit_measure_key.clone(),
            }])
        };

        let document = GenericShipment {
            kind: config.order_type.clone(),
            depot_number: config.depot_number.clone(),
            customer_number: parse_customer_number(&config.customer_number),
            date: Some(date),
            created_by: String::new(),
            references: vec![Reference {
                kind: "NRORDER".to_string(),
                reference,
            }],
            addresses: vec![address],
            text_messages: remark.map(|message| vec![message]),
            services,
            shipment_units,
            labels: Some(String::new()),
        };

        Ok(AssemblyOutcome::Assembled(Box::new(document), trace))
    }
}

/// An empty or non-numeric customer number stays unset; validation reports
/// it as a missing required field.
fn parse_customer_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChainOutcome, ConfigResolver};
    use chrono::{Duration, NaiveDate};
    use tms_core::store::{ShipmentUnitRow, VisiblePartsRow};
    use tms_shared::order::{OrderHeader, OrderKey, ShipmentDetails};
    use tms_shared::shipment::{Address, Contact, TextMessage};
    use tms_store::memory::MemoryOrderStore;

    fn store_with_chain(delivery_date: Option<NaiveDate>) -> MemoryOrderStore {
        let store = MemoryOrderStore::default();
        store.set_header(OrderHeader {
            key: OrderKey {
                company_code: 1810,
                order_number: 123,
                row_number: 10,
                shipment_id: "T_001".to_string(),
            },
            printer_ip: None,
        });
        store.set_stock_type("stock_01");
        store.set_shipment_details(ShipmentDetails {
            counterpart_id: "123456".to_string(),
            earliest_delivery: Some("08:00".to_string()),
            latest_delivery: Some("16:00".to_string()),
            delivery_date,
            gross_weight: 1.1,
            order_type_code: Some(1),
            guarantee_id: 1,
        });
        store.set_order_type("T");
        store.set_depot_number("1234");
        store.set_customer_number("123456");
        store.set_visible_parts(VisiblePartsRow {
            flag_list: "measures, loading meter, volume".to_string(),
            unit_measure_key: "m".to_string(),
        });
        store.set_extra_text("");
        store.set_contact(Contact::default());
        store.set_delivery_address(Address {
            kind: "1".to_string(),
            name: "2".to_string(),
            address1: "3".to_string(),
            housenumber: "4".to_string(),
            postalcode: "5".to_string(),
            city: "6".to_string(),
            country_code: "7".to_string(),
            ..Default::default()
        });
        store.set_remark(TextMessage {
            kind: "AFLINFO".to_string(),
            remarks: "mocked remarks".to_string(),
        });
        store.set_package_type_code("m");
        store.set_package_type("m");
        store.set_unit_measure(Measurements {
            weight: 1.2,
            ..Default::default()
        });
        store.set_units(vec![ShipmentUnitRow {
            package_number: 7,
            packages: Some(1),
        }]);
        store
    }

    async fn assemble_from(store: &MemoryOrderStore) -> AssemblyOutcome {
        let outcome = ConfigResolver::new(store).resolve("T_001").await.unwrap();
        let ChainOutcome::Resolved(config, trace) = outcome else {
            panic!("chain should resolve");
        };
        FieldAssembler::new(store)
            .assemble(&config, trace)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn assembles_full_document() {
        let date = NaiveDate::from_ymd_opt(2021, 12, 20).unwrap();
        let store = store_with_chain(Some(date));
        let AssemblyOutcome::Assembled(doc, trace) = assemble_from(&store).await else {
            panic!("expected assembled document");
        };

        assert_eq!(doc.kind, "T");
        assert_eq!(doc.depot_number, "1234");
        assert_eq!(doc.customer_number, Some(123456));
        assert_eq!(doc.date, Some(date));
        assert_eq!(doc.references.len(), 1);
        assert_eq!(doc.references[0].kind, "NRORDER");
        assert_eq!(doc.references[0].reference, "123_10");

        let unit = &doc.shipment_units[0];
        assert_eq!(unit.unit_number, 1);
        assert_eq!(unit.unit_type, "m");
        assert_eq!(unit.contains_packages, Some(1));
        assert_eq!(unit.measurements.weight, 1.2);
        assert_eq!(unit.measurements.length, None);
        assert_eq!(unit.references[0].kind, "delivery_note");
        assert_eq!(unit.references[0].reference, "123_10");

        let address = &doc.addresses[0];
        assert!(address.contact.is_some());
        let frames = address.timeframes.as_ref().unwrap();
        assert_eq!(frames[0].time_from.as_deref(), Some("08:00"));
        assert_eq!(frames[0].time_to.as_deref(), Some("16:00"));

        let services = doc.services.as_ref().unwrap();
        assert_eq!(services[0].service_code, "m");
        assert_eq!(
            doc.text_messages.as_ref().unwrap()[0].remarks,
            "mocked remarks"
        );

        assert_eq!(trace.measures, "1");
        assert_eq!(trace.loading_meter, "1");
        assert_eq!(trace.volume, "1");
        assert_eq!(trace.service_code, "m");
        assert!(!trace.error);
    }

    #[tokio::test]
    async fn empty_delivery_date_defaults_to_today() {
        let store = store_with_chain(None);
        let AssemblyOutcome::Assembled(doc, _) = assemble_from(&store).await else {
            panic!("expected assembled document");
        };
        assert_eq!(doc.date, Some(Local::now().date_naive()));
    }

    #[tokio::test]
    async fn future_delivery_date_is_preserved_verbatim() {
        let future = Local::now().date_naive() + Duration::days(3);
        let store = store_with_chain(Some(future));
        let AssemblyOutcome::Assembled(doc, _) = assemble_from(&store).await else {
            panic!("expected assembled document");
        };
        assert_eq!(doc.date, Some(future));
    }

    #[tokio::test]
    async fn empty_unit_measure_key_skips_package_lookups() {
        let store = store_with_chain(None);
        store.set_visible_parts(VisiblePartsRow {
            flag_list: "measures".to_string(),
            unit_measure_key: String::new(),
        });
        let AssemblyOutcome::Assembled(doc, trace) = assemble_from(&store).await else {
            panic!("expected assembled document");
        };
        let unit = &doc.shipment_units[0];
        assert_eq!(unit.unit_type, "EP");
        assert_eq!(unit.measurements.weight, 1.1);
        assert!(doc.services.is_none());
        assert_eq!(trace.measures, "1");
        assert_eq!(trace.volume, "");
        assert_eq!(trace.service_code, "");

        let calls = store.calls();
        assert!(!calls.contains(&"fetch_package_type_code"));
        assert!(!calls.contains(&"fetch_package_type"));
        assert!(!calls.contains(&"fetch_unit_measure"));
    }

    #[tokio::test]
    async fn missing_package_type_code_fails_with_flags_in_trace() {
        let store = store_with_chain(None);
        store.clear_package_type_code();
        let AssemblyOutcome::Failed(trace) = assemble_from(&store).await else {
            panic!("expected failed assembly");
        };
        assert_eq!(trace.error_description, "Package type code is empty");
        assert_eq!(trace.measures, "1");
        assert_eq!(trace.loading_meter, "1");
        assert_eq!(trace.volume, "1");
        assert_eq!(trace.depot_number.as_deref(), Some("1234"));
    }

    #[tokio::test]
    async fn missing_package_type_is_tagged() {
        let store = store_with_chain(None);
        store.clear_package_type();
        let AssemblyOutcome::Failed(trace) = assemble_from(&store).await else {
            panic!("expected failed assembly");
        };
        assert_eq!(
            trace.error_description,
            "Missing configuration - Package type"
        );
    }

    #[tokio::test]
    async fn missing_unit_measure_is_tagged() {
        let store = store_with_chain(None);
        store.clear_unit_measure();
        let AssemblyOutcome::Failed(trace) = assemble_from(&store).await else {
            panic!("expected failed assembly");
        };
        assert_eq!(
            trace.error_description,
            "Missing configuration - Unit measure"
        );
    }

    #[tokio::test]
    async fn missing_delivery_address_is_tagged() {
        let store = store_with_chain(None);
        store.clear_delivery_address();
        let AssemblyOutcome::Failed(trace) = assemble_from(&store).await else {
            panic!("expected failed assembly");
        };
        assert_eq!(
            trace.error_description,
            "Cannot fetch delivery address for order 123 from the order store"
        );
    }

    #[tokio::test]
    async fn one_unit_entry_per_row() {
        let store = store_with_chain(None);
        store.set_units(vec![
            ShipmentUnitRow {
                package_number: 1,
                packages: Some(2),
            },
            ShipmentUnitRow {
                package_number: 2,
                packages: None,
            },
        ]);
        let AssemblyOutcome::Assembled(doc, _) = assemble_from(&store).await else {
            panic!("expected assembled document");
        };
        assert_eq!(doc.shipment_units.len(), 2);
        assert_eq!(doc.shipment_units[0].unit_number, 1);
        assert_eq!(doc.shipment_units[1].unit_number, 2);
        assert_eq!(doc.shipment_units[1].contains_packages, None);
    }

    #[test]
    fn customer_number_parsing() {
        assert_eq!(parse_customer_number("123456"), Some(123456));
        assert_eq!(parse_customer_number(""), None);
        assert_eq!(parse_customer_number("  "), None);
        assert_eq!(parse_customer_number("abc"), None);
    }
}
