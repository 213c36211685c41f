use tms_shared::shipment::GenericShipment;
use tms_shared::violation::{check_int_le, check_str_max, FieldViolation};

const MAX_TYPE: u64 = 1;
const MAX_DEPOT: u64 = 4;
const MAX_CUSTOMER_NUMBER: u64 = 999_999;
const MAX_CREATED_BY: u64 = 30;
const MAX_REFERENCE_TYPE: u64 = 18;
const MAX_REFERENCE: u64 = 30;
const MAX_ADDRESS_TYPE: u64 = 16;
const MAX_NAME: u64 = 60;
const MAX_HOUSENUMBER: u64 = 10;
const MAX_POSTALCODE: u64 = 10;
const MAX_COUNTRY: u64 = 2;
const MAX_PHONE: u64 = 15;
const MAX_EMAIL: u64 = 180;
const MAX_LANGUAGE: u64 = 2;
const MAX_TIME: u64 = 5;
const MAX_MESSAGE_TYPE: u64 = 16;
const MAX_REMARKS: u64 = 180;
const MAX_SERVICE_CODE: u64 = 10;
const MAX_UNIT_NUMBER: u64 = 999;
const MAX_BARCODE: u64 = 60;
const MAX_DESCRIPTION: u64 = 120;
const MAX_CONTAINS: u64 = 9_999_999_999;
const MAX_DIMENSION: u64 = 99_999;

fn loc(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

fn item_loc(list: &str, index: usize, parts: &[&str]) -> Vec<String> {
    let mut out = vec![list.to_string(), index.to_string()];
    out.extend(parts.iter().map(|p| p.to_string()));
    out
}

/// Check the assembled document against the generic carrier's field
/// constraints. Returns one violation per offending field.
pub fn validate(doc: &GenericShipment) -> Vec<FieldViolation> {
    let mut out = Vec::new();

    check_str_max(&mut out, loc(&["type"]), Some(&doc.kind), MAX_TYPE);
    check_str_max(
        &mut out,
        loc(&["depot_number"]),
        Some(&doc.depot_number),
        MAX_DEPOT,
    );
    match doc.customer_number {
        None => out.push(FieldViolation::missing(loc(&["customer_number"]))),
        Some(number) => check_int_le(
            &mut out,
            loc(&["customer_number"]),
            Some(number),
            MAX_CUSTOMER_NUMBER,
        ),
    }
    check_str_max(
        &mut out,
        loc(&["created_by"]),
        Some(&doc.created_by),
        MAX_CREATED_BY,
    );

    for (i, reference) in doc.references.iter().enumerate() {
        check_str_max(
            &mut out,
            item_loc("references", i, &["type"]),
            Some(&reference.kind),
            MAX_REFERENCE_TYPE,
        );
        check_str_max(
            &mut out,
            item_loc("references", i, &["reference"]),
            Some(&reference.reference),
            MAX_REFERENCE,
        );
    }

    for (i, address) in doc.addresses.iter().enumerate() {
        check_str_max(
            &mut out,
            item_loc("addresses", i, &["type"]),
            Some(&address.kind),
            MAX_ADDRESS_TYPE,
        );
        check_str_max(
            &mut out,
            item_loc("addresses", i, &["name"]),
            Some(&address.name),
            MAX_NAME,
        );
        check_str_max(
            &mut out,
            item_loc("addresses", i, &["name2"]),
            address.name2.as_deref(),
            MAX_NAME,
        );
        check_str_max(
            &mut out,
            item_loc("addresses", i, &["address1"]),
            Some(&address.address1),
            MAX_NAME,
        );
        check_str_max(
            &mut out,
            item_loc("addresses", i, &["housenumber"]),
            Some(&address.housenumber),
            MAX_HOUSENUMBER,
        );
        check_str_max(
            &mut out,
            item_loc("addresses", i, &["postalcode"]),
            Some(&address.postalcode),
            MAX_POSTALCODE,
        );
        check_str_max(
            &mut out,
            item_loc("addresses", i, &["city"]),
            Some(&address.city),
            MAX_NAME,
        );
        check_str_max(
            &mut out,
            item_loc("addresses", i, &["country_code"]),
            Some(&address.country_code),
            MAX_COUNTRY,
        );
        if let Some(contact) = &address.contact {
            check_str_max(
                &mut out,
                item_loc("addresses", i, &["contact", "name"]),
                contact.name.as_deref(),
                MAX_NAME,
            );
            check_str_max(
                &mut out,
                item_loc("addresses", i, &["contact", "phonenumber"]),
                contact.phonenumber.as_deref(),
                MAX_PHONE,
            );
            check_str_max(
                &mut out,
                item_loc("addresses", i, &["contact", "email_address"]),
                contact.email_address.as_deref(),
                MAX_EMAIL,
            );
            check_str_max(
                &mut out,
                item_loc("addresses", i, &["contact", "language"]),
                contact.language.as_deref(),
                MAX_LANGUAGE,
            );
        }
        for frames in address.timeframes.iter() {
            for (j, frame) in frames.iter().enumerate() {
                check_str_max(
                    &mut out,
                    item_loc("addresses", i, &["timeframes", &j.to_string(), "time_from"]),
                    frame.time_from.as_deref(),
                    MAX_TIME,
                );
                check_str_max(
                    &mut out,
                    item_loc("addresses", i, &["timeframes", &j.to_string(), "time_to"]),
                    frame.time_to.as_deref(),
                    MAX_TIME,
                );
            }
        }
    }

    for messages in doc.text_messages.iter() {
        for (i, message) in messages.iter().enumerate() {
            check_str_max(
                &mut out,
                item_loc("text_messages", i, &["type"]),
                Some(&message.kind),
                MAX_MESSAGE_TYPE,
            );
            check_str_max(
                &mut out,
                item_loc("text_messages", i, &["remarks"]),
                Some(&message.remarks),
                MAX_REMARKS,
            );
        }
    }

    for services in doc.services.iter() {
        for (i, service) in services.iter().enumerate() {
            check_str_max(
                &mut out,
                item_loc("Shipment_services", i, &["service_code"]),
                Some(&service.service_code),
                MAX_SERVICE_CODE,
            );
        }
    }

    for (i, unit) in doc.shipment_units.iter().enumerate() {
        check_int_le(
            &mut out,
            item_loc("shipment_units", i, &["unit_number"]),
            Some(unit.unit_number),
            MAX_UNIT_NUMBER,
        );
        check_str_max(
            &mut out,
            item_loc("shipment_units", i, &["barcode"]),
            unit.barcode.as_deref(),
            MAX_BARCODE,
        );
        check_str_max(
            &mut out,
            item_loc("shipment_units", i, &["description"]),
            unit.description.as_deref(),
            MAX_DESCRIPTION,
        );
        check_int_le(
            &mut out,
            item_loc("shipment_units", i, &["contains_packages"]),
            unit.contains_packages,
            MAX_CONTAINS,
        );
        let m = &unit.measurements;
        check_int_le(
            &mut out,
            item_loc("shipment_units", i, &["measurements", "length"]),
            m.length,
            MAX_DIMENSION,
        );
        check_int_le(
            &mut out,
            item_loc("shipment_units", i, &["measurements", "width"]),
            m.width,
            MAX_DIMENSION,
        );
        check_int_le(
            &mut out,
            item_loc("shipment_units", i, &["measurements", "height"]),
            m.height,
            MAX_DIMENSION,
        );
        for (j, reference) in unit.references.iter().enumerate() {
            check_str_max(
                &mut out,
                item_loc("shipment_units", i, &["references", &j.to_string(), "type"]),
                Some(&reference.kind),
                MAX_REFERENCE_TYPE,
            );
            check_str_max(
                &mut out,
                item_loc(
                    "shipment_units",
                    i,
                    &["references", &j.to_string(), "reference"],
                ),
                Some(&reference.reference),
                MAX_REFERENCE,
            );
        }
    }

    out
}

/// Run validation and hand the document back untouched when it is clean.
pub fn validate_document(doc: GenericShipment) -> Result<GenericShipment, Vec<FieldViolation>> {
    let violations = validate(&doc);
    if violations.is_empty() {
        Ok(doc)
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tms_shared::shipment::{Address, Measurements, Reference, ShipmentUnit};

    fn minimal_doc() -> GenericShipment {
        GenericShipment {
            kind: "T".to_string(),
            depot_number: "1234".to_string(),
            customer_number: Some(9999),
            created_by: String::new(),
            references: vec![Reference {
                kind: "NRORDER".to_string(),
                reference: "123_10".to_string(),
            }],
            addresses: vec![Address {
                kind: "1".to_string(),
                name: "name".to_string(),
                address1: "street".to_string(),
                housenumber: "1".to_string(),
                postalcode: "12345".to_string(),
                city: "city".to_string(),
                country_code: "PL".to_string(),
                ..Default::default()
            }],
            shipment_units: vec![ShipmentUnit {
                unit_number: 1,
                barcode: None,
                description: None,
                contains_packages: Some(1),
                unit_type: "EP".to_string(),
                measurements: Measurements {
                    weight: 1.12,
                    ..Default::default()
                },
                references: vec![],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn clean_document_passes() {
        assert!(validate(&minimal_doc()).is_empty());
        assert!(validate_document(minimal_doc()).is_ok());
    }

    #[test]
    fn overlong_depot_number_is_reported_with_limit() {
        let mut doc = minimal_doc();
        doc.depot_number = "12345".to_string();
        let violations = validate(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].loc, vec!["depot_number"]);
        assert_eq!(violations[0].ctx.as_ref().unwrap().limit_value, 4);
    }

    #[test]
    fn missing_customer_number_is_required() {
        let mut doc = minimal_doc();
        doc.customer_number = None;
        let violations = validate(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, "value_error.missing");
        assert_eq!(violations[0].loc, vec!["customer_number"]);
    }

    #[test]
    fn customer_number_above_bound_is_reported() {
        let mut doc = minimal_doc();
        doc.customer_number = Some(1_000_000);
        let violations = validate(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, "value_error.number.not_le");
        assert_eq!(violations[0].ctx.as_ref().unwrap().limit_value, 999_999);
    }

    #[test]
    fn nested_address_field_is_addressed_by_path() {
        let mut doc = minimal_doc();
        doc.addresses[0].country_code = "POLAND".to_string();
        let violations = validate(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].loc,
            vec!["addresses", "0", "country_code"]
        );
        assert_eq!(violations[0].ctx.as_ref().unwrap().limit_value, 2);
    }

    #[test]
    fn oversized_dimension_is_reported() {
        let mut doc = minimal_doc();
        doc.shipment_units[0].measurements.length = Some(100_000);
        let violations = validate(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].loc,
            vec!["shipment_units", "0", "measurements", "length"]
        );
    }

    #[test]
    fn multiple_violations_are_collected_individually() {
        let mut doc = minimal_doc();
        doc.kind = "TX".to_string();
        doc.depot_number = "12345".to_string();
        doc.customer_number = None;
        let violations = validate(&doc);
        assert_eq!(violations.len(), 3);
    }
}
