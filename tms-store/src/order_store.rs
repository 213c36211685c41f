use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use tms_core::store::{OrderStore, ShipmentUnitRow, StoreError, VisiblePartsRow};
use tms_shared::order::{CompanyInfo, DeliveryInfo, OrderHeader, OrderKey, Package, ShipmentDetails};
use tms_shared::shipment::{Address, Contact, Measurements, TextMessage};

// Dictionary groups of the per-company configuration table.
const GROUP_VISIBLE_PARTS: i32 = 1;
const GROUP_PACKAGE_TYPES: i32 = 2;
const GROUP_ORDER_TYPES: i32 = 3;
const GROUP_NUMBERS: i32 = 4;
const GROUP_STOCK_TYPES: i32 = 6;
// All carrier-integration entries hang off this dictionary object.
const OBJECT_CARRIER_EXPORT: i32 = 41;

/// Postgres-backed order-store gateway.
///
/// Strictly read-only: every method is a single lookup that resolves to
/// `None`/empty on no match. Store-level failures surface as `StoreError`.
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_config_value(
        &self,
        group_id: i32,
        company_code: i32,
        filter: Option<&str>,
        column: &str,
    ) -> Result<Option<String>, StoreError> {
        let sql = format!(
            "SELECT {column} AS value FROM config_entries \
             WHERE group_id = $1 AND object_id = $2 AND company_code = $3 \
               AND is_prod AND is_active AND ($4::text IS NULL OR filter = $4)"
        );
        let row = sqlx::query(&sql)
            .bind(group_id)
            .bind(OBJECT_CARRIER_EXPORT)
            .bind(company_code)
            .bind(filter)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err)?;
        row.map(|r| r.try_get::<Option<String>, _>("value"))
            .transpose()
            .map_err(query_err)
            .map(Option::flatten)
    }
}

fn query_err(err: sqlx::Error) -> StoreError {
    StoreError::Query(err.to_string())
}

fn order_key_binds<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    key: &OrderKey,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(key.company_code)
        .bind(key.order_number)
        .bind(key.row_number)
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn fetch_order_header(
        &self,
        shipment_id: &str,
    ) -> Result<Option<OrderHeader>, StoreError> {
        let row = sqlx::query(
            "SELECT shipment_id, company_code, order_number, row_number, printer_ip \
             FROM shipment_exports WHERE shipment_id = $1",
        )
        .bind(shipment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_err)?;

        row.map(|r: PgRow| -> Result<OrderHeader, StoreError> {
            Ok(OrderHeader {
                key: OrderKey {
                    company_code: r.try_get("company_code").map_err(query_err)?,
                    order_number: r.try_get("order_number").map_err(query_err)?,
                    row_number: r.try_get("row_number").map_err(query_err)?,
                    shipment_id: r.try_get("shipment_id").map_err(query_err)?,
                },
                printer_ip: r.try_get("printer_ip").map_err(query_err)?,
            })
        })
        .transpose()
    }

    async fn fetch_carrier_name(&self, key: &OrderKey) -> Result<Option<String>, StoreError> {
        let query = sqlx::query(
            "SELECT c.carrier_name FROM order_rows o \
             JOIN carriers c ON o.company_code = c.company_code AND o.carrier_code = c.carrier_code \
             WHERE o.company_code = $1 AND o.order_number = $2 AND o.row_number = $3",
        );
        let row = order_key_binds(query, key)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err)?;
        row.map(|r| r.try_get("carrier_name")).transpose().map_err(query_err)
    }

    async fn fetch_stock_type(&self, company_code: i32) -> Result<Option<String>, StoreError> {
        self.fetch_config_value(GROUP_STOCK_TYPES, company_code, None, "text_value")
            .await
    }

    async fn fetch_shipment_details(
        &self,
        key: &OrderKey,
    ) -> Result<Option<ShipmentDetails>, StoreError> {
        let query = sqlx::query(
            "SELECT COALESCE(o.delivery_place, o.customer_id, '') AS counterpart_id, \
                    to_char(o.earliest_delivery, 'HH24:MI') AS earliest_delivery, \
                    to_char(o.latest_delivery, 'HH24:MI') AS latest_delivery, \
                    o.delivery_date, o.gross_weight, o.order_type_code, \
                    COALESCE(o.guarantee_id, 0) AS guarantee_id \
             FROM order_rows o \
             WHERE o.company_code = $1 AND o.order_number = $2 AND o.row_number = $3",
        );
        let row = order_key_binds(query, key)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err)?;

        row.map(|r: PgRow| -> Result<ShipmentDetails, StoreError> {
            Ok(ShipmentDetails {
                counterpart_id: r.try_get("counterpart_id").map_err(query_err)?,
                earliest_delivery: r.try_get("earliest_delivery").map_err(query_err)?,
                latest_delivery: r.try_get("latest_delivery").map_err(query_err)?,
                delivery_date: r.try_get("delivery_date").map_err(query_err)?,
                gross_weight: r.try_get("gross_weight").map_err(query_err)?,
                order_type_code: r.try_get("order_type_code").map_err(query_err)?,
                guarantee_id: r.try_get("guarantee_id").map_err(query_err)?,
            })
        })
        .transpose()
    }

    async fn fetch_order_type(
        &self,
        company_code: i32,
        order_type_code: i32,
    ) -> Result<Option<String>, StoreError> {
        self.fetch_config_value(
            GROUP_ORDER_TYPES,
            company_code,
            Some(&order_type_code.to_string()),
            "text_value",
        )
        .await
    }

    async fn fetch_depot_number(&self, company_code: i32) -> Result<Option<String>, StoreError> {
        self.fetch_config_value(GROUP_NUMBERS, company_code, Some("depot_number"), "text_value")
            .await
    }

    async fn fetch_customer_number(
        &self,
        company_code: i32,
    ) -> Result<Option<String>, StoreError> {
        self.fetch_config_value(
            GROUP_NUMBERS,
            company_code,
            Some("customer_number"),
            "text_value",
        )
        .await
    }

    async fn fetch_visible_parts(
        &self,
        company_code: i32,
        order_type_code: i32,
    ) -> Result<Option<VisiblePartsRow>, StoreError> {
        let row = sqlx::query(
            "SELECT flag_list, COALESCE(text_value, '') AS unit_measure_key \
             FROM config_entries \
             WHERE group_id = $1 AND object_id = $2 AND company_code = $3 \
               AND is_prod AND is_active AND filter = $4",
        )
        .bind(GROUP_VISIBLE_PARTS)
        .bind(OBJECT_CARRIER_EXPORT)
        .bind(company_code)
        .bind(order_type_code.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_err)?;

        row.map(|r: PgRow| -> Result<VisiblePartsRow, StoreError> {
            Ok(VisiblePartsRow {
                flag_list: r
                    .try_get::<Option<String>, _>("flag_list")
                    .map_err(query_err)?
                    .unwrap_or_default(),
                unit_measure_key: r.try_get("unit_measure_key").map_err(query_err)?,
            })
        })
        .transpose()
    }

    async fn fetch_extra_text(
        &self,
        company_code: i32,
        order_type_code: i32,
    ) -> Result<Option<String>, StoreError> {
        self.fetch_config_value(
            GROUP_VISIBLE_PARTS,
            company_code,
            Some(&order_type_code.to_string()),
            "extra_text",
        )
        .await
    }

    async fn fetch_contact(&self, key: &OrderKey) -> Result<Option<Contact>, StoreError> {
        let query = sqlx::query(
            "SELECT contact_name AS name, contact_phone AS phonenumber, \
                    contact_email AS email_address, contact_language AS language \
             FROM order_contacts \
             WHERE company_code = $1 AND order_number = $2 AND row_number = $3",
        );
        let row = order_key_binds(query, key)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err)?;

        row.map(|r: PgRow| -> Result<Contact, StoreError> {
            Ok(Contact {
                name: r.try_get("name").map_err(query_err)?,
                phonenumber: r.try_get("phonenumber").map_err(query_err)?,
                email_address: r.try_get("email_address").map_err(query_err)?,
                language: r.try_get("language").map_err(query_err)?,
            })
        })
        .transpose()
    }

    async fn fetch_delivery_address(
        &self,
        key: &OrderKey,
    ) -> Result<Option<Address>, StoreError> {
        let query = sqlx::query(
            "SELECT address_type, name, name2, address1, housenumber, postalcode, city, country_code \
             FROM delivery_addresses \
             WHERE company_code = $1 AND order_number = $2 AND row_number = $3",
        );
        let row = order_key_binds(query, key)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err)?;

        row.map(|r: PgRow| -> Result<Address, StoreError> {
            Ok(Address {
                kind: r.try_get("address_type").map_err(query_err)?,
                name: r.try_get("name").map_err(query_err)?,
                name2: r.try_get("name2").map_err(query_err)?,
                address1: r.try_get("address1").map_err(query_err)?,
                housenumber: r.try_get("housenumber").map_err(query_err)?,
                postalcode: r.try_get("postalcode").map_err(query_err)?,
                city: r.try_get("city").map_err(query_err)?,
                country_code: r.try_get("country_code").map_err(query_err)?,
                contact: None,
                date: None,
                timeframes: None,
            })
        })
        .transpose()
    }

    async fn fetch_remark(&self, key: &OrderKey) -> Result<Option<TextMessage>, StoreError> {
        let query = sqlx::query(
            "SELECT message_type, remarks FROM order_remarks \
             WHERE company_code = $1 AND order_number = $2 AND row_number = $3",
        );
        let row = order_key_binds(query, key)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err)?;

        row.map(|r: PgRow| -> Result<TextMessage, StoreError> {
            Ok(TextMessage {
                kind: r.try_get("message_type").map_err(query_err)?,
                remarks: r.try_get("remarks").map_err(query_err)?,
            })
        })
        .transpose()
    }

    async fn fetch_package_type_code(
        &self,
        key: &OrderKey,
    ) -> Result<Option<String>, StoreError> {
        let query = sqlx::query(
            "SELECT p.package_type_code FROM order_packages p \
             WHERE p.company_code = $1 AND p.order_number = $2 AND p.row_number = $3 \
             LIMIT 1",
        );
        let row = order_key_binds(query, key)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err)?;
        row.map(|r| r.try_get::<Option<String>, _>("package_type_code"))
            .transpose()
            .map_err(query_err)
            .map(Option::flatten)
    }

    async fn fetch_package_type(
        &self,
        company_code: i32,
        package_type_code: &str,
    ) -> Result<Option<String>, StoreError> {
        self.fetch_config_value(
            GROUP_PACKAGE_TYPES,
            company_code,
            Some(package_type_code),
            "text_value",
        )
        .await
    }

    async fn fetch_unit_measure(
        &self,
        company_code: i32,
        unit_measure_key: &str,
    ) -> Result<Option<Measurements>, StoreError> {
        let row = sqlx::query(
            "SELECT weight, length, width, height, loadingmeter, volume \
             FROM unit_measures WHERE company_code = $1 AND measure_key = $2",
        )
        .bind(company_code)
        .bind(unit_measure_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_err)?;

        row.map(|r: PgRow| -> Result<Measurements, StoreError> {
            // Weight is stored as text in the source system.
            let raw_weight: String = r.try_get("weight").map_err(query_err)?;
            let weight = raw_weight.trim().parse::<f64>().map_err(|err| {
                StoreError::Query(format!("unit measure weight '{raw_weight}': {err}"))
            })?;
            Ok(Measurements {
                weight,
                length: r.try_get("length").map_err(query_err)?,
                width: r.try_get("width").map_err(query_err)?,
                height: r.try_get("height").map_err(query_err)?,
                loadingmeter: r.try_get("loadingmeter").map_err(query_err)?,
                volume: r.try_get("volume").map_err(query_err)?,
            })
        })
        .transpose()
    }

    async fn fetch_shipment_units(
        &self,
        key: &OrderKey,
    ) -> Result<Vec<ShipmentUnitRow>, StoreError> {
        let query = sqlx::query(
            "SELECT package_number, package_count FROM shipment_units \
             WHERE company_code = $1 AND order_number = $2 AND row_number = $3 \
             ORDER BY package_number",
        );
        let rows = order_key_binds(query, key)
            .fetch_all(&self.pool)
            .await
            .map_err(query_err)?;

        rows.into_iter()
            .map(|r| -> Result<ShipmentUnitRow, StoreError> {
                Ok(ShipmentUnitRow {
                    package_number: r.try_get("package_number").map_err(query_err)?,
                    packages: r.try_get("package_count").map_err(query_err)?,
                })
            })
            .collect()
    }

    async fn fetch_company_id(&self, key: &OrderKey) -> Result<Option<String>, StoreError> {
        let query = sqlx::query(
            "SELECT COALESCE(o.delivery_place, o.customer_id, '') AS company_id \
             FROM order_rows o \
             WHERE o.company_code = $1 AND o.order_number = $2 AND o.row_number = $3",
        );
        let row = order_key_binds(query, key)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err)?;
        row.map(|r| r.try_get("company_id")).transpose().map_err(query_err)
    }

    async fn fetch_company_info(
        &self,
        company_code: i32,
        company_id: &str,
    ) -> Result<Option<CompanyInfo>, StoreError> {
        let row = sqlx::query(
            "SELECT name, address_line, country_code, postal_code, city, street \
             FROM companies WHERE company_code = $1 AND company_id = $2",
        )
        .bind(company_code)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_err)?;

        row.map(|r: PgRow| -> Result<CompanyInfo, StoreError> {
            Ok(CompanyInfo {
                name: r.try_get("name").map_err(query_err)?,
                address_line: r.try_get("address_line").map_err(query_err)?,
                country_code: r.try_get("country_code").map_err(query_err)?,
                postal_code: r.try_get("postal_code").map_err(query_err)?,
                city: r.try_get("city").map_err(query_err)?,
                street: r.try_get("street").map_err(query_err)?,
            })
        })
        .transpose()
    }

    async fn fetch_delivery_info(
        &self,
        key: &OrderKey,
    ) -> Result<Option<DeliveryInfo>, StoreError> {
        let query = sqlx::query(
            "SELECT o.contact_person, o.contact_details, h.notify_email, \
                    o.guarantee_id, COALESCE(o.return_document, false) AS return_document, \
                    o.goods_marking \
             FROM order_rows o \
             JOIN order_headers h ON o.company_code = h.company_code AND o.order_number = h.order_number \
             WHERE o.company_code = $1 AND o.order_number = $2 AND o.row_number = $3",
        );
        let row = order_key_binds(query, key)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err)?;

        row.map(|r: PgRow| -> Result<DeliveryInfo, StoreError> {
            Ok(DeliveryInfo {
                contact_person: r.try_get("contact_person").map_err(query_err)?,
                contact_details: r.try_get("contact_details").map_err(query_err)?,
                notify_email: r.try_get("notify_email").map_err(query_err)?,
                guarantee_id: r.try_get("guarantee_id").map_err(query_err)?,
                return_document: r.try_get("return_document").map_err(query_err)?,
                goods_marking: r.try_get("goods_marking").map_err(query_err)?,
            })
        })
        .transpose()
    }

    async fn fetch_packages(&self, key: &OrderKey) -> Result<Vec<Package>, StoreError> {
        let query = sqlx::query(
            "SELECT p.package_number, p.gross_weight FROM order_packages p \
             WHERE p.company_code = $1 AND p.order_number = $2 AND p.row_number = $3 \
             ORDER BY p.package_number",
        );
        let rows = order_key_binds(query, key)
            .fetch_all(&self.pool)
            .await
            .map_err(query_err)?;

        rows.into_iter()
            .map(|r| -> Result<Package, StoreError> {
                Ok(Package {
                    package_number: r.try_get("package_number").map_err(query_err)?,
                    gross_weight: r.try_get("gross_weight").map_err(query_err)?,
                })
            })
            .collect()
    }
}
