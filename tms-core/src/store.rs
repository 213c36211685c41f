use async_trait::async_trait;

use tms_shared::order::{CompanyInfo, DeliveryInfo, OrderHeader, OrderKey, Package, ShipmentDetails};
use tms_shared::shipment::{Address, Contact, Measurements, TextMessage};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("order store connection failed: {0}")]
    Connection(String),

    #[error("order store query failed: {0}")]
    Query(String),
}

/// Raw "visible parts" configuration row: which derived numeric fields to
/// compute for an order type, plus the key for the package-level unit
/// lookup (empty means no unit lookup).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisiblePartsRow {
    pub flag_list: String,
    pub unit_measure_key: String,
}

/// One shipment unit row with its package count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentUnitRow {
    pub package_number: i64,
    pub packages: Option<i64>,
}

/// Read-only gateway to the warehouse order store.
///
/// Every lookup resolves to `Ok(None)` (or an empty vec) when there is no
/// matching row; `Err` is reserved for store-level failures such as a lost
/// connection. The pipeline never writes through this trait.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn fetch_order_header(&self, shipment_id: &str)
        -> Result<Option<OrderHeader>, StoreError>;

    async fn fetch_carrier_name(&self, key: &OrderKey) -> Result<Option<String>, StoreError>;

    async fn fetch_stock_type(&self, company_code: i32) -> Result<Option<String>, StoreError>;

    async fn fetch_shipment_details(
        &self,
        key: &OrderKey,
    ) -> Result<Option<ShipmentDetails>, StoreError>;

    async fn fetch_order_type(
        &self,
        company_code: i32,
        order_type_code: i32,
    ) -> Result<Option<String>, StoreError>;

    async fn fetch_depot_number(&self, company_code: i32) -> Result<Option<String>, StoreError>;

    async fn fetch_customer_number(&self, company_code: i32)
        -> Result<Option<String>, StoreError>;

    async fn fetch_visible_parts(
        &self,
        company_code: i32,
        order_type_code: i32,
    ) -> Result<Option<VisiblePartsRow>, StoreError>;

    async fn fetch_extra_text(
        &self,
        company_code: i32,
        order_type_code: i32,
    ) -> Result<Option<String>, StoreError>;

    async fn fetch_contact(&self, key: &OrderKey) -> Result<Option<Contact>, StoreError>;

    async fn fetch_delivery_address(&self, key: &OrderKey) -> Result<Option<Address>, StoreError>;

    async fn fetch_remark(&self, key: &OrderKey) -> Result<Option<TextMessage>, StoreError>;

    /// Package-type code stamped on the order's package rows.
    async fn fetch_package_type_code(&self, key: &OrderKey)
        -> Result<Option<String>, StoreError>;

    async fn fetch_package_type(
        &self,
        company_code: i32,
        package_type_code: &str,
    ) -> Result<Option<String>, StoreError>;

    async fn fetch_unit_measure(
        &self,
        company_code: i32,
        unit_measure_key: &str,
    ) -> Result<Option<Measurements>, StoreError>;

    async fn fetch_shipment_units(
        &self,
        key: &OrderKey,
    ) -> Result<Vec<ShipmentUnitRow>, StoreError>;

    async fn fetch_company_id(&self, key: &OrderKey) -> Result<Option<String>, StoreError>;

    async fn fetch_company_info(
        &self,
        company_code: i32,
        company_id: &str,
    ) -> Result<Option<CompanyInfo>, StoreError>;

    async fn fetch_delivery_info(&self, key: &OrderKey)
        -> Result<Option<DeliveryInfo>, StoreError>;

    async fn fetch_packages(&self, key: &OrderKey) -> Result<Vec<Package>, StoreError>;
}
