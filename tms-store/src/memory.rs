use std::sync::Mutex;

use async_trait::async_trait;

use tms_core::store::{OrderStore, ShipmentUnitRow, StoreError, VisiblePartsRow};
use tms_shared::order::{CompanyInfo, DeliveryInfo, OrderHeader, OrderKey, Package, ShipmentDetails};
use tms_shared::shipment::{Address, Contact, Measurements, TextMessage};

#[derive(Default)]
struct State {
    header: Option<OrderHeader>,
    carrier_name: Option<String>,
    stock_type: Option<String>,
    shipment_details: Option<ShipmentDetails>,
    order_type: Option<String>,
    depot_number: Option<String>,
    customer_number: Option<String>,
    visible_parts: Option<VisiblePartsRow>,
    extra_text: Option<String>,
    contact: Option<Contact>,
    delivery_address: Option<Address>,
    remark: Option<TextMessage>,
    package_type_code: Option<String>,
    package_type: Option<String>,
    unit_measure: Option<Measurements>,
    units: Vec<ShipmentUnitRow>,
    company_id: Option<String>,
    company_info: Option<CompanyInfo>,
    delivery_info: Option<DeliveryInfo>,
    packages: Vec<Package>,
    calls: Vec<&'static str>,
}

/// In-memory order store used as a test fixture and for local runs without
/// a database. Every lookup the pipeline performs is recorded in `calls`,
/// so tests can assert which lookups were (not) made.
#[derive(Default)]
pub struct MemoryOrderStore {
    state: Mutex<State>,
}

impl MemoryOrderStore {
    pub fn set_header(&self, header: OrderHeader) {
        self.state.lock().unwrap().header = Some(header);
    }

    pub fn set_carrier_name(&self, name: impl Into<String>) {
        self.state.lock().unwrap().carrier_name = Some(name.into());
    }

    pub fn set_stock_type(&self, value: impl Into<String>) {
        self.state.lock().unwrap().stock_type = Some(value.into());
    }

    pub fn set_shipment_details(&self, details: ShipmentDetails) {
        self.state.lock().unwrap().shipment_details = Some(details);
    }

    pub fn set_order_type(&self, value: impl Into<String>) {
        self.state.lock().unwrap().order_type = Some(value.into());
    }

    pub fn clear_order_type(&self) {
        self.state.lock().unwrap().order_type = None;
    }

    pub fn set_depot_number(&self, value: impl Into<String>) {
        self.state.lock().unwrap().depot_number = Some(value.into());
    }

    pub fn clear_depot_number(&self) {
        self.state.lock().unwrap().depot_number = None;
    }

    pub fn set_customer_number(&self, value: impl Into<String>) {
        self.state.lock().unwrap().customer_number = Some(value.into());
    }

    pub fn clear_customer_number(&self) {
        self.state.lock().unwrap().customer_number = None;
    }

    pub fn set_visible_parts(&self, row: VisiblePartsRow) {
        self.state.lock().unwrap().visible_parts = Some(row);
    }

    pub fn clear_visible_parts(&self) {
        self.state.lock().unwrap().visible_parts = None;
    }

    pub fn set_extra_text(&self, value: impl Into<String>) {
        self.state.lock().unwrap().extra_text = Some(value.into());
    }

    pub fn set_contact(&self, contact: Contact) {
        self.state.lock().unwrap().contact = Some(contact);
    }

    pub fn set_delivery_address(&self, address: Address) {
        self.state.lock().unwrap().delivery_address = Some(address);
    }

    pub fn clear_delivery_address(&self) {
        self.state.lock().unwrap().delivery_address = None;
    }

    pub fn set_remark(&self, remark: TextMessage) {
        self.state.lock().unwrap().remark = Some(remark);
    }

    pub fn set_package_type_code(&self, value: impl Into<String>) {
        self.state.lock().unwrap().package_type_code = Some(value.into());
    }

    pub fn clear_package_type_code(&self) {
        self.state.lock().unwrap().package_type_code = None;
    }

    pub fn set_package_type(&self, value: impl Into<String>) {
        self.state.lock().unwrap().package_type = Some(value.into());
    }

    pub fn clear_package_type(&self) {
        self.state.lock().unwrap().package_type = None;
    }

    pub fn set_unit_measure(&self, measurements: Measurements) {
        self.state.lock().unwrap().unit_measure = Some(measurements);
    }

    pub fn clear_unit_measure(&self) {
        self.state.lock().unwrap().unit_measure = None;
    }

    pub fn set_units(&self, units: Vec<ShipmentUnitRow>) {
        self.state.lock().unwrap().units = units;
    }

    pub fn set_company_id(&self, value: impl Into<String>) {
        self.state.lock().unwrap().company_id = Some(value.into());
    }

    pub fn set_company_info(&self, info: CompanyInfo) {
        self.state.lock().unwrap().company_info = Some(info);
    }

    pub fn set_delivery_info(&self, info: DeliveryInfo) {
        self.state.lock().unwrap().delivery_info = Some(info);
    }

    pub fn clear_delivery_info(&self) {
        self.state.lock().unwrap().delivery_info = None;
    }

    pub fn set_packages(&self, packages: Vec<Package>) {
        self.state.lock().unwrap().packages = packages;
    }

    /// Names of the lookups performed so far, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, name: &'static str) {
        self.state.lock().unwrap().calls.push(name);
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn fetch_order_header(
        &self,
        _shipment_id: &str,
    ) -> Result<Option<OrderHeader>, StoreError> {
        self.record("fetch_order_header");
        Ok(self.state.lock().unwrap().header.clone())
    }

    async fn fetch_carrier_name(&self, _key: &OrderKey) -> Result<Option<String>, StoreError> {
        self.record("fetch_carrier_name");
        Ok(self.state.lock().unwrap().carrier_name.clone())
    }

    async fn fetch_stock_type(&self, _company_code: i32) -> Result<Option<String>, StoreError> {
        self.record("fetch_stock_type");
        Ok(self.state.lock().unwrap().stock_type.clone())
    }

    async fn fetch_shipment_details(
        &self,
        _key: &OrderKey,
    ) -> Result<Option<ShipmentDetails>, StoreError> {
        self.record("fetch_shipment_details");
        Ok(self.state.lock().unwrap().shipment_details.clone())
    }

    async fn fetch_order_type(
        &self,
        _company_code: i32,
        _order_type_code: i32,
    ) -> Result<Option<String>, StoreError> {
        self.record("fetch_order_type");
        Ok(self.state.lock().unwrap().order_type.clone())
    }

    async fn fetch_depot_number(&self, _company_code: i32) -> Result<Option<String>, StoreError> {
        self.record("fetch_depot_number");
        Ok(self.state.lock().unwrap().depot_number.clone())
    }

    async fn fetch_customer_number(
        &self,
        _company_code: i32,
    ) -> Result<Option<String>, StoreError> {
        self.record("fetch_customer_number");
        Ok(self.state.lock().unwrap().customer_number.clone())
    }

    async fn fetch_visible_parts(
        &self,
        _company_code: i32,
        _order_type_code: i32,
    ) -> Result<Option<VisiblePartsRow>, StoreError> {
        self.record("fetch_visible_parts");
        Ok(self.state.lock().unwrap().visible_parts.clone())
    }

    async fn fetch_extra_text(
        &self,
        _company_code: i32,
        _order_type_code: i32,
    ) -> Result<Option<String>, StoreError> {
        self.record("fetch_extra_text");
        Ok(self.state.lock().unwrap().extra_text.clone())
    }

    async fn fetch_contact(&self, _key: &OrderKey) -> Result<Option<Contact>, StoreError> {
        self.record("fetch_contact");
        Ok(self.state.lock().unwrap().contact.clone())
    }

    async fn fetch_delivery_address(
        &self,
        _key: &OrderKey,
    ) -> Result<Option<Address>, StoreError> {
        self.record("fetch_delivery_address");
        Ok(self.state.lock().unwrap().delivery_address.clone())
    }

    async fn fetch_remark(&self, _key: &OrderKey) -> Result<Option<TextMessage>, StoreError> {
        self.record("fetch_remark");
        Ok(self.state.lock().unwrap().remark.clone())
    }

    async fn fetch_package_type_code(
        &self,
        _key: &OrderKey,
    ) -> Result<Option<String>, StoreError> {
        self.record("fetch_package_type_code");
        Ok(self.state.lock().unwrap().package_type_code.clone())
    }

    async fn fetch_package_type(
        &self,
        _company_code: i32,
        _package_type_code: &str,
    ) -> Result<Option<String>, StoreError> {
        self.record("fetch_package_type");
        Ok(self.state.lock().unwrap().package_type.clone())
    }

    async fn fetch_unit_measure(
        &self,
        _company_code: i32,
        _unit_measure_key: &str,
    ) -> Result<Option<Measurements>, StoreError> {
        self.record("fetch_unit_measure");
        Ok(self.state.lock().unwrap().unit_measure.clone())
    }

    async fn fetch_shipment_units(
        &self,
        _key: &OrderKey,
    ) -> Result<Vec<ShipmentUnitRow>, StoreError> {
        self.record("fetch_shipment_units");
        Ok(self.state.lock().unwrap().units.clone())
    }

    async fn fetch_company_id(&self, _key: &OrderKey) -> Result<Option<String>, StoreError> {
        self.record("fetch_company_id");
        Ok(self.state.lock().unwrap().company_id.clone())
    }

    async fn fetch_company_info(
        &self,
        _company_code: i32,
        _company_id: &str,
    ) -> Result<Option<CompanyInfo>, StoreError> {
        self.record("fetch_company_info");
        Ok(self.state.lock().unwrap().company_info.clone())
    }

    async fn fetch_delivery_info(
        &self,
        _key: &OrderKey,
    ) -> Result<Option<DeliveryInfo>, StoreError> {
        self.record("fetch_delivery_info");
        Ok(self.state.lock().unwrap().delivery_info.clone())
    }

    async fn fetch_packages(&self, _key: &OrderKey) -> Result<Vec<Package>, StoreError> {
        self.record("fetch_packages");
        Ok(self.state.lock().unwrap().packages.clone())
    }
}
