use std::collections::BTreeSet;

use tms_core::store::{OrderStore, StoreError, VisiblePartsRow};
use tms_shared::order::{OrderHeader, ShipmentDetails};
use tms_shared::trace::ExportTrace;

/// Optional numeric field groups an order type can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VisiblePart {
    Measures,
    LoadingMeter,
    Volume,
}

impl VisiblePart {
    /// Exact-label match after trimming; partial labels such as
    /// "volumetric" do not count as "volume".
    fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "measures" => Some(VisiblePart::Measures),
            "loading meter" => Some(VisiblePart::LoadingMeter),
            "volume" => Some(VisiblePart::Volume),
            _ => None,
        }
    }
}

/// Parsed "visible parts" configuration value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleParts {
    pub flags: BTreeSet<VisiblePart>,
    /// Key for the package-level unit-measure lookup; empty means the
    /// lookup is skipped entirely.
    pub unit_measure_key: String,
}

impl VisibleParts {
    pub fn parse(row: &VisiblePartsRow) -> Self {
        let flags = row
            .flag_list
            .split(',')
            .filter_map(VisiblePart::from_label)
            .collect();
        Self {
            flags,
            unit_measure_key: row.unit_measure_key.trim().to_string(),
        }
    }

    /// Flag encoding used on the wire: "1" when the part is requested,
    /// empty string otherwise.
    pub fn flag(&self, part: VisiblePart) -> &'static str {
        if self.flags.contains(&part) {
            "1"
        } else {
            ""
        }
    }
}

/// Fully resolved configuration chain for one order.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub header: OrderHeader,
    pub stock_type: String,
    pub details: ShipmentDetails,
    pub order_type: String,
    pub depot_number: String,
    pub customer_number: String,
    pub visible_parts: VisibleParts,
    pub extra_text: String,
}

/// Outcome of the chain walk. A failed chain still carries the trace with
/// everything that resolved before the missing item.
#[derive(Debug)]
pub enum ChainOutcome {
    Resolved(Box<ResolvedConfig>, ExportTrace),
    Failed(ExportTrace),
}

/// Walks the ordered chain of configuration lookups for one order.
///
/// The chain is strictly sequential: an item is only looked up once every
/// item before it resolved. The first absent value stops the walk and tags
/// the trace with the item that was missing.
pub struct ConfigResolver<'a> {
    store: &'a dyn OrderStore,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(store: &'a dyn OrderStore) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, shipment_id: &str) -> Result<ChainOutcome, StoreError> {
        let mut trace = ExportTrace::default();

        let Some(header) = self.store.fetch_order_header(shipment_id).await? else {
            return Ok(ChainOutcome::Failed(trace.failed(format!(
                "Order with shipment id {shipment_id} not found in the order store"
            ))));
        };
        trace.order = Some(header.key.clone());
        let company_code = header.key.company_code;

        let stock_type = match self.store.fetch_stock_type(company_code).await? {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                return Ok(ChainOutcome::Failed(
                    trace.failed("Missing configuration - Inventory Stock type"),
                ))
            }
        };
        trace.inventory_stock_type = stock_type.clone();

        let Some(details) = self.store.fetch_shipment_details(&header.key).await? else {
            return Ok(ChainOutcome::Failed(trace.failed(format!(
                "Cannot fetch shipment details for order {} from the order store",
                header.key.order_number
            ))));
        };
        trace.shipment_details = Some(details.clone());

        let Some(order_type_code) = details.order_type_code else {
            return Ok(ChainOutcome::Failed(trace.failed("Order type code is empty")));
        };

        let Some(order_type) = self
            .store
            .fetch_order_type(company_code, order_type_code)
            .await?
        else {
            return Ok(ChainOutcome::Failed(
                trace.failed("Missing configuration - Order type"),
            ));
        };
        trace.order_type = Some(order_type.clone());

        let Some(depot_number) = self.store.fetch_depot_number(company_code).await? else {
            return Ok(ChainOutcome::Failed(
                trace.failed("Missing configuration - Depot Number"),
            ));
        };
        trace.depot_number = Some(depot_number.clone());

        // Optional: a company without a customer number still exports.
        let customer_number = self
            .store
            .fetch_customer_number(company_code)
            .await?
            .unwrap_or_default();
        trace.customer_number = customer_number.clone();

        let Some(visible_row) = self
            .store
            .fetch_visible_parts(company_code, order_type_code)
            .await?
        else {
            return Ok(ChainOutcome::Failed(
                trace.failed("Missing configuration - Visible parts"),
            ));
        };
        let visible_parts = VisibleParts::parse(&visible_row);

        let extra_text = self
            .store
            .fetch_extra_text(company_code, order_type_code)
            .await?
            .unwrap_or_default();
        trace.extra_text = extra_text.clone();

        tracing::debug!(
            shipment_id,
            order_type = %order_type,
            depot = %depot_number,
            "configuration chain resolved"
        );

        Ok(ChainOutcome::Resolved(
            Box::new(ResolvedConfig {
                header,
                stock_type,
                details,
                order_type,
                depot_number,
                customer_number,
                visible_parts,
                extra_text,
            }),
            trace,
        ))
    }
}
