use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use stockroom_core::{AggregateRoot, DomainResult};
use stockroom_inventory::{
    InventoryStore, KpiPoint, KpiRange, Product, ProductFilter, TransferStock, UpdateDemand,
    Warehouse, kpi_series, seed,
};

/// Application services shared by every request.
///
/// The store sits behind one mutex: each query or mutation holds it for its
/// whole validate-then-apply step, so concurrent transfers serialize.
#[derive(Debug)]
pub struct AppServices {
    inventory: Mutex<InventoryStore>,
}

impl AppServices {
    pub fn new(store: InventoryStore) -> Self {
        Self {
            inventory: Mutex::new(store),
        }
    }

    /// Services over the built-in fixture.
    pub fn seeded() -> DomainResult<Self> {
        Ok(Self::new(seed::store()?))
    }

    fn store(&self) -> MutexGuard<'_, InventoryStore> {
        // Commands only mutate after full validation, so a poisoned store is
        // still consistent.
        self.inventory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list_products(&self, filter: &ProductFilter) -> Vec<Product> {
        self.store().products(filter)
    }

    pub fn warehouses(&self) -> Vec<Warehouse> {
        self.store().warehouses()
    }

    pub fn kpis(&self, range: KpiRange, today: NaiveDate) -> Vec<KpiPoint> {
        let (stock, demand) = self.store().totals();
        kpi_series(stock, demand, today, range)
    }

    pub fn update_demand(&self, cmd: UpdateDemand) -> DomainResult<Product> {
        let mut store = self.store();
        let product_id = cmd.product_id.clone();
        let demand = cmd.demand;

        match store.update_demand(cmd) {
            Ok(row) => {
                tracing::info!(
                    product_id = %row.id,
                    warehouse = %row.warehouse,
                    demand = row.demand,
                    version = store.version(),
                    "demand updated"
                );
                Ok(row)
            }
            Err(e) => {
                tracing::warn!(%product_id, demand, error = %e, "demand update rejected");
                Err(e)
            }
        }
    }

    pub fn transfer_stock(&self, cmd: TransferStock) -> DomainResult<Product> {
        let mut store = self.store();
        let (product_id, from, to, quantity) = (
            cmd.product_id.clone(),
            cmd.from.clone(),
            cmd.to.clone(),
            cmd.quantity,
        );

        match store.transfer_stock(cmd) {
            Ok(dest) => {
                tracing::info!(
                    %product_id,
                    %from,
                    %to,
                    quantity,
                    destination_stock = dest.stock,
                    version = store.version(),
                    "stock transferred"
                );
                Ok(dest)
            }
            Err(e) => {
                tracing::warn!(
                    %product_id,
                    %from,
                    %to,
                    quantity,
                    error = %e,
                    "stock transfer rejected"
                );
                Err(e)
            }
        }
    }
}
