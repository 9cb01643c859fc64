//! The inventory aggregate: stock rows plus warehouse reference data.
//!
//! Mutations go through `InventoryCommand`s. `handle` validates a command in
//! full against current state and emits events; `apply` evolves state from
//! those events. A rejected command therefore never touches any row.

use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, AggregateRoot, DomainError, DomainResult};

use crate::filter::ProductFilter;
use crate::product::{LocationKey, Product, ProductId};
use crate::warehouse::{Warehouse, WarehouseCode};

/// Command: UpdateDemand.
///
/// Without a warehouse the id must identify exactly one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDemand {
    pub product_id: ProductId,
    pub warehouse: Option<WarehouseCode>,
    pub demand: i64,
}

/// Command: TransferStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStock {
    pub product_id: ProductId,
    pub from: WarehouseCode,
    pub to: WarehouseCode,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    UpdateDemand(UpdateDemand),
    TransferStock(TransferStock),
}

/// Event: DemandUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandUpdated {
    pub key: LocationKey,
    pub previous: u32,
    pub demand: u32,
}

/// Event: LocationOpened (an empty row created at a destination warehouse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOpened {
    pub key: LocationKey,
    pub name: String,
    pub sku: String,
}

/// Event: StockTransferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransferred {
    pub product_id: ProductId,
    pub from: WarehouseCode,
    pub to: WarehouseCode,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    DemandUpdated(DemandUpdated),
    LocationOpened(LocationOpened),
    StockTransferred(StockTransferred),
}

impl InventoryEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::DemandUpdated(_) => "inventory.row.demand_updated",
            InventoryEvent::LocationOpened(_) => "inventory.row.location_opened",
            InventoryEvent::StockTransferred(_) => "inventory.stock.transferred",
        }
    }
}

/// In-memory inventory: ordered stock rows keyed by (product, warehouse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryStore {
    id: String,
    warehouses: Vec<Warehouse>,
    rows: Vec<Product>,
    version: u64,
}

impl InventoryStore {
    /// Empty store over a set of warehouses.
    pub fn new(warehouses: Vec<Warehouse>) -> Self {
        Self {
            id: "inventory".to_string(),
            warehouses,
            rows: Vec::new(),
            version: 0,
        }
    }

    /// Build a store from reference data and initial rows.
    ///
    /// Rejects duplicate warehouse codes, duplicate `(id, warehouse)` rows and
    /// rows pointing at unknown warehouses.
    pub fn from_parts(warehouses: Vec<Warehouse>, rows: Vec<Product>) -> DomainResult<Self> {
        for (idx, w) in warehouses.iter().enumerate() {
            if warehouses[..idx].iter().any(|o| o.code == w.code) {
                return Err(DomainError::conflict(format!(
                    "duplicate warehouse code {}",
                    w.code
                )));
            }
        }

        let mut store = Self::new(warehouses);
        for row in rows {
            if store.warehouse(&row.warehouse).is_none() {
                return Err(DomainError::invariant(format!(
                    "row {} references unknown warehouse",
                    row.key()
                )));
            }
            if store.position(&row.id, &row.warehouse).is_some() {
                return Err(DomainError::conflict(format!("duplicate row {}", row.key())));
            }
            store.rows.push(row);
        }
        Ok(store)
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> &[Product] {
        &self.rows
    }

    /// Filtered rows in insertion order.
    pub fn products(&self, filter: &ProductFilter) -> Vec<Product> {
        filter.apply(&self.rows)
    }

    /// Warehouses sorted by code.
    pub fn warehouses(&self) -> Vec<Warehouse> {
        let mut out = self.warehouses.clone();
        out.sort_by(|a, b| a.code.cmp(&b.code));
        out
    }

    pub fn warehouse(&self, code: &WarehouseCode) -> Option<&Warehouse> {
        self.warehouses.iter().find(|w| &w.code == code)
    }

    pub fn get(&self, key: &LocationKey) -> Option<&Product> {
        self.find(&key.product_id, &key.warehouse)
    }

    pub fn find(&self, product_id: &ProductId, warehouse: &WarehouseCode) -> Option<&Product> {
        self.rows.iter().find(|p| p.is_at(product_id, warehouse))
    }

    /// Warehouses currently holding a row for `product_id`, in row order.
    pub fn locations_of(&self, product_id: &ProductId) -> Vec<WarehouseCode> {
        self.rows
            .iter()
            .filter(|p| &p.id == product_id)
            .map(|p| p.warehouse.clone())
            .collect()
    }

    /// Stock held for `product_id` across all warehouses.
    pub fn total_stock_of(&self, product_id: &ProductId) -> u64 {
        self.rows
            .iter()
            .filter(|p| &p.id == product_id)
            .map(|p| u64::from(p.stock))
            .sum()
    }

    /// Sum of (stock, demand) over every row.
    pub fn totals(&self) -> (u64, u64) {
        self.rows.iter().fold((0, 0), |(s, d), p| {
            (s + u64::from(p.stock), d + u64::from(p.demand))
        })
    }

    /// Set a row's demand and return the updated row.
    pub fn update_demand(&mut self, cmd: UpdateDemand) -> DomainResult<Product> {
        let events = self.execute(&InventoryCommand::UpdateDemand(cmd))?;
        let key = events.iter().find_map(|e| match e {
            InventoryEvent::DemandUpdated(e) => Some(e.key.clone()),
            _ => None,
        });
        self.row_after(key)
    }

    /// Move stock between warehouses and return the destination row.
    pub fn transfer_stock(&mut self, cmd: TransferStock) -> DomainResult<Product> {
        let events = self.execute(&InventoryCommand::TransferStock(cmd))?;
        let key = events.iter().find_map(|e| match e {
            InventoryEvent::StockTransferred(e) => {
                Some(LocationKey::new(e.product_id.clone(), e.to.clone()))
            }
            _ => None,
        });
        self.row_after(key)
    }

    fn row_after(&self, key: Option<LocationKey>) -> DomainResult<Product> {
        key.and_then(|k| self.get(&k).cloned())
            .ok_or_else(|| DomainError::invariant("applied event did not leave a row behind"))
    }

    fn position(&self, product_id: &ProductId, warehouse: &WarehouseCode) -> Option<usize> {
        self.rows.iter().position(|p| p.is_at(product_id, warehouse))
    }

    fn position_of(&self, key: &LocationKey) -> Option<usize> {
        self.position(&key.product_id, &key.warehouse)
    }

    fn describe_locations(locations: &[WarehouseCode]) -> String {
        locations
            .iter()
            .map(WarehouseCode::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl AggregateRoot for InventoryStore {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for InventoryStore {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::DemandUpdated(e) => {
                if let Some(idx) = self.position_of(&e.key) {
                    self.rows[idx].demand = e.demand;
                }
            }
            InventoryEvent::LocationOpened(e) => {
                if self.position_of(&e.key).is_none() {
                    self.rows.push(Product {
                        id: e.key.product_id.clone(),
                        name: e.name.clone(),
                        sku: e.sku.clone(),
                        warehouse: e.key.warehouse.clone(),
                        stock: 0,
                        demand: 0,
                    });
                }
            }
            InventoryEvent::StockTransferred(e) => {
                if let Some(idx) = self.position(&e.product_id, &e.from) {
                    self.rows[idx].stock = self.rows[idx].stock.saturating_sub(e.quantity);
                }
                if let Some(idx) = self.position(&e.product_id, &e.to) {
                    self.rows[idx].stock = self.rows[idx].stock.saturating_add(e.quantity);
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::UpdateDemand(cmd) => self.handle_update_demand(cmd),
            InventoryCommand::TransferStock(cmd) => self.handle_transfer(cmd),
        }
    }
}

impl InventoryStore {
    fn handle_update_demand(&self, cmd: &UpdateDemand) -> DomainResult<Vec<InventoryEvent>> {
        let demand = u32::try_from(cmd.demand)
            .map_err(|_| DomainError::validation("demand must be a non-negative integer"))?;

        let row = match &cmd.warehouse {
            Some(w) => self.find(&cmd.product_id, w).ok_or_else(|| {
                DomainError::not_found(format!(
                    "product {} not found in warehouse {}",
                    cmd.product_id, w
                ))
            })?,
            None => {
                let mut matches = self.rows.iter().filter(|p| p.id == cmd.product_id);
                let first = matches.next().ok_or_else(|| {
                    DomainError::not_found(format!("product with id {} not found", cmd.product_id))
                })?;
                if matches.next().is_some() {
                    let locations = self.locations_of(&cmd.product_id);
                    return Err(DomainError::not_found(format!(
                        "no single record for product {}: stocked in {}; specify a warehouse",
                        cmd.product_id,
                        Self::describe_locations(&locations)
                    )));
                }
                first
            }
        };

        Ok(vec![InventoryEvent::DemandUpdated(DemandUpdated {
            key: row.key(),
            previous: row.demand,
            demand,
        })])
    }

    fn handle_transfer(&self, cmd: &TransferStock) -> DomainResult<Vec<InventoryEvent>> {
        let quantity = u32::try_from(cmd.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| DomainError::validation("qty must be a positive integer"))?;

        if cmd.from == cmd.to {
            return Err(DomainError::validation(
                "source and destination warehouse must differ",
            ));
        }

        let Some(source) = self.find(&cmd.product_id, &cmd.from) else {
            let locations = self.locations_of(&cmd.product_id);
            if locations.is_empty() {
                return Err(DomainError::not_found(format!(
                    "product with id {} not found in inventory",
                    cmd.product_id
                )));
            }
            return Err(DomainError::not_found(format!(
                "product {} is not located in warehouse {} (current: {})",
                cmd.product_id,
                cmd.from,
                Self::describe_locations(&locations)
            )));
        };

        if quantity > source.stock {
            return Err(DomainError::insufficient_stock(
                cmd.from.as_str(),
                u64::from(quantity),
                u64::from(source.stock),
            ));
        }

        if self.warehouse(&cmd.to).is_none() {
            return Err(DomainError::not_found(format!("warehouse {} not found", cmd.to)));
        }

        let mut events = Vec::with_capacity(2);
        match self.find(&cmd.product_id, &cmd.to) {
            Some(dest) => {
                if dest.stock.checked_add(quantity).is_none() {
                    return Err(DomainError::validation(format!(
                        "transfer would overflow stock at {}",
                        cmd.to
                    )));
                }
            }
            None => {
                events.push(InventoryEvent::LocationOpened(LocationOpened {
                    key: LocationKey::new(cmd.product_id.clone(), cmd.to.clone()),
                    name: source.name.clone(),
                    sku: source.sku.clone(),
                }));
            }
        }

        events.push(InventoryEvent::StockTransferred(StockTransferred {
            product_id: cmd.product_id.clone(),
            from: cmd.from.clone(),
            to: cmd.to.clone(),
            quantity,
        }));

        Ok(events)
    }
}
