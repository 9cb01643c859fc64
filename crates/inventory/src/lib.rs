//! Inventory domain module.
//!
//! This crate contains business rules for stock rows and warehouses,
//! implemented purely as deterministic domain logic (no IO, no HTTP).

pub mod filter;
pub mod kpi;
pub mod product;
pub mod seed;
pub mod store;
pub mod warehouse;

pub use filter::ProductFilter;
pub use kpi::{KpiPoint, KpiRange, kpi_series};
pub use product::{LocationKey, Product, ProductId, StockStatus};
pub use store::{
    DemandUpdated, InventoryCommand, InventoryEvent, InventoryStore, LocationOpened,
    StockTransferred, TransferStock, UpdateDemand,
};
pub use warehouse::{Warehouse, WarehouseCode};
