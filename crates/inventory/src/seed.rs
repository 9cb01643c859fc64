//! Fixture data loaded at process start.

use stockroom_core::DomainResult;

use crate::product::Product;
use crate::store::InventoryStore;
use crate::warehouse::Warehouse;

pub fn warehouses() -> Vec<Warehouse> {
    vec![
        Warehouse::new("BLR-A", "Bengaluru Alpha", "Bengaluru", "India"),
        Warehouse::new("PNQ-C", "Pune Charlie", "Pune", "India"),
        Warehouse::new("DEL-B", "Delhi Bravo", "New Delhi", "India"),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product::new("P-1001", "12mm Hex Bolt", "HEX-12-100", "BLR-A", 180, 120),
        Product::new("P-1002", "Steel Washer", "WSR-08-500", "BLR-A", 50, 80),
        Product::new("P-1003", "M8 Nut", "NUT-08-200", "PNQ-C", 80, 80),
        Product::new("P-1004", "Bearing 608ZZ", "BRG-608-50", "DEL-B", 24, 120),
    ]
}

/// Store pre-populated with the fixture.
pub fn store() -> DomainResult<InventoryStore> {
    InventoryStore::from_parts(warehouses(), products())
}
