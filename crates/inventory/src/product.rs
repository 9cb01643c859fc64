use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::warehouse::WarehouseCode;

/// Product identifier. The same id appears once per warehouse holding it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Primary key of a stock row: one product at one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationKey {
    pub product_id: ProductId,
    pub warehouse: WarehouseCode,
}

impl LocationKey {
    pub fn new(product_id: ProductId, warehouse: WarehouseCode) -> Self {
        Self {
            product_id,
            warehouse,
        }
    }
}

impl core::fmt::Display for LocationKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{}", self.product_id, self.warehouse)
    }
}

/// Stock position derived from stock vs demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Shortage,
    Balanced,
    Overstock,
}

impl StockStatus {
    pub fn classify(stock: u32, demand: u32) -> Self {
        match stock.cmp(&demand) {
            core::cmp::Ordering::Less => StockStatus::Shortage,
            core::cmp::Ordering::Greater => StockStatus::Overstock,
            core::cmp::Ordering::Equal => StockStatus::Balanced,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::Shortage => "shortage",
            StockStatus::Balanced => "balanced",
            StockStatus::Overstock => "overstock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shortage" => Ok(StockStatus::Shortage),
            "balanced" => Ok(StockStatus::Balanced),
            "overstock" => Ok(StockStatus::Overstock),
            _ => Err(()),
        }
    }
}

/// A stock row: one product's stock and demand at one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub warehouse: WarehouseCode,
    pub stock: u32,
    pub demand: u32,
}

impl Product {
    pub fn new(
        id: impl AsRef<str>,
        name: impl Into<String>,
        sku: impl Into<String>,
        warehouse: impl AsRef<str>,
        stock: u32,
        demand: u32,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            sku: sku.into(),
            warehouse: WarehouseCode::new(warehouse),
            stock,
            demand,
        }
    }

    pub fn key(&self) -> LocationKey {
        LocationKey::new(self.id.clone(), self.warehouse.clone())
    }

    pub fn is_at(&self, product_id: &ProductId, warehouse: &WarehouseCode) -> bool {
        &self.id == product_id && &self.warehouse == warehouse
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.stock, self.demand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn status_follows_stock_versus_demand() {
        assert_eq!(StockStatus::classify(50, 80), StockStatus::Shortage);
        assert_eq!(StockStatus::classify(80, 80), StockStatus::Balanced);
        assert_eq!(StockStatus::classify(180, 120), StockStatus::Overstock);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(" Shortage ".parse::<StockStatus>(), Ok(StockStatus::Shortage));
        assert_eq!("BALANCED".parse::<StockStatus>(), Ok(StockStatus::Balanced));
        assert_eq!("overstock".parse::<StockStatus>(), Ok(StockStatus::Overstock));
        assert!("critical".parse::<StockStatus>().is_err());
    }

    #[test]
    fn row_key_combines_id_and_warehouse() {
        let p = Product::new("P-1002", "Steel Washer", "WSR-08-500", "blr-a", 50, 80);
        assert_eq!(p.key().to_string(), "P-1002@BLR-A");
        assert!(p.is_at(&ProductId::new("P-1002"), &WarehouseCode::new("BLR-A")));
        assert!(!p.is_at(&ProductId::new("P-1002"), &WarehouseCode::new("PNQ-C")));
    }

    proptest! {
        /// Property: status is shortage iff stock < demand, overstock iff
        /// stock > demand, balanced otherwise.
        #[test]
        fn status_classification_is_total(stock in any::<u32>(), demand in any::<u32>()) {
            let status = StockStatus::classify(stock, demand);
            prop_assert_eq!(status == StockStatus::Shortage, stock < demand);
            prop_assert_eq!(status == StockStatus::Overstock, stock > demand);
            prop_assert_eq!(status == StockStatus::Balanced, stock == demand);
        }
    }
}
