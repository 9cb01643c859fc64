use async_graphql::{SimpleObject, ID};

use stockroom_inventory::{KpiPoint, Product, Warehouse};

// -------------------------
// GraphQL output objects
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Warehouse")]
pub struct WarehouseObject {
    pub code: ID,
    pub name: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Product")]
pub struct ProductObject {
    pub id: ID,
    pub name: String,
    pub sku: String,
    pub warehouse: String,
    pub stock: u32,
    pub demand: u32,
    /// `shortage`, `balanced` or `overstock`.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "KPI")]
pub struct KpiObject {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub stock: u64,
    pub demand: u64,
}

// -------------------------
// Mapping helpers
// -------------------------

impl From<Product> for ProductObject {
    fn from(p: Product) -> Self {
        let status = p.status().as_str().to_string();
        Self {
            id: ID(p.id.as_str().to_string()),
            name: p.name,
            sku: p.sku,
            warehouse: p.warehouse.as_str().to_string(),
            stock: p.stock,
            demand: p.demand,
            status,
        }
    }
}

impl From<Warehouse> for WarehouseObject {
    fn from(w: Warehouse) -> Self {
        Self {
            code: ID(w.code.as_str().to_string()),
            name: w.name,
            city: w.city,
            country: w.country,
        }
    }
}

impl From<KpiPoint> for KpiObject {
    fn from(k: KpiPoint) -> Self {
        Self {
            date: k.date.format("%Y-%m-%d").to_string(),
            stock: k.stock,
            demand: k.demand,
        }
    }
}
