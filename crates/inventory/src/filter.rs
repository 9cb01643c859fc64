//! Product listing filters.
//!
//! Blank or absent inputs are no-ops. Matching is case-insensitive and
//! operates on trimmed input.

use crate::product::{Product, StockStatus};
use crate::warehouse::WarehouseCode;

/// Status criterion after parsing the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusCriterion {
    Any,
    Only(StockStatus),
    /// Non-blank input naming no known status: matches nothing.
    Unknown,
}

/// Compiled filter for the product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    search: Option<String>,
    warehouse: Option<WarehouseCode>,
    status: StatusCriterion,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: None,
            warehouse: None,
            status: StatusCriterion::Any,
        }
    }
}

impl ProductFilter {
    pub fn new(search: Option<&str>, status: Option<&str>, warehouse: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let warehouse = warehouse
            .map(WarehouseCode::new)
            .filter(|w| !w.is_blank());

        let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
            None => StatusCriterion::Any,
            Some(s) => s
                .parse::<StockStatus>()
                .map(StatusCriterion::Only)
                .unwrap_or(StatusCriterion::Unknown),
        };

        Self {
            search,
            warehouse,
            status,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(q) = &self.search {
            let hit = product.id.as_str().to_lowercase().contains(q.as_str())
                || product.sku.to_lowercase().contains(q.as_str())
                || product.name.to_lowercase().contains(q.as_str());
            if !hit {
                return false;
            }
        }

        if let Some(w) = &self.warehouse {
            if &product.warehouse != w {
                return false;
            }
        }

        match self.status {
            StatusCriterion::Any => true,
            StatusCriterion::Only(s) => product.status() == s,
            StatusCriterion::Unknown => false,
        }
    }

    /// Filter rows, preserving their order.
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<Product> {
        products
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn blank_filters_return_everything_in_order() {
        let rows = seed::products();
        let filter = ProductFilter::new(Some("  "), Some(""), None);
        assert_eq!(
            ids(&filter.apply(&rows)),
            vec!["P-1001", "P-1002", "P-1003", "P-1004"]
        );
    }

    #[test]
    fn search_matches_id_sku_or_name() {
        let rows = seed::products();

        let by_name = ProductFilter::new(Some("washer"), None, None).apply(&rows);
        assert_eq!(ids(&by_name), vec!["P-1002"]);

        let by_sku = ProductFilter::new(Some("brg-608"), None, None).apply(&rows);
        assert_eq!(ids(&by_sku), vec!["P-1004"]);

        let by_id = ProductFilter::new(Some(" p-100 "), None, None).apply(&rows);
        assert_eq!(by_id.len(), 4);
    }

    #[test]
    fn warehouse_match_is_exact_and_case_insensitive() {
        let rows = seed::products();
        let filtered = ProductFilter::new(None, None, Some("blr-a")).apply(&rows);
        assert_eq!(ids(&filtered), vec!["P-1001", "P-1002"]);

        let partial = ProductFilter::new(None, None, Some("BLR")).apply(&rows);
        assert!(partial.is_empty());
    }

    #[test]
    fn status_filter_uses_derived_status() {
        let rows = seed::products();
        assert_eq!(
            ids(&ProductFilter::new(None, Some("shortage"), None).apply(&rows)),
            vec!["P-1002", "P-1004"]
        );
        assert_eq!(
            ids(&ProductFilter::new(None, Some("Balanced"), None).apply(&rows)),
            vec!["P-1003"]
        );
        assert_eq!(
            ids(&ProductFilter::new(None, Some("overstock"), None).apply(&rows)),
            vec!["P-1001"]
        );
    }

    #[test]
    fn unknown_status_matches_nothing() {
        let rows = seed::products();
        assert!(ProductFilter::new(None, Some("critical"), None).apply(&rows).is_empty());
    }

    #[test]
    fn filters_combine() {
        let rows = seed::products();
        let filtered = ProductFilter::new(Some("p-"), Some("shortage"), Some("BLR-A")).apply(&rows);
        assert_eq!(ids(&filtered), vec!["P-1002"]);
    }
}
