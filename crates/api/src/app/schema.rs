//! GraphQL schema: product/warehouse/KPI queries and the two stock mutations.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ID, Object, Schema};

use stockroom_inventory::{
    KpiRange, ProductFilter, ProductId, TransferStock, UpdateDemand, WarehouseCode,
};

use crate::app::dto::{KpiObject, ProductObject, WarehouseObject};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::ClientContext;

pub type InventorySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(services: Arc<AppServices>) -> InventorySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .finish()
}

fn services<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<AppServices>> {
    ctx.data::<Arc<AppServices>>()
}

fn caller(ctx: &Context<'_>) -> String {
    ctx.data_opt::<ClientContext>()
        .map(ClientContext::ip)
        .unwrap_or_else(|| "unknown".to_string())
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Stock rows in insertion order, optionally filtered.
    async fn products(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
        status: Option<String>,
        warehouse: Option<String>,
    ) -> async_graphql::Result<Vec<ProductObject>> {
        let filter = ProductFilter::new(search.as_deref(), status.as_deref(), warehouse.as_deref());
        let rows = services(ctx)?.list_products(&filter);
        Ok(rows.into_iter().map(ProductObject::from).collect())
    }

    /// Warehouses sorted by code.
    async fn warehouses(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<WarehouseObject>> {
        let warehouses = services(ctx)?.warehouses();
        Ok(warehouses.into_iter().map(WarehouseObject::from).collect())
    }

    /// Synthetic daily totals ending today (`7d`, `30d`/`1m`, `90d`/`3m`, or a day count).
    async fn kpis(
        &self,
        ctx: &Context<'_>,
        range: String,
    ) -> async_graphql::Result<Vec<KpiObject>> {
        let today = chrono::Local::now().date_naive();
        let points = services(ctx)?.kpis(KpiRange::parse(&range), today);
        Ok(points.into_iter().map(KpiObject::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Set a row's demand. `warehouse` is required when the id is stocked in
    /// more than one warehouse.
    async fn update_demand(
        &self,
        ctx: &Context<'_>,
        id: ID,
        demand: i32,
        warehouse: Option<String>,
    ) -> async_graphql::Result<ProductObject> {
        tracing::debug!(caller = %caller(ctx), id = %id.as_str(), demand, "updateDemand");

        let cmd = UpdateDemand {
            product_id: ProductId::new(id.as_str()),
            warehouse: warehouse
                .as_deref()
                .map(WarehouseCode::new)
                .filter(|w| !w.is_blank()),
            demand: i64::from(demand),
        };

        services(ctx)?
            .update_demand(cmd)
            .map(ProductObject::from)
            .map_err(errors::domain_error)
    }

    /// Move `qty` units from one warehouse to another; returns the destination row.
    async fn transfer_stock(
        &self,
        ctx: &Context<'_>,
        id: ID,
        from: String,
        to: String,
        qty: i32,
    ) -> async_graphql::Result<ProductObject> {
        tracing::debug!(caller = %caller(ctx), id = %id.as_str(), %from, %to, qty, "transferStock");

        let cmd = TransferStock {
            product_id: ProductId::new(id.as_str()),
            from: WarehouseCode::new(&from),
            to: WarehouseCode::new(&to),
            quantity: i64::from(qty),
        };

        services(ctx)?
            .transfer_stock(cmd)
            .map(ProductObject::from)
            .map_err(errors::domain_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Request, Variables};
    use serde_json::{json, Value};

    fn schema() -> InventorySchema {
        build_schema(Arc::new(AppServices::seeded().unwrap()))
    }

    async fn run(schema: &InventorySchema, query: &str, vars: Value) -> Value {
        let req = Request::new(query).variables(Variables::from_json(vars));
        serde_json::to_value(schema.execute(req).await).unwrap()
    }

    const TRANSFER: &str = r#"
        mutation($id: ID!, $from: String!, $to: String!, $qty: Int!) {
            transferStock(id: $id, from: $from, to: $to, qty: $qty) {
                id warehouse stock demand
            }
        }"#;

    #[tokio::test]
    async fn products_query_filters_by_status() {
        let schema = schema();
        let body = run(
            &schema,
            r#"{ products(status: "shortage") { id status } }"#,
            json!({}),
        )
        .await;

        assert_eq!(
            body["data"]["products"],
            json!([
                { "id": "P-1002", "status": "shortage" },
                { "id": "P-1004", "status": "shortage" },
            ])
        );
    }

    #[tokio::test]
    async fn warehouses_are_sorted() {
        let schema = schema();
        let body = run(&schema, "{ warehouses { code name } }", json!({})).await;
        let codes: Vec<_> = body["data"]["warehouses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["code"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(codes, vec!["BLR-A", "DEL-B", "PNQ-C"]);
    }

    #[tokio::test]
    async fn kpis_cover_requested_range() {
        let schema = schema();
        let body = run(&schema, r#"{ kpis(range: "30d") { date stock demand } }"#, json!({})).await;
        assert_eq!(body["data"]["kpis"].as_array().unwrap().len(), 30);
    }

    #[tokio::test]
    async fn transfer_creates_destination_row() {
        let schema = schema();
        let body = run(
            &schema,
            TRANSFER,
            json!({ "id": "P-1002", "from": "BLR-A", "to": "PNQ-C", "qty": 30 }),
        )
        .await;

        assert_eq!(
            body["data"]["transferStock"],
            json!({ "id": "P-1002", "warehouse": "PNQ-C", "stock": 30, "demand": 0 })
        );

        let body = run(
            &schema,
            r#"{ products(search: "P-1002") { warehouse stock } }"#,
            json!({}),
        )
        .await;
        assert_eq!(
            body["data"]["products"],
            json!([
                { "warehouse": "BLR-A", "stock": 20 },
                { "warehouse": "PNQ-C", "stock": 30 },
            ])
        );
    }

    #[tokio::test]
    async fn errors_carry_category_codes() {
        let schema = schema();

        let insufficient = run(
            &schema,
            TRANSFER,
            json!({ "id": "P-1004", "from": "DEL-B", "to": "BLR-A", "qty": 999 }),
        )
        .await;
        assert_eq!(insufficient["errors"][0]["extensions"]["code"], "INSUFFICIENT_STOCK");

        let invalid = run(
            &schema,
            TRANSFER,
            json!({ "id": "P-1004", "from": "DEL-B", "to": "BLR-A", "qty": 0 }),
        )
        .await;
        assert_eq!(invalid["errors"][0]["extensions"]["code"], "VALIDATION_ERROR");

        let missing = run(
            &schema,
            r#"mutation { updateDemand(id: "P-9999", demand: 10) { id } }"#,
            json!({}),
        )
        .await;
        assert_eq!(missing["errors"][0]["extensions"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn update_demand_returns_updated_row() {
        let schema = schema();
        let body = run(
            &schema,
            r#"mutation { updateDemand(id: "P-1001", demand: 150) { id demand status } }"#,
            json!({}),
        )
        .await;
        assert_eq!(
            body["data"]["updateDemand"],
            json!({ "id": "P-1001", "demand": 150, "status": "overstock" })
        );
    }
}
