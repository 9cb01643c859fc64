use std::net::SocketAddr;
use std::time::Instant;

use async_graphql::parser::{
    parse_query,
    types::{DocumentOperations, OperationType},
};
use async_graphql::{Variables, http::GraphiQLSource};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{ConnectInfo, Extension},
    response::{Html, IntoResponse},
};

use crate::app::errors;
use crate::app::schema::InventorySchema;
use crate::context::ClientContext;

const ANONYMOUS_OPERATION: &str = "AnonymousOperation";
const PREVIEW_LIMIT: usize = 500;

pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Execute one GraphQL request, logging operation name, caller, variables,
/// duration and errors.
pub async fn execute(
    Extension(schema): Extension<InventorySchema>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let client = ClientContext::new(connect_info.map(|ConnectInfo(addr)| addr));
    let request = req.into_inner();

    let operation = request
        .operation_name
        .clone()
        .unwrap_or_else(|| ANONYMOUS_OPERATION.to_string());
    let start = Instant::now();

    tracing::info!("-> {operation} from {}", client.ip());
    if let Some(preview) = variables_preview(&request.variables) {
        tracing::info!("   variables: {preview}");
    }
    if let Some(kind) = operation_kind(&request.query, request.operation_name.as_deref()) {
        tracing::info!("   resolved {kind}");
    }

    let mut response = schema.execute(request.data(client)).await;
    errors::tag_uncoded_errors(&mut response);

    if !response.errors.is_empty() {
        tracing::error!("   encountered {} error(s)", response.errors.len());
        for e in &response.errors {
            tracing::error!("{}", e.message);
        }
    }

    tracing::info!(
        "<- {operation} completed in {}ms (errors={})",
        start.elapsed().as_millis(),
        response.errors.len()
    );

    response.into()
}

/// Upper-case type of the operation the request will run, if it parses
/// and the operation can be selected.
fn operation_kind(query: &str, operation_name: Option<&str>) -> Option<&'static str> {
    let document = parse_query(query).ok()?;
    let operation = match &document.operations {
        DocumentOperations::Single(op) => op,
        DocumentOperations::Multiple(ops) => match operation_name {
            Some(name) => ops
                .iter()
                .find(|(n, _)| n.as_str() == name)
                .map(|(_, op)| op)?,
            None if ops.len() == 1 => ops.values().next()?,
            None => return None,
        },
    };
    Some(match operation.node.ty {
        OperationType::Query => "QUERY",
        OperationType::Mutation => "MUTATION",
        OperationType::Subscription => "SUBSCRIPTION",
    })
}

/// JSON preview of request variables, truncated for the log line.
fn variables_preview(vars: &Variables) -> Option<String> {
    if vars.is_empty() {
        return None;
    }
    let Ok(json) = serde_json::to_string(vars) else {
        return Some("[unserializable variables]".to_string());
    };
    if json.chars().count() <= PREVIEW_LIMIT {
        return Some(json);
    }
    let mut cut: String = json.chars().take(PREVIEW_LIMIT - 3).collect();
    cut.push_str("...");
    Some(cut)
}
