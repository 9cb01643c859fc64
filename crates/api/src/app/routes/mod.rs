use axum::{routing::get, Router};

pub mod graphql;
pub mod system;

/// Router for the GraphQL endpoint (POST executes, GET serves GraphiQL).
pub fn router() -> Router {
    Router::new().route("/graphql", get(graphql::graphiql).post(graphql::execute))
}
