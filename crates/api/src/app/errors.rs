use async_graphql::{ErrorExtensions, Response};

use stockroom_core::DomainError;

/// Code given to errors raised by the engine itself (argument coercion,
/// parse and validation failures) rather than by a resolver.
const REQUEST_ERROR_CODE: &str = "VALIDATION_ERROR";

/// Map a domain failure onto a GraphQL error carrying `extensions.code`.
pub fn domain_error(err: DomainError) -> async_graphql::Error {
    let code = err.code();
    async_graphql::Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}

/// Ensure every error in the response carries `extensions.code`.
pub fn tag_uncoded_errors(response: &mut Response) {
    for err in &mut response.errors {
        let extensions = err.extensions.get_or_insert_with(Default::default);
        if extensions.get("code").is_none() {
            extensions.set("code", REQUEST_ERROR_CODE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Pos, ServerError, Value};

    fn code(text: &str) -> Option<Value> {
        Some(Value::String(text.to_string()))
    }

    fn code_of(response: &Response, index: usize) -> Option<Value> {
        response.errors[index]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned()
    }

    #[test]
    fn engine_errors_are_tagged_as_validation() {
        let mut response = Response::from_errors(vec![ServerError::new(
            "Invalid value for argument \"qty\", expected type \"Int\"",
            None,
        )]);
        tag_uncoded_errors(&mut response);
        assert_eq!(code_of(&response, 0), code("VALIDATION_ERROR"));
    }

    #[test]
    fn domain_codes_are_kept() {
        let coded = domain_error(DomainError::insufficient_stock("DEL-B", 999, 24));
        let mut response = Response::from_errors(vec![
            coded.into_server_error(Pos { line: 1, column: 1 }),
            ServerError::new("unknown field", None),
        ]);
        tag_uncoded_errors(&mut response);
        assert_eq!(code_of(&response, 0), code("INSUFFICIENT_STOCK"));
        assert_eq!(code_of(&response, 1), code("VALIDATION_ERROR"));
    }
}
