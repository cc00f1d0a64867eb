use serde_json::json;

use super::http::{RequestLine, Response, StatusCode};
use crate::state::StateStore;

/// Maps a parsed request to its response.
pub fn route(request: &RequestLine, store: &StateStore) -> Response {
    match request.method.as_str() {
        "OPTIONS" => Response::empty(StatusCode::NoContent),
        "GET" => match request.path() {
            "/" | "/state" => Response::json_pretty(StatusCode::Ok, &store.current()),
            "/health" => Response::json(StatusCode::Ok, &json!({ "status": "ok" })),
            _ => Response::error(StatusCode::NotFound, "Not found"),
        },
        _ => Response::error(StatusCode::MethodNotAllowed, "Method not allowed"),
    }
}

/// Response for a request line that could not be parsed.
pub fn bad_request() -> Response {
    Response::error(StatusCode::BadRequest, "Bad request")
}
