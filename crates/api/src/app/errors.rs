use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use cardapio_core::DomainError;

const MSG_PRODUTO_NAO_ENCONTRADO: &str = "Produto não encontrado";

/// Map a domain failure to its HTTP outcome.
///
/// Success is handled by the calling handler. Not-found stays distinct from
/// the other client faults (4xx); storage faults land in the 5xx class.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::NotFound => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            MSG_PRODUTO_NAO_ENCONTRADO,
        ),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::InvalidState(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_state", msg)
        }
        DomainError::NoOp(msg) => json_error(StatusCode::CONFLICT, "no_rows_affected", msg),
        DomainError::Storage(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
