//! The service's route table.
//!
//! | Method | Path  | Status | Body                                                   |
//! |--------|-------|--------|--------------------------------------------------------|
//! | `GET`  | `/ip` | 200    | `{"ip": "<client>"}`                                   |
//! | any    | other | 404    | `{"code": 404, "message": "Recurso <path> no encontrado"}` |
//!
//! The path in the 404 message is echoed exactly as the client sent it,
//! query string and all.

use serde::{Deserialize, Serialize};

use crate::client_ip::client_ip;
use crate::json;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// Body of `GET /ip`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientIp {
    pub ip: String,
}

/// Body of every 404.
///
/// Older clients spell the fields `status` and `descripcion`/`detail`; those
/// names are accepted when decoding, never written.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorBody {
    #[serde(alias = "status")]
    pub code: u16,
    #[serde(alias = "descripcion", alias = "detail")]
    pub message: String,
}

impl ClientIp {
    /// The body as sent on the wire. Same bytes as [`Response::json`] would
    /// produce, without its failure case.
    pub fn to_json(&self) -> Vec<u8> {
        format!("{{\"ip\": {}}}", json::quoted(&self.ip)).into_bytes()
    }
}

impl ErrorBody {
    pub fn not_found(path: &str) -> Self {
        Self {
            code: Status::NotFound.code(),
            message: format!("Recurso {path} no encontrado"),
        }
    }

    /// The body as sent on the wire.
    pub fn to_json(&self) -> Vec<u8> {
        format!("{{\"code\": {}, \"message\": {}}}", self.code, json::quoted(&self.message)).into_bytes()
    }
}

/// The application router: `GET /ip` plus the JSON 404 fallback.
pub fn app() -> Router {
    Router::new().on(Method::Get, "/ip", ip)
}

/// `GET /ip` — echoes the resolved client address.
pub fn ip(req: &Request) -> Response {
    Response::json_body(Status::Ok, ClientIp { ip: client_ip(req) }.to_json())
}

/// Fallback for every unmatched request.
pub fn not_found(req: &Request) -> Response {
    Response::json_body(Status::NotFound, ErrorBody::not_found(req.path()).to_json())
}
