use crate::error;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections;

/// Canonical inbound event, one per invocation.
///
/// The shape follows the API Gateway proxy event: a JSON body for create and
/// update, path parameters carrying the record key for read and delete, and
/// query string parameters carrying `cursor` and `limit` for list. Hosting
/// adapters for other trigger shapes decode into this one contract.
///
/// ```rust
/// use dynamodb_item_service::router::event;
///
/// let request: event::Request = serde_json::from_str(
///     r#"{"pathParameters": {"sku": "sku-1"}}"#
/// ).unwrap();
/// assert_eq!(request.path_parameter("sku").unwrap(), "sku-1");
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Request {
    /// The JSON-encoded request body, when the operation carries one.
    pub body: Option<String>,
    /// Path parameters, holding the record key for read and delete.
    pub path_parameters: Option<collections::HashMap<String, String>>,
    /// Query string parameters, holding `cursor` and `limit` for list.
    pub query_string_parameters: Option<collections::HashMap<String, String>>,
}

impl Request {
    /// Decodes the request body into `T`.
    ///
    /// An absent or malformed body is a validation failure.
    pub fn body_object<T: DeserializeOwned>(&self) -> error::Result<T> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| error::Error::validation("request body is required"))?;
        serde_json::from_str(body)
            .map_err(|err| error::Error::Validation(format!("malformed request body: {err}")))
    }

    /// Returns the path parameter `name`, or a validation failure when the
    /// event carries none.
    pub fn path_parameter(&self, name: &str) -> error::Result<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(name))
            .map(String::as_str)
            .ok_or_else(|| error::Error::Validation(format!("path parameter `{name}` is required")))
    }

    /// Returns the query string parameter `name`, if present.
    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(name))
            .map(String::as_str)
    }
}

/// Structured outbound response, one per invocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The HTTP status code.
    pub status_code: u16,
    /// Response headers: JSON content type plus permissive CORS.
    pub headers: collections::BTreeMap<String, String>,
    /// The JSON-encoded response body.
    pub body: String,
    /// Always `false`; bodies are JSON text.
    pub is_base64_encoded: bool,
}

impl Response {
    /// Builds a success response with `object` JSON-encoded as the body.
    ///
    /// If encoding fails, the response degrades into the corresponding error
    /// response instead.
    pub fn with_object<T: Serialize>(object: &T, status_code: u16) -> Self {
        match serde_json::to_string(object) {
            Ok(body) => Self {
                status_code,
                headers: Self::default_headers(),
                body,
                is_base64_encoded: false,
            },
            Err(err) => Self::from_error(&error::Error::database(err)),
        }
    }

    /// Builds a failure response carrying `{"message": "<description>"}` with
    /// the status code of [`error::Error::status_code`].
    pub fn from_error(error: &error::Error) -> Self {
        let body = serde_json::json!({ "message": error.to_string() }).to_string();
        Self {
            status_code: error.status_code(),
            headers: Self::default_headers(),
            body,
            is_base64_encoded: false,
        }
    }

    /// The headers attached to every response.
    pub fn default_headers() -> collections::BTreeMap<String, String> {
        collections::BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Methods".to_string(),
                "OPTIONS,GET,POST,PUT,DELETE".to_string(),
            ),
            (
                "Access-Control-Allow-Credentials".to_string(),
                "true".to_string(),
            ),
        ])
    }
}
