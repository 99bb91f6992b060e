//! Transport-neutral request/response envelope and the helpers that build
//! every response a controller returns.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Request {
    #[serde(default)]
    pub body: Map<String, Value>,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl Request {
    pub fn with_body(body: Map<String, Value>) -> Self {
        Request {
            body,
            ..Request::default()
        }
    }

    /// Anything but a JSON object becomes an empty body.
    pub fn from_json(body: Value) -> Self {
        match body {
            Value::Object(body) => Request::with_body(body),
            _ => Request::default(),
        }
    }

    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Whether the body field is present and truthy.
    pub fn has_field(&self, name: &str) -> bool {
        self.body.get(name).map_or(false, is_truthy)
    }

    /// The body field, if it is a string.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.body.get(name).and_then(Value::as_str)
    }

    /// The path param, if present and non-empty.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Value,
}

fn respond<T: Serialize>(status_code: u16, payload: &T) -> Response {
    match serde_json::to_value(payload) {
        Ok(body) => Response { status_code, body },
        Err(err) => server_error(&anyhow::Error::from(err)),
    }
}

pub fn bad_request(error: ApiError) -> Response {
    respond(400, &error)
}

pub fn created<T: Serialize>(payload: &T) -> Response {
    respond(201, payload)
}

pub fn ok<T: Serialize>(payload: &T) -> Response {
    respond(200, payload)
}

pub fn not_found(id: &str) -> Response {
    respond(404, &ApiError::not_found(id))
}

pub fn server_error(err: &anyhow::Error) -> Response {
    let descriptor = ApiError::server_error(err);
    Response {
        status_code: 500,
        body: serde_json::to_value(&descriptor).unwrap_or(Value::Null),
    }
}
