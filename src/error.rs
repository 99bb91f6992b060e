use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingParam,
    InvalidParam,
    NotFound,
    ServerError,
}

/// Error descriptor placed in the body of every failed response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Missing param: {param}")]
    MissingParam { param: String },
    #[error("Invalid param: {param}")]
    InvalidParam { param: String },
    #[error("Not found: {id}")]
    NotFound { id: String },
    #[error("Internal server error")]
    ServerError { stack: String },
}

impl ApiError {
    pub fn missing_param(param: &str) -> Self {
        ApiError::MissingParam {
            param: param.to_owned(),
        }
    }

    pub fn invalid_param(param: &str) -> Self {
        ApiError::InvalidParam {
            param: param.to_owned(),
        }
    }

    pub fn not_found(id: &str) -> Self {
        ApiError::NotFound { id: id.to_owned() }
    }

    /// Keeps only the diagnostic report of `err`, never the error value itself.
    pub fn server_error(err: &anyhow::Error) -> Self {
        ApiError::ServerError {
            stack: format!("{:?}", err),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MissingParam { .. } => ErrorKind::MissingParam,
            ApiError::InvalidParam { .. } => ErrorKind::InvalidParam,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::ServerError { .. } => ErrorKind::ServerError,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::MissingParam | ErrorKind::InvalidParam => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::ServerError => 500,
        }
    }
}

impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiError", 3)?;
        state.serialize_field("error", &self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        if let ApiError::ServerError { stack } = self {
            state.serialize_field("stack", stack)?;
        }
        state.end()
    }
}
