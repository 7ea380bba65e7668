use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::domain::error::{AppError, Result};
use crate::domain::selection::coerce_count;
use crate::domain::{NameList, SelectionRequest, SelectionResult};

/// Body of `POST /generate` before any checks. Both fields are loosely typed
/// so each problem can be reported with its own message. `None` means the
/// key was absent; a present `null` stays `Some(Value::Null)`.
#[derive(Debug, Default)]
pub struct GeneratePayload {
    pub names: Option<Value>,
    pub count: Option<Value>,
}

/// `GeneratePayload` once the names have the right shape.
#[derive(Debug, Validate)]
pub struct GenerateRequest {
    #[validate(length(min = 1, message = "Names list is empty or invalid"))]
    pub names: Vec<String>,
    pub count: Value,
}

impl GeneratePayload {
    /// Only a JSON object is a request body; arrays and scalars are rejected.
    pub fn from_json(body: Value) -> Result<Self> {
        let Value::Object(mut fields) = body else {
            return Err(invalid_request());
        };

        Ok(Self {
            names: fields.remove("names"),
            count: fields.remove("count"),
        })
    }

    pub fn into_request(self) -> Result<GenerateRequest> {
        let (Some(names), Some(count)) = (self.names, self.count) else {
            return Err(invalid_request());
        };

        let names: Vec<String> = serde_json::from_value(names).map_err(|_| invalid_names())?;
        let request = GenerateRequest { names, count };
        request.validate().map_err(|_| invalid_names())?;

        Ok(request)
    }
}

impl GenerateRequest {
    pub fn into_selection(self) -> Result<SelectionRequest> {
        let count = coerce_count(&self.count)?;
        SelectionRequest::new(self.names, count)
    }
}

fn invalid_request() -> AppError {
    AppError::MissingInput("Invalid request data".to_string())
}

fn invalid_names() -> AppError {
    AppError::MissingInput("Names list is empty or invalid".to_string())
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub total_names: usize,
    pub names: NameList,
}

impl From<NameList> for UploadResponse {
    fn from(names: NameList) -> Self {
        Self {
            success: true,
            total_names: names.len(),
            names,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub selected_names: SelectionResult,
}

impl From<SelectionResult> for GenerateResponse {
    fn from(selected_names: SelectionResult) -> Self {
        Self {
            success: true,
            selected_names,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
