//! Cost-center document validator
//!
//! Turns arbitrary JSON into typed `CostCenter` records or fails with the
//! first problem found, pinned to the offending record index. Errors are not
//! collected; validation stops at the first bad record.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::models::{CostCenter, CostCenterState, Resource, ResourceKind};

/// Parser for cost-center documents (uploaded files or API response bodies)
#[derive(Debug, Default)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and validate a document from disk
    pub async fn parse_path(&self, path: &Path) -> Result<Vec<CostCenter>, CoreError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CoreError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        self.parse_str(&content)
    }

    /// Validate a document held in memory
    pub fn parse_str(&self, input: &str) -> Result<Vec<CostCenter>, CoreError> {
        let value: Value = serde_json::from_str(input).map_err(|e| CoreError::JsonSyntax {
            message: e.to_string(),
            source: e,
        })?;

        self.validate(&value)
    }

    /// Validate an already-parsed JSON value
    ///
    /// Accepted shapes: a bare array of records, or an object carrying the
    /// records under `costCenters` or `data`. Exactly one shape is
    /// recognized per document.
    pub fn validate(&self, value: &Value) -> Result<Vec<CostCenter>, CoreError> {
        let records = extract_records(value)?;

        let mut cost_centers = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            cost_centers.push(validate_record(index, record)?);
        }

        debug!(count = cost_centers.len(), "Validated cost-center document");
        Ok(cost_centers)
    }
}

/// Locate the record array inside one of the recognized document shapes
fn extract_records(value: &Value) -> Result<&Vec<Value>, CoreError> {
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(map) => map
            .get("costCenters")
            .or_else(|| map.get("data"))
            .and_then(|v| v.as_array())
            .ok_or_else(invalid_structure),
        _ => Err(invalid_structure()),
    }
}

fn invalid_structure() -> CoreError {
    CoreError::invalid_structure(
        "invalid structure: expected an array of cost centers, \
         or an object with a `costCenters` or `data` array",
    )
}

/// Validate a single record into a `CostCenter`
fn validate_record(index: usize, record: &Value) -> Result<CostCenter, CoreError> {
    let obj = record
        .as_object()
        .ok_or_else(|| CoreError::invalid_record(index, "record is not an object"))?;

    let id = require_string(index, obj, "id")?;
    let name = require_string(index, obj, "name")?;
    let raw_state = require_string(index, obj, "state")?;

    let state = CostCenterState::parse(&raw_state);
    if let CostCenterState::Other(ref raw) = state {
        warn!(index, state = %raw, "Unrecognized cost center state");
    }

    let raw_resources = obj
        .get("resources")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            CoreError::invalid_record(index, "missing or non-array field `resources`")
        })?;

    let mut resources = Vec::with_capacity(raw_resources.len());
    for raw in raw_resources {
        resources.push(validate_resource(index, raw)?);
    }

    Ok(CostCenter {
        id,
        name,
        state,
        resources,
    })
}

fn validate_resource(index: usize, raw: &Value) -> Result<Resource, CoreError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| CoreError::invalid_record(index, "resource entry is not an object"))?;

    let raw_kind = obj
        .get("type")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::invalid_record(index, "resource missing string field `type`"))?;

    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CoreError::invalid_record(index, "resource missing string field `name`"))?
        .to_string();

    let kind = ResourceKind::parse(raw_kind);
    if let ResourceKind::Other(ref raw) = kind {
        warn!(index, kind = %raw, "Unrecognized resource type");
    }

    Ok(Resource { kind, name })
}

/// Require a non-empty string field on a record
fn require_string(
    index: usize,
    obj: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<String, CoreError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            CoreError::invalid_record(
                index,
                format!("missing or empty required field `{}`", field),
            )
        })
}
