//! Request bodies accepted by the add-node endpoint.
//!
//! Each operation gets its own variant so the exact JSON key set is fixed by
//! the type rather than assembled per call.

use serde::Serialize;

use crate::error::ApiError;
use crate::types::{Field, PlainNode};

/// `{"targetNodeId", "nodes": [...]}` with full node descriptors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodes {
    pub target_node_id: String,
    pub nodes: Vec<PlainNode>,
}

/// `{"targetNodeId", "setName"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetName {
    pub target_node_id: String,
    pub set_name: String,
}

/// `{"targetNodeId", "nodes": [{"name", "description"}]}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFields {
    pub target_node_id: String,
    pub nodes: Vec<Field>,
}

/// One request body per operation kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    CreateNodes(CreateNodes),
    SetName(SetName),
    AddFields(AddFields),
}

impl Payload {
    pub fn target_node_id(&self) -> &str {
        match self {
            Payload::CreateNodes(p) => &p.target_node_id,
            Payload::SetName(p) => &p.target_node_id,
            Payload::AddFields(p) => &p.target_node_id,
        }
    }

    pub fn to_json(&self) -> Result<String, ApiError> {
        serde_json::to_string(self).map_err(|e| ApiError::Serialization(e.to_string()))
    }
}
