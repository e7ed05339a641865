//! Domain DTOs for the Tana add-node API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Target node under which tag and field definitions are created.
pub const SCHEMA_NODE_ID: &str = "SCHEMA";

/// Template every tag definition is tagged with.
pub const CORE_TEMPLATE_ID: &str = "SYS_T01";

/// Template every field (attribute) definition is tagged with.
pub const ATTR_DEF_TEMPLATE_ID: &str = "SYS_T02";

/// Reference to an existing template or tag node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuperTag {
    pub id: String,
}

impl SuperTag {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

/// A node to be created. `supertags` is left out of the JSON when empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlainNode {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertags: Vec<SuperTag>,
}

impl PlainNode {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            supertags: Vec::new(),
        }
    }

    pub fn with_supertag(mut self, id: &str) -> Self {
        self.supertags.push(SuperTag::new(id));
        self
    }
}

/// A name/description pair attached to an existing node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub description: String,
}

impl Field {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// A node as reported back by the server after a mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedNode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "nodeId")]
    pub node_id: String,
}

/// Success body of the add-node endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToNodeResponse {
    pub children: Vec<CreatedNode>,
}
