//! Request builder, response parser and operations for the add-node API.
//!
//! # Design
//! `TanaClient` holds an immutable `ClientConfig` and a `Transport`, and
//! carries no mutable state between calls. Every operation is split into a
//! `build_*` step that produces a `Payload`, a shared `build_request` that
//! encodes it, and `parse_children` that consumes the `HttpResponse`. Only
//! `send` touches the transport, so build and parse stay deterministic.

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::payload::{AddFields, CreateNodes, Payload, SetName};
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    AddToNodeResponse, CreatedNode, Field, PlainNode, SuperTag, ATTR_DEF_TEMPLATE_ID,
    CORE_TEMPLATE_ID, SCHEMA_NODE_ID,
};

/// Synchronous client for the Tana add-node endpoint.
#[derive(Debug, Clone)]
pub struct TanaClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl TanaClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T> TanaClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Tag every field as an attribute definition and batch them under the
    /// schema root.
    pub fn build_create_field_definitions(&self, fields: &[PlainNode]) -> Payload {
        let nodes = fields
            .iter()
            .cloned()
            .map(|mut field| {
                field.supertags.push(SuperTag::new(ATTR_DEF_TEMPLATE_ID));
                field
            })
            .collect();
        Payload::CreateNodes(CreateNodes {
            target_node_id: SCHEMA_NODE_ID.to_string(),
            nodes,
        })
    }

    pub fn build_create_tag_definition(&self, node: &PlainNode) -> Payload {
        let mut node = node.clone();
        node.supertags.push(SuperTag::new(CORE_TEMPLATE_ID));
        Payload::CreateNodes(CreateNodes {
            target_node_id: SCHEMA_NODE_ID.to_string(),
            nodes: vec![node],
        })
    }

    pub fn build_create_node(&self, node: &PlainNode, target_node_id: &str) -> Payload {
        Payload::CreateNodes(CreateNodes {
            target_node_id: target_node_id.to_string(),
            nodes: vec![node.clone()],
        })
    }

    pub fn build_set_node_name(&self, new_name: &str, target_node_id: &str) -> Payload {
        Payload::SetName(SetName {
            target_node_id: target_node_id.to_string(),
            set_name: new_name.to_string(),
        })
    }

    pub fn build_add_field(&self, field: &Field, target_node_id: &str) -> Payload {
        Payload::AddFields(AddFields {
            target_node_id: target_node_id.to_string(),
            nodes: vec![field.clone()],
        })
    }

    /// Encode `payload` as an authenticated JSON POST to the configured endpoint.
    pub fn build_request(&self, payload: &Payload) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            url: self.config.endpoint().to_string(),
            headers: vec![
                (
                    "authorization".to_string(),
                    format!("Bearer {}", self.config.token()),
                ),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: payload.to_json()?,
        })
    }

    pub fn parse_children(&self, response: HttpResponse) -> Result<Vec<CreatedNode>, ApiError> {
        check_status(&response)?;
        let parsed: AddToNodeResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(parsed.children)
    }
}

impl<T: Transport> TanaClient<T> {
    /// Create field definitions under the schema root. Result order follows
    /// the server response.
    pub fn create_field_definitions(
        &self,
        fields: &[PlainNode],
    ) -> Result<Vec<CreatedNode>, ApiError> {
        self.send(&self.build_create_field_definitions(fields))
    }

    /// Create a tag definition under the schema root and return its node id.
    pub fn create_tag_definition(&self, node: &PlainNode) -> Result<String, ApiError> {
        let created = first_child(self.send(&self.build_create_tag_definition(node))?)?;
        Ok(created.node_id)
    }

    pub fn create_node(
        &self,
        node: &PlainNode,
        target_node_id: &str,
    ) -> Result<CreatedNode, ApiError> {
        first_child(self.send(&self.build_create_node(node, target_node_id))?)
    }

    pub fn set_node_name(
        &self,
        new_name: &str,
        target_node_id: &str,
    ) -> Result<CreatedNode, ApiError> {
        first_child(self.send(&self.build_set_node_name(new_name, target_node_id))?)
    }

    pub fn add_field(&self, field: &Field, target_node_id: &str) -> Result<CreatedNode, ApiError> {
        first_child(self.send(&self.build_add_field(field, target_node_id))?)
    }

    /// One full round-trip: encode, execute, decode.
    pub fn send(&self, payload: &Payload) -> Result<Vec<CreatedNode>, ApiError> {
        let request = self.build_request(payload)?;
        debug!(
            target_node_id = payload.target_node_id(),
            endpoint = %request.url,
            "sending add-node request"
        );
        let children = self.parse_children(self.transport.execute(request)?)?;
        debug!(count = children.len(), "add-node request succeeded");
        Ok(children)
    }
}

/// Anything other than 200 or 201 is an error carrying the raw body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if matches!(response.status, 200 | 201) {
        return Ok(());
    }
    warn!(status = response.status, "add-node request rejected");
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn first_child(children: Vec<CreatedNode>) -> Result<CreatedNode, ApiError> {
    children.into_iter().next().ok_or(ApiError::EmptyResponse)
}
