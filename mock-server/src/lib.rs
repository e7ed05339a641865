use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const ROUTE: &str = "/addToNodeV2";

/// Nodes that exist before any request is made.
const SEEDED_NODES: [&str; 3] = ["SCHEMA", "SYS_T01", "SYS_T02"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuperTag {
    pub id: String,
}

#[derive(Deserialize)]
pub struct NodeInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub supertags: Vec<SuperTag>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToNode {
    pub target_node_id: String,
    #[serde(default)]
    pub nodes: Vec<NodeInput>,
    pub set_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub name: String,
    pub description: String,
    pub node_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Children {
    pub children: Vec<Child>,
}

#[derive(Clone, Debug)]
pub struct StoredNode {
    pub name: String,
    pub description: String,
    pub parent: Option<String>,
    pub supertags: Vec<SuperTag>,
}

pub type Db = Arc<RwLock<HashMap<String, StoredNode>>>;

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    db: Db,
}

pub fn app(token: &str) -> Router {
    let db: HashMap<String, StoredNode> = SEEDED_NODES
        .iter()
        .map(|id| {
            let node = StoredNode {
                name: id.to_string(),
                description: String::new(),
                parent: None,
                supertags: Vec::new(),
            };
            (id.to_string(), node)
        })
        .collect();
    let state = AppState {
        token: Arc::from(token),
        db: Arc::new(RwLock::new(db)),
    };
    Router::new().route(ROUTE, post(add_to_node)).with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

type Rejection = (StatusCode, String);

fn bad_request(message: String) -> Rejection {
    (StatusCode::BAD_REQUEST, message)
}

async fn add_to_node(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<AddToNode>,
) -> Result<Json<Children>, Rejection> {
    let expected = format!("Bearer {}", state.token);
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return Err((StatusCode::UNAUTHORIZED, "unauthorized".to_string()));
    }

    info!(target_node_id = %input.target_node_id, nodes = input.nodes.len(), "add-node request");

    let mut db = state.db.write().await;
    if !db.contains_key(&input.target_node_id) {
        return Err(bad_request(format!(
            "unknown target node: {}",
            input.target_node_id
        )));
    }

    if let Some(new_name) = input.set_name {
        let node = db
            .get_mut(&input.target_node_id)
            .ok_or_else(|| bad_request(format!("unknown target node: {}", input.target_node_id)))?;
        node.name = new_name;
        let child = Child {
            name: node.name.clone(),
            description: node.description.clone(),
            node_id: input.target_node_id,
        };
        return Ok(Json(Children {
            children: vec![child],
        }));
    }

    if input.nodes.is_empty() {
        return Err(bad_request("no nodes supplied".to_string()));
    }
    // Validate the whole batch before storing anything.
    for tag in input.nodes.iter().flat_map(|n| &n.supertags) {
        if !db.contains_key(&tag.id) {
            return Err(bad_request(format!("unknown supertag: {}", tag.id)));
        }
    }

    let mut children = Vec::with_capacity(input.nodes.len());
    for node in input.nodes {
        let node_id = Uuid::new_v4().simple().to_string();
        children.push(Child {
            name: node.name.clone(),
            description: node.description.clone(),
            node_id: node_id.clone(),
        });
        db.insert(
            node_id,
            StoredNode {
                name: node.name,
                description: node.description,
                parent: Some(input.target_node_id.clone()),
                supertags: node.supertags,
            },
        );
    }
    Ok(Json(Children { children }))
}
