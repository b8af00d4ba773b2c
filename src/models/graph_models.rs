use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::infrastructure::SocialGraph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub node_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub labels: Vec<String>,
}

/// Read-only node/edge lists handed to a drawing collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphSnapshot {
    /// Users then posts as nodes; relationship, posted, viewed and commented edges.
    /// Viewed and commented edges appear once per distinct user.
    pub fn from_graph(graph: &SocialGraph) -> Self {
        let mut snapshot = GraphSnapshot::default();

        for user in graph.users() {
            snapshot.nodes.push(GraphNode {
                id: user.id.clone(),
                label: user.id.clone(),
                node_type: "user".to_string(),
            });
        }

        for relationship in graph.relationships() {
            snapshot.edges.push(GraphEdge {
                source: relationship.from.clone(),
                target: relationship.to.clone(),
                labels: relationship.labels.clone(),
            });
        }

        for post in graph.posts() {
            let key = post.id.node_key();
            snapshot.nodes.push(GraphNode {
                id: key.clone(),
                label: post.content.clone(),
                node_type: "post".to_string(),
            });
            snapshot.push_edge(&post.author, &key, "posted");

            let mut viewers = HashSet::new();
            for view in &post.views {
                if viewers.insert(view.viewer.as_str()) {
                    snapshot.push_edge(&view.viewer, &key, "viewed");
                }
            }

            let mut commenters = HashSet::new();
            for comment in post.comments.iter().filter_map(|&id| graph.comment(id)) {
                if commenters.insert(comment.author.as_str()) {
                    snapshot.push_edge(&comment.author, &key, "commented");
                }
            }
        }

        snapshot
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn push_edge(&mut self, source: &str, target: &str, label: &str) {
        self.edges.push(GraphEdge {
            source: source.to_string(),
            target: target.to_string(),
            labels: vec![label.to_string()],
        });
    }
}
