//! User-song like network
//!
//! Turns [`LikeEdge`] rows into a node/edge document that a force-directed
//! network widget can draw directly. Users and songs get separate id
//! namespaces (`u<id>`, `s<id>`) so a user and a song with the same name
//! never merge.

use std::collections::HashSet;

use serde::Serialize;

use crate::db::repos::LikeEdge;

const USER_COLOR: &str = "#0CECA1";
const SONG_COLOR: &str = "#8980DF";
const USER_SIZE: u32 = 25;
const SONG_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    User,
    Song,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    /// Hover text
    pub title: String,
    pub color: &'static str,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Undirected bipartite graph: users on one side, liked songs on the other.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LikeGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl LikeGraph {
    /// Build the graph in row order. The first row seen for a song decides
    /// the artist in its hover text.
    pub fn from_edges(rows: &[LikeEdge]) -> Self {
        let mut graph = Self::default();
        let mut seen_nodes = HashSet::new();
        let mut seen_edges = HashSet::new();

        for row in rows {
            let user_id = format!("u{}", row.user_id);
            let song_id = format!("s{}", row.song_id);

            if seen_nodes.insert(user_id.clone()) {
                graph.nodes.push(GraphNode {
                    id: user_id.clone(),
                    kind: NodeKind::User,
                    label: row.username.clone(),
                    title: format!("User: {}", row.username),
                    color: USER_COLOR,
                    size: USER_SIZE,
                });
            }

            if seen_nodes.insert(song_id.clone()) {
                let artist = row.artist_name.as_deref().unwrap_or("Unknown");
                graph.nodes.push(GraphNode {
                    id: song_id.clone(),
                    kind: NodeKind::Song,
                    label: row.song_name.clone(),
                    title: format!("Song: {}\nArtist: {}", row.song_name, artist),
                    color: SONG_COLOR,
                    size: SONG_SIZE,
                });
            }

            if seen_edges.insert((row.user_id, row.song_id)) {
                graph.edges.push(GraphEdge {
                    from: user_id,
                    to: song_id,
                });
            }
        }

        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
