use indexmap::IndexMap;

use crate::canvas::CanvasState;
use crate::message::{CanvasId, CanvasSnapshot, ConnectionId};

/// One isolated collaboration session: the canvases it contains and the
/// connections currently joined to it.
///
/// Canvases keep insertion order so a joiner's snapshot lists them
/// deterministically. Membership has set semantics; the `Vec` keeps
/// broadcast order stable.
pub struct Room {
    canvases: IndexMap<CanvasId, CanvasState>,
    connections: Vec<ConnectionId>,
}

impl Room {
    pub fn new() -> Self {
        Self {
            canvases: IndexMap::new(),
            connections: Vec::new(),
        }
    }

    /// Get-or-create. Creation is idempotent, never an error.
    pub fn ensure_canvas(&mut self, canvas_id: &CanvasId) -> &mut CanvasState {
        self.canvases
            .entry(canvas_id.clone())
            .or_insert_with(CanvasState::new)
    }

    pub fn canvas_mut(&mut self, canvas_id: &CanvasId) -> Option<&mut CanvasState> {
        self.canvases.get_mut(canvas_id)
    }

    /// Removes the entry entirely, stroke history included. Returns whether
    /// the canvas was present.
    pub fn delete_canvas(&mut self, canvas_id: &CanvasId) -> bool {
        self.canvases.shift_remove(canvas_id).is_some()
    }

    pub fn canvas_count(&self) -> usize {
        self.canvases.len()
    }

    pub fn add_connection(&mut self, connection_id: ConnectionId) {
        if !self.connections.contains(&connection_id) {
            self.connections.push(connection_id);
        }
    }

    pub fn remove_connection(&mut self, connection_id: ConnectionId) {
        self.connections.retain(|c| *c != connection_id);
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Deep copy of every canvas, in insertion order.
    pub fn snapshot(&self) -> Vec<CanvasSnapshot> {
        self.canvases
            .iter()
            .map(|(id, canvas)| canvas.snapshot(id))
            .collect()
    }
}
