use crate::message::{ClientEvent, ConnectionId, RoomId, ServerEvent};
use crate::registry::RoomRegistry;

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Upper bound on retained strokes per canvas, oldest evicted first.
    /// `None` keeps the full history.
    pub max_strokes_per_canvas: Option<usize>,
}

/// One message the transport should deliver, with its concrete audience
/// already resolved.
#[derive(Debug, Clone)]
pub struct Outbound {
    pub to: Vec<ConnectionId>,
    pub event: ServerEvent,
}

impl Outbound {
    fn only(to: ConnectionId, event: ServerEvent) -> Self {
        Self {
            to: vec![to],
            event,
        }
    }
}

/// The single authority over room state.
///
/// Every inbound event is applied to completion (state mutation plus
/// audience computation) before the next one; the surrounding transport
/// must funnel events through one queue. All operations are total:
/// unknown rooms and canvases are created lazily by mutations and
/// silently skipped by clear/delete.
pub struct SyncEngine {
    registry: RoomRegistry,
    config: EngineConfig,
}

impl SyncEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            registry: RoomRegistry::new(),
            config,
        }
    }

    pub fn connect(&mut self) -> ConnectionId {
        self.registry.create_connection()
    }

    /// Transport-level disconnect. Membership removal only; an emptied room
    /// is reclaimed with all its canvases. Nothing is broadcast.
    pub fn disconnect(&mut self, from: ConnectionId) {
        self.registry.leave(from);
    }

    pub fn handle_event(&mut self, from: ConnectionId, event: ClientEvent) -> Vec<Outbound> {
        match event {
            ClientEvent::JoinRoom(room_id) => {
                self.registry.join(from, &room_id);
                let snapshot = self.registry.room_snapshot(&room_id);
                vec![Outbound::only(
                    from,
                    ServerEvent::LoadRoomCanvases(snapshot),
                )]
            }
            ClientEvent::Draw {
                room_id,
                canvas_id,
                drawing,
            } => {
                let cap = self.config.max_strokes_per_canvas;
                self.registry
                    .ensure_room(&room_id)
                    .ensure_canvas(&canvas_id)
                    .append_stroke(drawing.clone(), cap);
                vec![Outbound {
                    to: self.room_except(&room_id, from),
                    event: ServerEvent::Draw { canvas_id, drawing },
                }]
            }
            ClientEvent::TextUpdate {
                room_id,
                canvas_id,
                text_areas,
            } => {
                self.registry
                    .ensure_room(&room_id)
                    .ensure_canvas(&canvas_id)
                    .replace_text_areas(text_areas.clone());
                vec![Outbound {
                    to: self.room_except(&room_id, from),
                    event: ServerEvent::TextUpdate {
                        canvas_id,
                        text_areas,
                    },
                }]
            }
            ClientEvent::NewCanvas { room_id, id } => {
                self.registry.ensure_room(&room_id).ensure_canvas(&id);
                vec![Outbound {
                    to: self.whole_room(&room_id),
                    event: ServerEvent::NewCanvas { id },
                }]
            }
            ClientEvent::ClearCanvas { room_id, canvas_id } => {
                if let Some(canvas) = self
                    .registry
                    .room_mut(&room_id)
                    .and_then(|room| room.canvas_mut(&canvas_id))
                {
                    canvas.clear();
                }
                vec![Outbound {
                    to: self.room_except(&room_id, from),
                    event: ServerEvent::ClearCanvas { canvas_id },
                }]
            }
            ClientEvent::DeleteCanvas { room_id, canvas_id } => {
                if let Some(room) = self.registry.room_mut(&room_id) {
                    room.delete_canvas(&canvas_id);
                }
                vec![Outbound {
                    to: self.whole_room(&room_id),
                    event: ServerEvent::DeleteCanvas(canvas_id),
                }]
            }
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    fn whole_room(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.registry.members(room_id).to_vec()
    }

    fn room_except(&self, room_id: &RoomId, except: ConnectionId) -> Vec<ConnectionId> {
        self.registry
            .members(room_id)
            .iter()
            .copied()
            .filter(|c| *c != except)
            .collect()
    }
}
