use serde::{Deserialize, Serialize};

pub type ConnectionId = u16;
pub type RoomId = String;
pub type CanvasId = String;

/// Client-authored blobs. The server stores and relays them verbatim and
/// never looks inside.
pub type StrokePayload = serde_json::Value;
pub type TextAreaPayload = serde_json::Value;

/// One inbound frame: `{"event": "...", "data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinRoom(RoomId),
    #[serde(rename_all = "camelCase")]
    Draw {
        room_id: RoomId,
        canvas_id: CanvasId,
        drawing: StrokePayload,
    },
    #[serde(rename_all = "camelCase")]
    TextUpdate {
        room_id: RoomId,
        canvas_id: CanvasId,
        text_areas: Vec<TextAreaPayload>,
    },
    #[serde(rename_all = "camelCase")]
    NewCanvas { room_id: RoomId, id: CanvasId },
    #[serde(rename_all = "camelCase")]
    ClearCanvas { room_id: RoomId, canvas_id: CanvasId },
    #[serde(rename_all = "camelCase")]
    DeleteCanvas { room_id: RoomId, canvas_id: CanvasId },
}

/// One outbound frame, same shape as [`ClientEvent`].
///
/// `NewCanvas` and `DeleteCanvas` go to the whole room, originator included,
/// so every client converges on the same canvas list from the same event.
/// The rest go to the room minus the sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    LoadRoomCanvases(Vec<CanvasSnapshot>),
    #[serde(rename_all = "camelCase")]
    Draw {
        canvas_id: CanvasId,
        drawing: StrokePayload,
    },
    #[serde(rename_all = "camelCase")]
    TextUpdate {
        canvas_id: CanvasId,
        text_areas: Vec<TextAreaPayload>,
    },
    NewCanvas { id: CanvasId },
    #[serde(rename_all = "camelCase")]
    ClearCanvas { canvas_id: CanvasId },
    DeleteCanvas(CanvasId),
}

/// Deep, point-in-time copy of one canvas, as delivered to a joiner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSnapshot {
    pub id: CanvasId,
    pub drawings: Vec<StrokePayload>,
    pub text_areas: Vec<TextAreaPayload>,
}
