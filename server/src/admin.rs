use system::RoomId;
use tokio::sync::oneshot::Sender;

#[derive(Debug)]
pub enum AdminCommand {
    ListRooms {
        tx: Sender<Vec<RoomDescription>>,
    },
}

#[derive(Debug)]
pub struct RoomDescription {
    pub room_id: RoomId,
    pub connections: usize,
    pub canvases: usize,
}
