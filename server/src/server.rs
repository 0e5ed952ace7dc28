use tokio::sync::mpsc::{channel, Sender};

use system::SyncEngine;

use crate::admin::{AdminCommand, RoomDescription};
use crate::connection::{ConnectionCommand, ConnectionEvent};
use crate::connection_tx_storage::ConnectionTxStorage;

#[derive(Debug)]
pub enum ServerCommand {
    ConnectionCommand(ConnectionCommand),
    AdminCommand(AdminCommand),
}

pub type ServerTx = Sender<ServerCommand>;

struct Server {
    engine: SyncEngine,
    connections: ConnectionTxStorage,
}

impl Server {
    fn new(engine: SyncEngine) -> Self {
        Self {
            engine,
            connections: ConnectionTxStorage::new(),
        }
    }

    async fn handle_command(&mut self, command: ServerCommand) {
        match command {
            ServerCommand::ConnectionCommand(command) => {
                self.handle_connection_command(command).await
            }
            ServerCommand::AdminCommand(command) => self.handle_admin_command(command),
        }
    }

    async fn handle_connection_command(&mut self, command: ConnectionCommand) {
        match command {
            ConnectionCommand::Connect { tx } => {
                let connection_id = self.engine.connect();
                self.connections.insert(connection_id, tx);
                self.connections
                    .send(&connection_id, ConnectionEvent::Connected { connection_id })
                    .await;
            }
            ConnectionCommand::Disconnect { from } => {
                self.engine.disconnect(from);
                if let Some(mut tx) = self.connections.remove(&from) {
                    let _ = tx
                        .send(ConnectionEvent::Disconnected {
                            connection_id: from,
                        })
                        .await;
                }
            }
            ConnectionCommand::ClientEvent { from, event } => {
                let outbounds = self.engine.handle_event(from, event);
                for outbound in outbounds {
                    for to in &outbound.to {
                        self.connections
                            .send(to, ConnectionEvent::ServerEvent(outbound.event.clone()))
                            .await;
                    }
                }
            }
        }
    }

    fn handle_admin_command(&mut self, command: AdminCommand) {
        match command {
            AdminCommand::ListRooms { tx } => {
                let rooms = self
                    .engine
                    .registry()
                    .rooms()
                    .map(|(room_id, room)| RoomDescription {
                        room_id: room_id.clone(),
                        connections: room.connections().len(),
                        canvases: room.canvas_count(),
                    })
                    .collect();
                if tx.send(rooms).is_err() {
                    log::warn!("Admin requester went away before the room list was sent");
                }
            }
        }
    }
}

pub fn spawn_server(engine: SyncEngine) -> ServerTx {
    let (srv_tx, mut srv_rx) = channel::<ServerCommand>(16);

    tokio::spawn(async move {
        let mut server = Box::new(Server::new(engine));

        while let Some(command) = srv_rx.recv().await {
            server.handle_command(command).await;
        }
    });

    return srv_tx;
}
