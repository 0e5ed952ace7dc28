use crate::admin::{AdminCommand, RoomDescription};
use crate::server::{ServerCommand, ServerTx};
use actix_web::error;
use actix_web::web;
use actix_web::Responder;
use actix_web::Result;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "admin-index.html")]
pub struct AdminIndexTemplate {
    rooms: Vec<RoomDescription>,
}

pub fn configure_admin_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/admin/").route(web::get().to(admin_index)));
}

pub async fn admin_index(srv_tx: web::Data<ServerTx>) -> Result<impl Responder> {
    let (tx, rx) = tokio::sync::oneshot::channel::<Vec<RoomDescription>>();

    srv_tx
        .get_ref()
        .clone()
        .send(ServerCommand::AdminCommand(AdminCommand::ListRooms { tx }))
        .await
        .map_err(|_| error::ErrorInternalServerError("Internal Server Error"))?;

    let rooms = rx
        .await
        .map_err(|_| error::ErrorInternalServerError("Receiver await error"))?;

    Ok(AdminIndexTemplate { rooms })
}
