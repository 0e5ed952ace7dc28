use actix_cors::Cors;
use actix_web::{App, HttpServer};

use server::handlers::root;
use server::server::spawn_server;
use system::{EngineConfig, SyncEngine};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let engine = SyncEngine::new(EngineConfig::default());
    let srv_tx = spawn_server(engine);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(4000);

    log::info!("Server is running on {}", port);
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"]),
            )
            .data(srv_tx.clone())
            .configure(root)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
