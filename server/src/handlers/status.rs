use actix_web::{web, HttpResponse, Responder};

pub fn configure_status_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(get)));
}

async fn get() -> impl Responder {
    HttpResponse::Ok().body("running")
}
