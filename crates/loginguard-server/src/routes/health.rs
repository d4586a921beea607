use actix_web::{web, HttpResponse};

/// Liveness probe. The original returns the literal body `test`; callers
/// poll this route rather than `/health` to decide the gate is up.
async fn hello_world() -> HttpResponse {
    HttpResponse::Ok().body("test")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(hello_world));
}
