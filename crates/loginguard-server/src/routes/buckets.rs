use actix_web::{web, HttpResponse};
use loginguard_types::{OutputJson, TagRequest};

use crate::state::AppState;

async fn clear_by_login(state: web::Data<AppState>, body: web::Json<TagRequest>) -> HttpResponse {
    match state.engine.reset_login_counter(&body.tag).await {
        Ok(()) => HttpResponse::Ok().json(OutputJson::ok()),
        Err(err) => {
            tracing::warn!(error = %err, "clear bucket by login failed");
            HttpResponse::Ok().json(OutputJson::error(err.to_string()))
        }
    }
}

async fn clear_by_ip(state: web::Data<AppState>, body: web::Json<TagRequest>) -> HttpResponse {
    match state.engine.reset_ip_counter(&body.tag).await {
        Ok(()) => HttpResponse::Ok().json(OutputJson::ok()),
        Err(err) => {
            tracing::warn!(error = %err, "clear bucket by ip failed");
            HttpResponse::Ok().json(OutputJson::error(err.to_string()))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/clearbucketbylogin/", web::delete().to(clear_by_login));
    cfg.route("/clearbucketbyip/", web::delete().to(clear_by_ip));
}
