use actix_web::{web, HttpResponse};
use loginguard_types::{AuthCheckRequest, AuthCheckResponse};

use crate::state::AppState;

/// `AuthCheckResponse` is the only body this route ever returns — even on
/// error. Unlike the list/bucket endpoints, `/request/` never speaks the
/// `{Text,Code}` envelope, matching the original's `AuthorizationRequest`
/// handler, which marshals `{Message,Ok}` whether or not the inner check
/// failed.
async fn check_request(state: web::Data<AppState>, body: web::Json<AuthCheckRequest>) -> HttpResponse {
    match state.engine.check_request(&body.login, &body.password, &body.ip).await {
        Ok(decision) => HttpResponse::Ok()
            .json(AuthCheckResponse { message: decision.reason.message().to_string(), ok: decision.allowed }),
        Err(err) => {
            tracing::warn!(error = %err, "request check failed");
            HttpResponse::Ok().json(AuthCheckResponse { message: err.to_string(), ok: false })
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/request/", web::get().to(check_request));
}
