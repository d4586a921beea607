use actix_web::{web, HttpResponse};
use loginguard_core::ListName;
use loginguard_types::{CidrListEntry, CidrListResponse, CidrRequest, OutputJson};

use crate::state::AppState;

async fn get_list(state: web::Data<AppState>, list: ListName, body: web::Json<CidrRequest>) -> HttpResponse {
    if body.ip == "ALL" && body.mask == 0 {
        return match state.lists.get_all(list).await {
            Ok(entries) => HttpResponse::Ok().json(CidrListResponse {
                ip_list: entries
                    .into_iter()
                    .map(|e| CidrListEntry { ip: e.network, mask: e.mask, id: e.id })
                    .collect(),
                message: OutputJson::ok(),
            }),
            Err(err) => HttpResponse::Ok().json(CidrListResponse {
                ip_list: Vec::new(),
                message: OutputJson::error(err.to_string()),
            }),
        };
    }

    match state.lists.is_in_list(list, &body.ip, body.mask).await {
        Ok(found) => HttpResponse::Ok().json(CidrListResponse {
            ip_list: Vec::new(),
            message: OutputJson { text: if found { "YES" } else { "NO" }.to_string(), code: 0 },
        }),
        Err(err) => HttpResponse::Ok().json(CidrListResponse {
            ip_list: Vec::new(),
            message: OutputJson::error(err.to_string()),
        }),
    }
}

async fn add_to_list(state: web::Data<AppState>, list: ListName, body: web::Json<CidrRequest>) -> HttpResponse {
    match state.lists.add(list, &body.ip, body.mask).await {
        Ok(id) => HttpResponse::Ok().json(OutputJson::ok_with_id(id)),
        Err(err) => HttpResponse::Ok().json(OutputJson::error(err.to_string())),
    }
}

async fn remove_from_list(
    state: web::Data<AppState>,
    list: ListName,
    body: web::Json<CidrRequest>,
) -> HttpResponse {
    match state.lists.remove(list, &body.ip, body.mask).await {
        Ok(()) => HttpResponse::Ok().json(OutputJson::ok()),
        Err(err) => HttpResponse::Ok().json(OutputJson::error(err.to_string())),
    }
}

async fn whitelist_get(state: web::Data<AppState>, body: web::Json<CidrRequest>) -> HttpResponse {
    get_list(state, ListName::Whitelist, body).await
}
async fn whitelist_post(state: web::Data<AppState>, body: web::Json<CidrRequest>) -> HttpResponse {
    add_to_list(state, ListName::Whitelist, body).await
}
async fn whitelist_delete(state: web::Data<AppState>, body: web::Json<CidrRequest>) -> HttpResponse {
    remove_from_list(state, ListName::Whitelist, body).await
}

async fn blacklist_get(state: web::Data<AppState>, body: web::Json<CidrRequest>) -> HttpResponse {
    get_list(state, ListName::Blacklist, body).await
}
async fn blacklist_post(state: web::Data<AppState>, body: web::Json<CidrRequest>) -> HttpResponse {
    add_to_list(state, ListName::Blacklist, body).await
}
async fn blacklist_delete(state: web::Data<AppState>, body: web::Json<CidrRequest>) -> HttpResponse {
    remove_from_list(state, ListName::Blacklist, body).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/whitelist/")
            .route(web::get().to(whitelist_get))
            .route(web::post().to(whitelist_post))
            .route(web::delete().to(whitelist_delete)),
    );
    cfg.service(
        web::resource("/blacklist/")
            .route(web::get().to(blacklist_get))
            .route(web::post().to(blacklist_post))
            .route(web::delete().to(blacklist_delete)),
    );
}
