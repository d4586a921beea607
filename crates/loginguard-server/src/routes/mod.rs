pub mod buckets;
pub mod health;
pub mod lists;
pub mod request;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    request::configure(cfg);
    lists::configure(cfg);
    buckets::configure(cfg);
}
