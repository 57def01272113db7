pub mod defects;
pub mod html;
pub mod orders;

use actix_web::web;

/// Registers every route the server answers besides the embedded bundle.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(defects::configure_routes())
        .service(orders::configure_routes());
}
