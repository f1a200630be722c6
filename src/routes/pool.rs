use actix_web::web;

use crate::handlers::pool::{
    create_pool_handler, get_pool_handler, get_pools_by_owner_handler, get_pools_handler,
    update_pool_handler,
};

pub fn configure_pool_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/pools/owner/{pool_owner}",
        web::get().to(get_pools_by_owner_handler),
    )
    .route("/pools", web::get().to(get_pools_handler))
    .route("/pools", web::post().to(create_pool_handler))
    .route("/pools/{pool_id}", web::get().to(get_pool_handler))
    .route("/pools/{pool_id}", web::put().to(update_pool_handler));
}
