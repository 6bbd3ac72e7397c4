//! HTTP route modules

pub mod commands;
pub mod health;
pub mod records;

use actix_web::web;

/// Register every route of the gateway
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    commands::configure_routes(cfg);
    records::configure_routes(cfg);
}
