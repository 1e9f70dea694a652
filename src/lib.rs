//! Employee records and per-day attendance behind a small JSON API.

pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;

use actix_web::web;
use crate::config::Config;
use crate::service::Services;

/// Register the registry, the ledger and the API routes on an app.
pub fn configure_app(cfg: &mut web::ServiceConfig, services: &Services, config: &Config) {
    cfg.app_data(web::Data::new(services.registry.clone()))
        .app_data(web::Data::new(services.ledger.clone()));
    routes::configure(cfg, config);
}
