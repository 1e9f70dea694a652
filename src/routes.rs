use crate::{
    api::{attendance, employee, health, json_error_handler},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{Scope, web};

// Helper to build the per-IP limiter, None when rate limiting is off
fn build_limiter(requests_per_min: u32) -> Option<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    if requests_per_min == 0 {
        return None;
    }

    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()?;
    Some(Governor::new(&cfg))
}

fn api_scope(prefix: &str) -> Scope {
    web::scope(prefix)
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/employees")
                // /employees
                .service(
                    web::resource("")
                        .route(web::post().to(employee::create_employee))
                        .route(web::get().to(employee::list_employees)),
                )
                // /employees/{employee_id}
                .service(
                    web::resource("/{employee_id}")
                        .route(web::get().to(employee::get_employee))
                        .route(web::delete().to(employee::delete_employee)),
                ),
        )
        .service(
            web::scope("/attendance")
                // /attendance
                .service(web::resource("").route(web::post().to(attendance::mark_attendance)))
                // /attendance/{employee_id}
                .service(
                    web::resource("/{employee_id}")
                        .route(web::get().to(attendance::get_attendance)),
                ),
        )
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    match build_limiter(config.rate_api_per_min) {
        Some(limiter) => {
            cfg.service(api_scope(&config.api_prefix).wrap(limiter));
        }
        None => {
            if config.rate_api_per_min > 0 {
                tracing::warn!(
                    rate = config.rate_api_per_min,
                    "Rate limiter configuration rejected, serving without it"
                );
            }
            cfg.service(api_scope(&config.api_prefix));
        }
    }
}
