// Route exports
pub mod recommendations;
pub mod reports;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(recommendations::configure)
            .configure(reports::configure),
    );
}
