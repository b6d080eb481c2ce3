use actix_web::web;

use crate::handlers::{home, system::health_check};

mod blog;
mod contact;
mod json_error;
mod projects;
mod skills;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home);

    cfg.service(
        web::scope("/api/v1")
            .service(health_check)
            .service(web::resource("/portfolio").route(web::get().to(home::get_portfolio_overview)))
            .configure(projects::config_routes)
            .configure(blog::config_routes)
            .configure(skills::config_routes)
            .configure(contact::config_routes),
    );

    cfg.configure(json_error::config_routes);
}
