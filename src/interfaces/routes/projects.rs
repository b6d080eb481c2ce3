use actix_web::web;

use crate::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(web::resource("").route(web::get().to(projects::get_all_projects)))
            .service(
                web::resource("/{project_id}").route(web::get().to(projects::get_project_by_id)),
            ),
    );
}
