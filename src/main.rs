use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::NormalizePath, web};
use portfolio_content::{
    AppState, background_task::start_metrics_report_task, graceful_shutdown::shutdown_signal,
    routes::configure_routes, settings::AppConfig,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(&config));
    let metrics = app_state.metrics.clone();

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting Portfolio Content API v{} on {}",
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_origins = config.cors_origins();

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);
        for origin in &cors_origins {
            cors = if origin.as_str() == "*" {
                cors.allow_any_origin()
            } else {
                cors.allowed_origin(origin)
            };
        }

        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .wrap(cors)
            .wrap(NormalizePath::trim())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::spawn(start_metrics_report_task(metrics));

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
