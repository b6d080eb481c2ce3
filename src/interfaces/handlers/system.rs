use std::{
    sync::atomic::{AtomicI64, Ordering},
    time::Duration,
};

use actix_web::{HttpResponse, Responder, get, web};
use chrono::Utc;
use humantime::format_duration;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use sysinfo::System;

use crate::{AppState, constants::START_TIME, normalize::MetricsSnapshot};

/// Seconds a built health response stays cached before probes rerun.
const CACHE_SECS: i64 = 5;

#[derive(Serialize, Clone, Default)]
struct SystemInfo {
    os: String,
    kernel: String,
    hostname: String,
    cpu_count: usize,
    memory_total: String,
}

#[derive(Serialize, Clone, Default)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    content_store: String,
    version: String,
    memory_usage: String,
    normalizer: MetricsSnapshot,
    system: SystemInfo,
}

static LAST_CHECK: AtomicI64 = AtomicI64::new(0);
static CACHED_STATUS: Lazy<RwLock<HealthCheckResponse>> =
    Lazy::new(|| RwLock::new(HealthCheckResponse::default()));

async fn build_health_response(state: &web::Data<AppState>) -> HealthCheckResponse {
    let now_utc = Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(
        uptime_duration.num_seconds().max(0) as u64
    ));

    let mut sys = System::new_all();
    sys.refresh_all();

    let system_info = SystemInfo {
        os: System::name().unwrap_or_else(|| "Unknown".to_string()),
        kernel: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
        hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        cpu_count: sys.cpus().len(),
        memory_total: format!("{:.2} GB", sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0),
    };

    let content_store = match state.content_handler.check_connection().await {
        Ok(_) => "OK",
        Err(_) => "Unavailable",
    };

    let process = sys.process(sysinfo::get_current_pid().unwrap_or(0.into()));
    let memory_usage = process.map_or("Unknown".to_string(), |p| {
        format!("{:.2} MB", p.memory() as f64 / 1024.0 / 1024.0)
    });

    HealthCheckResponse {
        status: "healthy".to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        content_store: content_store.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        memory_usage,
        normalizer: state.metrics.snapshot(),
        system: system_info,
    }
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now().timestamp();
    let last = LAST_CHECK.load(Ordering::Relaxed);

    if now - last > CACHE_SECS {
        let response = build_health_response(&state).await;
        *CACHED_STATUS.write() = response.clone();
        LAST_CHECK.store(now, Ordering::Relaxed);
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::Ok().json(CACHED_STATUS.read().clone())
    }
}
