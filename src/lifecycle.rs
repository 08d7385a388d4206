//! Server lifecycle management helpers.
//!
//! This module encapsulates the heavy lifting otherwise handled directly in
//! `main.rs`: restoring state from snapshots, wiring the HTTP server, and
//! coordinating graceful shutdown.

use std::path::{Path, PathBuf};
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use chrono::{NaiveTime, Weekday};
use haulhub_api::{configure_routes, AppState};
use haulhub_auth::JwtAuth;
use haulhub_commons::models::{Driver, ServiceTier};
use haulhub_commons::DriverId;
use haulhub_core::MarketStores;
use haulhub_store::{load_snapshot, save_snapshot};
use log::{error, info, warn};

use crate::config::ServerConfig;

const JOBS_SNAPSHOT: &str = "jobs.json";
const BOOKINGS_SNAPSHOT: &str = "bookings.json";
const DRIVERS_SNAPSHOT: &str = "drivers.json";

/// Restore stores from disk, seed demo drivers on an empty directory, and
/// start the periodic snapshot task. Returns the stores alongside the app
/// state so shutdown can take a final snapshot.
pub fn bootstrap(config: &ServerConfig) -> Result<(AppState, MarketStores)> {
    let data_dir = config.data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let stores = MarketStores::new();
    restore_stores(&stores, &data_dir);

    if stores.drivers.is_empty() {
        info!("no driver profiles found, seeding demo drivers");
        seed_demo_drivers(&stores)?;
    }
    info!(
        "stores ready: {} jobs, {} bookings, {} drivers",
        stores.jobs.len(),
        stores.bookings.len(),
        stores.drivers.len()
    );

    let jwt = JwtAuth::new(&config.auth.jwt_secret);
    let state = AppState::new(stores.clone(), jwt);

    spawn_snapshot_task(stores.clone(), data_dir, config.storage.snapshot_interval_seconds);

    Ok((state, stores))
}

fn restore_stores(stores: &MarketStores, data_dir: &Path) {
    stores
        .jobs
        .restore(load_snapshot(&data_dir.join(JOBS_SNAPSHOT)), |j| j.id.clone());
    stores
        .bookings
        .restore(load_snapshot(&data_dir.join(BOOKINGS_SNAPSHOT)), |b| b.id.clone());
    stores
        .drivers
        .restore(load_snapshot(&data_dir.join(DRIVERS_SNAPSHOT)), |d| d.id.clone());
}

/// Flush all three collections to disk.
pub fn persist_stores(stores: &MarketStores, data_dir: &Path) -> std::io::Result<()> {
    save_snapshot(&data_dir.join(JOBS_SNAPSHOT), &stores.jobs.dump())?;
    save_snapshot(&data_dir.join(BOOKINGS_SNAPSHOT), &stores.bookings.dump())?;
    save_snapshot(&data_dir.join(DRIVERS_SNAPSHOT), &stores.drivers.dump())?;
    Ok(())
}

fn spawn_snapshot_task(stores: MarketStores, data_dir: PathBuf, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds));
        // The first tick fires immediately; skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = persist_stores(&stores, &data_dir) {
                error!("periodic snapshot failed: {}", e);
            }
        }
    });
}

/// Demo driver profiles for a fresh install. Real deployments sync these
/// from the identity service.
fn seed_demo_drivers(stores: &MarketStores) -> Result<()> {
    let weekdays = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];
    let nine_to_five = |day| haulhub_commons::models::DaySchedule {
        day,
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
        end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
    };

    let drivers = [
        Driver {
            id: DriverId::from("drv-demo-1"),
            name: "Alex Carter".to_string(),
            services: vec![ServiceTier::HalfTruck, ServiceTier::FullTruck],
            locations: vec!["Leeds".to_string(), "Bradford".to_string()],
            availability: true,
            verified: true,
            weekly_schedule: weekdays.iter().copied().map(nine_to_five).collect(),
        },
        Driver {
            id: DriverId::from("drv-demo-2"),
            name: "Priya Shah".to_string(),
            services: vec![
                ServiceTier::HalfTruck,
                ServiceTier::FullTruck,
                ServiceTier::MoreThanTruck,
            ],
            locations: vec!["Leeds".to_string()],
            availability: true,
            verified: true,
            weekly_schedule: weekdays.iter().copied().map(nine_to_five).collect(),
        },
    ];

    for driver in drivers {
        if let Err(e) = stores.drivers.insert(driver.id.clone(), driver) {
            warn!("skipping demo driver: {}", e);
        }
    }
    Ok(())
}

/// Start the HTTP server and manage graceful shutdown.
pub async fn run(config: &ServerConfig, state: AppState, stores: MarketStores) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);

    let data_dir = config.data_dir();

    let app_state = state.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(configure_routes)
    })
    .bind(&bind_addr)?;

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let server = server.run();
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            if let Err(e) = result {
                error!("Server task failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
            server_handle.stop(true).await;

            if let Err(e) = persist_stores(&stores, &data_dir) {
                error!("final snapshot failed: {}", e);
            } else {
                info!("final snapshot written to {}", data_dir.display());
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
