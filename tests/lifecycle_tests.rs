//! Bootstrap and snapshot persistence tests.

use chrono::{Duration, Utc};
use haulhub::config::ServerConfig;
use haulhub::lifecycle::{bootstrap, persist_stores};
use haulhub_commons::CustomerId;
use haulhub_core::NewJob;
use tempfile::tempdir;

fn config_in(dir: &std::path::Path) -> ServerConfig {
    let mut config = ServerConfig::default_for_tests();
    config.storage.data_dir = dir.to_string_lossy().into_owned();
    config
}

#[tokio::test]
async fn fresh_install_seeds_demo_drivers() {
    let dir = tempdir().unwrap();
    let (_, stores) = bootstrap(&config_in(dir.path())).unwrap();
    assert_eq!(stores.drivers.len(), 2);
}

#[tokio::test]
async fn state_survives_a_restart() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());

    let (state, stores) = bootstrap(&config).unwrap();
    let job = state
        .jobs
        .create_job(
            &CustomerId::from("cust-1"),
            NewJob {
                job_type: "furniture removal".to_string(),
                pickup_location: "Leeds".to_string(),
                pickup_time: Utc::now() + Duration::hours(6),
                description: None,
                estimated_price: Some(80.0),
            },
        )
        .unwrap();
    persist_stores(&stores, &config.data_dir()).unwrap();

    // Second bootstrap restores instead of reseeding.
    let (_, restored) = bootstrap(&config).unwrap();
    assert_eq!(restored.jobs.len(), 1);
    assert!(restored.jobs.get(&job.id).is_some());
    assert_eq!(restored.drivers.len(), 2);
}
