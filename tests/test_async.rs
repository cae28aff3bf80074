//! Async wrapper tests (requires the `async` feature).

#![cfg(feature = "async")]

use std::net::TcpListener;

use epiforecast_dashboard::{AsyncDashboard, DashboardConfig, DashboardError};

fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/token", listener.local_addr().unwrap());
    drop(listener);
    url
}

#[tokio::test]
async fn render_surfaces_token_transport_failure() {
    let mut cfg = DashboardConfig::new("key", "http://127.0.0.1:9/v3/wml_instances/i/deployments/d");
    cfg.token_url = unreachable_url();

    let dashboard = AsyncDashboard::from_config(cfg).await.unwrap();
    let err = dashboard.render().await.unwrap_err();
    // A proxy from the environment may answer in place of the dead port.
    assert!(matches!(
        err,
        DashboardError::Http(_) | DashboardError::Authentication(_)
    ));

    dashboard.close().await.unwrap();
}

#[tokio::test]
async fn run_exposes_sync_dashboard() {
    let cfg = DashboardConfig::new("key", "http://127.0.0.1:9/v3/wml_instances/i/deployments/d");
    let dashboard = AsyncDashboard::from_config(cfg).await.unwrap();

    let country = dashboard
        .run(|d| Ok(d.params().country.clone()))
        .await
        .unwrap();
    assert_eq!(country, "Poland");

    dashboard.close().await.unwrap();
}
