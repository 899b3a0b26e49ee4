//! Live API tests. Run with: `cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use chrono::{Duration, Local};
use gios_rs::filter::select_in_range;
use gios_rs::{Client, Window};

#[test]
fn station_list_is_not_empty() {
    let cli = Client::default();
    let stations = cli.fetch_stations().unwrap();
    assert!(!stations.is_empty());
    assert!(stations.iter().all(|s| !s.station_name.is_empty()));
}

#[test]
fn first_station_readings_fit_recent_window() {
    let cli = Client::default();
    let stations = cli.fetch_stations().unwrap();
    let sensors = cli.fetch_sensors(stations[0].id).unwrap();
    let Some(sensor) = sensors.first() else {
        return;
    };

    let data = cli.fetch_data(sensor.id).unwrap();
    let values = data.values.unwrap_or_default();

    let now = Local::now().naive_local();
    let window = Window {
        from: now - Duration::hours(24),
        to: now,
    };
    let selection = select_in_range(&values, &window).unwrap();
    assert!(selection.matched() <= values.len());
    assert!(selection.series.len() <= selection.matched());
}
