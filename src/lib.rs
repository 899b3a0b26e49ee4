//! gios_rs
//!
//! A small Rust library for browsing the Polish national air-quality network
//! (GIOŚ): list stations, pick a sensor, keep the readings that fall inside a
//! `DD-MM-YYYY HH:MM` window and draw them as a bar chart. Pairs with the `gios`
//! CLI and the `gios-gui` desktop app.
//!
//! ### Features
//! - Fetch stations, sensors and recent readings from the public REST API
//! - Strict date-time input validation and a 3-day retention guard
//! - Window filtering that keeps null readings in the report but off the chart
//! - Backend-independent bar chart, exportable to SVG/PNG
//! - CSV/JSON export of the selected readings
//!
//! ### Example
//! ```no_run
//! use gios_rs::{Client, Window, filter, viz};
//!
//! let client = Client::default();
//! let now = chrono::Local::now().naive_local();
//! let window = Window::from_input("08-06-2024 10:00", "08-06-2024 18:00", now)?;
//! let data = client.fetch_data(92)?;
//! let selection = filter::select_in_range(&data.values.unwrap_or_default(), &window)?;
//! print!("{}", filter::Report { parameter: "PM10", lines: &selection.lines });
//! viz::save_chart(&selection.series, "pm10.svg", 800, 200)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod datetime;
pub mod error;
pub mod filter;
pub mod models;
pub mod range;
pub mod session;
pub mod storage;
pub mod viz;

pub use api::{AirQualitySource, Client};
pub use datetime::TimePoint;
pub use error::Error;
pub use models::{Measurement, Sensor, SensorData, Station};
pub use range::Window;
pub use session::Session;
pub use viz::ChartSeries;
