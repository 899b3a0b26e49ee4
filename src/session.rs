//! Application state behind the station/parameter/date-range workflow.
//!
//! [`Session`] knows nothing about widgets. A front end forwards user actions to
//! the handlers below and redraws from the accessors afterwards. Network work is
//! split into a `prepare_*`/`select_*` step and an `apply_*` step so it can run
//! elsewhere (the desktop app uses a worker thread); the `load_stations`,
//! `choose_station` and `fetch` helpers chain both steps synchronously.
//!
//! ```
//! use gios_rs::session::Session;
//!
//! let mut session = Session::new();
//! let now = chrono::Local::now().naive_local();
//! assert!(session.prepare_fetch("08-06-2024 10:00", "08-06-2024 12:00", now).is_err());
//! assert_eq!(session.output(), "Wybierz stację i parametr.");
//! ```

use crate::api::AirQualitySource;
use crate::error::{Error, Result};
use crate::filter::{Report, ReportLine, report_header, select_in_range};
use crate::models::{Sensor, SensorData, SensorList, Station, StationList};
use crate::range::Window;
use crate::viz::ChartSeries;
use chrono::NaiveDateTime;

/// A validated request for one sensor's readings.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub sensor_id: u32,
    /// Parameter name used in the report header.
    pub parameter: String,
    pub window: Window,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    stations: StationList,
    sensors: SensorList,
    selected_station: Option<usize>,
    selected_sensor: Option<usize>,
    series: ChartSeries,
    lines: Vec<ReportLine>,
    output: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stations(&self) -> &StationList {
        &self.stations
    }

    pub fn sensors(&self) -> &SensorList {
        &self.sensors
    }

    pub fn selected_station(&self) -> Option<usize> {
        self.selected_station
    }

    pub fn selected_sensor(&self) -> Option<usize> {
        self.selected_sensor
    }

    /// Chart data of the last successful fetch.
    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    /// Report lines of the last successful fetch.
    pub fn report_lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// Text for the output area: the report or the latest error.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Replace the station list with a fresh, name-sorted snapshot.
    pub fn apply_stations(&mut self, result: Result<Vec<Station>>) {
        match result {
            Ok(stations) => {
                self.stations = StationList::from_stations(stations);
                self.selected_station = None;
                self.sensors = SensorList::default();
                self.selected_sensor = None;
            }
            Err(e) => {
                log::warn!("station list: {e}");
                self.output = format!("Błąd ładowania stacji. {e}");
            }
        }
    }

    /// Select a station by display row; returns its id for the sensor request.
    pub fn select_station(&mut self, index: usize) -> Option<u32> {
        let id = self.stations.id_at(index)?;
        self.selected_station = Some(index);
        Some(id)
    }

    /// Replace the sensor list wholesale. The first parameter becomes selected.
    ///
    /// A failed load empties the list so no sensor of the previous station remains selectable.
    pub fn apply_sensors(&mut self, result: Result<Vec<Sensor>>) {
        match result {
            Ok(sensors) => {
                self.sensors = SensorList::new(sensors);
                self.selected_sensor = (!self.sensors.is_empty()).then_some(0);
            }
            Err(e) => {
                log::warn!("sensor list: {e}");
                self.sensors = SensorList::default();
                self.selected_sensor = None;
                self.output = format!("Błąd ładowania sensorów. {e}");
            }
        }
    }

    pub fn select_sensor(&mut self, index: usize) {
        if index < self.sensors.len() {
            self.selected_sensor = Some(index);
        }
    }

    fn validate_fetch(&self, from: &str, to: &str, now: NaiveDateTime) -> Result<FetchRequest> {
        let sensor = match (self.selected_station, self.selected_sensor) {
            (Some(_), Some(i)) => self.sensors.get(i).ok_or(Error::EmptySelection)?,
            _ => return Err(Error::EmptySelection),
        };
        let window = Window::from_input(from, to, now)?;
        Ok(FetchRequest {
            sensor_id: sensor.id,
            parameter: sensor.param.param_name.clone(),
            window,
        })
    }

    /// Check the selection and the two date fields against `now`.
    ///
    /// On failure the message goes to the output and the previous chart is kept.
    /// On success the chart is cleared, ready for [`Session::apply_readings`].
    pub fn prepare_fetch(
        &mut self,
        from: &str,
        to: &str,
        now: NaiveDateTime,
    ) -> Result<FetchRequest> {
        match self.validate_fetch(from, to, now) {
            Ok(request) => {
                self.series.clear();
                self.lines.clear();
                Ok(request)
            }
            Err(e) => {
                self.output = e.to_string();
                Err(e)
            }
        }
    }

    /// Filter the fetched readings into the chart series and the report.
    pub fn apply_readings(
        &mut self,
        request: &FetchRequest,
        result: Result<SensorData>,
    ) -> Result<()> {
        let selection = result
            .and_then(|data| data.values.ok_or(Error::MissingValues))
            .and_then(|values| select_in_range(&values, &request.window));

        match selection {
            Ok(selection) => {
                log::info!(
                    "{}: {} readings in window, {} charted",
                    request.parameter,
                    selection.matched(),
                    selection.series.len()
                );
                self.output = Report {
                    parameter: &request.parameter,
                    lines: &selection.lines,
                }
                .to_string();
                self.series = selection.series;
                self.lines = selection.lines;
                Ok(())
            }
            Err(Error::MissingValues) => {
                self.output = Error::MissingValues.to_string();
                Err(Error::MissingValues)
            }
            Err(e) => {
                log::warn!("readings for sensor {}: {e}", request.sensor_id);
                self.output = format!("{}\n{e}\n", report_header(&request.parameter));
                Err(e)
            }
        }
    }

    /// Fetch and apply the station list.
    pub fn load_stations(&mut self, source: &impl AirQualitySource) {
        self.apply_stations(source.stations());
    }

    /// Select a station and load its sensors. Out-of-range rows are ignored.
    pub fn choose_station(&mut self, index: usize, source: &impl AirQualitySource) {
        if let Some(id) = self.select_station(index) {
            self.apply_sensors(source.sensors(id));
        }
    }

    /// Validate, fetch and filter in one go.
    pub fn fetch(
        &mut self,
        from: &str,
        to: &str,
        now: NaiveDateTime,
        source: &impl AirQualitySource,
    ) -> Result<()> {
        let request = self.prepare_fetch(from, to, now)?;
        let result = source.readings(request.sensor_id);
        self.apply_readings(&request, result)
    }
}
