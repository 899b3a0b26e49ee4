//! Selection of the readings that fall inside the requested window, and the
//! textual report built from them.

use crate::datetime::{parse, validate_format};
use crate::error::{Error, Result};
use crate::models::Measurement;
use crate::range::Window;
use crate::viz::ChartSeries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report text for a null reading.
pub const MISSING_VALUE: &str = "brak";

/// Report text when nothing matched the window.
pub const NO_DATA_IN_WINDOW: &str = "Brak danych pomiarowych w wybranym zakresie czasowym.";

/// One matching reading as it appears in the report. Nulls are kept here even
/// though they never reach the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    /// First 16 characters of the API date, e.g. `2024-06-08 10:00`.
    pub date: String,
    pub value: Option<f64>,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}: {:.6}", self.date, v),
            None => write!(f, "{}: {}", self.date, MISSING_VALUE),
        }
    }
}

/// Outcome of [`select_in_range`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub lines: Vec<ReportLine>,
    pub series: ChartSeries,
}

impl Selection {
    /// Number of records inside the window, nulls included.
    pub fn matched(&self) -> usize {
        self.lines.len()
    }
}

fn date_slice(date: &str, from: usize, to: usize) -> Result<&str> {
    date.get(from..to)
        .ok_or_else(|| Error::Parse(format!("niepoprawna data pomiaru: {date:?}")))
}

/// Rewrite an API date (`YYYY-MM-DD?HH:MM...`) into the `DD-MM-YYYY HH:MM` input layout.
pub fn api_date_to_input(date: &str) -> Result<String> {
    let text = format!(
        "{}-{}-{} {}",
        date_slice(date, 8, 10)?,
        date_slice(date, 5, 7)?,
        date_slice(date, 0, 4)?,
        date_slice(date, 11, 16)?,
    );
    if !validate_format(&text) {
        return Err(Error::Parse(format!("niepoprawna data pomiaru: {date:?}")));
    }
    Ok(text)
}

/// `None` for a well-formed date with an impossible hour or minute; such a
/// record can never fall inside a window.
fn record_time(date: &str) -> Result<Option<chrono::NaiveDateTime>> {
    let point = parse(&api_date_to_input(date)?)
        .map_err(|_| Error::Parse(format!("niepoprawna data pomiaru: {date:?}")))?;
    if point.is_zeroed() {
        return Ok(None);
    }
    point
        .to_datetime()
        .map(Some)
        .ok_or_else(|| Error::Parse(format!("data poza zakresem: {date:?}")))
}

/// Keep the records inside `window`, in their original order.
///
/// Every matching record gets a report line; only non-null values go to the
/// chart, labelled `HH:MM`. Records are not assumed to be sorted, so the whole
/// input is scanned. A record whose hour or minute is out of range is skipped;
/// a truncated or non-numeric date aborts with `Error::Parse`.
pub fn select_in_range(records: &[Measurement], window: &Window) -> Result<Selection> {
    let mut selection = Selection::default();
    for record in records {
        let Some(time) = record_time(&record.date)? else {
            log::warn!("skipping reading with invalid time {:?}", record.date);
            continue;
        };
        if !window.contains(time) {
            continue;
        }
        if let Some(v) = record.value {
            selection.series.push(v, date_slice(&record.date, 11, 16)?);
        }
        selection.lines.push(ReportLine {
            date: date_slice(&record.date, 0, 16)?.to_string(),
            value: record.value,
        });
    }
    Ok(selection)
}

/// First line of every report.
pub fn report_header(parameter: &str) -> String {
    format!("Dane dla parametru: {parameter}")
}

/// The text shown in the output area after a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<'a> {
    pub parameter: &'a str,
    pub lines: &'a [ReportLine],
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", report_header(self.parameter))?;
        for line in self.lines {
            writeln!(f, "{line}")?;
        }
        if self.lines.is_empty() {
            writeln!(f, "{NO_DATA_IN_WINDOW}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn m(date: &str, value: Option<f64>) -> Measurement {
        Measurement {
            date: date.into(),
            value,
        }
    }

    fn window() -> Window {
        Window {
            from: dt(2024, 6, 8, 10, 0),
            to: dt(2024, 6, 8, 12, 0),
        }
    }

    #[test]
    fn rewrites_api_dates() {
        assert_eq!(
            api_date_to_input("2024-06-08T10:00:00").unwrap(),
            "08-06-2024 10:00"
        );
        assert_eq!(
            api_date_to_input("2024-06-08 23:15:00.000+02:00").unwrap(),
            "08-06-2024 23:15"
        );
    }

    #[test]
    fn malformed_dates_are_parse_errors() {
        for bad in ["", "2024-06-08", "2024-06-08T10", "abcd-ef-ghTij:kl", "2024-06-08T1ż:00"] {
            assert!(
                matches!(api_date_to_input(bad), Err(Error::Parse(_))),
                "accepted {bad:?}"
            );
        }
        let err = select_in_range(&[m("2024-06-08T1", Some(1.0))], &window()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn impossible_times_are_skipped() {
        let records = [
            m("2024-06-08 10:00:00", Some(5.0)),
            m("2024-06-01 24:00:00", Some(1.0)),
            m("2024-06-08 11:60:00", Some(2.0)),
        ];
        let sel = select_in_range(&records, &window()).unwrap();
        assert_eq!(sel.series.values(), [5.0]);
        let dates: Vec<_> = sel.lines.iter().map(|l| l.date.as_str()).collect();
        assert_eq!(dates, ["2024-06-08 10:00"]);
    }

    #[test]
    fn nulls_reported_but_not_charted() {
        let records = [
            m("2024-06-08T10:00:00", Some(5.0)),
            m("2024-06-08T11:00:00", None),
            m("2024-06-08T12:00:00", Some(7.2)),
        ];
        let sel = select_in_range(&records, &window()).unwrap();
        assert_eq!(sel.matched(), 3);
        assert_eq!(sel.series.values(), [5.0, 7.2]);
        assert_eq!(sel.series.labels(), ["10:00", "12:00"]);

        let text = Report {
            parameter: "PM10",
            lines: &sel.lines,
        }
        .to_string();
        assert_eq!(
            text,
            "Dane dla parametru: PM10\n\
             2024-06-08T10:00: 5.000000\n\
             2024-06-08T11:00: brak\n\
             2024-06-08T12:00: 7.200000\n"
        );
    }

    #[test]
    fn keeps_server_order_and_skips_outside() {
        let records = [
            m("2024-06-08 12:00:00", Some(3.0)),
            m("2024-06-08 13:00:00", Some(9.0)),
            m("2024-06-08 09:59:00", Some(8.0)),
            m("2024-06-08 10:00:00", Some(1.0)),
        ];
        let sel = select_in_range(&records, &window()).unwrap();
        assert_eq!(sel.series.values(), [3.0, 1.0]);
        let dates: Vec<_> = sel.lines.iter().map(|l| l.date.as_str()).collect();
        assert_eq!(dates, ["2024-06-08 12:00", "2024-06-08 10:00"]);
    }

    #[test]
    fn empty_window_says_so() {
        let records = [m("2024-06-07 10:00:00", Some(3.0))];
        let sel = select_in_range(&records, &window()).unwrap();
        assert_eq!(sel.matched(), 0);
        assert!(sel.series.is_empty());
        let text = Report {
            parameter: "NO2",
            lines: &sel.lines,
        }
        .to_string();
        assert_eq!(text, format!("Dane dla parametru: NO2\n{NO_DATA_IN_WINDOW}\n"));
    }
}
