use chrono::NaiveDateTime;
use thiserror::Error;

/// Everything that can go wrong between a user action and a drawn chart.
///
/// The `Display` text of each variant is the message shown to the user, so the
/// front ends can print errors as-is. None of these are fatal and none are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Date text does not follow `DD-MM-YYYY HH:MM`, or carries an out-of-range time.
    #[error("Wprowadź daty w formacie DD-MM-YYYY HH:MM.")]
    Format { input: String },

    #[error("Data początkowa musi być wcześniejsza niż końcowa.")]
    InvalidRange,

    /// The window starts before the API's retention horizon.
    #[error("Dostępne są tylko dane z ostatnich trzech dób. Wprowadź nowszy zakres.")]
    RangeTooOld { earliest: NaiveDateTime },

    #[error("Błąd sieci: {0}")]
    Network(String),

    /// Unexpected JSON shape, or a record whose date cannot be read.
    #[error("Błąd przetwarzania danych: {0}")]
    Parse(String),

    /// The sensor payload has no `values` array at all.
    #[error("Brak danych pomiarowych.")]
    MissingValues,

    #[error("Wybierz stację i parametr.")]
    EmptySelection,
}

impl Error {
    pub(crate) fn format(input: &str) -> Self {
        Error::Format {
            input: input.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
