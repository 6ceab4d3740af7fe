use thiserror::Error;

/// Errors returned by [`Client`](crate::Client) operations.
///
/// Nothing is retried; each variant surfaces exactly one failed round trip.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection failure or a non-success HTTP status.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not the JSON shape we expected.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with an empty feature list where one record was required.
    #[error("no {what} found")]
    NotFound {
        /// What was being looked up, e.g. `"case record with id 42"`.
        what: String,
    },

    /// No entry in the country index matches the requested name.
    #[error("country not found: {0:?}")]
    CountryNotFound(String),

    /// The metric name is not one of Active, Confirmed, Recovered, Deaths.
    #[error("unknown metric {0:?} (expected Active, Confirmed, Recovered or Deaths)")]
    UnknownMetric(String),

    /// The feature server rejected the query and returned an error envelope.
    #[error("feature server error {code}: {message}")]
    Service { code: i64, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
