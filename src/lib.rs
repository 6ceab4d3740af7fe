//! covid_cases
//!
//! A small blocking client for the public ArcGIS feature server that publishes
//! COVID-19 case statistics by country.
//!
//! ### Features
//! - Case records for every country, or one country by id or name
//! - A country index (id/name pairs) for name resolution
//! - Global totals of active, confirmed, recovered and deaths, summed server-side
//!
//! ### Example
//! ```no_run
//! use covid_cases::{Client, Metric};
//!
//! let client = Client::default();
//! for rec in client.get_all()?.iter().take(5) {
//!     println!("{:<20} {:>10}", rec.country, rec.confirmed);
//! }
//! println!("confirmed worldwide: {}", client.get_total(Metric::Confirmed)?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod transport;

pub use api::Client;
pub use config::Config;
pub use error::{Error, Result};
pub use models::{AggregateStat, CaseRecord, CountryIndexEntry, Metric};
pub use transport::{HttpTransport, Transport};
