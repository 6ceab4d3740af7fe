//! Synchronous client for the **ArcGIS `ncov_cases` feature server**.
//!
//! Every operation is one GET against the configured layer followed by a JSON
//! decode of the `{"features":[{"attributes":{...}}]}` envelope. Nothing is
//! cached or retried.
//!
//! ### Notes
//! - List queries are capped at 200 records, ordered by confirmed count descending.
//! - The server reports a rejected query as an `error` object with HTTP 200; that
//!   is surfaced as [`Error::Service`].
//! - Lookups that expect one record and receive none fail with [`Error::NotFound`].
//!
//! Typical usage:
//! ```no_run
//! # use covid_cases::{Client, Metric};
//! let client = Client::default();
//! let brazil = client.get_by_name("brazil")?;
//! let deaths = client.get_total(Metric::Deaths)?;
//! println!("{}: {} confirmed ({} deaths worldwide)", brazil.country, brazil.confirmed, deaths);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{AggregateStat, CaseRecord, CountryIndexEntry, Envelope, Metric};
use crate::query::Query;
use crate::transport::{HttpTransport, Transport};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Client {
    /// HTTP client against a custom endpoint.
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, HttpTransport::default())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GET `query` and decode the envelope, surfacing server-side errors.
    fn fetch<A: DeserializeOwned>(&self, query: &Query) -> Result<Vec<A>> {
        let url = self.config.url_for(query);
        let body = self.transport.get(&url)?;
        let envelope: Envelope<A> = serde_json::from_slice(&body)?;
        if let Some(fault) = envelope.error {
            log::warn!("feature server rejected query ({}): {}", fault.code, fault.message);
            return Err(Error::Service {
                code: fault.code,
                message: fault.message,
            });
        }
        log::debug!("decoded {} features", envelope.features.len());
        Ok(envelope.into_attributes())
    }

    fn fetch_one<A: DeserializeOwned>(
        &self,
        query: &Query,
        what: impl FnOnce() -> String,
    ) -> Result<A> {
        self.fetch(query)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound { what: what() })
    }

    /// Case records for every country with confirmed cases (at most 200),
    /// in server order: confirmed count descending.
    ///
    /// ### Errors
    /// - Network/HTTP error
    /// - JSON decoding error
    /// - Server error envelope
    pub fn get_all(&self) -> Result<Vec<CaseRecord>> {
        self.fetch(&Query::list())
    }

    /// The record whose `OBJECTID` is `id`.
    ///
    /// An id the server does not know yields [`Error::NotFound`].
    pub fn get_by_id(&self, id: i64) -> Result<CaseRecord> {
        self.fetch_one(&Query::by_id(id), || format!("case record with id {id}"))
    }

    /// Resolve `name` through the country index, then fetch that record.
    ///
    /// Matching is case-insensitive and exact; see [`Client::country_id`].
    pub fn get_by_name(&self, name: &str) -> Result<CaseRecord> {
        let id = self.country_id(name)?;
        self.get_by_id(id)
    }

    /// Id/name pairs for the same record set as [`Client::get_all`].
    pub fn list_countries(&self) -> Result<Vec<CountryIndexEntry>> {
        self.fetch(&Query::list())
    }

    /// Id of the first index entry whose name equals `name` ignoring case.
    ///
    /// The index comes back ordered by confirmed count, so on duplicate names the
    /// country with more confirmed cases wins.
    pub fn country_id(&self, name: &str) -> Result<i64> {
        let wanted = name.to_lowercase();
        self.list_countries()?
            .into_iter()
            .find(|c| c.name.to_lowercase() == wanted)
            .map(|c| c.id)
            .ok_or_else(|| Error::CountryNotFound(name.to_string()))
    }

    /// Global sum of `metric` over all countries with confirmed cases.
    pub fn get_total(&self, metric: Metric) -> Result<i64> {
        let stat: AggregateStat =
            self.fetch_one(&Query::aggregate(metric), || format!("{metric} total"))?;
        Ok(stat.value)
    }

    /// Like [`Client::get_total`], taking the metric by name
    /// (`"Active"`, `"Confirmed"`, `"Recovered"`, `"Deaths"`, any case).
    ///
    /// Unknown names fail with [`Error::UnknownMetric`] before any request is made.
    pub fn get_total_by_name(&self, metric: &str) -> Result<i64> {
        self.get_total(metric.parse()?)
    }

    pub fn total_active(&self) -> Result<i64> {
        self.get_total(Metric::Active)
    }

    pub fn total_confirmed(&self) -> Result<i64> {
        self.get_total(Metric::Confirmed)
    }

    pub fn total_recovered(&self) -> Result<i64> {
        self.get_total(Metric::Recovered)
    }

    pub fn total_deaths(&self) -> Result<i64> {
        self.get_total(Metric::Deaths)
    }
}
