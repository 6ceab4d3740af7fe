use crate::error::Result;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Issues a single GET and hands back the whole response body.
///
/// [`HttpTransport`] is the production implementation; tests plug in canned
/// fixtures instead.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        (**self).get(url)
    }
}

/// Blocking `reqwest` transport.
///
/// The default client caps connect time and redirects but sets no overall
/// request timeout; pass a configured client to [`HttpTransport::with_client`]
/// when one is needed.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl Default for HttpTransport {
    fn default() -> Self {
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("covid_cases/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self { http }
    }
}

impl HttpTransport {
    pub fn with_client(http: HttpClient) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {url}");
        let resp = self.http.get(url).send()?.error_for_status()?;
        // `bytes()` consumes the response, so the connection goes back to the
        // pool before anything is decoded.
        let body = resp.bytes()?;
        Ok(body.to_vec())
    }
}
