use crate::query::Query;

/// Default host of the public feature server.
pub const DEFAULT_BASE_URL: &str = "https://services1.arcgis.com";

/// Default query path of the `ncov_cases` layer.
pub const DEFAULT_PATH: &str =
    "/0MSEUqKaxRlEPj5g/arcgis/rest/services/ncov_cases/FeatureServer/2/query";

/// Endpoint configuration, fixed once a [`Client`](crate::Client) is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            path: DEFAULT_PATH.into(),
        }
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
        }
    }

    /// Render a fully-qualified request URL for `query`.
    pub fn url_for(&self, query: &Query) -> String {
        format!(
            "{}{}?{}",
            self.base_url.trim_end_matches('/'),
            self.path,
            query.encode()
        )
    }
}
