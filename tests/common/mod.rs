#![allow(dead_code)]

use covid_cases::{Client, Config, Result, Transport};
use percent_encoding::percent_decode_str;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::HashMap;

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"))
}

/// Decoded query parameters of a request URL.
pub fn params(url: &str) -> HashMap<String, String> {
    let (_, query) = url.split_once('?').expect("url has a query string");
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| {
            (
                percent_decode_str(k).decode_utf8_lossy().into_owned(),
                percent_decode_str(v).decode_utf8_lossy().into_owned(),
            )
        })
        .collect()
}

/// Answers like the feature server would for a recorded case list:
/// statistics queries get `aggregate`, `OBJECTID =<id>` filters get the
/// matching subset of `cases`, everything else gets `cases` as is.
pub struct FeatureServer {
    cases: Value,
    aggregate: String,
    pub requests: RefCell<Vec<String>>,
}

impl FeatureServer {
    pub fn new(cases: &str, aggregate: &str) -> Self {
        Self {
            cases: serde_json::from_str(cases).expect("cases fixture is json"),
            aggregate: aggregate.to_string(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn recorded() -> Self {
        Self::new(&fixture("cases.json"), &fixture("total_confirmed.json"))
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.cases["features"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|f| f["attributes"]["OBJECTID"].as_i64())
            .collect()
    }
}

impl Transport for FeatureServer {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        let p = params(url);
        if p.contains_key("outStatistics") {
            return Ok(self.aggregate.clone().into_bytes());
        }
        let filter = p.get("where").map(String::as_str).unwrap_or_default();
        if let Some(id) = filter.strip_prefix("OBJECTID =") {
            let id: i64 = id.parse().expect("numeric id in filter");
            let features: Vec<Value> = self.cases["features"]
                .as_array()
                .into_iter()
                .flatten()
                .filter(|f| f["attributes"]["OBJECTID"].as_i64() == Some(id))
                .cloned()
                .collect();
            return Ok(json!({ "features": features }).to_string().into_bytes());
        }
        Ok(self.cases.to_string().into_bytes())
    }
}

/// Returns the same body for every request.
pub struct Canned(pub String);

impl Transport for Canned {
    fn get(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(self.0.clone().into_bytes())
    }
}

pub fn client<T: Transport>(transport: T) -> Client<T> {
    let _ = env_logger::builder().is_test(true).try_init();
    Client::with_transport(Config::default(), transport)
}
