//! Query-string construction for the three request shapes the feature server sees.
//!
//! A [`Query`] is an ordered list of raw `(name, value)` pairs; encoding happens
//! only when it is rendered into a URL by [`Config::url_for`](crate::Config::url_for).

use crate::models::Metric;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Maximum number of records requested by list queries.
pub const RECORD_LIMIT: u32 = 200;

/// Filter shared by list and aggregate queries.
pub const CONFIRMED_FILTER: &str = "Confirmed > 0";

// Allow -, _, ., * unescaped (`outFields=*`)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    /// All countries with at least one confirmed case, by confirmed count descending.
    pub fn list() -> Self {
        Self::records(CONFIRMED_FILTER.to_string())
    }

    /// The single record whose `OBJECTID` equals `id`.
    ///
    /// The clause is rendered as `OBJECTID =<id>` with no space after `=`;
    /// existing server-side caches key on that exact text.
    pub fn by_id(id: i64) -> Self {
        Self::records(format!("OBJECTID ={id}"))
    }

    /// Server-side sum of `metric` over every country with confirmed cases,
    /// returned under the attribute name `value`.
    pub fn aggregate(metric: Metric) -> Self {
        let statistics = format!(
            r#"[{{"statisticType":"sum","onStatisticField":"{}","outStatisticFieldName":"value"}}]"#,
            metric.field_name()
        );
        let mut q = Self::base(CONFIRMED_FILTER.to_string());
        q.push("outStatistics", statistics);
        q.push("cacheHint", "true");
        q
    }

    fn records(where_clause: String) -> Self {
        let mut q = Self::base(where_clause);
        q.push("orderByFields", "Confirmed desc");
        q.push("resultOffset", "0");
        q.push("resultRecordCount", RECORD_LIMIT.to_string());
        q.push("cacheHint", "true");
        q
    }

    fn base(where_clause: String) -> Self {
        let mut q = Self { params: Vec::with_capacity(9) };
        q.push("f", "json");
        q.push("where", where_clause);
        q.push("returnGeometry", "false");
        q.push("spatialRel", "esriSpatialRelIntersects");
        q.push("outFields", "*");
        q
    }

    fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.params.push((name, value.into()));
    }

    /// Raw (unencoded) value of the first parameter called `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn where_clause(&self) -> Option<&str> {
        self.param("where")
    }

    /// Percent-encoded `k=v&k=v` query string.
    pub fn encode(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    percent_encoding::utf8_percent_encode(k, SAFE),
                    percent_encoding::utf8_percent_encode(v, SAFE)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_id_filter_has_no_space_before_id() {
        let q = Query::by_id(42);
        assert_eq!(q.where_clause(), Some("OBJECTID =42"));
        assert!(q.encode().contains("where=OBJECTID%20%3D42&"));
    }

    #[test]
    fn list_query_caps_and_orders() {
        let q = Query::list();
        assert_eq!(q.where_clause(), Some("Confirmed > 0"));
        assert_eq!(q.param("orderByFields"), Some("Confirmed desc"));
        assert_eq!(q.param("resultOffset"), Some("0"));
        assert_eq!(q.param("resultRecordCount"), Some("200"));
        assert_eq!(q.param("cacheHint"), Some("true"));
        assert_eq!(q.param("returnGeometry"), Some("false"));
        assert_eq!(q.param("outStatistics"), None);
    }

    #[test]
    fn aggregate_query_requests_sum_named_value() {
        let q = Query::aggregate(Metric::Deaths);
        assert_eq!(q.where_clause(), Some("Confirmed > 0"));
        assert_eq!(
            q.param("outStatistics"),
            Some(r#"[{"statisticType":"sum","onStatisticField":"Deaths","outStatisticFieldName":"value"}]"#)
        );
        assert_eq!(q.param("orderByFields"), None);
        assert_eq!(q.param("resultRecordCount"), None);
    }

    #[test]
    fn encode_escapes_reserved_but_keeps_star() {
        let s = Query::list().encode();
        assert!(s.starts_with("f=json&where=Confirmed%20%3E%200&"));
        assert!(s.contains("outFields=*"));
        assert!(s.contains("orderByFields=Confirmed%20desc"));
        let agg = Query::aggregate(Metric::Active).encode();
        assert!(agg.contains("outStatistics=%5B%7B%22statisticType%22%3A%22sum%22"));
        assert!(!agg.contains('"'));
    }
}
