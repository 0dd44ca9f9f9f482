//! Helpers shared by the unit tests.
use crate::query::Query;
use crate::{Bounds, GeocodingError};
use std::sync::Mutex;

pub const DELTA: f64 = 1e-6;

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path, e))
}

#[track_caller]
pub fn assert_approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value should be present");
    assert!(
        (actual - expected).abs() < DELTA,
        "{} is not close to {}",
        actual,
        expected
    );
}

#[track_caller]
pub fn assert_bounds(actual: Option<Bounds>, south: f64, west: f64, north: f64, east: f64) {
    let bounds = actual.expect("bounds should be present");
    assert_approx(Some(bounds.south), south);
    assert_approx(Some(bounds.west), west);
    assert_approx(Some(bounds.north), north);
    assert_approx(Some(bounds.east), east);
}

/// An adapter answering every request with the same canned payload and
/// recording the URLs it was asked for.
#[derive(Debug, Default)]
pub struct MockAdapter {
    content: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl MockAdapter {
    /// Answers with an empty payload
    pub fn new() -> Self {
        MockAdapter::default()
    }

    pub fn returning(content: &str) -> Self {
        MockAdapter {
            content: Some(content.to_owned()),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, query: &Query) -> Result<Option<String>, GeocodingError> {
        self.requests.lock().unwrap().push(query.url());
        Ok(self.content.clone())
    }
}

#[cfg(feature = "blocking")]
impl crate::blocking::Adapter for MockAdapter {
    fn get_content(&self, query: &Query) -> Result<Option<String>, GeocodingError> {
        self.record(query)
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl crate::async_impl::Adapter for MockAdapter {
    async fn get_content(&self, query: &Query) -> Result<Option<String>, GeocodingError> {
        self.record(query)
    }
}

/// An adapter whose transport always fails
#[derive(Debug)]
pub struct FailingAdapter;

#[cfg(feature = "blocking")]
impl crate::blocking::Adapter for FailingAdapter {
    fn get_content(&self, _query: &Query) -> Result<Option<String>, GeocodingError> {
        Err(GeocodingError::Adapter("connection refused".to_string()))
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl crate::async_impl::Adapter for FailingAdapter {
    async fn get_content(&self, _query: &Query) -> Result<Option<String>, GeocodingError> {
        Err(GeocodingError::Adapter("connection refused".to_string()))
    }
}
