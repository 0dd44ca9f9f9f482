//! Blocking providers.
//!
//! ```no_run
//! use geocoder::blocking::{Provider, ReqwestAdapter};
//! use geocoder::{GoogleMaps, ProviderConfig};
//!
//! let adapter = ReqwestAdapter::new().unwrap();
//! let provider = GoogleMaps::new(adapter, ProviderConfig::new().with_ssl(true));
//! let locations = provider.geocode(Some("10 avenue Gambetta, Paris, France")).unwrap();
//! println!("{:?}", locations[0].coordinates());
//! ```
use crate::service::{Lookup, Service};
use crate::{default_headers, GeocodingError, Location, Query};
use log::{debug, warn};
use reqwest::blocking::Client;

pub mod google_maps;
pub mod host_ip;
pub mod yandex;

/// Fetches the raw content behind a query
///
/// `Ok(None)` and `Ok(Some(""))` both mean "nothing came back"; providers turn
/// them into a `NoResult`. Transport failures are reported as errors and
/// reach the caller unchanged.
pub trait Adapter {
    fn get_content(&self, query: &Query) -> Result<Option<String>, GeocodingError>;
}

impl<A: Adapter + ?Sized> Adapter for &A {
    fn get_content(&self, query: &Query) -> Result<Option<String>, GeocodingError> {
        (**self).get_content(query)
    }
}

/// The contract every blocking provider fulfils
pub trait Provider {
    /// Stable provider identifier, e.g. `google_maps`
    fn name(&self) -> &'static str;

    /// Geocode an address or an IP address
    ///
    /// `None` is treated as the empty string.
    fn geocode(&self, address: Option<&str>) -> Result<Vec<Location>, GeocodingError>;

    /// Look up what lies at a coordinate
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<Location>, GeocodingError>;
}

/// An adapter over a blocking `reqwest` client
///
/// The body is returned whatever the HTTP status, since services such as
/// Yandex describe their errors in it.
#[derive(Clone, Debug)]
pub struct ReqwestAdapter {
    client: Client,
}

impl ReqwestAdapter {
    pub fn new() -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .default_headers(default_headers())
            .build()?;
        Ok(ReqwestAdapter { client })
    }

    /// Use a preconfigured client, e.g. one with a timeout or a proxy
    pub fn with_client(client: Client) -> Self {
        ReqwestAdapter { client }
    }
}

impl Adapter for ReqwestAdapter {
    fn get_content(&self, query: &Query) -> Result<Option<String>, GeocodingError> {
        let resp = self.client.get(query.url()).send()?;
        let status = resp.status();
        if !status.is_success() {
            warn!("{} answered {}", query, status);
        }
        let body = resp.text()?;
        Ok(if body.is_empty() { None } else { Some(body) })
    }
}

pub(crate) fn geocode_with<S, A>(
    service: &S,
    adapter: &A,
    address: Option<&str>,
) -> Result<Vec<Location>, GeocodingError>
where
    S: Service,
    A: Adapter,
{
    match service.geocode_request(address.unwrap_or_default())? {
        Lookup::Local(locations) => Ok(locations),
        Lookup::Remote(query) => {
            debug!("{}: geocoding {}", service.name(), query);
            let content = adapter.get_content(&query)?;
            service.read_content(&query, content)
        }
    }
}

pub(crate) fn reverse_with<S, A>(
    service: &S,
    adapter: &A,
    latitude: f64,
    longitude: f64,
) -> Result<Vec<Location>, GeocodingError>
where
    S: Service,
    A: Adapter,
{
    let query = service.reverse_request(latitude, longitude)?;
    debug!("{}: reverse geocoding {}", service.name(), query);
    let content = adapter.get_content(&query)?;
    service.read_content(&query, content)
}
