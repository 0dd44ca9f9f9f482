//! Async providers, built on `reqwest::Client`.
//!
//! ```no_run
//! use geocoder::async_impl::{HostIp, Provider, ReqwestAdapter};
//! use geocoder::ProviderConfig;
//!
//! # async fn run() -> Result<(), geocoder::GeocodingError> {
//! let provider = HostIp::new(ReqwestAdapter::new()?, ProviderConfig::default());
//! let locations = provider.geocode(Some("88.188.221.14")).await?;
//! println!("{:?}", locations[0].locality);
//! # Ok(())
//! # }
//! ```
use crate::service::{Lookup, Service};
use crate::{default_headers, GeocodingError, Location, Query};
use async_trait::async_trait;
use log::{debug, warn};

mod google_maps;
mod host_ip;
mod yandex;

pub use self::google_maps::GoogleMaps;
pub use self::host_ip::HostIp;
pub use self::yandex::Yandex;

/// Fetches the raw content behind a query
///
/// Same contract as the [blocking adapter](../blocking/trait.Adapter.html).
#[async_trait]
pub trait Adapter: Send + Sync {
    async fn get_content(&self, query: &Query) -> Result<Option<String>, GeocodingError>;
}

#[async_trait]
impl<A: Adapter + ?Sized> Adapter for &A {
    async fn get_content(&self, query: &Query) -> Result<Option<String>, GeocodingError> {
        (**self).get_content(query).await
    }
}

#[async_trait]
pub trait Provider {
    /// Stable provider identifier, e.g. `google_maps`
    fn name(&self) -> &'static str;

    /// Geocode an address or an IP address. `None` is treated as the empty string.
    async fn geocode(&self, address: Option<&str>) -> Result<Vec<Location>, GeocodingError>;

    async fn reverse(&self, latitude: f64, longitude: f64)
        -> Result<Vec<Location>, GeocodingError>;
}

/// An adapter over an async `reqwest` client
#[derive(Clone, Debug)]
pub struct ReqwestAdapter {
    client: reqwest::Client,
}

impl ReqwestAdapter {
    pub fn new() -> Result<Self, GeocodingError> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers())
            .build()?;
        Ok(ReqwestAdapter { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        ReqwestAdapter { client }
    }
}

#[async_trait]
impl Adapter for ReqwestAdapter {
    async fn get_content(&self, query: &Query) -> Result<Option<String>, GeocodingError> {
        let resp = self.client.get(query.url()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!("{} answered {}", query, status);
        }
        let body = resp.text().await?;
        Ok(if body.is_empty() { None } else { Some(body) })
    }
}

pub(crate) async fn geocode_with<S, A>(
    service: &S,
    adapter: &A,
    address: Option<&str>,
) -> Result<Vec<Location>, GeocodingError>
where
    S: Service + Sync,
    A: Adapter,
{
    match service.geocode_request(address.unwrap_or_default())? {
        Lookup::Local(locations) => Ok(locations),
        Lookup::Remote(query) => {
            debug!("{}: geocoding {}", service.name(), query);
            let content = adapter.get_content(&query).await?;
            service.read_content(&query, content)
        }
    }
}

pub(crate) async fn reverse_with<S, A>(
    service: &S,
    adapter: &A,
    latitude: f64,
    longitude: f64,
) -> Result<Vec<Location>, GeocodingError>
where
    S: Service + Sync,
    A: Adapter,
{
    let query = service.reverse_request(latitude, longitude)?;
    debug!("{}: reverse geocoding {}", service.name(), query);
    let content = adapter.get_content(&query).await?;
    service.read_content(&query, content)
}
