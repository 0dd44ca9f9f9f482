//! This crate provides one provider contract over three geocoding services:
//! [Google Maps](google_maps/index.html), [Yandex](yandex/index.html) and
//! [HostIp](host_ip/index.html).
//!
//! Every provider accepts an address or IP string (`geocode`) or a coordinate pair
//! (`reverse`) and answers with a list of [`Location`](struct.Location.html) records, whatever
//! the service's own response format looks like. Failures fall into one shared
//! [`GeocodingError`](enum.GeocodingError.html) taxonomy, so callers can tell a missing result
//! from a refused input, an exhausted quota or a rejected API key.
//!
//! A provider is made of two halves:
//!
//! - a [`Service`](trait.Service.html), which validates input, builds the
//!   [`Query`](struct.Query.html) and parses the payload. It never touches the network.
//! - an adapter, which fetches a query's content. [`blocking`](blocking/index.html) and
//!   [`async_impl`](async_impl/index.html) each ship a reqwest-backed adapter, and any other
//!   transport can be plugged in by implementing their `Adapter` trait.
//!
//! ```
//! use geocoder::{GoogleMapsService, Lookup, ProviderConfig, Service};
//!
//! let service = GoogleMapsService::new(ProviderConfig::new().with_locale("fr-FR"));
//! match service.geocode_request("10 avenue Gambetta, Paris, France").unwrap() {
//!     Lookup::Remote(query) => assert_eq!(
//!         query.url(),
//!         "http://maps.googleapis.com/maps/api/geocode/json?address=10%20avenue%20Gambetta%2C%20Paris%2C%20France&language=fr-FR"
//!     ),
//!     Lookup::Local(_) => unreachable!(),
//! }
//! ```
//!
//! ### A note on Coordinate Order
//! `reverse` takes `latitude, longitude`, and `Location` stores them in named fields.
//! [`Location::coordinates`](struct.Location.html#method.coordinates) and
//! [`Bounds::to_rect`](struct.Bounds.html#method.to_rect) convert to `geo-types` in
//! `[Longitude, Latitude]` (`x, y`) order.
//!
//! ### Usage of rustls
//!
//! If you like to use [rustls](https://github.com/ctz/rustls) instead of OpenSSL
//! you can enable the `rustls-tls` feature in your `Cargo.toml`:
//!
//!```toml
//![dependencies]
//!geocoder = { version = "*", default-features = false, features = ["rustls-tls", "blocking"] }
//!```

#[cfg(any(feature = "blocking", feature = "async"))]
static UA_STRING: &str = "Rust-Geocoder";

pub use geo_types::{Coordinate, Point};
#[cfg(any(feature = "blocking", feature = "async"))]
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

mod config;
mod error;
mod ip;
mod location;
mod query;
mod service;

#[cfg(feature = "async")]
pub mod async_impl;
#[cfg(feature = "blocking")]
pub mod blocking;
#[cfg(test)]
mod test_support;

pub use crate::config::{ProviderConfig, Toponym};
pub use crate::error::GeocodingError;
pub use crate::ip::InputKind;
pub use crate::location::{Bounds, Location, LOCALHOST};
pub use crate::query::{encode_form, encode_raw, Query};
pub use crate::service::{Capabilities, Lookup, Operation, Service};

// The Google Maps geocoding provider
pub mod google_maps;
pub use crate::google_maps::GoogleMapsService;
#[cfg(feature = "blocking")]
pub use crate::blocking::google_maps::GoogleMaps;

// The Yandex geocoding provider
pub mod yandex;
pub use crate::yandex::YandexService;
#[cfg(feature = "blocking")]
pub use crate::blocking::yandex::Yandex;

// The HostIp geolocation provider
pub mod host_ip;
pub use crate::host_ip::HostIpService;
#[cfg(feature = "blocking")]
pub use crate::blocking::host_ip::HostIp;

/// Headers sent with every request made by the bundled adapters
#[cfg(any(feature = "blocking", feature = "async"))]
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(UA_STRING));
    headers
}
