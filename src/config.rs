use crate::GeocodingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity requested from a reverse-geocoding lookup
///
/// Only honoured by providers that support it (Yandex `kind`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toponym {
    House,
    Street,
    Metro,
    District,
    Locality,
}

impl Toponym {
    pub fn as_str(&self) -> &'static str {
        match self {
            Toponym::House => "house",
            Toponym::Street => "street",
            Toponym::Metro => "metro",
            Toponym::District => "district",
            Toponym::Locality => "locality",
        }
    }
}

impl fmt::Display for Toponym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Toponym {
    type Err = GeocodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(Toponym::House),
            "street" => Ok(Toponym::Street),
            "metro" => Ok(Toponym::Metro),
            "district" => Ok(Toponym::District),
            "locality" => Ok(Toponym::Locality),
            other => Err(GeocodingError::Config(format!("unknown toponym \"{}\"", other))),
        }
    }
}

/// Per-instance provider configuration
///
/// Each provider reads the options it understands and ignores the rest.
/// Options left unset are omitted from queries altogether.
///
/// ```
/// use geocoder::{ProviderConfig, Toponym};
///
/// let config = ProviderConfig::new()
///     .with_locale("uk-UA")
///     .with_toponym(Toponym::House)
///     .with_ssl(true);
/// assert_eq!(config.max_results, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Result language, e.g. `fr-FR`
    pub locale: Option<String>,
    /// Region bias
    pub region: Option<String>,
    /// Use `https` instead of `http`
    pub use_ssl: bool,
    pub api_key: Option<String>,
    pub toponym: Option<Toponym>,
    pub max_results: usize,
    /// Scheme-less endpoint replacing the provider's default one,
    /// e.g. `localhost:8080/maps/api/geocode/json`
    pub endpoint: Option<String>,
}

fn default_max_results() -> usize {
    5
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            locale: None,
            region: None,
            use_ssl: false,
            api_key: None,
            toponym: None,
            max_results: default_max_results(),
            endpoint: None,
        }
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        ProviderConfig::default()
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_owned());
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_owned());
        self
    }

    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_owned());
        self
    }

    pub fn with_toponym(mut self, toponym: Toponym) -> Self {
        self.toponym = Some(toponym);
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_owned());
        self
    }

    /// Reject values no service can honour
    pub fn validate(&self) -> Result<(), GeocodingError> {
        if self.max_results == 0 {
            return Err(GeocodingError::Config(
                "max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn endpoint_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.endpoint.as_deref().unwrap_or(default)
    }
}
