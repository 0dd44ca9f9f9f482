//! The [HostIp](https://www.hostip.info) IP geolocation service.
//!
//! IPv4 only. Loopback is answered locally with the
//! [localhost record](../struct.Location.html#method.localhost).
use crate::location::normalize_country_code;
use crate::query::{encode_form, Query};
use crate::service::{from_json, Capabilities, Lookup, Operation, Service};
use crate::{Deserialize, GeocodingError, InputKind, Location, ProviderConfig};
use log::debug;
use serde::Deserializer;
use std::net::Ipv4Addr;

pub static HOST_IP_ENDPOINT: &str = "api.hostip.info/get_json.php";

const CAPABILITIES: Capabilities = Capabilities {
    street_address: false,
    ip_address: true,
    ipv6: false,
    reverse: false,
};

// Placeholders HostIp uses for values it does not know
const UNKNOWN_MARKERS: [&str; 3] = ["(Unknown City?)", "(Unknown Country?)", "(Private Address)"];
const UNKNOWN_COUNTRY_CODE: &str = "XX";

/// Query building and response parsing for HostIp
///
/// Only `use_ssl` and `endpoint` apply.
#[derive(Clone, Debug)]
pub struct HostIpService {
    config: ProviderConfig,
}

impl HostIpService {
    pub fn new(config: ProviderConfig) -> Self {
        HostIpService { config }
    }
}

impl Service for HostIpService {
    fn name(&self) -> &'static str {
        "host_ip"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn capabilities(&self) -> Capabilities {
        CAPABILITIES
    }

    fn unsupported(&self, operation: Operation) -> GeocodingError {
        let message = match operation {
            Operation::StreetAddress => "The HostIp provider does not support Street addresses.",
            Operation::Ipv6 => "The HostIp provider does not support IPv6 addresses.",
            Operation::IpAddress => "The HostIp provider does not support IP addresses.",
            Operation::Reverse => "The HostIp provider is not able to do reverse geocoding.",
        };
        GeocodingError::UnsupportedOperation(message.to_string())
    }

    fn geocode_query(&self, input: &str, kind: InputKind) -> Lookup {
        if kind == InputKind::Ipv4(Ipv4Addr::LOCALHOST) {
            debug!("host_ip: answering {} locally", input);
            return Lookup::Local(vec![Location::localhost()]);
        }
        Lookup::Remote(
            Query::new(
                self.config.endpoint_or(HOST_IP_ENDPOINT),
                self.config.use_ssl,
            )
            .with("ip", encode_form(input))
            .with("position", "true"),
        )
    }

    fn parse(&self, query: &Query, content: &str) -> Result<Vec<Location>, GeocodingError> {
        let res: HostIpResponse = from_json(query, content)?;
        Ok(vec![res.to_location()])
    }
}

/// Latitude and longitude come back as strings, numbers or `null`
fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFloat {
        String(String),
        Float(f64),
    }

    Ok(
        match Option::<StringOrFloat>::deserialize(deserializer)? {
            Some(StringOrFloat::Float(f)) => Some(f),
            Some(StringOrFloat::String(s)) => s.trim().parse().ok(),
            None => None,
        },
    )
}

/// The JSON response
///
///```json
///{
///  "country_name": "FRANCE",
///  "country_code": "FR",
///  "city": "Aulnat",
///  "ip": "88.188.221.14",
///  "lat": "45.5333",
///  "lng": "2.6167"
///}
///```
#[derive(Debug, Deserialize)]
pub struct HostIpResponse {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub lng: Option<f64>,
}

fn known(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !UNKNOWN_MARKERS.contains(v))
        .map(str::to_owned)
}

impl HostIpResponse {
    pub fn to_location(&self) -> Location {
        Location {
            latitude: self.lat,
            longitude: self.lng,
            locality: known(&self.city),
            country: known(&self.country_name),
            country_code: self
                .country_code
                .as_deref()
                .filter(|code| *code != UNKNOWN_COUNTRY_CODE)
                .map(normalize_country_code),
            ..Default::default()
        }
    }
}
