//! The transport-free half of a provider.
//!
//! A [`Service`](trait.Service.html) knows what a backing geocoding service can do, how to
//! turn validated input into a [`Query`](../struct.Query.html) and how to read the
//! service's payload back into [`Location`](../struct.Location.html) records.
//! The blocking and async providers only add an adapter on top of it.
use crate::ip::InputKind;
use crate::query::Query;
use crate::{GeocodingError, Location, ProviderConfig};
use log::debug;

/// Static facts about what a backing service supports
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub street_address: bool,
    pub ip_address: bool,
    pub ipv6: bool,
    pub reverse: bool,
}

/// An operation a provider may refuse
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    StreetAddress,
    IpAddress,
    Ipv6,
    Reverse,
}

impl Capabilities {
    /// Check an input against this table, returning the refused operation
    pub fn check(&self, input: &InputKind) -> Result<(), Operation> {
        match input {
            InputKind::Address if !self.street_address => Err(Operation::StreetAddress),
            InputKind::Ipv4(_) | InputKind::Ipv6(_) if !self.ip_address => {
                Err(Operation::IpAddress)
            }
            InputKind::Ipv6(_) if !self.ipv6 => Err(Operation::Ipv6),
            _ => Ok(()),
        }
    }
}

/// What to do once an input has been validated
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    /// Ask the backing service
    Remote(Query),
    /// Answer without contacting the network
    Local(Vec<Location>),
}

pub trait Service {
    /// Stable provider identifier
    fn name(&self) -> &'static str;

    fn config(&self) -> &ProviderConfig;

    fn capabilities(&self) -> Capabilities;

    /// The error raised when this provider refuses an operation
    fn unsupported(&self, operation: Operation) -> GeocodingError;

    /// Build the lookup for an input that passed the capability check
    fn geocode_query(&self, input: &str, kind: InputKind) -> Lookup;

    /// Build the query for a reverse lookup
    fn reverse_query(&self, _latitude: f64, _longitude: f64) -> Result<Query, GeocodingError> {
        Err(self.unsupported(Operation::Reverse))
    }

    /// Read a non-empty payload returned for `query`
    fn parse(&self, query: &Query, content: &str) -> Result<Vec<Location>, GeocodingError>;

    fn geocode_request(&self, input: &str) -> Result<Lookup, GeocodingError> {
        self.config().validate()?;
        let kind = InputKind::of(input);
        self.capabilities()
            .check(&kind)
            .map_err(|operation| self.unsupported(operation))?;
        Ok(self.geocode_query(input, kind))
    }

    /// Validate and build a reverse lookup
    ///
    /// A coordinate that is NaN or infinite is sent as `0.0`.
    fn reverse_request(&self, latitude: f64, longitude: f64) -> Result<Query, GeocodingError> {
        self.config().validate()?;
        if !self.capabilities().reverse {
            return Err(self.unsupported(Operation::Reverse));
        }
        self.reverse_query(finite_or_zero(latitude), finite_or_zero(longitude))
    }

    /// Turn whatever the adapter returned into locations
    ///
    /// A missing or blank payload, as well as a parse yielding nothing, is a `NoResult`.
    fn read_content(
        &self,
        query: &Query,
        content: Option<String>,
    ) -> Result<Vec<Location>, GeocodingError> {
        let content = match content {
            Some(content) if !content.trim().is_empty() => content,
            _ => {
                debug!("{}: empty payload for {}", self.name(), query);
                return Err(GeocodingError::no_result(query));
            }
        };
        let locations = self.parse(query, &content)?;
        if locations.is_empty() {
            return Err(GeocodingError::no_result(query));
        }
        Ok(locations)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        debug!("Replacing non-finite coordinate {} with 0", value);
        0.0
    }
}

/// Deserialize a payload, treating malformed JSON as the absence of a result
pub(crate) fn from_json<T>(query: &Query, content: &str) -> Result<T, GeocodingError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(content).map_err(|e| {
        debug!("Unparseable payload for {}: {}", query, e);
        GeocodingError::no_result(query)
    })
}
