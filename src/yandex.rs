//! The [Yandex Geocoder](https://yandex.com/dev/maps/geocoder/) service.
//!
//! Yandex names places in the language given by `locale` (`lang`), so the same
//! query yields the same coordinates but different region and country names
//! depending on the locale. Reverse lookups take a `lon,lat` pair and an
//! optional [`Toponym`](../enum.Toponym.html) (`kind`).
use crate::location::normalize_country_code;
use crate::query::{add_optional_param, encode_form, format_coordinate, Query};
use crate::service::{from_json, Capabilities, Lookup, Operation, Service};
use crate::{Bounds, Deserialize, GeocodingError, InputKind, Location, ProviderConfig};
use log::warn;
use serde::Deserializer;

pub static YANDEX_ENDPOINT: &str = "geocode-maps.yandex.ru/1.x/";

const CAPABILITIES: Capabilities = Capabilities {
    street_address: true,
    ip_address: false,
    ipv6: false,
    reverse: true,
};

/// Query building and response parsing for Yandex
///
/// Honours `locale` (`lang`), `toponym` (`kind`), `max_results` (`results`),
/// `api_key` (`apikey`), `use_ssl` and `endpoint`.
#[derive(Clone, Debug)]
pub struct YandexService {
    config: ProviderConfig,
}

impl YandexService {
    pub fn new(config: ProviderConfig) -> Self {
        YandexService { config }
    }

    fn query(&self, geocode: String) -> Query {
        Query::new(self.config.endpoint_or(YANDEX_ENDPOINT), self.config.use_ssl)
            .with("format", "json")
            .with("geocode", geocode)
    }

    fn finish(&self, mut query: Query) -> Query {
        let lang = self
            .config
            .locale
            .as_deref()
            .map(|locale| encode_form(&locale.replace('_', "-")));
        add_optional_param!(query, lang, "lang");
        query.push("results", self.config.max_results.to_string());
        add_optional_param!(query, self.config.api_key.as_deref().map(encode_form), "apikey");
        query
    }
}

impl Service for YandexService {
    fn name(&self) -> &'static str {
        "yandex"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn capabilities(&self) -> Capabilities {
        CAPABILITIES
    }

    fn unsupported(&self, operation: Operation) -> GeocodingError {
        let message = match operation {
            Operation::IpAddress | Operation::Ipv6 => "The Yandex does not support IP addresses.",
            Operation::StreetAddress => "The Yandex does not support street addresses.",
            Operation::Reverse => "The Yandex is not able to do reverse geocoding.",
        };
        GeocodingError::UnsupportedOperation(message.to_string())
    }

    fn geocode_query(&self, input: &str, _kind: InputKind) -> Lookup {
        Lookup::Remote(self.finish(self.query(encode_form(input))))
    }

    fn reverse_query(&self, latitude: f64, longitude: f64) -> Result<Query, GeocodingError> {
        // Yandex expects lon, lat order
        let mut query = self.query(format!(
            "{},{}",
            format_coordinate(longitude),
            format_coordinate(latitude)
        ));
        add_optional_param!(query, self.config.toponym.map(|t| t.as_str()), "kind");
        Ok(self.finish(query))
    }

    fn parse(&self, query: &Query, content: &str) -> Result<Vec<Location>, GeocodingError> {
        let res: YandexResponse = from_json(query, content)?;
        res.status().classify(query, res.reason())?;

        let collection = match res.response {
            Some(body) => body.geo_object_collection,
            None => return Err(GeocodingError::no_result(query)),
        };
        let found = &collection
            .meta_data_property
            .geocoder_response_meta_data
            .found;
        if found == "0" || collection.feature_member.is_empty() {
            return Err(GeocodingError::no_result(query));
        }
        Ok(collection
            .feature_member
            .iter()
            .map(|member| member.geo_object.to_location())
            .collect())
    }
}

pub fn deserialize_string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::String(s) => Ok(s),
        StringOrInt::Int(i) => Ok(i.to_string()),
    }
}

/// Error statuses Yandex reports, either as `statusCode` or inside `error`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum YandexStatus {
    Ok,
    Unauthorized,
    Forbidden,
    TooManyRequests,
    Other(u16),
    Unknown,
}

impl YandexStatus {
    pub fn from_code(code: u16) -> Self {
        match code {
            200 => YandexStatus::Ok,
            401 => YandexStatus::Unauthorized,
            403 => YandexStatus::Forbidden,
            429 => YandexStatus::TooManyRequests,
            other => YandexStatus::Other(other),
        }
    }

    /// Map a status onto the shared error taxonomy
    ///
    /// `reason` is the service's own error message, only used for logging.
    pub fn classify(self, query: &Query, reason: Option<&str>) -> Result<(), GeocodingError> {
        let reason = reason.unwrap_or("no reason given");
        match self {
            YandexStatus::Ok => Ok(()),
            YandexStatus::Unauthorized | YandexStatus::Forbidden => {
                warn!("Yandex rejected the credentials of {}: {}", query, reason);
                Err(GeocodingError::invalid_credentials(query))
            }
            YandexStatus::TooManyRequests => {
                warn!("Yandex quota exceeded for {}: {}", query, reason);
                Err(GeocodingError::quota_exceeded(query))
            }
            YandexStatus::Other(_) | YandexStatus::Unknown => Err(GeocodingError::no_result(query)),
        }
    }
}

/// The top-level JSON response
///
///```json
///{
///  "response": {
///    "GeoObjectCollection": {
///      "metaDataProperty": {
///        "GeocoderResponseMetaData": { "request": "10 avenue Gambetta, Paris, France", "found": "5", "results": "5" }
///      },
///      "featureMember": [
///        {
///          "GeoObject": {
///            "metaDataProperty": {
///              "GeocoderMetaData": {
///                "kind": "house",
///                "text": "Франция, Иль-Де-Франс, Avenue Gambetta, 10",
///                "precision": "exact",
///                "AddressDetails": {
///                  "Country": {
///                    "CountryNameCode": "FR",
///                    "CountryName": "Франция",
///                    "AdministrativeArea": {
///                      "AdministrativeAreaName": "Иль-Де-Франс",
///                      "Thoroughfare": { "ThoroughfareName": "Avenue Gambetta", "Premise": { "PremiseNumber": "10" } }
///                    }
///                  }
///                }
///              }
///            },
///            "boundedBy": { "Envelope": { "lowerCorner": "2.386967 48.861926", "upperCorner": "2.391064 48.864629" } },
///            "Point": { "pos": "2.389016 48.863277" }
///          }
///        }
///      ]
///    }
///  }
///}
///```
///
/// Failures come back as `{"statusCode": 403, "error": "Forbidden", "message": "Invalid api key"}`
/// or as `{"error": {"status": "401", "message": "invalid key"}}`.
#[derive(Debug, Deserialize)]
pub struct YandexResponse {
    pub response: Option<YandexBody>,
    pub error: Option<YandexError>,
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    pub message: Option<String>,
}

impl YandexResponse {
    pub fn status(&self) -> YandexStatus {
        let code = match &self.error {
            Some(YandexError::Detailed { status, .. }) => status.parse().ok(),
            Some(YandexError::Text(_)) => self.status_code,
            None => match self.status_code {
                Some(code) => Some(code),
                None => return YandexStatus::Ok,
            },
        };
        code.map(YandexStatus::from_code)
            .unwrap_or(YandexStatus::Unknown)
    }

    /// The service's explanation of a failure, whichever error shape carried it
    pub fn reason(&self) -> Option<&str> {
        match &self.error {
            Some(YandexError::Detailed {
                message: Some(message),
                ..
            }) => Some(message),
            Some(YandexError::Text(text)) => self.message.as_deref().or(Some(text)),
            _ => self.message.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum YandexError {
    Detailed {
        #[serde(deserialize_with = "deserialize_string_or_int")]
        status: String,
        message: Option<String>,
    },
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct YandexBody {
    #[serde(rename = "GeoObjectCollection")]
    pub geo_object_collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoObjectCollection {
    pub meta_data_property: CollectionMetaData,
    #[serde(default)]
    pub feature_member: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionMetaData {
    #[serde(rename = "GeocoderResponseMetaData")]
    pub geocoder_response_meta_data: ResponseMetaData,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMetaData {
    pub request: Option<String>,
    #[serde(deserialize_with = "deserialize_string_or_int")]
    pub found: String,
}

#[derive(Debug, Deserialize)]
pub struct FeatureMember {
    #[serde(rename = "GeoObject")]
    pub geo_object: GeoObject,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoObject {
    pub meta_data_property: ObjectMetaData,
    pub name: Option<String>,
    pub description: Option<String>,
    pub bounded_by: Option<BoundedBy>,
    #[serde(rename = "Point")]
    pub point: Option<YandexPoint>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectMetaData {
    #[serde(rename = "GeocoderMetaData")]
    pub geocoder_meta_data: GeocoderMetaData,
}

#[derive(Debug, Deserialize)]
pub struct GeocoderMetaData {
    pub kind: Option<String>,
    pub text: Option<String>,
    pub precision: Option<String>,
    #[serde(rename = "AddressDetails", default)]
    pub address_details: AddressNode,
}

#[derive(Debug, Deserialize)]
pub struct BoundedBy {
    #[serde(rename = "Envelope")]
    pub envelope: Envelope,
}

/// Corners are `"lon lat"` strings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub lower_corner: String,
    pub upper_corner: String,
}

/// A `"lon lat"` position
#[derive(Debug, Deserialize)]
pub struct YandexPoint {
    pub pos: String,
}

/// One level of the xAL address hierarchy
///
/// Levels nest to a varying depth (a locality may hang directly off the
/// country, or sit below one or two administrative areas), so every level is
/// modelled by the same node type.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressNode {
    pub address_line: Option<String>,
    pub country_name: Option<String>,
    pub country_name_code: Option<String>,
    pub administrative_area_name: Option<String>,
    pub sub_administrative_area_name: Option<String>,
    pub locality_name: Option<String>,
    pub dependent_locality_name: Option<String>,
    pub thoroughfare_name: Option<String>,
    pub premise_number: Option<String>,
    pub postal_code_number: Option<String>,

    pub country: Option<Box<AddressNode>>,
    pub administrative_area: Option<Box<AddressNode>>,
    pub sub_administrative_area: Option<Box<AddressNode>>,
    pub locality: Option<Box<AddressNode>>,
    pub dependent_locality: Option<Box<AddressNode>>,
    pub thoroughfare: Option<Box<AddressNode>>,
    pub premise: Option<Box<AddressNode>>,
    pub postal_code: Option<Box<AddressNode>>,
}

fn overwrite(field: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        field.clone_from(value);
    }
}

impl AddressNode {
    /// Copy this level's names into `location`, then descend. The finest
    /// level naming a field wins.
    fn collect_into(&self, location: &mut Location) {
        overwrite(&mut location.country, &self.country_name);
        overwrite(&mut location.country_code, &self.country_name_code);
        overwrite(&mut location.region, &self.administrative_area_name);
        overwrite(&mut location.county, &self.sub_administrative_area_name);
        overwrite(&mut location.locality, &self.locality_name);
        overwrite(&mut location.sub_locality, &self.dependent_locality_name);
        overwrite(&mut location.street_name, &self.thoroughfare_name);
        overwrite(&mut location.street_number, &self.premise_number);
        overwrite(&mut location.postal_code, &self.postal_code_number);

        let children = [
            &self.country,
            &self.administrative_area,
            &self.sub_administrative_area,
            &self.locality,
            &self.dependent_locality,
            &self.thoroughfare,
            &self.premise,
            &self.postal_code,
        ];
        for child in children.into_iter().flatten() {
            child.collect_into(location);
        }
    }
}

fn parse_pair(pos: &str) -> Option<(f64, f64)> {
    let mut parts = pos.split_whitespace().map(str::parse::<f64>);
    match (parts.next(), parts.next()) {
        (Some(Ok(lon)), Some(Ok(lat))) => Some((lon, lat)),
        _ => None,
    }
}

impl GeoObject {
    pub fn to_bounds(&self) -> Option<Bounds> {
        let envelope = &self.bounded_by.as_ref()?.envelope;
        let (west, south) = parse_pair(&envelope.lower_corner)?;
        let (east, north) = parse_pair(&envelope.upper_corner)?;
        Some(Bounds::new(south, west, north, east))
    }

    pub fn to_location(&self) -> Location {
        let mut location = Location::default();
        self.meta_data_property
            .geocoder_meta_data
            .address_details
            .collect_into(&mut location);
        location.country_code = location
            .country_code
            .as_deref()
            .map(normalize_country_code);

        if let Some((lon, lat)) = self.point.as_ref().and_then(|p| parse_pair(&p.pos)) {
            location.latitude = Some(lat);
            location.longitude = Some(lon);
        }
        location.bounds = self.to_bounds();
        location
    }
}
