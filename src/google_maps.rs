//! The [Google Maps Geocoding](https://developers.google.com/maps/documentation/geocoding) service.
//!
//! Street addresses only: IP literals are refused before any request is made.
//! Reverse lookups go through the same `address` parameter with a
//! `"lat,lon"` pair.
//!
//! Please see the [API documentation](https://developers.google.com/maps/documentation/geocoding/requests-geocoding)
//! for details on the response format.
use crate::location::normalize_country_code;
use crate::query::{add_optional_param, encode_raw, format_coordinate, Query};
use crate::service::{from_json, Capabilities, Lookup, Operation, Service};
use crate::{Bounds, Deserialize, GeocodingError, InputKind, Location, ProviderConfig};
use log::warn;

pub static GOOGLE_MAPS_ENDPOINT: &str = "maps.googleapis.com/maps/api/geocode/json";

const CAPABILITIES: Capabilities = Capabilities {
    street_address: true,
    ip_address: false,
    ipv6: false,
    reverse: true,
};

/// Query building and response parsing for Google Maps
///
/// Honours `locale` (`language`), `region`, `api_key` (`key`), `use_ssl`,
/// `max_results` and `endpoint`.
#[derive(Clone, Debug)]
pub struct GoogleMapsService {
    config: ProviderConfig,
}

impl GoogleMapsService {
    pub fn new(config: ProviderConfig) -> Self {
        GoogleMapsService { config }
    }

    fn query(&self, address: &str) -> Query {
        let mut query = Query::new(
            self.config.endpoint_or(GOOGLE_MAPS_ENDPOINT),
            self.config.use_ssl,
        )
        .with("address", encode_raw(address));
        add_optional_param!(query, self.config.locale.as_deref().map(encode_raw), "language");
        add_optional_param!(query, self.config.region.as_deref().map(encode_raw), "region");
        add_optional_param!(query, self.config.api_key.as_deref().map(encode_raw), "key");
        query
    }
}

impl Service for GoogleMapsService {
    fn name(&self) -> &'static str {
        "google_maps"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn capabilities(&self) -> Capabilities {
        CAPABILITIES
    }

    fn unsupported(&self, operation: Operation) -> GeocodingError {
        let message = match operation {
            Operation::IpAddress | Operation::Ipv6 => {
                "The GoogleMaps provider does not support IP addresses, only street addresses."
            }
            Operation::StreetAddress => "The GoogleMaps provider does not support street addresses.",
            Operation::Reverse => "The GoogleMaps provider is not able to do reverse geocoding.",
        };
        GeocodingError::UnsupportedOperation(message.to_string())
    }

    fn geocode_query(&self, input: &str, _kind: InputKind) -> Lookup {
        Lookup::Remote(self.query(input))
    }

    fn reverse_query(&self, latitude: f64, longitude: f64) -> Result<Query, GeocodingError> {
        let pair = format!(
            "{},{}",
            format_coordinate(latitude),
            format_coordinate(longitude)
        );
        Ok(self.query(&pair))
    }

    fn parse(&self, query: &Query, content: &str) -> Result<Vec<Location>, GeocodingError> {
        let res: GoogleMapsResponse = from_json(query, content)?;
        res.status.classify(query, res.error_message.as_deref())?;
        if res.results.is_empty() {
            return Err(GeocodingError::no_result(query));
        }
        Ok(res
            .results
            .iter()
            .take(self.config.max_results)
            .map(GoogleMapsResult::to_location)
            .collect())
    }
}

/// The `status` field of every response
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoogleMapsStatus {
    Ok,
    ZeroResults,
    OverDailyLimit,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
    #[serde(other)]
    Other,
}

impl GoogleMapsStatus {
    /// Map a status onto the shared error taxonomy
    ///
    /// `reason` is the service's own `error_message`, only used for logging.
    pub fn classify(self, query: &Query, reason: Option<&str>) -> Result<(), GeocodingError> {
        let reason = reason.unwrap_or("no reason given");
        match self {
            GoogleMapsStatus::Ok => Ok(()),
            GoogleMapsStatus::OverQueryLimit | GoogleMapsStatus::OverDailyLimit => {
                warn!("Google Maps quota exceeded for {}: {}", query, reason);
                Err(GeocodingError::quota_exceeded(query))
            }
            GoogleMapsStatus::RequestDenied => {
                warn!("Google Maps denied {}: {}", query, reason);
                Err(GeocodingError::invalid_credentials(query))
            }
            GoogleMapsStatus::ZeroResults
            | GoogleMapsStatus::InvalidRequest
            | GoogleMapsStatus::UnknownError
            | GoogleMapsStatus::Other => Err(GeocodingError::no_result(query)),
        }
    }
}

/// The top-level JSON response of a geocoding request
///
///```json
///{
///   "results" : [
///      {
///         "address_components" : [
///            { "long_name" : "10", "short_name" : "10", "types" : [ "street_number" ] },
///            { "long_name" : "Avenue Gambetta", "short_name" : "Avenue Gambetta", "types" : [ "route" ] },
///            { "long_name" : "Paris", "short_name" : "Paris", "types" : [ "locality", "political" ] },
///            { "long_name" : "France", "short_name" : "FR", "types" : [ "country", "political" ] },
///            { "long_name" : "75020", "short_name" : "75020", "types" : [ "postal_code" ] }
///         ],
///         "formatted_address" : "10 Avenue Gambetta, 75020 Paris, France",
///         "geometry" : {
///            "location" : { "lat" : 48.8630462, "lng" : 2.3882487 },
///            "location_type" : "ROOFTOP",
///            "viewport" : {
///               "northeast" : { "lat" : 48.8643951802915, "lng" : 2.389597680291502 },
///               "southwest" : { "lat" : 48.8616972197085, "lng" : 2.386899719708498 }
///            }
///         },
///         "types" : [ "street_address" ]
///      }
///   ],
///   "status" : "OK"
///}
///```
#[derive(Debug, Deserialize)]
pub struct GoogleMapsResponse {
    pub status: GoogleMapsStatus,
    #[serde(default)]
    pub results: Vec<GoogleMapsResult>,
    pub error_message: Option<String>,
}

/// A single geocoding result
#[derive(Debug, Deserialize)]
pub struct GoogleMapsResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
    pub place_id: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
    pub location_type: Option<LocationType>,
    pub bounds: Option<Viewport>,
    pub viewport: Option<Viewport>,
}

/// How precise `Geometry::location` is
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Rooftop,
    RangeInterpolated,
    GeometricCenter,
    Approximate,
    #[serde(other)]
    Other,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct Viewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

impl Geometry {
    /// The result's extent. A rooftop match without explicit bounds is
    /// collapsed onto its own point.
    pub fn to_bounds(&self) -> Option<Bounds> {
        match (self.bounds, self.location_type) {
            (Some(b), _) => Some(Bounds::new(
                b.southwest.lat,
                b.southwest.lng,
                b.northeast.lat,
                b.northeast.lng,
            )),
            (None, Some(LocationType::Rooftop)) => Some(Bounds::from_point(
                self.location.lat,
                self.location.lng,
            )),
            _ => None,
        }
    }
}

fn set_once(field: &mut Option<String>, value: &str) {
    if field.is_none() {
        *field = Some(value.to_owned());
    }
}

impl GoogleMapsResult {
    pub fn to_location(&self) -> Location {
        let mut location = Location {
            latitude: Some(self.geometry.location.lat),
            longitude: Some(self.geometry.location.lng),
            bounds: self.geometry.to_bounds(),
            ..Default::default()
        };
        let mut postal_town = None;

        for component in &self.address_components {
            for kind in &component.types {
                match kind.as_str() {
                    "street_number" => set_once(&mut location.street_number, &component.long_name),
                    "route" => set_once(&mut location.street_name, &component.long_name),
                    "postal_code" => set_once(&mut location.postal_code, &component.long_name),
                    "locality" => set_once(&mut location.locality, &component.long_name),
                    "postal_town" => set_once(&mut postal_town, &component.long_name),
                    "sublocality" | "sublocality_level_1" => {
                        set_once(&mut location.sub_locality, &component.long_name)
                    }
                    "administrative_area_level_2" => {
                        set_once(&mut location.county, &component.long_name)
                    }
                    "administrative_area_level_1" => {
                        set_once(&mut location.region, &component.long_name);
                        set_once(&mut location.region_code, &component.short_name);
                    }
                    "country" => {
                        set_once(&mut location.country, &component.long_name);
                        set_once(
                            &mut location.country_code,
                            &normalize_country_code(&component.short_name),
                        );
                    }
                    _ => {}
                }
            }
        }

        // Some countries (e.g. the UK) only name the town as `postal_town`
        if location.locality.is_none() {
            location.locality = postal_town;
        }
        location
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::{assert_approx, assert_bounds, fixture};

    fn service() -> GoogleMapsService {
        GoogleMapsService::new(ProviderConfig::default())
    }

    fn remote(lookup: Lookup) -> Query {
        match lookup {
            Lookup::Remote(query) => query,
            Lookup::Local(_) => panic!("expected a remote lookup"),
        }
    }

    #[test]
    fn geocode_query() {
        let query = remote(service().geocode_request("10 avenue Gambetta, Paris, France").unwrap());
        assert_eq!(
            query.url(),
            "http://maps.googleapis.com/maps/api/geocode/json?address=10%20avenue%20Gambetta%2C%20Paris%2C%20France"
        );
    }

    #[test]
    fn empty_address_keeps_the_parameter() {
        let query = remote(service().geocode_request("").unwrap());
        assert_eq!(
            query.url(),
            "http://maps.googleapis.com/maps/api/geocode/json?address="
        );
    }

    #[test]
    fn reverse_query_is_lat_lon() {
        let query = service().reverse_request(48.8631507, 2.388911).unwrap();
        assert_eq!(
            query.url(),
            "http://maps.googleapis.com/maps/api/geocode/json?address=48.863151%2C2.388911"
        );
    }

    #[test]
    fn reverse_query_zeroes_non_finite_coordinates() {
        let query = service().reverse_request(f64::NAN, f64::INFINITY).unwrap();
        assert_eq!(
            query.url(),
            "http://maps.googleapis.com/maps/api/geocode/json?address=0.000000%2C0.000000"
        );

        let query = service().reverse_request(48.8631507, f64::NEG_INFINITY).unwrap();
        assert_eq!(
            query.url(),
            "http://maps.googleapis.com/maps/api/geocode/json?address=48.863151%2C0.000000"
        );
    }

    #[test]
    fn zero_max_results_is_refused_before_any_query() {
        let service = GoogleMapsService::new(ProviderConfig::new().with_max_results(0));
        assert!(matches!(
            service.geocode_request("Paris"),
            Err(GeocodingError::Config(_))
        ));
        assert!(matches!(
            service.reverse_request(1.0, 2.0),
            Err(GeocodingError::Config(_))
        ));
    }

    #[test]
    fn query_with_all_options() {
        let config = ProviderConfig::new()
            .with_locale("fr-FR")
            .with_region("fr")
            .with_api_key("fake_key")
            .with_ssl(true);
        let query = remote(
            GoogleMapsService::new(config)
                .geocode_request("Columbia University")
                .unwrap(),
        );
        assert_eq!(
            query.url(),
            "https://maps.googleapis.com/maps/api/geocode/json?address=Columbia%20University&language=fr-FR&region=fr&key=fake_key"
        );
    }

    #[test]
    fn refuses_ip_addresses() {
        for ip in ["127.0.0.1", "::1", "74.200.247.59"] {
            let err = service().geocode_request(ip).unwrap_err();
            assert_eq!(
                err.to_string(),
                "The GoogleMaps provider does not support IP addresses, only street addresses."
            );
            assert!(matches!(err, GeocodingError::UnsupportedOperation(_)));
        }
    }

    #[test]
    fn parses_rooftop_result() {
        let service = service();
        let query = remote(service.geocode_request("10 avenue Gambetta, Paris, France").unwrap());
        let res = service
            .parse(&query, &fixture("google_maps_gambetta.json"))
            .unwrap();
        assert_eq!(res.len(), 1);

        let location = &res[0];
        assert_approx(location.latitude, 48.8630462);
        assert_approx(location.longitude, 2.3882487);
        assert_bounds(location.bounds, 48.8630462, 2.3882487, 48.8630462, 2.3882487);
        assert_eq!(location.street_number.as_deref(), Some("10"));
        assert_eq!(location.street_name.as_deref(), Some("Avenue Gambetta"));
        assert_eq!(location.postal_code.as_deref(), Some("75020"));
        assert_eq!(location.locality.as_deref(), Some("Paris"));
        assert_eq!(location.county.as_deref(), Some("Paris"));
        assert_eq!(location.region.as_deref(), Some("Île-de-France"));
        assert_eq!(location.region_code.as_deref(), Some("IDF"));
        assert_eq!(location.country.as_deref(), Some("France"));
        assert_eq!(location.country_code.as_deref(), Some("FR"));
        assert_eq!(location.sub_locality, None);
        assert_eq!(location.timezone, None);
    }

    #[test]
    fn keeps_service_ordering() {
        let service = service();
        let query = remote(service.geocode_request("Paris").unwrap());
        let res = service
            .parse(&query, &fixture("google_maps_paris.json"))
            .unwrap();
        assert_eq!(res.len(), 5);

        let countries: Vec<_> = res.iter().map(|l| l.country_code.as_deref()).collect();
        assert_eq!(
            countries,
            vec![Some("FR"), Some("US"), Some("US"), Some("US"), Some("US")]
        );
        assert!(res.iter().all(|l| l.locality.as_deref() == Some("Paris")));
        assert_approx(res[0].latitude, 48.856614);
        assert_approx(res[0].longitude, 2.3522219);
        assert_approx(res[1].latitude, 33.6609389);
        assert_approx(res[1].longitude, -95.555513);
        assert_approx(res[2].latitude, 36.3020023);
        assert_approx(res[3].longitude, -87.6961374);
        assert_approx(res[4].latitude, 38.2097987);
        assert_eq!(res[4].region.as_deref(), Some("Kentucky"));
        assert_eq!(res[4].country.as_deref(), Some("United States"));
    }

    #[test]
    fn explicit_bounds_win_over_point() {
        let service = service();
        let query = remote(service.geocode_request("Paris").unwrap());
        let res = service
            .parse(&query, &fixture("google_maps_paris.json"))
            .unwrap();
        assert_bounds(res[0].bounds, 48.815573, 2.224199, 48.9021449, 2.4699208);
        // approximate match, no bounds returned
        assert_eq!(res[3].bounds, None);
    }

    #[test]
    fn truncates_to_max_results() {
        let service = GoogleMapsService::new(ProviderConfig::new().with_max_results(2));
        let query = remote(service.geocode_request("Paris").unwrap());
        let res = service
            .parse(&query, &fixture("google_maps_paris.json"))
            .unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].country.as_deref(), Some("France"));
    }

    #[test]
    fn picks_sub_locality_and_postal_town() {
        let json = r#"{
            "results": [{
                "address_components": [
                    { "long_name": "10", "short_name": "10", "types": ["street_number"] },
                    { "long_name": "Kalbacher Hauptstraße", "short_name": "Kalbacher Hauptstraße", "types": ["route"] },
                    { "long_name": "Kalbach-Riedberg", "short_name": "Kalbach-Riedberg", "types": ["sublocality_level_1", "sublocality", "political"] },
                    { "long_name": "Frankfurt", "short_name": "Frankfurt", "types": ["locality", "political"] },
                    { "long_name": "de", "short_name": "de", "types": ["country", "political"] }
                ],
                "geometry": {
                    "location": { "lat": 50.1856803, "lng": 8.6506285 },
                    "location_type": "RANGE_INTERPOLATED"
                }
            }, {
                "address_components": [
                    { "long_name": "Guildford", "short_name": "Guildford", "types": ["postal_town"] },
                    { "long_name": "United Kingdom", "short_name": "GB", "types": ["country", "political"] }
                ],
                "geometry": { "location": { "lat": 51.2362, "lng": -0.5704 } }
            }],
            "status": "OK"
        }"#;
        let service = service();
        let query = remote(service.geocode_request("Kalbach").unwrap());
        let res = service.parse(&query, json).unwrap();

        assert_eq!(res[0].sub_locality.as_deref(), Some("Kalbach-Riedberg"));
        assert_eq!(res[0].locality.as_deref(), Some("Frankfurt"));
        assert_eq!(res[0].country_code.as_deref(), Some("DE"));
        assert_eq!(res[0].bounds, None);
        assert_eq!(res[1].locality.as_deref(), Some("Guildford"));
    }

    #[test]
    fn status_mapping() {
        let service = service();
        let query = remote(service.geocode_request("10 avenue Gambetta, Paris, France").unwrap());
        let url = "http://maps.googleapis.com/maps/api/geocode/json?address=10%20avenue%20Gambetta%2C%20Paris%2C%20France";

        let err = service
            .parse(&query, r#"{"status":"OVER_QUERY_LIMIT"}"#)
            .unwrap_err();
        assert!(matches!(err, GeocodingError::QuotaExceeded(_)));
        assert_eq!(err.to_string(), format!("Daily quota exceeded {}", url));

        let err = service
            .parse(
                &query,
                r#"{"error_message":"The provided API key is invalid.", "status":"REQUEST_DENIED"}"#,
            )
            .unwrap_err();
        assert!(matches!(err, GeocodingError::InvalidCredentials(_)));
        assert_eq!(err.to_string(), format!("API key is invalid {}", url));

        for body in [
            r#"{"status":"OK"}"#,
            r#"{"status":"ZERO_RESULTS","results":[]}"#,
            r#"{"status":"INVALID_REQUEST","results":[]}"#,
            r#"{"status":"UNKNOWN_ERROR","results":[]}"#,
            r#"{"status":"SOMETHING_NEW"}"#,
            "<html>not json</html>",
        ] {
            let err = service.parse(&query, body).unwrap_err();
            assert!(matches!(err, GeocodingError::NoResult(_)), "{}", body);
            assert_eq!(
                err.to_string(),
                format!("Could not execute query \"{}\".", url)
            );
        }
    }

    #[test]
    fn keeps_the_error_message() {
        let res: GoogleMapsResponse = serde_json::from_str(
            r#"{"error_message":"You have exceeded your daily request quota for this API.","results":[],"status":"OVER_DAILY_LIMIT"}"#,
        )
        .unwrap();
        assert_eq!(res.status, GoogleMapsStatus::OverDailyLimit);
        assert_eq!(
            res.error_message.as_deref(),
            Some("You have exceeded your daily request quota for this API.")
        );

        let query = remote(service().geocode_request("Paris").unwrap());
        assert!(matches!(
            res.status.classify(&query, res.error_message.as_deref()),
            Err(GeocodingError::QuotaExceeded(_))
        ));
        assert!(matches!(
            GoogleMapsStatus::RequestDenied.classify(&query, None),
            Err(GeocodingError::InvalidCredentials(_))
        ));
    }
}
