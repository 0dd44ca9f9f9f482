use crate::async_impl::{geocode_with, reverse_with, Adapter, Provider, ReqwestAdapter};
use crate::google_maps::GoogleMapsService;
use crate::{GeocodingError, Location, ProviderConfig, Service};
use async_trait::async_trait;

/// An instance of the Google Maps geocoding provider
pub struct GoogleMaps<A = ReqwestAdapter> {
    adapter: A,
    service: GoogleMapsService,
}

impl<A: Adapter> GoogleMaps<A> {
    pub fn new(adapter: A, config: ProviderConfig) -> Self {
        GoogleMaps {
            adapter,
            service: GoogleMapsService::new(config),
        }
    }

    pub fn service(&self) -> &GoogleMapsService {
        &self.service
    }
}

#[async_trait]
impl<A: Adapter> Provider for GoogleMaps<A> {
    fn name(&self) -> &'static str {
        self.service.name()
    }

    async fn geocode(&self, address: Option<&str>) -> Result<Vec<Location>, GeocodingError> {
        geocode_with(&self.service, &self.adapter, address).await
    }

    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<Location>, GeocodingError> {
        reverse_with(&self.service, &self.adapter, latitude, longitude).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::{assert_approx, fixture, FailingAdapter, MockAdapter};

    #[tokio::test]
    async fn geocodes_with_all_options() {
        let adapter = MockAdapter::returning(&fixture("google_maps_paris.json"));
        let config = ProviderConfig::new()
            .with_locale("fr-FR")
            .with_region("FR")
            .with_api_key("fake_key")
            .with_ssl(true)
            .with_max_results(2);
        let provider = GoogleMaps::new(&adapter, config);
        let res = provider.geocode(Some("Paris")).await.unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].country_code.as_deref(), Some("FR"));
        assert_eq!(
            adapter.requests(),
            vec!["https://maps.googleapis.com/maps/api/geocode/json?address=Paris&language=fr-FR&region=FR&key=fake_key".to_string()]
        );
    }

    #[tokio::test]
    async fn ip_addresses_make_no_call() {
        let adapter = MockAdapter::new();
        let provider = GoogleMaps::new(&adapter, ProviderConfig::default());
        let err = provider.geocode(Some("127.0.0.1")).await.unwrap_err();
        assert!(matches!(err, GeocodingError::UnsupportedOperation(_)));
        assert!(adapter.requests().is_empty());
    }

    #[tokio::test]
    async fn reverse() {
        let adapter = MockAdapter::returning(&fixture("google_maps_gambetta.json"));
        let provider = GoogleMaps::new(&adapter, ProviderConfig::default());
        let res = provider.reverse(48.8631507, 2.388911).await.unwrap();
        assert_approx(res[0].latitude, 48.8630462);
        assert_eq!(
            adapter.requests(),
            vec!["http://maps.googleapis.com/maps/api/geocode/json?address=48.863151%2C2.388911".to_string()]
        );
    }

    #[tokio::test]
    async fn quota_exceeded() {
        let adapter = MockAdapter::returning(r#"{"results":[],"status":"OVER_DAILY_LIMIT"}"#);
        let provider = GoogleMaps::new(&adapter, ProviderConfig::default());
        assert!(matches!(
            provider.geocode(Some("Paris")).await,
            Err(GeocodingError::QuotaExceeded(_))
        ));
    }

    #[tokio::test]
    async fn transport_errors_are_propagated() {
        let provider = GoogleMaps::new(FailingAdapter, ProviderConfig::default());
        assert!(matches!(
            provider.geocode(Some("Paris")).await,
            Err(GeocodingError::Adapter(_))
        ));
    }
}
