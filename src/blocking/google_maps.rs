//! The blocking [Google Maps](../../google_maps/index.html) provider.
use crate::blocking::{geocode_with, reverse_with, Adapter, Provider, ReqwestAdapter};
use crate::google_maps::GoogleMapsService;
use crate::{GeocodingError, Location, ProviderConfig, Service};

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

impl<A: Adapter> Provider for GoogleMaps<A> {
    fn name(&self) -> &'static str {
        self.service.name()
    }

    fn geocode(&self, address: Option<&str>) -> Result<Vec<Location>, GeocodingError> {
        geocode_with(&self.service, &self.adapter, address)
    }

    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<Location>, GeocodingError> {
        reverse_with(&self.service, &self.adapter, latitude, longitude)
    }
}
