//! The blocking [Yandex](../../yandex/index.html) provider.
use crate::blocking::{geocode_with, reverse_with, Adapter, Provider, ReqwestAdapter};
use crate::yandex::YandexService;
use crate::{GeocodingError, Location, ProviderConfig, Service};

/// An instance of the Yandex geocoding provider
pub struct Yandex<A = ReqwestAdapter> {
    adapter: A,
    service: YandexService,
}

impl<A: Adapter> Yandex<A> {
    pub fn new(adapter: A, config: ProviderConfig) -> Self {
        Yandex {
            adapter,
            service: YandexService::new(config),
        }
    }

    pub fn service(&self) -> &YandexService {
        &self.service
    }
}

impl<A: Adapter> Provider for Yandex<A> {
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
