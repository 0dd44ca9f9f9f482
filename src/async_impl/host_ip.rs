use crate::async_impl::{geocode_with, reverse_with, Adapter, Provider, ReqwestAdapter};
use crate::host_ip::HostIpService;
use crate::{GeocodingError, Location, ProviderConfig, Service};
use async_trait::async_trait;

/// An instance of the HostIp geolocation provider
pub struct HostIp<A = ReqwestAdapter> {
    adapter: A,
    service: HostIpService,
}

impl<A: Adapter> HostIp<A> {
    pub fn new(adapter: A, config: ProviderConfig) -> Self {
        HostIp {
            adapter,
            service: HostIpService::new(config),
        }
    }

    pub fn service(&self) -> &HostIpService {
        &self.service
    }
}

#[async_trait]
impl<A: Adapter> Provider for HostIp<A> {
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
