//! Best-effort city lookup from the caller's public IP address.
//! Uses ip-api.com - free, no API key required.

use reqwest::Client;
use serde::Deserialize;

const IP_API_URL: &str = "http://ip-api.com/json/";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    city: Option<String>,
    message: Option<String>,
}

/// IP geolocation client. No timeout is configured.
#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    url: String,
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_url(IP_API_URL)
    }

    pub fn with_url(url: &str) -> Self {
        Self { http: Client::new(), url: url.to_string() }
    }

    /// City inferred from the public IP. Returns `None` on any failure.
    pub async fn approximate_location(&self) -> Option<String> {
        let response = match self.http.get(&self.url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("IP geolocation request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("IP geolocation returned status {}", response.status());
            return None;
        }

        let body: IpApiResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("IP geolocation parse error: {}", e);
                return None;
            }
        };

        if body.status != "success" {
            tracing::debug!("IP geolocation failed: {:?}", body.message);
            return None;
        }

        let city = body.city.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())?;

        tracing::info!("Approximate location: {}", city);
        Some(city)
    }
}

/// Shorthand for [`IpLocator::approximate_location`] against the default service.
pub async fn approximate_location() -> Option<String> {
    IpLocator::new().approximate_location().await
}
