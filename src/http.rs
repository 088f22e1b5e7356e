//! One-shot HTTP fetch of the exported history.
//!
//! Besides the live feed, the backend serves its full retained history
//! (up to a day of samples) at `/debug/charts/data`. Useful for backfilling
//! a chart before switching to live updates.

use std::time::Duration;

use reqwest::Client;

use crate::error::HttpError;
use crate::network::Location;
use crate::wire::ExportedData;

/// HTTP client for the debug-charts data endpoint.
pub struct ChartsHttp {
    data_url: String,
    client: Client,
}

impl ChartsHttp {
    pub fn new(location: &Location) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            data_url: location.data_url(),
            client,
        })
    }

    /// Fetch the full exported history.
    pub async fn get_data(&self) -> Result<ExportedData, HttpError> {
        let response = self.client.get(&self.data_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 404 {
                return Err(HttpError::NotFound(self.data_url.clone()));
            }
            return Err(HttpError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<ExportedData>().await?)
    }
}
