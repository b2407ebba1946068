use async_trait::async_trait;
use linkquote_core::GeographicSite;
use reqwest::Client;
use tracing::debug;

use crate::http::{decode_json, unauthorized_to_default, ClientError};

/// Free-text search over candidate POP locations.
#[async_trait]
pub trait SiteSearchApi: Send + Sync {
    async fn search_sites(&self, query: &str) -> Result<Vec<GeographicSite>, ClientError>;
}

pub struct HttpSiteSearch {
    client: Client,
    base_url: String,
}

impl HttpSiteSearch {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    fn endpoint(&self) -> String {
        format!("{}/geographicSiteManagement/v4/geographicSite", self.base_url)
    }
}

#[async_trait]
impl SiteSearchApi for HttpSiteSearch {
    async fn search_sites(&self, query: &str) -> Result<Vec<GeographicSite>, ClientError> {
        let endpoint = self.endpoint();
        debug!(query, "searching POP locations");

        let result = async {
            let response = self
                .client
                .get(&endpoint)
                .query(&[("atType", "POP"), ("expand", "place"), ("description*", query)])
                .send()
                .await?;
            decode_json::<Vec<GeographicSite>>(response, &endpoint).await
        }
        .await;

        unauthorized_to_default(result, "site search")
    }
}
