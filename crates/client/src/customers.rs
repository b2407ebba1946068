use async_trait::async_trait;
use linkquote_core::Customer;
use reqwest::Client;
use tracing::debug;

use crate::http::{decode_json, ClientError};

/// Customer lookup used at wizard startup to resolve the RCE code that
/// feasibility probes carry. Unlike the read-only searches, failures here
/// propagate; the caller decides the fallback.
#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn fetch_customer(&self, customer_id: &str) -> Result<Customer, ClientError>;
}

pub struct HttpCustomers {
    client: Client,
    base_url: String,
}

impl HttpCustomers {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }
}

#[async_trait]
impl CustomerApi for HttpCustomers {
    async fn fetch_customer(&self, customer_id: &str) -> Result<Customer, ClientError> {
        let endpoint =
            format!("{}/customerManagement/v4/customer/{}", self.base_url, customer_id);
        debug!(customer_id, "fetching customer record");

        let response = self.client.get(&endpoint).send().await?;
        decode_json(response, &endpoint).await
    }
}
