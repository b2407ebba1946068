use async_trait::async_trait;
use linkquote_core::{ProbeRequest, ServiceQualification};
use reqwest::Client;
use tracing::debug;

use crate::http::{decode_json, unauthorized_to_default, ClientError};

/// Interface feasibility probe against the adapter (TMF645
/// check-service-qualification). Issued twice per endpoint — once for the
/// existing interface, once for new-interface capacity.
#[async_trait]
pub trait FeasibilityApi: Send + Sync {
    async fn check_interface(
        &self,
        request: &ProbeRequest,
    ) -> Result<ServiceQualification, ClientError>;
}

pub struct HttpFeasibility {
    client: Client,
    base_url: String,
}

impl HttpFeasibility {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    fn endpoint(&self) -> String {
        format!("{}/gini/tmf645/check-customer-interface", self.base_url)
    }
}

#[async_trait]
impl FeasibilityApi for HttpFeasibility {
    async fn check_interface(
        &self,
        request: &ProbeRequest,
    ) -> Result<ServiceQualification, ClientError> {
        let endpoint = self.endpoint();
        debug!(
            pop_id = %request.pop_id,
            number_intf = request.kind.number_intf(),
            "issuing feasibility probe"
        );

        let result = async {
            let response = self.client.post(&endpoint).json(&request.to_body()).send().await?;
            decode_json::<ServiceQualification>(response, &endpoint).await
        }
        .await;

        // An expired session yields "no interfaces" instead of an error.
        unauthorized_to_default(result, "feasibility probe")
    }
}
