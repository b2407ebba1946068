use async_trait::async_trait;
use linkquote_core::{QuoteId, QuoteRecord, QuoteState};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::http::{decode_json, ClientError};

/// Query for the dashboard quote listing. Cancelled quotes are always
/// excluded server-side.
#[derive(Clone, Debug)]
pub struct QuoteQueryParams {
    pub customer_id: String,
    pub limit: u32,
    pub offset: u32,
    pub channel: Option<String>,
    pub sort: String,
    pub depth: u8,
    pub expand: String,
}

impl QuoteQueryParams {
    pub fn for_customer(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            limit: 20,
            offset: 0,
            channel: None,
            sort: "-createdDate".to_string(),
            depth: 2,
            expand: "relatedParty.account".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuoteListResponse {
    pub count: u64,
    pub data: Vec<QuoteRecord>,
}

#[async_trait]
pub trait QuoteApi: Send + Sync {
    /// Full quote record for the edit flow.
    async fn fetch_quote(&self, id: &QuoteId) -> Result<QuoteRecord, ClientError>;
    /// Paged listing for the dashboard.
    async fn list_quotes(&self, params: &QuoteQueryParams) -> Result<QuoteListResponse, ClientError>;
}

pub struct HttpQuotes {
    client: Client,
    base_url: String,
}

impl HttpQuotes {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    fn collection_endpoint(&self) -> String {
        format!("{}/quoteManagement/v4/quote", self.base_url)
    }
}

#[async_trait]
impl QuoteApi for HttpQuotes {
    async fn fetch_quote(&self, id: &QuoteId) -> Result<QuoteRecord, ClientError> {
        let endpoint = format!("{}/{}", self.collection_endpoint(), id);
        debug!(quote_id = %id, "fetching quote record");

        let response = self
            .client
            .get(&endpoint)
            .query(&[("depth", "2"), ("expand", "relatedParty")])
            .send()
            .await?;
        decode_json(response, &endpoint).await
    }

    async fn list_quotes(&self, params: &QuoteQueryParams) -> Result<QuoteListResponse, ClientError> {
        let endpoint = self.collection_endpoint();
        debug!(customer_id = %params.customer_id, offset = params.offset, "listing quotes");

        let mut query = vec![
            ("state!=".to_string(), "cancelled".to_string()),
            ("limit".to_string(), params.limit.to_string()),
            ("offset".to_string(), params.offset.to_string()),
            ("depth".to_string(), params.depth.to_string()),
            ("expand".to_string(), params.expand.clone()),
            ("sort".to_string(), params.sort.clone()),
            ("relatedParty.id".to_string(), params.customer_id.clone()),
        ];
        if let Some(channel) = &params.channel {
            query.push(("channel.name".to_string(), channel.clone()));
        }

        let response = self.client.get(&endpoint).query(&query).send().await?;
        decode_json(response, &endpoint).await
    }
}

/// Dashboard ordering: in-progress quotes first, the rest by expected
/// completion date, newest first.
pub fn sort_quotes(quotes: &mut [QuoteRecord]) {
    quotes.sort_by(|a, b| {
        let a_in_progress = a.state == Some(QuoteState::InProgress);
        let b_in_progress = b.state == Some(QuoteState::InProgress);
        b_in_progress
            .cmp(&a_in_progress)
            .then_with(|| {
                b.effective_expected_completion().cmp(&a.effective_expected_completion())
            })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: &str, state: QuoteState, expected: &str) -> QuoteRecord {
        QuoteRecord {
            id: id.to_string(),
            state: Some(state),
            expected_quote_completion_date: Some(
                format!("{expected}T00:00:00Z").parse().expect("timestamp"),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn in_progress_quotes_sort_first() {
        let mut quotes = vec![
            quote("Q-1", QuoteState::Approved, "2026-09-30"),
            quote("Q-2", QuoteState::InProgress, "2026-09-01"),
            quote("Q-3", QuoteState::Approved, "2026-10-15"),
        ];
        sort_quotes(&mut quotes);
        let ids: Vec<&str> = quotes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["Q-2", "Q-3", "Q-1"]);
    }

    #[test]
    fn default_params_match_dashboard_query() {
        let params = QuoteQueryParams::for_customer("F46149097");
        assert_eq!(params.sort, "-createdDate");
        assert_eq!(params.depth, 2);
        assert_eq!(params.expand, "relatedParty.account");
        assert!(params.channel.is_none());
    }
}
