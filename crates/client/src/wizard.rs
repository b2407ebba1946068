use chrono::NaiveDate;
use linkquote_core::{
    AppConfig, EndpointId, FetchStatus, GeographicSite, ProbeKind, ProbeRequest, ProbeTable,
    QuoteFormState, QuoteId, QuoteRecord, pop_id_for_site,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::customers::CustomerApi;
use crate::feasibility::FeasibilityApi;
use crate::http::ClientError;
use crate::quotes::{sort_quotes, QuoteApi, QuoteListResponse, QuoteQueryParams};
use crate::search::SearchDebouncer;
use crate::sites::SiteSearchApi;

/// Placeholder RCE code for customers without one; the adapter treats it
/// as "unknown customer" and still answers with catalog capacities.
const FALLBACK_CODE_RCE: &str = "xxx";

/// One quoting session: the form state machine plus the collaborator
/// clients that feed it. All mutation funnels through here so the state
/// and the probe table stay consistent.
pub struct QuoteWizard<S, F, Q, C> {
    session_id: Uuid,
    state: QuoteFormState,
    probes: ProbeTable,
    debouncer: SearchDebouncer,
    sites: S,
    feasibility: F,
    quotes: Q,
    customers: C,
    code_rce: Option<String>,
}

impl<S, F, Q, C> QuoteWizard<S, F, Q, C>
where
    S: SiteSearchApi,
    F: FeasibilityApi,
    Q: QuoteApi,
    C: CustomerApi,
{
    pub fn new(config: &AppConfig, sites: S, feasibility: F, quotes: Q, customers: C) -> Self {
        let session_id = Uuid::new_v4();
        info!(%session_id, "starting quoting session");
        Self {
            session_id,
            state: QuoteFormState::default(),
            probes: ProbeTable::default(),
            debouncer: SearchDebouncer::new(&config.search),
            sites,
            feasibility,
            quotes,
            customers,
            code_rce: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &QuoteFormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut QuoteFormState {
        &mut self.state
    }

    pub fn probes(&self) -> &ProbeTable {
        &self.probes
    }

    fn code_rce(&self) -> &str {
        self.code_rce.as_deref().unwrap_or(FALLBACK_CODE_RCE)
    }

    /// Resolve the customer's RCE code for feasibility probes. A customer
    /// without one falls back to the adapter's placeholder.
    pub async fn bootstrap_customer(&mut self, customer_id: &str) -> Result<(), ClientError> {
        let customer = self.customers.fetch_customer(customer_id).await?;
        self.code_rce = customer.code_rce().map(str::to_string);
        if self.code_rce.is_none() {
            warn!(customer_id, "customer has no RCE code, probes will use the placeholder");
        }
        Ok(())
    }

    /// Debounced location search. Returns `None` when the query was too
    /// short or a newer keystroke superseded it before the quiet period.
    pub async fn search_locations(
        &self,
        query: &str,
    ) -> Result<Option<Vec<GeographicSite>>, ClientError> {
        match self.debouncer.debounce(query).await {
            Some(query) => Ok(Some(self.sites.search_sites(&query).await?)),
            None => Ok(None),
        }
    }

    /// Pick a POP for one endpoint. The site is mirrored into the service
    /// needs and the technical step, previous probe results for that
    /// endpoint are dropped, and both feasibility probes are reissued.
    /// Probe failures land in the endpoint's fetch status, not in the
    /// return value.
    pub async fn select_location(&mut self, end: EndpointId, site: GeographicSite) {
        let pop_id = pop_id_for_site(&site.id).to_string();
        debug!(endpoint = end.label(), site_id = %site.id, %pop_id, "location selected");

        self.state.select_location(end, site);
        let slot = self.probes.endpoint_mut(end);
        slot.clear();
        slot.status = FetchStatus::Loading;

        for kind in [ProbeKind::Existing, ProbeKind::Capacity] {
            let request = ProbeRequest::new(self.code_rce(), kind, &pop_id);
            match self.feasibility.check_interface(&request).await {
                Ok(response) => {
                    match kind {
                        ProbeKind::Existing => self.state.apply_existing_probe(end, &response),
                        ProbeKind::Capacity => self.state.apply_capacity_probe(end, &response),
                    }
                    self.probes.endpoint_mut(end).store(kind, response);
                }
                Err(error) => {
                    warn!(endpoint = end.label(), %error, "feasibility probe failed");
                    self.probes.endpoint_mut(end).status =
                        FetchStatus::Failed { message: error.to_string() };
                    return;
                }
            }
        }

        self.probes.endpoint_mut(end).status = FetchStatus::Succeeded;
    }

    /// Resume editing a persisted quote: fetch it and rebuild the form
    /// state from its product characteristics.
    pub async fn load_quote(&mut self, id: &QuoteId) -> Result<QuoteRecord, ClientError> {
        let record = self.quotes.fetch_quote(id).await?;
        self.state.initialize_from_quote(&record);
        Ok(record)
    }

    /// Dashboard listing, in-progress quotes first.
    pub async fn list_quotes(
        &self,
        params: &QuoteQueryParams,
    ) -> Result<QuoteListResponse, ClientError> {
        let mut response = self.quotes.list_quotes(params).await?;
        sort_quotes(&mut response.data);
        Ok(response)
    }

    /// Advance one step when the current step's validity allows it;
    /// returns whether the step changed.
    pub fn next_step(&mut self) -> bool {
        self.state.next_step()
    }

    pub fn prev_step(&mut self) -> bool {
        self.state.prev_step()
    }

    /// Entering the summary step clamps the requested date to the
    /// earliest the delivery chain can honor.
    pub fn initialize_summary(&mut self, today: NaiveDate) {
        self.state.initialize_summary(today);
    }

    /// Abandon the session: the form returns to its pristine state and
    /// probe results are dropped.
    pub fn close(&mut self) {
        info!(session_id = %self.session_id, "closing quoting session");
        self.state.reset();
        self.probes = ProbeTable::default();
    }
}
