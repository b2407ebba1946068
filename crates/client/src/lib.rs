//! Transport and orchestration for the circuit quoting wizard: HTTP
//! clients for the site, feasibility, quote, and customer services, a
//! debounced search helper, and the [`QuoteWizard`] session that drives
//! the form state machine in `linkquote-core`.

pub mod customers;
pub mod feasibility;
pub mod http;
pub mod logging;
pub mod quotes;
pub mod search;
pub mod sites;
pub mod wizard;

pub use customers::{CustomerApi, HttpCustomers};
pub use feasibility::{FeasibilityApi, HttpFeasibility};
pub use http::{build_client, unauthorized_to_default, ClientError};
pub use logging::init_logging;
pub use quotes::{sort_quotes, HttpQuotes, QuoteApi, QuoteListResponse, QuoteQueryParams};
pub use search::SearchDebouncer;
pub use sites::{HttpSiteSearch, SiteSearchApi};
pub use wizard::QuoteWizard;
