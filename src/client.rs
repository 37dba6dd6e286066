use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::errors::{AlertClientError, Result};
use crate::types::{AlertFilter, IssueList, NewAlert, RaisedIssue};

const RAISE_ISSUE_PATH: &str = "raiseIssue";
const GET_ISSUES_PATH: &str = "getIssues";

/// Client for raising and listing alerts
///
/// Every call is independent: the client holds no state besides the base
/// URL and a connection pool, so clones can be used from many tasks at once.
///
/// # Example
///
/// ```rust,no_run
/// use issue_alert_client::{AlertClient, AlertFilter};
/// use url::Url;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AlertClient::new(Url::parse("http://localhost:3000")?)?;
///
///     let created = client
///         .create_alert("Database Connection Error", "Timeout in production", Some("HIGH"), None)
///         .await?;
///     println!("Created alert: {created}");
///
///     let alerts = client
///         .list_alerts(&AlertFilter::new().with_priority("high"))
///         .await?;
///     println!("High priority alerts: {alerts}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AlertClient {
    client: ClientWithMiddleware,
    base_url: Url,
}

impl AlertClient {
    /// Create a client with no request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a path or the HTTP
    /// client cannot be built.
    pub fn new(base_url: Url) -> Result<Self> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    /// Create a client from [`ClientConfig`]
    ///
    /// # Errors
    ///
    /// Returns an error if the configured timeout is zero, in addition to
    /// the cases listed on [`new`](Self::new).
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AlertClientError::BuildHttpClient)?;

        Self::with_client(ClientBuilder::new(client).build(), config.base_url.clone())
    }

    /// Create a new client with a custom reqwest middleware client
    ///
    /// This allows you to add custom middleware (logging, tracing, etc.)
    pub fn with_client(client: ClientWithMiddleware, base_url: Url) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Raise a new alert
    ///
    /// `priority` is matched case-insensitively against low, medium and high
    /// and defaults to medium. Returns the server's JSON response unchanged.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without contacting the server, if the
    /// title or description is empty or the priority is unknown. Returns a
    /// transport error if the request fails or the server answers with a
    /// non-success status.
    #[instrument(
        name = "AlertClient::create_alert",
        skip_all,
        fields(priority = ?priority, assigned = assigned_to.is_some())
    )]
    pub async fn create_alert(
        &self,
        title: &str,
        description: &str,
        priority: Option<&str>,
        assigned_to: Option<&str>,
    ) -> Result<Value> {
        let alert = NewAlert::from_parts(title, description, priority, assigned_to)
            .inspect_err(|e| warn!(error = %e, "Alert rejected before sending"))?;

        self.post_alert(&alert).await
    }

    /// Raise an already-built alert, returning the server's JSON response
    #[instrument(
        name = "AlertClient::submit_alert",
        skip_all,
        fields(priority = %alert.priority)
    )]
    pub async fn submit_alert(&self, alert: &NewAlert) -> Result<Value> {
        alert
            .validate()
            .inspect_err(|e| warn!(error = %e, "Alert rejected before sending"))?;

        self.post_alert(alert).await
    }

    /// Raise an alert and decode the `{message, issue}` envelope
    #[instrument(
        name = "AlertClient::raise_issue",
        skip_all,
        fields(priority = %alert.priority)
    )]
    pub async fn raise_issue(&self, alert: &NewAlert) -> Result<RaisedIssue> {
        alert
            .validate()
            .inspect_err(|e| warn!(error = %e, "Alert rejected before sending"))?;

        let raised: RaisedIssue = self.post_alert(alert).await?;
        debug!(issue_id = raised.issue.id, "Issue raised");
        Ok(raised)
    }

    /// List alerts matching `filter`, returning the server's JSON response
    ///
    /// Only the filters that are set end up in the query string.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    #[instrument(
        name = "AlertClient::list_alerts",
        skip_all,
        fields(filters = filter.query_pairs().len())
    )]
    pub async fn list_alerts(&self, filter: &AlertFilter) -> Result<Value> {
        self.get_alerts(filter).await
    }

    /// List alerts and decode the `{count, issues}` envelope
    #[instrument(
        name = "AlertClient::list_issues",
        skip_all,
        fields(filters = filter.query_pairs().len())
    )]
    pub async fn list_issues(&self, filter: &AlertFilter) -> Result<IssueList> {
        let list: IssueList = self.get_alerts(filter).await?;
        debug!(count = list.count, "Issues listed");
        Ok(list)
    }

    /// Get the normalized base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post_alert<T: DeserializeOwned>(&self, alert: &NewAlert) -> Result<T> {
        let url = self.endpoint(RAISE_ISSUE_PATH)?;

        debug!(url = %url, "Raising alert");

        self.execute(self.client.post(url).json(alert)).await
    }

    async fn get_alerts<T: DeserializeOwned>(&self, filter: &AlertFilter) -> Result<T> {
        let url = self.endpoint(GET_ISSUES_PATH)?;

        debug!(url = %url, "Listing alerts");

        let mut request = self.client.get(url);
        let query = filter.query_pairs();
        if !query.is_empty() {
            request = request.query(&query);
        }

        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Alert API request failed");
            AlertClientError::Request(e)
        })?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), message = %message, "Alert API returned an error");
            return Err(AlertClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<T>().await.map_err(|e| {
            error!(error = %e, "Failed to decode alert API response");
            AlertClientError::Decode(e)
        })?;

        debug!(status = status.as_u16(), "Alert API call succeeded");
        Ok(body)
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AlertClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

/// Strip trailing slashes from the base path, keeping any path prefix
///
/// Query and fragment are dropped so only filters reach `getIssues`.
fn normalize_base_url(mut url: Url) -> Result<Url> {
    if url.cannot_be_a_base() {
        return Err(AlertClientError::InvalidBaseUrl(url.to_string()));
    }

    url.set_query(None);
    url.set_fragment(None);

    let path = url.path().trim_end_matches('/').to_string();
    url.set_path(&path);
    Ok(url)
}
