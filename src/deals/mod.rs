mod format;

pub use format::{format_deals, FormattedDeal, ANCHOR_LABEL, ANCHOR_MERCHANT};

use crate::config::DealsConfig;
use crate::error::ReportError;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One discounted product in this week's flyers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub merchant: String,
    pub product_name: String,
    pub price: f64,
    pub original_price: f64,
}

impl DealRecord {
    pub fn new(merchant: &str, product_name: &str, price: f64, original_price: f64) -> Self {
        Self {
            merchant: merchant.to_string(),
            product_name: product_name.to_string(),
            price,
            original_price,
        }
    }

    /// `0 < price <= original_price`
    pub fn is_well_formed(&self) -> bool {
        self.price > 0.0 && self.price <= self.original_price
    }
}

/// Read-only query over the weekly deals
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Get the source name (e.g., "seed", "http")
    fn source_name(&self) -> &str;

    /// Return every deal row, in feed order
    async fn weekly_deals(&self) -> Result<Vec<DealRecord>, ReportError>;
}

/// Fixed in-memory table of three deals
#[derive(Debug, Default)]
pub struct SeedDealSource;

#[async_trait]
impl DealSource for SeedDealSource {
    fn source_name(&self) -> &str {
        "seed"
    }

    async fn weekly_deals(&self) -> Result<Vec<DealRecord>, ReportError> {
        Ok(vec![
            DealRecord::new("IGA", "Porc haché", 2.49, 5.99),
            DealRecord::new("Super C", "Brocoli", 1.44, 3.50),
            DealRecord::new("Maxi", "Patates (10lb)", 2.99, 6.99),
        ])
    }
}

/// Build the source named in `config`: the JSON feed when a URL is set,
/// the seed table otherwise
pub fn deal_source(config: &DealsConfig) -> Result<Box<dyn DealSource>, ReportError> {
    match config.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => {
            info!("Reading deals from {}", url);
            let timeout = Duration::from_secs(config.timeout);
            Ok(Box::new(HttpDealSource::new(url, timeout)?))
        }
        _ => Ok(Box::new(SeedDealSource)),
    }
}

/// Deal feed served as a JSON array of `DealRecord` objects
pub struct HttpDealSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpDealSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl DealSource for HttpDealSource {
    fn source_name(&self) -> &str {
        "http"
    }

    async fn weekly_deals(&self) -> Result<Vec<DealRecord>, ReportError> {
        let response = self.client.get(&self.url).send().await?;

        // Check status code before attempting to parse JSON
        if !response.status().is_success() {
            return Err(ReportError::InvalidDeals(format!(
                "deal feed request failed with status: {}",
                response.status()
            )));
        }

        let deals: Vec<DealRecord> = response.json().await?;
        debug!("Fetched {} deals from {}", deals.len(), self.url);
        Ok(deals)
    }
}
