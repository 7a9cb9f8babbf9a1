use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use http::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{error, info};

use crate::config::sources::EventsConfig;
use crate::helpers::time::{add_months, get_instant};
use crate::model::Gig;
use crate::observability::metrics::get_metrics;
use crate::parser::parser::parse_gigs;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Event-list endpoint
#[derive(Debug, Clone)]
pub struct EventsSource {
    pub cfg: EventsConfig,
    pub client: Client,
}

impl EventsSource {
    pub fn new(cfg: EventsConfig, client: Client) -> Self {
        Self { cfg, client }
    }

    /// Query parameters for events between `today` and `today + period_months`.
    pub fn query(&self, today: NaiveDate) -> Result<Vec<(&'static str, String)>> {
        let cfg = &self.cfg;
        let date_to = add_months(today, cfg.period_months)?;
        Ok(vec![
            ("location", format!("geo:{},{}", cfg.location.lat, cfg.location.lon)),
            ("radius_distance", cfg.radius_distance.to_string()),
            ("distance_unit", cfg.distance_unit.to_owned()),
            ("date_from", today.format(DATE_FORMAT).to_string()),
            ("date_to", date_to.format(DATE_FORMAT).to_string()),
            ("incl_image", (if cfg.include_image { "1" } else { "0" }).to_string()),
            ("order_by", cfg.order_by.to_owned()),
            ("order_direction", cfg.order_direction.to_owned()),
            ("results_per_page", cfg.results_per_page.to_string()),
        ])
    }

    /// The API expects the bare token unless a scheme is configured.
    pub fn authorization_value(&self, token: &str) -> String {
        match &self.cfg.authorization_scheme {
            Some(scheme) => format!("{} {}", scheme, token),
            None => token.to_owned(),
        }
    }

    pub async fn fetch_gigs(&self, token: &str, today: NaiveDate) -> Result<Vec<Gig>> {
        let metrics = get_metrics().await;
        let start = get_instant();
        metrics.events_fetch_requests.inc();

        let result = self.request_gigs(token, today).await;
        metrics
            .events_fetch_duration
            .observe(start.elapsed().as_secs_f64());

        match &result {
            Ok(gigs) => {
                metrics.events_returned.set(gigs.len() as i64);
                info!("event list returned {} gigs", gigs.len());
            }
            Err(e) => error!("fetching event list failed: {:#}", e),
        }
        result
    }

    async fn request_gigs(&self, token: &str, today: NaiveDate) -> Result<Vec<Gig>> {
        let metrics = get_metrics().await;
        let query = self.query(today)?;

        let response = self
            .client
            .get(&self.cfg.url)
            .header(AUTHORIZATION, self.authorization_value(token))
            .query(&query)
            .send()
            .await
            .inspect_err(|_| {
                metrics.events_fetch_failures.with_label_values(&["transport"]).inc();
            })
            .map_err(|e| anyhow!("event list request to '{}' failed: {}", self.cfg.url, e))?;

        let status = response.status();
        if !status.is_success() {
            metrics.events_fetch_failures.with_label_values(&["status"]).inc();
            return Err(anyhow!("event list request failed: {}", status));
        }

        let body = response.text().await?;
        parse_gigs(&body).inspect_err(|_| {
            metrics.parse_failures.inc();
            metrics.events_fetch_failures.with_label_values(&["parse"]).inc();
        })
    }
}
