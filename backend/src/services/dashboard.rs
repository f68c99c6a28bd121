//! Coordination dashboard service
//!
//! Resolves the farmer set and reference data, runs the combined report,
//! and memoizes responses per (farmer selector, weather flag).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{run_coordination_dashboard, CombinedReport};

use crate::cache::{dashboard_key, ResponseCache};
use crate::error::AppResult;
use crate::repository::DataProvider;
use crate::services::{resolve_context, target_farmers, today};

/// Dashboard service backed by the data provider and the response cache
pub struct DashboardService {
    provider: Arc<dyn DataProvider>,
    cache: Arc<ResponseCache<DashboardResponse>>,
}

/// Request for the unified dashboard
#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    pub farmer_id: Option<String>,
    pub weather_deviation: Option<i8>,
}

/// The combined report plus the timestamp it was produced at.
///
/// The timestamp lives here rather than in the report so the calculators
/// stay deterministic; cached responses keep their original timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: CombinedReport,
}

impl DashboardService {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        cache: Arc<ResponseCache<DashboardResponse>>,
    ) -> Self {
        Self { provider, cache }
    }

    /// Build (or replay) the unified coordination report.
    pub fn run(&self, request: DashboardRequest) -> AppResult<DashboardResponse> {
        let context = resolve_context(self.provider.as_ref(), request.weather_deviation)?;
        let key = dashboard_key(
            request.farmer_id.as_deref(),
            i8::from(context.weather.deviation_flag),
        );

        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(key = %key, "dashboard cache hit");
            return Ok(hit);
        }

        let farmers = target_farmers(self.provider.as_ref(), request.farmer_id.as_deref())?;
        let facilities = self
            .provider
            .facilities_in_region(&context.region.region_id);

        let report = run_coordination_dashboard(
            &farmers,
            &context.crop,
            &context.region,
            &context.weather,
            &facilities,
            today(),
        )?;

        let response = DashboardResponse {
            generated_at: Utc::now(),
            report,
        };
        self.cache.put(key, response.clone());

        Ok(response)
    }
}
