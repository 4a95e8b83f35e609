//! Fuel economy operations.

use chrono::NaiveDate;
use uuid::Uuid;

use trackhub_core::fuel::{EfficiencyReport, TripSummary};

use super::TrackhubClient;
use crate::error::Result;

/// Query string for the efficiency report. Missing bounds are omitted.
fn efficiency_query(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let params: Vec<String> = [("start_date", start), ("end_date", end)]
        .into_iter()
        .filter_map(|(name, date)| date.map(|d| format!("{name}={d}")))
        .collect();

    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

impl TrackhubClient {
    /// Fuel efficiency of a vehicle, all time unless bounded.
    pub async fn vehicle_efficiency(
        &self,
        vehicle_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<EfficiencyReport> {
        self.get_json(&format!(
            "/api/vehicles/{}/efficiency{}",
            vehicle_id,
            efficiency_query(start, end)
        ))
        .await
    }

    /// Miles per trip type for a vehicle.
    pub async fn trips_summary(&self, vehicle_id: Uuid) -> Result<TripSummary> {
        self.get_json(&format!("/api/vehicles/{}/trips/summary", vehicle_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_efficiency_query() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1);
        let end = NaiveDate::from_ymd_opt(2024, 3, 31);

        assert_eq!(efficiency_query(None, None), "");
        assert_eq!(efficiency_query(start, None), "?start_date=2024-01-01");
        assert_eq!(
            efficiency_query(start, end),
            "?start_date=2024-01-01&end_date=2024-03-31"
        );
    }
}
