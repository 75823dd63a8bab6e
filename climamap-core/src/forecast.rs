//! Daily aggregation of 3-hour forecast samples.

use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeMap;

use crate::model::{DailySummary, ForecastSample};

/// Maximum number of days returned by [`aggregate_daily`].
pub const FORECAST_DAYS: usize = 5;

#[derive(Debug, Default)]
struct DayBucket {
    temperatures: Vec<f64>,
    descriptions: Vec<String>,
    // (temperature, icon) of the warmest sample seen so far
    warmest: Option<(f64, String)>,
}

impl DayBucket {
    fn push(&mut self, sample: &ForecastSample) {
        self.temperatures.push(sample.temperature);

        if !self.descriptions.iter().any(|d| d == &sample.description) {
            self.descriptions.push(sample.description.clone());
        }

        let warmer = match &self.warmest {
            Some((temp, _)) => sample.temperature > *temp,
            None => true,
        };
        if warmer {
            self.warmest = Some((sample.temperature, sample.icon_id.clone()));
        }
    }

    fn into_summary(self, date: NaiveDate) -> DailySummary {
        let temperature_min = self.temperatures.iter().copied().fold(f64::INFINITY, f64::min);
        let temperature_max = self.temperatures.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        DailySummary {
            date,
            temperature_min,
            temperature_max,
            description: self.descriptions.join(", "),
            icon_id: self.warmest.map(|(_, icon)| icon).unwrap_or_default(),
        }
    }
}

/// Group samples by calendar day in `tz` and summarize the first
/// [`FORECAST_DAYS`] days in ascending order.
///
/// The icon for a day is the one of its warmest sample (first one on ties).
pub fn aggregate_daily<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for sample in samples {
        let date = sample.timestamp.with_timezone(tz).date_naive();
        days.entry(date).or_default().push(sample);
    }

    days.into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, bucket)| bucket.into_summary(date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    fn sample(ts: &str, temperature: f64, description: &str, icon: &str) -> ForecastSample {
        ForecastSample {
            timestamp: ts.parse::<chrono::DateTime<Utc>>().expect("valid timestamp"),
            temperature,
            description: description.to_string(),
            icon_id: icon.to_string(),
        }
    }

    #[test]
    fn groups_by_day_with_min_and_max() {
        let samples = vec![
            sample("2024-06-01T00:00:00Z", 20.0, "Clear sky", "01n"),
            sample("2024-06-01T12:00:00Z", 28.0, "Clear sky", "01d"),
            sample("2024-06-02T00:00:00Z", 18.0, "Light rain", "10n"),
        ];

        let days = aggregate_daily(&samples, &Utc);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(days[0].temperature_min, 20.0);
        assert_eq!(days[0].temperature_max, 28.0);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(days[1].temperature_min, 18.0);
        assert_eq!(days[1].temperature_max, 18.0);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(aggregate_daily(&[], &Utc).is_empty());
    }

    #[test]
    fn caps_at_five_days_and_keeps_the_earliest() {
        let start = "2024-06-01T09:00:00Z".parse::<chrono::DateTime<Utc>>().unwrap();
        // 8 days of 3-hour samples, shuffled so input order is not date order
        let mut samples: Vec<ForecastSample> = (0..64)
            .map(|i| ForecastSample {
                timestamp: start + Duration::hours(3 * i),
                temperature: i as f64,
                description: "Clouds".into(),
                icon_id: "03d".into(),
            })
            .collect();
        samples.reverse();

        let days = aggregate_daily(&samples, &Utc);

        assert_eq!(days.len(), FORECAST_DAYS);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn descriptions_are_distinct_in_encounter_order() {
        let samples = vec![
            sample("2024-06-01T03:00:00Z", 15.0, "Light rain", "10d"),
            sample("2024-06-01T06:00:00Z", 16.0, "Overcast clouds", "04d"),
            sample("2024-06-01T09:00:00Z", 17.0, "Light rain", "10d"),
            sample("2024-06-01T12:00:00Z", 19.0, "Clear sky", "01d"),
        ];

        let days = aggregate_daily(&samples, &Utc);

        assert_eq!(days[0].description, "Light rain, Overcast clouds, Clear sky");
    }

    #[test]
    fn icon_comes_from_the_warmest_sample() {
        let samples = vec![
            sample("2024-06-01T03:00:00Z", 12.0, "Mist", "50n"),
            sample("2024-06-01T12:00:00Z", 24.0, "Clear sky", "01d"),
            sample("2024-06-01T15:00:00Z", 24.0, "Few clouds", "02d"),
            sample("2024-06-01T21:00:00Z", 14.0, "Clear sky", "01n"),
        ];

        let days = aggregate_daily(&samples, &Utc);

        assert_eq!(days[0].icon_id, "01d");
    }

    #[test]
    fn aggregation_is_repeatable() {
        let samples = vec![
            sample("2024-06-03T00:00:00Z", 9.0, "Snow", "13n"),
            sample("2024-06-01T00:00:00Z", 20.0, "Clear sky", "01n"),
            sample("2024-06-02T12:00:00Z", 11.0, "Rain", "10d"),
            sample("2024-06-01T15:00:00Z", 26.5, "Few clouds", "02d"),
        ];

        assert_eq!(aggregate_daily(&samples, &Utc), aggregate_daily(&samples, &Utc));
    }

    #[test]
    fn day_boundaries_follow_the_given_time_zone() {
        // 22:00 UTC is already the next day at UTC+3
        let samples = vec![
            sample("2024-06-01T12:00:00Z", 25.0, "Clear sky", "01d"),
            sample("2024-06-01T22:00:00Z", 17.0, "Clear sky", "01n"),
        ];

        assert_eq!(aggregate_daily(&samples, &Utc).len(), 1);

        let istanbul = FixedOffset::east_opt(3 * 3600).unwrap();
        let days = aggregate_daily(&samples, &istanbul);
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(days[1].temperature_max, 17.0);
    }
}
