// Age/gender breakdown from the demographics sheet.
use serde::{Deserialize, Serialize};
use shared::models::{AgeBreakdown, DemographicsRecord};

/// Age buckets in display order. Unknown buckets follow, in first-seen order.
pub const AGE_ORDER: [&str; 6] = ["18-24", "25-34", "35-44", "45-54", "55-64", "65+"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemographicsMetric {
    #[default]
    Impressions,
    Clicks,
    Engagement,
    Purchases,
}

impl DemographicsMetric {
    pub fn value_of(&self, record: &DemographicsRecord) -> u64 {
        match self {
            DemographicsMetric::Impressions => record.impressions,
            DemographicsMetric::Clicks => record.clicks,
            DemographicsMetric::Engagement => record.engagement,
            DemographicsMetric::Purchases => record.purchases,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gender {
    Male,
    Female,
}

fn gender_of(raw: &str) -> Option<Gender> {
    match raw.to_lowercase().as_str() {
        "male" | "masculino" => Some(Gender::Male),
        "female" | "feminino" => Some(Gender::Female),
        _ => None,
    }
}

/// Sums `metric` per age bucket and gender. Rows with any other gender still
/// create their age bucket but add nothing to it.
pub fn demographics_by_age(records: &[DemographicsRecord], metric: DemographicsMetric) -> Vec<AgeBreakdown> {
    let mut rows: Vec<AgeBreakdown> = records.iter().fold(Vec::new(), |mut rows, record| {
        let pos = match rows.iter().position(|row: &AgeBreakdown| row.age == record.age) {
            Some(pos) => pos,
            None => {
                rows.push(AgeBreakdown {
                    age: record.age.clone(),
                    ..Default::default()
                });
                rows.len() - 1
            }
        };
        let row = &mut rows[pos];
        match gender_of(&record.gender) {
            Some(Gender::Male) => row.male = row.male.saturating_add(metric.value_of(record)),
            Some(Gender::Female) => row.female = row.female.saturating_add(metric.value_of(record)),
            None => {}
        }
        rows
    });

    rows.sort_by_key(|row| {
        AGE_ORDER
            .iter()
            .position(|age| *age == row.age)
            .unwrap_or(AGE_ORDER.len())
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(age: &str, gender: &str, impressions: u64, clicks: u64) -> DemographicsRecord {
        DemographicsRecord {
            age: age.to_string(),
            gender: gender.to_string(),
            impressions,
            clicks,
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_by_age_and_gender_in_fixed_order() {
        let records = vec![
            row("35-44", "male", 10, 1),
            row("18-24", "Feminino", 20, 2),
            row("18-24", "MASCULINO", 5, 0),
            row("35-44", "female", 7, 3),
            row("18-24", "unknown", 100, 100),
        ];
        let rows = demographics_by_age(&records, DemographicsMetric::Impressions);

        assert_eq!(
            rows,
            vec![
                AgeBreakdown { age: "18-24".into(), male: 5, female: 20 },
                AgeBreakdown { age: "35-44".into(), male: 10, female: 7 },
            ]
        );
    }

    #[test]
    fn test_metric_selection() {
        let records = vec![row("25-34", "female", 10, 4)];
        let rows = demographics_by_age(&records, DemographicsMetric::Clicks);
        assert_eq!(rows[0].female, 4);
    }

    #[test]
    fn test_oversized_counts_saturate() {
        let records = vec![row("25-34", "male", u64::MAX, 0), row("25-34", "male", u64::MAX, 0)];
        let rows = demographics_by_age(&records, DemographicsMetric::Impressions);
        assert_eq!(rows[0].male, u64::MAX);
    }

    #[test]
    fn test_unknown_age_buckets_go_last() {
        let records = vec![row("13-17", "male", 1, 0), row("65+", "male", 2, 0)];
        let ages: Vec<String> = demographics_by_age(&records, DemographicsMetric::Impressions)
            .into_iter()
            .map(|r| r.age)
            .collect();
        assert_eq!(ages, vec!["65+", "13-17"]);
    }
}
