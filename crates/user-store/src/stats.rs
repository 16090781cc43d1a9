//! Summary statistics over a collection snapshot.

use serde::{Deserialize, Serialize};

use crate::record::UserRecord;

/// Fixed age ranges used for the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    /// 0 to 18 inclusive.
    UpTo18,
    /// 19 to 30 inclusive.
    From19To30,
    /// 31 to 50 inclusive.
    From31To50,
    /// 51 and over.
    From51,
}

impl AgeBucket {
    /// Bucket holding `age`.
    #[must_use]
    pub const fn for_age(age: u32) -> Self {
        match age {
            0..=18 => Self::UpTo18,
            19..=30 => Self::From19To30,
            31..=50 => Self::From31To50,
            _ => Self::From51,
        }
    }

    /// Histogram key.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo18 => "0-18",
            Self::From19To30 => "19-30",
            Self::From31To50 => "31-50",
            Self::From51 => "51+",
        }
    }
}

/// Record counts per [`AgeBucket`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeHistogram {
    /// Records aged 0 to 18.
    #[serde(rename = "0-18")]
    pub up_to_18: usize,
    /// Records aged 19 to 30.
    #[serde(rename = "19-30")]
    pub from_19_to_30: usize,
    /// Records aged 31 to 50.
    #[serde(rename = "31-50")]
    pub from_31_to_50: usize,
    /// Records aged 51 and over.
    #[serde(rename = "51+")]
    pub from_51: usize,
}

impl AgeHistogram {
    fn record(&mut self, age: u32) {
        let slot = match AgeBucket::for_age(age) {
            AgeBucket::UpTo18 => &mut self.up_to_18,
            AgeBucket::From19To30 => &mut self.from_19_to_30,
            AgeBucket::From31To50 => &mut self.from_31_to_50,
            AgeBucket::From51 => &mut self.from_51,
        };
        *slot += 1;
    }

    /// Count for one bucket.
    #[must_use]
    pub const fn count(&self, bucket: AgeBucket) -> usize {
        match bucket {
            AgeBucket::UpTo18 => self.up_to_18,
            AgeBucket::From19To30 => self.from_19_to_30,
            AgeBucket::From31To50 => self.from_31_to_50,
            AgeBucket::From51 => self.from_51,
        }
    }

    /// Sum over all buckets.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.up_to_18 + self.from_19_to_30 + self.from_31_to_50 + self.from_51
    }
}

/// Aggregate view of the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Number of records, numeric age or not.
    pub total_users: usize,
    /// Mean numeric age rounded to one decimal place, ties to even; `0` without ages.
    pub average_age: f64,
    /// Numeric ages per bucket.
    pub age_distribution: AgeHistogram,
}

/// Summarise a collection snapshot.
///
/// Records whose age is not numeric count towards `total_users` only.
///
/// # Examples
/// ```
/// use user_store::{UserStats, summarize};
///
/// assert_eq!(summarize(&[]), UserStats::default());
/// ```
#[must_use]
pub fn summarize(records: &[UserRecord]) -> UserStats {
    if records.is_empty() {
        return UserStats::default();
    }

    let mut histogram = AgeHistogram::default();
    let mut sum: u64 = 0;
    let mut counted: u32 = 0;
    for age in records.iter().filter_map(|record| record.age.years()) {
        histogram.record(age);
        sum += u64::from(age);
        counted += 1;
    }

    UserStats {
        total_users: records.len(),
        average_age: rounded_mean(sum, counted),
        age_distribution: histogram,
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the mean is reported as a one-decimal float"
)]
fn rounded_mean(sum: u64, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let mean = sum as f64 / f64::from(count);
    (mean * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    //! Covers bucketing boundaries, exclusion of unparsed ages and rounding.

    use rstest::rstest;

    use super::*;
    use crate::record::{StoredAge, UserId};

    fn with_age(age: StoredAge) -> UserRecord {
        UserRecord {
            id: UserId::generate(),
            name: "Ann Lee".to_owned(),
            email: "ann@x.com".to_owned(),
            mobile: "5551234567".to_owned(),
            age,
            address: "10 Oak Street".to_owned(),
            created_at: "2026-01-01T00:00:00Z".to_owned(),
        }
    }

    fn aged(ages: &[u32]) -> Vec<UserRecord> {
        ages.iter()
            .map(|&age| with_age(StoredAge::Years(age)))
            .collect()
    }

    #[rstest]
    #[case(0, AgeBucket::UpTo18)]
    #[case(18, AgeBucket::UpTo18)]
    #[case(19, AgeBucket::From19To30)]
    #[case(30, AgeBucket::From19To30)]
    #[case(31, AgeBucket::From31To50)]
    #[case(50, AgeBucket::From31To50)]
    #[case(51, AgeBucket::From51)]
    #[case(150, AgeBucket::From51)]
    fn bucket_bounds_are_inclusive(#[case] age: u32, #[case] bucket: AgeBucket) {
        assert_eq!(AgeBucket::for_age(age), bucket);
    }

    #[test]
    fn one_record_per_bucket() {
        let stats = summarize(&aged(&[10, 25, 40, 60]));
        assert_eq!(stats.total_users, 4);
        assert!((stats.average_age - 33.8).abs() < f64::EPSILON);
        assert_eq!(
            stats.age_distribution,
            AgeHistogram {
                up_to_18: 1,
                from_19_to_30: 1,
                from_31_to_50: 1,
                from_51: 1,
            }
        );
    }

    #[test]
    fn unparsed_ages_only_count_towards_total() {
        let mut records = aged(&[20, 30]);
        records.push(with_age(StoredAge::Unparsed("unknown".to_owned())));
        let stats = summarize(&records);
        assert_eq!(stats.total_users, 3);
        assert!((stats.average_age - 25.0).abs() < f64::EPSILON);
        assert_eq!(stats.age_distribution.total(), 2);
        assert_eq!(stats.age_distribution.count(AgeBucket::From19To30), 2);
    }

    #[test]
    fn no_numeric_ages_average_to_zero() {
        let stats = summarize(&[with_age(StoredAge::Unparsed(String::new()))]);
        assert_eq!(stats.total_users, 1);
        assert!(stats.average_age.abs() < f64::EPSILON);
        assert_eq!(stats.age_distribution, AgeHistogram::default());
    }

    #[rstest]
    #[case(&[1, 2], 1.5)]
    #[case(&[1, 1, 2], 1.3)]
    #[case(&[1, 2, 2], 1.7)]
    #[case(&[28, 32, 45, 29, 38], 34.4)]
    #[case(&[1, 1, 1, 2], 1.2)]
    #[case(&[1, 1, 1, 4], 1.8)]
    fn average_is_rounded_to_one_decimal(#[case] ages: &[u32], #[case] expected: f64) {
        let stats = summarize(&aged(ages));
        assert!((stats.average_age - expected).abs() < 1e-9);
    }

    #[test]
    fn bucket_counts_sum_to_numeric_records() {
        let ages: Vec<u32> = (0..=150).step_by(7).collect();
        let stats = summarize(&aged(&ages));
        assert_eq!(stats.age_distribution.total(), ages.len());
    }

    #[test]
    fn histogram_serialises_with_range_keys() {
        let stats = summarize(&aged(&[10, 25, 40, 60]));
        let value = serde_json::to_value(stats).expect("serialise stats");
        assert_eq!(
            value,
            serde_json::json!({
                "total_users": 4,
                "average_age": 33.8,
                "age_distribution": {"0-18": 1, "19-30": 1, "31-50": 1, "51+": 1}
            })
        );
    }

    #[test]
    fn empty_collection_is_all_zero() {
        assert_eq!(summarize(&[]), UserStats::default());
    }
}
