//! Dataset identifiers and remote resource naming.
//!
//! A [`DatasetRef`] names one month of trip records for one category. All
//! derived names (resource, file names, URL) are pure functions of the ref.

use std::fmt;

use thiserror::Error;

/// Release host the monthly archives are published under. Overridable with
/// the `TRIPDATA_BASE_URL` environment variable.
pub const DEFAULT_BASE_URL: &str =
    "https://github.com/DataTalksClub/nyc-tlc-data/releases/download";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidDatasetRef {
    #[error("month must be in 1..=12, got {0}")]
    MonthOutOfRange(u8),
    #[error("year must be a four-digit value, got {0}")]
    YearOutOfRange(u16),
}

/// Identifies one remote data partition: `(category, year, month)`.
///
/// Immutable once constructed; `month` is validated to `1..=12` and `year`
/// to four digits at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRef {
    category: String,
    year: u16,
    month: u8,
}

impl DatasetRef {
    pub fn new(
        category: impl Into<String>,
        year: u16,
        month: u8,
    ) -> Result<Self, InvalidDatasetRef> {
        if !(1..=12).contains(&month) {
            return Err(InvalidDatasetRef::MonthOutOfRange(month));
        }
        if !(1000..=9999).contains(&year) {
            return Err(InvalidDatasetRef::YearOutOfRange(year));
        }
        Ok(Self {
            category: category.into(),
            year,
            month,
        })
    }

    /// All twelve months of `year` for `category`, in order.
    pub fn year_range(category: &str, year: u16) -> Result<Vec<Self>, InvalidDatasetRef> {
        (1..=12).map(|month| Self::new(category, year, month)).collect()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// `{category}_tripdata_{year}-{MM}`, month zero-padded to two digits.
    pub fn resource_name(&self) -> String {
        format!("{}_tripdata_{}-{:02}", self.category, self.year, self.month)
    }

    pub fn gz_file_name(&self) -> String {
        format!("{}.csv.gz", self.resource_name())
    }

    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.resource_name())
    }

    /// Download URL for this partition under `base`.
    ///
    /// The release layout groups archives by category:
    /// `{base}/{category}/{category}_tripdata_{year}-{MM}.csv.gz`.
    pub fn url(&self, base: &str) -> String {
        format!(
            "{}/{}/{}",
            base.trim_end_matches('/'),
            self.category,
            self.gz_file_name()
        )
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_is_zero_padded() {
        let april = DatasetRef::new("green", 2020, 4).unwrap();
        assert_eq!(april.resource_name(), "green_tripdata_2020-04");

        let december = DatasetRef::new("green", 2020, 12).unwrap();
        assert_eq!(december.resource_name(), "green_tripdata_2020-12");
    }

    #[test]
    fn test_file_names() {
        let dataset = DatasetRef::new("yellow", 2021, 3).unwrap();
        assert_eq!(dataset.gz_file_name(), "yellow_tripdata_2021-03.csv.gz");
        assert_eq!(dataset.csv_file_name(), "yellow_tripdata_2021-03.csv");
    }

    #[test]
    fn test_url_is_deterministic() {
        let dataset = DatasetRef::new("yellow", 2020, 12).unwrap();
        let url = dataset.url(DEFAULT_BASE_URL);

        assert_eq!(
            url,
            "https://github.com/DataTalksClub/nyc-tlc-data/releases/download/yellow/yellow_tripdata_2020-12.csv.gz"
        );
        // Same inputs always yield the same strings.
        assert_eq!(url, DatasetRef::new("yellow", 2020, 12).unwrap().url(DEFAULT_BASE_URL));
    }

    #[test]
    fn test_url_tolerates_trailing_slash_in_base() {
        let dataset = DatasetRef::new("green", 2020, 1).unwrap();
        assert_eq!(
            dataset.url("http://localhost:8080/"),
            "http://localhost:8080/green/green_tripdata_2020-01.csv.gz"
        );
    }

    #[test]
    fn test_month_out_of_range_rejected() {
        assert_eq!(
            DatasetRef::new("yellow", 2020, 0),
            Err(InvalidDatasetRef::MonthOutOfRange(0))
        );
        assert_eq!(
            DatasetRef::new("yellow", 2020, 13),
            Err(InvalidDatasetRef::MonthOutOfRange(13))
        );
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        assert_eq!(
            DatasetRef::new("yellow", 820, 5),
            Err(InvalidDatasetRef::YearOutOfRange(820))
        );
    }

    #[test]
    fn test_year_range_covers_all_months() {
        let refs = DatasetRef::year_range("yellow", 2020).unwrap();
        assert_eq!(refs.len(), 12);
        assert_eq!(refs[0].month(), 1);
        assert_eq!(refs[11].month(), 12);
        assert_eq!(refs[3].resource_name(), "yellow_tripdata_2020-04");
    }
}
