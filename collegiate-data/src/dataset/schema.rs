//! Column layout of the institution table.

use collegiate_core::{Category, Demographic, FieldOfStudy};

/// Numeric feature columns recognised by default.
pub const DEFAULT_FEATURE_COLUMNS: [&str; 8] = [
    "Income Earned from Working 10 Hours a Week at State's Minimum Wage",
    "Affordability Gap (net price minus income earned working 10 hrs at min wage)",
    "Adjusted Monthly Center-Based Child Care Cost",
    "Total Enrollment",
    "Transfer Out Rate",
    "Median Earnings of Students Working and Not Enrolled 10 Years After Entry",
    "Percent of Undergraduates Age 25 and Older",
    "Average Cost of Attendance",
];

/// Names of the columns read from the institution table.
///
/// Category share columns are named after their category labels (for
/// example `STEM` or `Latino`) and are always required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSchema {
    /// Institution name column.
    pub name: String,
    /// City column.
    pub city: String,
    /// State abbreviation column.
    pub state: String,
    /// Latitude column.
    pub latitude: String,
    /// Longitude column.
    pub longitude: String,
    /// Numeric feature columns available as preferences.
    pub features: Vec<String>,
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self {
            name: "Institution Name_x".to_owned(),
            city: "City".to_owned(),
            state: "State Abbreviation".to_owned(),
            latitude: "Latitude".to_owned(),
            longitude: "Longitude".to_owned(),
            features: DEFAULT_FEATURE_COLUMNS.map(str::to_owned).to_vec(),
        }
    }
}

impl DatasetSchema {
    /// Replace the numeric feature columns.
    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the institution name column.
    #[must_use]
    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name = column.into();
        self
    }

    /// Every numeric column that must be present: coordinates, features and
    /// category shares.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        [self.latitude.as_str(), self.longitude.as_str()]
            .into_iter()
            .chain(self.features.iter().map(String::as_str))
            .chain(FieldOfStudy::ALL.iter().map(|field| field.label()))
            .chain(Demographic::ALL.iter().map(|group| group.label()))
    }

    /// Identity columns used as the deduplication key.
    pub fn key_columns(&self) -> [&str; 3] {
        [&self.name, &self.city, &self.state]
    }
}
