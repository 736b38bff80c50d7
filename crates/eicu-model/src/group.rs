//! Grouping keys shared by every stratified summary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label used for the implicit group when no grouping field is requested.
pub const ALL_GROUP_LABEL: &str = "All";

/// A categorical field rows can be partitioned by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupField {
    Region,
    HospitalId,
    Gender,
    Ethnicity,
    AgeGroup,
    BmiGroup,
    PrimaryDiagnosis,
    AdmitHour,
}

impl GroupField {
    /// Column heading used when rendering this field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Region => "Region",
            Self::HospitalId => "Hospital ID",
            Self::Gender => "Gender",
            Self::Ethnicity => "Ethnicity",
            Self::AgeGroup => "Age Group",
            Self::BmiGroup => "BMI Group",
            Self::PrimaryDiagnosis => "Diagnosis",
            Self::AdmitHour => "Hour of Admission",
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The value a row takes for one grouping field.
///
/// Numbers order before text so hours and numeric hospital ids sort
/// numerically rather than lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupValue {
    Number(i64),
    Text(String),
}

impl GroupValue {
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }

    /// Identifier columns are numeric in the export but may arrive as text.
    pub fn identifier(value: &str) -> Self {
        match value.trim().parse::<i64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::text(value),
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// The combined values of every requested grouping field, in request order.
/// An empty key is the implicit "All" group.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<GroupValue>);

impl GroupKey {
    pub fn all() -> Self {
        Self(Vec::new())
    }

    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[GroupValue] {
        &self.0
    }

    /// Key made of the first `len` values.
    pub fn prefix(&self, len: usize) -> GroupKey {
        GroupKey(self.0.iter().take(len).cloned().collect())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return f.write_str(ALL_GROUP_LABEL);
        }
        for (idx, value) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// Rows that can be partitioned by [`GroupField`]s.
pub trait Stratify {
    /// Value of `field` for this row, `None` when missing or not carried by the row type.
    fn group_value(&self, field: GroupField) -> Option<GroupValue>;

    /// Key for `fields`, `None` if any of them is missing.
    fn group_key(&self, fields: &[GroupField]) -> Option<GroupKey> {
        fields
            .iter()
            .map(|field| self.group_value(*field))
            .collect::<Option<Vec<_>>>()
            .map(GroupKey)
    }
}

impl<T: Stratify + ?Sized> Stratify for &T {
    fn group_value(&self, field: GroupField) -> Option<GroupValue> {
        (**self).group_value(field)
    }
}

/// Region selection applied before summarizing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionFilter {
    #[default]
    All,
    Only(String),
}

impl RegionFilter {
    /// Whether a row belongs to the selection. Rows without a region only pass `All`.
    pub fn admits<T: Stratify + ?Sized>(&self, row: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(region) => matches!(
                row.group_value(GroupField::Region),
                Some(GroupValue::Text(value)) if value.eq_ignore_ascii_case(region)
            ),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_GROUP_LABEL) {
            Ok(Self::All)
        } else {
            Ok(Self::Only(trimmed.to_string()))
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_GROUP_LABEL),
            Self::Only(region) => f.write_str(region),
        }
    }
}
