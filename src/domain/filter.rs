// Filter domain model - filter kinds, groups and evaluation results
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A schema-less row produced by a data function.
pub type Record = serde_json::Map<String, Value>;

/// Numeric measurement a numeric filter ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericField {
    WindSpeed,
    PowerOutput,
    Rpm,
}

impl NumericField {
    pub fn label(&self) -> &'static str {
        match self {
            NumericField::WindSpeed => "Wind Speed",
            NumericField::PowerOutput => "Power Output",
            NumericField::Rpm => "Rotor RPM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "field", rename_all = "camelCase")]
pub enum FilterKind {
    Date,
    Numeric(NumericField),
    Location,
    Status,
    Turbine,
    Correlation,
    Text,
}

impl FilterKind {
    /// Every kind in canonical report order.
    pub const ALL: [FilterKind; 9] = [
        FilterKind::Date,
        FilterKind::Numeric(NumericField::WindSpeed),
        FilterKind::Numeric(NumericField::PowerOutput),
        FilterKind::Numeric(NumericField::Rpm),
        FilterKind::Location,
        FilterKind::Status,
        FilterKind::Turbine,
        FilterKind::Correlation,
        FilterKind::Text,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::Date => "Date Range",
            FilterKind::Numeric(field) => field.label(),
            FilterKind::Location => "Location",
            FilterKind::Status => "Status",
            FilterKind::Turbine => "Turbine",
            FilterKind::Correlation => "Correlation",
            FilterKind::Text => "Search",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    Contains,
    Greater,
    Less,
    Between,
    In,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// Kind plus its kind-specific value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FilterCriterion {
    Date { value: DateRange },
    Numeric { field: NumericField, value: NumericRange },
    Location { value: Vec<String> },
    Status { value: Vec<String> },
    Turbine { value: Vec<String> },
    Correlation { value: Vec<String> },
    Text { value: String },
}

impl FilterCriterion {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterCriterion::Date { .. } => FilterKind::Date,
            FilterCriterion::Numeric { field, .. } => FilterKind::Numeric(*field),
            FilterCriterion::Location { .. } => FilterKind::Location,
            FilterCriterion::Status { .. } => FilterKind::Status,
            FilterCriterion::Turbine { .. } => FilterKind::Turbine,
            FilterCriterion::Correlation { .. } => FilterKind::Correlation,
            FilterCriterion::Text { .. } => FilterKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<FilterOperator>,
    #[serde(flatten)]
    pub criterion: FilterCriterion,
}

impl Filter {
    pub fn new(id: impl Into<String>, criterion: FilterCriterion) -> Self {
        Self {
            id: id.into(),
            name: None,
            operator: None,
            criterion,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(&self) -> FilterKind {
        self.criterion.kind()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.kind().label())
    }

    /// Operator in effect; kinds fix the predicate, this is only reported back.
    pub fn operator(&self) -> FilterOperator {
        self.operator.unwrap_or(match self.criterion {
            FilterCriterion::Date { .. } | FilterCriterion::Numeric { .. } => {
                FilterOperator::Between
            }
            FilterCriterion::Text { .. } => FilterOperator::Contains,
            _ => FilterOperator::In,
        })
    }

    /// Selected values with blanks removed, for the array kinds.
    pub fn selected_values(&self) -> Vec<&str> {
        match &self.criterion {
            FilterCriterion::Location { value }
            | FilterCriterion::Status { value }
            | FilterCriterion::Turbine { value }
            | FilterCriterion::Correlation { value } => value
                .iter()
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Inactive filters are skipped during evaluation and count as vacuously true.
    pub fn is_active(&self) -> bool {
        match &self.criterion {
            FilterCriterion::Date { value } => value.start.is_some() || value.end.is_some(),
            FilterCriterion::Numeric { value, .. } => value.min.is_some() || value.max.is_some(),
            FilterCriterion::Text { value } => !value.trim().is_empty(),
            _ => !self.selected_values().is_empty(),
        }
    }

    pub fn describe(&self) -> String {
        format!("{}: {}", self.display_name(), self.human_readable_value())
    }

    fn human_readable_value(&self) -> String {
        match &self.criterion {
            FilterCriterion::Date { value } => {
                let fmt = |d: Option<DateTime<Utc>>| {
                    d.map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "…".to_string())
                };
                format!("{} – {}", fmt(value.start), fmt(value.end))
            }
            FilterCriterion::Numeric { value, .. } => match (value.min, value.max) {
                (Some(min), Some(max)) => format!("{}-{}", min, max),
                (Some(min), None) => format!("≥{}", min),
                (None, Some(max)) => format!("≤{}", max),
                (None, None) => String::new(),
            },
            FilterCriterion::Text { value } => value.clone(),
            _ => self.selected_values().join(", "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupLogic {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logic: GroupLogic,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl FilterGroup {
    /// Unnamed group, as if deserialized without a `name`.
    pub fn new(id: impl Into<String>, logic: GroupLogic, filters: Vec<Filter>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            logic,
            filters,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn active_filters(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(|f| f.is_active())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub dataset_id: String,
    pub fields: Vec<String>,
    pub compatible_kinds: Vec<FilterKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutcome {
    pub kept_records: Vec<Record>,
    pub total_count: usize,
    pub kept_count: usize,
    pub applied_filter_descriptions: Vec<String>,
}
