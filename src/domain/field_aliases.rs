// Field alias table - maps filter kinds onto the field names records actually use
use crate::domain::filter::{FilterKind, NumericField, Record};
use serde::Deserialize;
use serde_json::Value;

/// Operand fields (exact names, in resolution order) plus the name tokens
/// that make a dataset compatible with the kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldAlias {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub tokens: Vec<String>,
}

impl FieldAlias {
    pub fn new(fields: &[&str], tokens: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Case-insensitive token containment against a field name.
    pub fn matches_name(&self, field_name: &str) -> bool {
        let name = field_name.to_lowercase();
        self.tokens
            .iter()
            .any(|token| name.contains(&token.to_lowercase()))
    }

    /// First operand field present on the record with a non-null value.
    pub fn resolve<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        self.fields
            .iter()
            .filter_map(|field| record.get(field))
            .find(|value| !value.is_null())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorrelationPair {
    pub label: String,
    pub fields: [String; 2],
}

impl CorrelationPair {
    pub fn new(label: &str, first: &str, second: &str) -> Self {
        Self {
            label: label.to_string(),
            fields: [first.to_string(), second.to_string()],
        }
    }

    pub fn present_in(&self, record: &Record) -> bool {
        self.fields
            .iter()
            .all(|field| record.get(field).is_some_and(|v| !v.is_null()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    pub wind_speed: FieldAlias,
    pub power_output: FieldAlias,
    pub rpm: FieldAlias,
    pub location: FieldAlias,
    pub status: FieldAlias,
    pub turbine: FieldAlias,
    pub date: FieldAlias,
    pub correlations: Vec<CorrelationPair>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            wind_speed: FieldAlias::new(
                &["wind_speed_mph", "wind_speed", "windSpeed"],
                &["wind_speed", "windspeed"],
            ),
            power_output: FieldAlias::new(
                &["power_output_kw", "power_output", "powerOutput"],
                &["power_output"],
            ),
            rpm: FieldAlias::new(&["rotor_rpm", "rpm", "rotorRpm"], &["rotor_rpm", "rpm"]),
            location: FieldAlias::new(
                &["location", "farm", "site"],
                &["location", "farm", "site"],
            ),
            status: FieldAlias::new(&["status", "state"], &["status", "state"]),
            turbine: FieldAlias::new(&["turbine_id", "turbine", "id"], &["turbine", "id"]),
            date: FieldAlias::new(
                &["timestamp", "createdAt", "updatedAt"],
                &["timestamp", "date", "created", "updated"],
            ),
            correlations: vec![
                CorrelationPair::new("RPM vs Wind Speed", "rotor_rpm", "wind_speed_mph"),
                CorrelationPair::new("Power vs Wind Speed", "power_output_kw", "wind_speed_mph"),
                CorrelationPair::new("Power vs RPM", "power_output_kw", "rotor_rpm"),
            ],
        }
    }
}

impl FieldAliases {
    pub fn numeric(&self, field: NumericField) -> &FieldAlias {
        match field {
            NumericField::WindSpeed => &self.wind_speed,
            NumericField::PowerOutput => &self.power_output,
            NumericField::Rpm => &self.rpm,
        }
    }

    /// Alias entry backing a kind; text and correlation have none.
    pub fn for_kind(&self, kind: FilterKind) -> Option<&FieldAlias> {
        match kind {
            FilterKind::Date => Some(&self.date),
            FilterKind::Numeric(field) => Some(self.numeric(field)),
            FilterKind::Location => Some(&self.location),
            FilterKind::Status => Some(&self.status),
            FilterKind::Turbine => Some(&self.turbine),
            FilterKind::Correlation | FilterKind::Text => None,
        }
    }

    pub fn correlation(&self, label: &str) -> Option<&CorrelationPair> {
        let label = label.trim();
        self.correlations
            .iter()
            .find(|pair| pair.label.eq_ignore_ascii_case(label))
    }
}
