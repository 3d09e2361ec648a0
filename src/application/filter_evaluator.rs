// Filter evaluator - applies filter groups to schema-less records
use crate::domain::dataset::{value_as_datetime, value_as_f64, value_as_text};
use crate::domain::field_aliases::{FieldAlias, FieldAliases};
use crate::domain::filter::{
    DateRange, Filter, FilterCriterion, FilterGroup, FilterOutcome, GroupLogic, NumericField,
    NumericRange, Record,
};
use chrono::{DateTime, Utc};

pub struct FilterEvaluator<'a> {
    aliases: &'a FieldAliases,
    now: DateTime<Utc>,
}

impl<'a> FilterEvaluator<'a> {
    pub fn new(aliases: &'a FieldAliases) -> Self {
        Self::at(aliases, Utc::now())
    }

    /// Evaluator whose fallback record date is `now`.
    pub fn at(aliases: &'a FieldAliases, now: DateTime<Utc>) -> Self {
        Self { aliases, now }
    }

    /// Apply `groups` left to right, each narrowing the records the previous
    /// one kept. A group that keeps nothing ends the evaluation with no
    /// records; later groups are not evaluated or described.
    pub fn evaluate(&self, records: &[Record], groups: &[FilterGroup]) -> FilterOutcome {
        let total_count = records.len();
        let mut kept: Vec<Record> = records.to_vec();
        let mut descriptions = Vec::new();

        for group in groups {
            let active: Vec<&Filter> = group.active_filters().collect();
            if active.is_empty() {
                continue;
            }
            descriptions.extend(active.iter().map(|f| f.describe()));

            kept.retain(|record| match group.logic {
                GroupLogic::And => active.iter().all(|f| self.matches(f, record)),
                GroupLogic::Or => active.iter().any(|f| self.matches(f, record)),
            });

            tracing::debug!(group = %group.id, kept = kept.len(), "filter group applied");
            if kept.is_empty() {
                tracing::debug!(group = %group.id, "group kept no records, stopping");
                break;
            }
        }

        FilterOutcome {
            kept_count: kept.len(),
            kept_records: kept,
            total_count,
            applied_filter_descriptions: descriptions,
        }
    }

    /// Per-record predicate for a single filter. Unresolvable operands fail.
    pub fn matches(&self, filter: &Filter, record: &Record) -> bool {
        match &filter.criterion {
            FilterCriterion::Date { value } => self.matches_date(value, record),
            FilterCriterion::Numeric { field, value } => self.matches_numeric(*field, value, record),
            FilterCriterion::Location { .. } => {
                contains_any(&self.aliases.location, &filter.selected_values(), record)
            }
            FilterCriterion::Turbine { .. } => {
                contains_any(&self.aliases.turbine, &filter.selected_values(), record)
            }
            FilterCriterion::Status { .. } => {
                let Some(status) = resolve_text(&self.aliases.status, record) else {
                    return false;
                };
                let status = status.to_lowercase();
                filter
                    .selected_values()
                    .iter()
                    .any(|v| v.to_lowercase() == status)
            }
            FilterCriterion::Correlation { .. } => filter.selected_values().iter().any(|label| {
                self.aliases
                    .correlation(label)
                    .is_some_and(|pair| pair.present_in(record))
            }),
            FilterCriterion::Text { value } => serde_json::to_string(record)
                .map(|json| json.to_lowercase().contains(&value.to_lowercase()))
                .unwrap_or(false),
        }
    }

    /// `timestamp`, then `createdAt`, then `updatedAt`, else now.
    pub fn record_date(&self, record: &Record) -> DateTime<Utc> {
        self.aliases
            .date
            .fields
            .iter()
            .filter_map(|field| record.get(field))
            .find_map(value_as_datetime)
            .unwrap_or(self.now)
    }

    fn matches_date(&self, range: &DateRange, record: &Record) -> bool {
        let date = self.record_date(record);
        range.start.is_none_or(|start| date >= start) && range.end.is_none_or(|end| date <= end)
    }

    fn matches_numeric(&self, field: NumericField, range: &NumericRange, record: &Record) -> bool {
        let Some(value) = self.aliases.numeric(field).resolve(record).and_then(value_as_f64) else {
            return false;
        };
        range.min.is_none_or(|min| value >= min) && range.max.is_none_or(|max| value <= max)
    }
}

fn resolve_text(alias: &FieldAlias, record: &Record) -> Option<String> {
    alias.resolve(record).and_then(value_as_text)
}

fn contains_any(alias: &FieldAlias, selected: &[&str], record: &Record) -> bool {
    let Some(text) = resolve_text(alias, record) else {
        return false;
    };
    let text = text.to_lowercase();
    selected.iter().any(|v| text.contains(&v.to_lowercase()))
}
