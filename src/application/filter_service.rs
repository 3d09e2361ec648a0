// Filter service - compatibility and evaluation use cases
use crate::application::compatibility::{analyze, common_compatible_kinds};
use crate::application::filter_evaluator::FilterEvaluator;
use crate::domain::field_aliases::FieldAliases;
use crate::domain::filter::{CompatibilityReport, FilterGroup, FilterKind, FilterOutcome, Record};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DatasetSample {
    pub dataset_id: String,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilitySummary {
    pub reports: Vec<CompatibilityReport>,
    pub common_compatible_kinds: Vec<FilterKind>,
}

#[derive(Clone)]
pub struct FilterService {
    aliases: Arc<FieldAliases>,
}

impl FilterService {
    pub fn new(aliases: FieldAliases) -> Self {
        Self {
            aliases: Arc::new(aliases),
        }
    }

    pub fn analyze(&self, datasets: &[DatasetSample]) -> CompatibilitySummary {
        let reports: Vec<CompatibilityReport> = datasets
            .iter()
            .map(|d| analyze(&d.dataset_id, &d.records, &self.aliases))
            .collect();
        let common_compatible_kinds = common_compatible_kinds(&reports);

        tracing::info!(
            datasets = reports.len(),
            common_kinds = common_compatible_kinds.len(),
            "filter compatibility computed"
        );

        CompatibilitySummary {
            reports,
            common_compatible_kinds,
        }
    }

    pub fn evaluate(&self, records: &[Record], groups: &[FilterGroup]) -> FilterOutcome {
        let outcome = FilterEvaluator::new(&self.aliases).evaluate(records, groups);
        tracing::info!(
            groups = groups.len(),
            total = outcome.total_count,
            kept = outcome.kept_count,
            "filters applied"
        );
        outcome
    }
}
