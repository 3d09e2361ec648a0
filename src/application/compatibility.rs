// Compatibility analyzer - which filter kinds make sense for a dataset
use crate::domain::field_aliases::FieldAliases;
use crate::domain::filter::{CompatibilityReport, FilterKind, Record};

/// Inspect a record sample (a handful of rows is enough) and report the
/// filter kinds its field names support. Text is always compatible.
pub fn analyze(dataset_id: &str, records: &[Record], aliases: &FieldAliases) -> CompatibilityReport {
    let mut fields: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !fields.contains(key) {
                fields.push(key.clone());
            }
        }
    }

    let compatible_kinds: Vec<FilterKind> = FilterKind::ALL
        .into_iter()
        .filter(|kind| is_compatible(*kind, &fields, aliases))
        .collect();

    tracing::debug!(
        dataset_id,
        fields = fields.len(),
        kinds = compatible_kinds.len(),
        "dataset analyzed"
    );

    CompatibilityReport {
        dataset_id: dataset_id.to_string(),
        fields,
        compatible_kinds,
    }
}

fn is_compatible(kind: FilterKind, fields: &[String], aliases: &FieldAliases) -> bool {
    match kind {
        FilterKind::Text => true,
        FilterKind::Correlation => aliases
            .correlations
            .iter()
            .any(|pair| pair.fields.iter().all(|f| fields.contains(f))),
        other => aliases
            .for_kind(other)
            .is_some_and(|alias| fields.iter().any(|f| alias.matches_name(f))),
    }
}

/// Kinds every dataset supports, in the first report's order. With no
/// datasets only the basic filters (date and text) are offered.
pub fn common_compatible_kinds(reports: &[CompatibilityReport]) -> Vec<FilterKind> {
    let Some((first, rest)) = reports.split_first() else {
        return vec![FilterKind::Date, FilterKind::Text];
    };

    first
        .compatible_kinds
        .iter()
        .copied()
        .filter(|kind| rest.iter().all(|r| r.compatible_kinds.contains(kind)))
        .collect()
}
