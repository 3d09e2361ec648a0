// Layout compactor - re-packs a component set into a gap-free, overlap-free layout
use crate::application::position_allocator::find_position;
use crate::domain::canvas::{Component, GridSpec};
use chrono::{DateTime, Utc};

pub fn compact(components: &[Component], grid: &GridSpec) -> Vec<Component> {
    compact_at(components, grid, Utc::now())
}

/// Upper bound on packing passes; layouts settle within a handful.
const MAX_PASSES: usize = 32;

/// Re-pack until positions stop changing, so compacting a compacted
/// layout is a no-op.
pub fn compact_at(components: &[Component], grid: &GridSpec, now: DateTime<Utc>) -> Vec<Component> {
    let mut packed = pack_once(components, grid, now);
    for pass in 1..MAX_PASSES {
        let repacked = pack_once(&packed, grid, now);
        if same_positions(&packed, &repacked) {
            tracing::debug!(components = packed.len(), passes = pass, "layout compacted");
            return packed;
        }
        packed = repacked;
    }

    tracing::warn!(
        components = packed.len(),
        passes = MAX_PASSES,
        "layout did not settle, keeping last packing"
    );
    packed
}

/// Re-place every component in `(y, x)` order, each one at the first free
/// slot left by those already placed. Ties keep their input order.
fn pack_once(components: &[Component], grid: &GridSpec, now: DateTime<Utc>) -> Vec<Component> {
    let mut ordered: Vec<&Component> = components.iter().collect();
    ordered.sort_by_key(|c| (c.position.y, c.position.x));

    let mut packed: Vec<Component> = Vec::with_capacity(components.len());
    for component in ordered {
        let position = find_position(&packed, component.size, grid);
        if position != component.position {
            tracing::trace!(
                id = %component.id,
                from_x = component.position.x,
                from_y = component.position.y,
                to_x = position.x,
                to_y = position.y,
                "component moved"
            );
        }
        let mut repositioned = component.clone();
        repositioned.position = position;
        repositioned.updated_at = now;
        packed.push(repositioned);
    }
    packed
}

fn same_positions(before: &[Component], after: &[Component]) -> bool {
    before.iter().all(|b| {
        after
            .iter()
            .find(|a| a.id == b.id)
            .is_some_and(|a| a.position == b.position)
    })
}
