// Canvas domain model - grid, components and dashboards
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Widest grid a dashboard may use.
pub const MAX_COLUMNS: u32 = 48;
/// Tallest component, and deepest drop row, in grid rows.
pub const MAX_ROWS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub columns: u32,
    pub row_height: u32,
    pub margin: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 12,
            row_height: 100,
            margin: 16,
        }
    }
}

impl GridSpec {
    pub fn new(columns: u32, row_height: u32, margin: u32) -> Self {
        Self {
            columns,
            row_height,
            margin,
        }
    }

    pub fn is_valid(&self) -> bool {
        (1..=MAX_COLUMNS).contains(&self.columns) && self.row_height > 0
    }

    /// Rows spanned by a pixel height: `ceil(height / row_height)`.
    pub fn rows_for(&self, height: u32) -> u32 {
        height.div_ceil(self.row_height.max(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Kpi,
    Chart,
    Table,
    Metric,
    Alert,
    Saved,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Positive and no taller than `MAX_ROWS` rows on `grid`.
    pub fn fits(&self, grid: &GridSpec) -> bool {
        self.is_valid() && grid.rows_for(self.height) <= MAX_ROWS
    }

    pub fn clamped_to(self, grid: &GridSpec) -> Self {
        Self {
            width: self.width.min(grid.columns),
            height: self.height,
        }
    }
}

/// Grid cells covered by a component: columns `[x, x + width)`, rows `[y, y + rows)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub rows: u32,
}

impl Footprint {
    pub fn new(position: Position, size: Size, grid: &GridSpec) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            rows: grid.rows_for(size.height),
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.rows)
    }

    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub kind: ComponentKind,
    pub position: Position,
    pub size: Size,
    #[serde(default)]
    pub payload: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Component {
    pub fn new(id: impl Into<String>, kind: ComponentKind, position: Position, size: Size) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            kind,
            position,
            size,
            payload: Value::Null,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn footprint(&self, grid: &GridSpec) -> Footprint {
        Footprint::new(self.position, self.size, grid)
    }
}

/// True when no two components share a grid cell.
pub fn is_overlap_free(components: &[Component], grid: &GridSpec) -> bool {
    let footprints: Vec<Footprint> = components.iter().map(|c| c.footprint(grid)).collect();
    footprints.iter().enumerate().all(|(i, a)| {
        footprints[i + 1..].iter().all(|b| !a.overlaps(b))
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: String,
    pub name: String,
    pub grid: GridSpec,
    #[serde(default)]
    pub components: Vec<Component>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn new(id: impl Into<String>, name: impl Into<String>, grid: GridSpec) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            grid,
            components: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_for_rounds_up() {
        let grid = GridSpec::default();
        assert_eq!(grid.rows_for(100), 1);
        assert_eq!(grid.rows_for(101), 2);
        assert_eq!(grid.rows_for(200), 2);
        assert_eq!(grid.rows_for(1), 1);
    }

    #[test]
    fn test_footprint_overlap() {
        let grid = GridSpec::default();
        let a = Footprint::new(Position::new(0, 0), Size::new(4, 200), &grid);
        let beside = Footprint::new(Position::new(4, 0), Size::new(4, 200), &grid);
        let below = Footprint::new(Position::new(0, 2), Size::new(4, 100), &grid);
        let inside = Footprint::new(Position::new(2, 1), Size::new(4, 100), &grid);

        assert!(!a.overlaps(&beside));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_overlap_free_check() {
        let grid = GridSpec::default();
        let a = Component::new("a", ComponentKind::Chart, Position::new(0, 0), Size::new(6, 200));
        let b = Component::new("b", ComponentKind::Kpi, Position::new(6, 0), Size::new(6, 100));
        assert!(is_overlap_free(&[a.clone(), b], &grid));

        let c = Component::new("c", ComponentKind::Table, Position::new(5, 1), Size::new(2, 100));
        assert!(!is_overlap_free(&[a, c], &grid));
    }

    #[test]
    fn test_grid_and_size_limits() {
        assert!(GridSpec::new(MAX_COLUMNS, 100, 0).is_valid());
        assert!(!GridSpec::new(MAX_COLUMNS + 1, 100, 0).is_valid());
        assert!(!GridSpec::new(12, 0, 0).is_valid());

        let grid = GridSpec::new(12, 100, 16);
        assert!(Size::new(4, MAX_ROWS * 100).fits(&grid));
        assert!(!Size::new(4, MAX_ROWS * 100 + 1).fits(&grid));
        assert!(!Size::new(0, 100).fits(&grid));
    }

    #[test]
    fn test_footprint_edges_saturate() {
        let grid = GridSpec::new(12, 1, 0);
        let tall = Footprint::new(Position::new(0, 5), Size::new(1, u32::MAX), &grid);
        assert_eq!(tall.bottom(), u32::MAX);
        let below = Footprint::new(Position::new(0, 10), Size::new(1, 1), &grid);
        assert!(tall.overlaps(&below));
    }

    #[test]
    fn test_size_clamp() {
        let grid = GridSpec::new(4, 100, 8);
        assert_eq!(Size::new(6, 300).clamped_to(&grid), Size::new(4, 300));
        assert_eq!(Size::new(2, 300).clamped_to(&grid), Size::new(2, 300));
    }
}
