//! Catalog Sorting
//!
//! Multi-column sort driven by table header clicks.

use crate::api::MemeTemplate;
use std::cmp::Ordering;

/// Sortable catalog column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Name,
    Width,
    Height,
    BoxCount,
}

impl SortColumn {
    /// Direction used the first time the column becomes a key
    pub fn preferred_direction(self) -> SortDirection {
        match self {
            SortColumn::Id => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header arrow
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "⏶",
            SortDirection::Descending => "⏷",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// Ordered sort keys; the first entry is the primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpecs {
    specs: Vec<SortSpec>,
}

impl Default for SortSpecs {
    fn default() -> Self {
        Self {
            specs: vec![SortSpec::new(SortColumn::Id, SortDirection::Descending)],
        }
    }
}

impl SortSpecs {
    pub fn new(specs: Vec<SortSpec>) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &[SortSpec] {
        &self.specs
    }

    /// Position and direction of `column`, if it is a sort key
    pub fn position(&self, column: SortColumn) -> Option<(usize, SortDirection)> {
        self.specs
            .iter()
            .position(|spec| spec.column == column)
            .map(|i| (i, self.specs[i].direction))
    }

    /// Header click. A column that is already a key flips; a new column starts
    /// in its preferred direction. A plain click leaves that column as the only
    /// key, an additive click keeps the others and appends new columns.
    pub fn click(&mut self, column: SortColumn, additive: bool) {
        let existing = self.specs.iter().position(|spec| spec.column == column);
        let direction = match existing {
            Some(i) => self.specs[i].direction.flipped(),
            None => column.preferred_direction(),
        };

        if !additive {
            self.specs = vec![SortSpec::new(column, direction)];
            return;
        }

        match existing {
            Some(i) => self.specs[i].direction = direction,
            None => self.specs.push(SortSpec::new(column, direction)),
        }
    }
}

fn compare_column(a: &MemeTemplate, b: &MemeTemplate, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::Name => a.name.cmp(&b.name),
        SortColumn::Width => a.width.cmp(&b.width),
        SortColumn::Height => a.height.cmp(&b.height),
        SortColumn::BoxCount => a.box_count.cmp(&b.box_count),
    }
}

/// First non-equal key wins
pub fn compare_templates(a: &MemeTemplate, b: &MemeTemplate, specs: &[SortSpec]) -> Ordering {
    for spec in specs {
        let ordering = compare_column(a, b, spec.column);
        let ordering = match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Stable sort by `specs`
pub fn sort_templates(templates: &mut [MemeTemplate], specs: &SortSpecs) {
    templates.sort_by(|a, b| compare_templates(a, b, specs.specs()));
}
