//! Cross-highlighting: which scatter records a heatmap selection lights up.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::record::{Dimension, DimensionValue, Record};

/// One selected heatmap cell, as `{dim_x: value, dim_y: value}`.
///
/// When both axes use the same dimension the pair carries a single entry (the y value wins),
/// and can therefore never reach two agreements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionPair {
    entries: BTreeMap<Dimension, DimensionValue>,
}

impl SelectionPair {
    /// Create a pair from the two axis dimensions and the selected values.
    #[must_use]
    pub fn new(dim_x: Dimension, x: DimensionValue, dim_y: Dimension, y: DimensionValue) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(dim_x, x);
        entries.insert(dim_y, y);
        Self { entries }
    }

    /// The value this pair holds for `dim`, if it carries that dimension.
    #[must_use]
    pub fn get(&self, dim: Dimension) -> Option<&DimensionValue> {
        self.entries.get(&dim)
    }

    /// Iterate over the carried `(dimension, value)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &DimensionValue)> {
        self.entries.iter().map(|(d, v)| (*d, v))
    }

    /// Number of agreeing criteria between this pair and `record`.
    #[must_use]
    pub fn agreements(&self, record: &Record) -> usize {
        self.iter()
            .filter(|(dim, value)| dim.value_of(record).as_ref() == Some(*value))
            .count()
    }
}

impl fmt::Display for SelectionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (dim, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dim}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Whether `record` is highlighted by `selection`.
///
/// True when any pair agrees with the record on exactly two criteria. Records with an
/// unparsable date never match; an empty selection matches nothing.
#[must_use]
pub fn matches(record: &Record, selection: &[SelectionPair]) -> bool {
    if record.date.is_none() {
        return false;
    }
    selection.iter().any(|pair| pair.agreements(record) == 2)
}

/// Applies a heatmap selection to scatter records.
#[derive(Debug, Clone, Copy)]
pub struct CrossHighlightMatcher<'a> {
    selection: &'a [SelectionPair],
}

impl<'a> CrossHighlightMatcher<'a> {
    /// Create a matcher over `selection`.
    #[must_use]
    pub fn new(selection: &'a [SelectionPair]) -> Self {
        Self { selection }
    }

    /// Whether `record` is highlighted.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        matches(record, self.selection)
    }

    /// Indices of the highlighted records.
    #[must_use]
    pub fn highlighted(&self, records: &[Record]) -> BTreeSet<usize> {
        if self.selection.is_empty() {
            return BTreeSet::new();
        }
        records
            .iter()
            .filter(|r| self.matches(r))
            .map(|r| r.index)
            .collect()
    }
}
