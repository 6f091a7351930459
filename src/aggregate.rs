//! Two-dimensional aggregation of rental counts.
//!
//! [`aggregate`] produces the sparse `x → y → total` mapping; [`Grid`] densifies it over the
//! declared domains so every (x, y) combination has a cell, with 0 where no record falls.

use std::collections::BTreeMap;

use crate::record::{Dimension, DimensionValue, Record};

/// Sparse aggregation result: `x value → y value → summed rental count`.
pub type Aggregation = BTreeMap<DimensionValue, BTreeMap<DimensionValue, f64>>;

/// Sum `rented_count` per `(dim_x, dim_y)` value pair.
///
/// Records without a value for either dimension are skipped, which drops unparsable dates
/// whenever Days or Months is involved. A missing count contributes 0.
#[must_use]
pub fn aggregate(records: &[Record], dim_x: Dimension, dim_y: Dimension) -> Aggregation {
    let mut out = Aggregation::new();
    for record in records {
        let (Some(x), Some(y)) = (dim_x.value_of(record), dim_y.value_of(record)) else {
            continue;
        };
        let count = record.rented_count.filter(|c| c.is_finite()).unwrap_or(0.0);
        *out.entry(x).or_default().entry(y).or_insert(0.0) += count;
    }
    out
}

/// Declared domain of `dim`.
///
/// Hours, Days and Months are fixed; Seasons and Holiday are the distinct non-empty values of
/// `records` in first-seen order (possibly empty).
#[must_use]
pub fn domain(records: &[Record], dim: Dimension) -> Vec<DimensionValue> {
    if let Some(fixed) = dim.fixed_domain() {
        return fixed;
    }
    let mut seen = Vec::new();
    for value in records.iter().filter_map(|r| dim.value_of(r)) {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// One heatmap cell.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationCell {
    /// Value along the x dimension.
    pub x: DimensionValue,
    /// Value along the y dimension.
    pub y: DimensionValue,
    /// Summed rental count, 0 for absent combinations.
    pub total: f64,
}

/// Dense cartesian grid of [`AggregationCell`]s, x-major.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    x_domain: Vec<DimensionValue>,
    y_domain: Vec<DimensionValue>,
    cells: Vec<AggregationCell>,
}

impl Grid {
    /// Build the grid.
    ///
    /// Domains come from `domain_records` (the full data set); totals from `records`
    /// (the active selection).
    #[must_use]
    pub fn build(
        domain_records: &[Record],
        records: &[Record],
        dim_x: Dimension,
        dim_y: Dimension,
    ) -> Self {
        let x_domain = domain(domain_records, dim_x);
        let y_domain = domain(domain_records, dim_y);
        let sums = aggregate(records, dim_x, dim_y);

        let mut cells = Vec::with_capacity(x_domain.len() * y_domain.len());
        for x in &x_domain {
            let column = sums.get(x);
            for y in &y_domain {
                let total = column.and_then(|c| c.get(y)).copied().unwrap_or(0.0);
                cells.push(AggregationCell {
                    x: x.clone(),
                    y: y.clone(),
                    total,
                });
            }
        }

        Self {
            x_domain,
            y_domain,
            cells,
        }
    }

    /// The x domain.
    #[must_use]
    pub fn x_domain(&self) -> &[DimensionValue] {
        &self.x_domain
    }

    /// The y domain.
    #[must_use]
    pub fn y_domain(&self) -> &[DimensionValue] {
        &self.y_domain
    }

    /// All cells, x-major.
    #[must_use]
    pub fn cells(&self) -> &[AggregationCell] {
        &self.cells
    }

    /// Look up the cell at `(x, y)`.
    #[must_use]
    pub fn cell(&self, x: &DimensionValue, y: &DimensionValue) -> Option<&AggregationCell> {
        let xi = self.x_domain.iter().position(|v| v == x)?;
        let yi = self.y_domain.iter().position(|v| v == y)?;
        self.cells.get(xi * self.y_domain.len() + yi)
    }

    /// Largest cell total (0 for an empty grid).
    #[must_use]
    pub fn max_total(&self) -> f64 {
        self.cells.iter().map(|c| c.total).fold(0.0, f64::max)
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: u32) -> DimensionValue {
        DimensionValue::Number(v)
    }

    // 04/06/2018 is a Monday, 05/06/2018 a Tuesday
    fn three_records() -> Vec<Record> {
        vec![
            Record::new(0, "04/06/2018", 0, 10.0),
            Record::new(1, "04/06/2018", 0, 5.0),
            Record::new(2, "05/06/2018", 1, 7.0),
        ]
    }

    #[test]
    fn test_three_record_scenario() {
        let records = three_records();
        let grid = Grid::build(&records, &records, Dimension::Hours, Dimension::Days);

        assert_eq!(grid.len(), 24 * 7);
        assert_eq!(grid.cell(&n(0), &n(0)).map(|c| c.total), Some(15.0));
        assert_eq!(grid.cell(&n(1), &n(1)).map(|c| c.total), Some(7.0));
        let zeros = grid.cells().iter().filter(|c| c.total == 0.0).count();
        assert_eq!(zeros, 166);
        assert_eq!(grid.max_total(), 15.0);
    }

    #[test]
    fn test_aggregate_sparse_map() {
        let sums = aggregate(&three_records(), Dimension::Hours, Dimension::Days);
        assert_eq!(sums.len(), 2);
        assert_eq!(sums[&n(0)][&n(0)], 15.0);
        assert_eq!(sums[&n(1)][&n(1)], 7.0);
    }

    #[test]
    fn test_unparsable_dates_only_skipped_for_date_dimensions() {
        let records = vec![
            Record::new(0, "garbage", 3, 4.0).with_season("Winter"),
            Record::new(1, "04/06/2018", 3, 6.0).with_season("Winter"),
        ];
        let by_day = aggregate(&records, Dimension::Hours, Dimension::Days);
        assert_eq!(by_day[&n(3)][&n(0)], 6.0);

        let by_season = aggregate(&records, Dimension::Hours, Dimension::Seasons);
        assert_eq!(by_season[&n(3)][&DimensionValue::from("Winter")], 10.0);
    }

    #[test]
    fn test_missing_count_contributes_zero() {
        let mut record = Record::new(0, "04/06/2018", 2, 0.0);
        record.rented_count = None;
        let records = vec![record];
        let grid = Grid::build(&records, &records, Dimension::Hours, Dimension::Days);
        assert_eq!(grid.cell(&n(2), &n(0)).map(|c| c.total), Some(0.0));
    }

    #[test]
    fn test_observed_domains_first_seen_order() {
        let records = vec![
            Record::new(0, "01/12/2017", 0, 1.0)
                .with_season("Winter")
                .with_holiday("No Holiday"),
            Record::new(1, "01/03/2018", 0, 1.0)
                .with_season("Spring")
                .with_holiday("Holiday"),
            Record::new(2, "02/12/2017", 0, 1.0).with_season("Winter"),
        ];
        let seasons: Vec<DimensionValue> = vec!["Winter".into(), "Spring".into()];
        let holidays: Vec<DimensionValue> = vec!["No Holiday".into(), "Holiday".into()];
        assert_eq!(domain(&records, Dimension::Seasons), seasons);
        assert_eq!(domain(&records, Dimension::Holiday), holidays);
    }

    #[test]
    fn test_empty_observed_domain_gives_empty_grid() {
        let records = vec![Record::new(0, "01/12/2017", 0, 1.0)];
        let grid = Grid::build(&records, &records, Dimension::Seasons, Dimension::Hours);
        assert!(grid.is_empty());
        assert_eq!(grid.max_total(), 0.0);
    }

    #[test]
    fn test_selection_restricts_totals_not_domains() {
        let all = vec![
            Record::new(0, "01/12/2017", 0, 3.0).with_season("Winter"),
            Record::new(1, "01/06/2018", 0, 9.0).with_season("Summer"),
        ];
        let grid = Grid::build(&all, &all[..1], Dimension::Seasons, Dimension::Hours);
        assert_eq!(grid.x_domain().len(), 2);
        let summer = DimensionValue::from("Summer");
        let winter = DimensionValue::from("Winter");
        assert_eq!(grid.cell(&summer, &n(0)).map(|c| c.total), Some(0.0));
        assert_eq!(grid.cell(&winter, &n(0)).map(|c| c.total), Some(3.0));
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let records = three_records();
        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(
            aggregate(&records, Dimension::Days, Dimension::Months),
            aggregate(&reversed, Dimension::Days, Dimension::Months)
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const SEASONS: [&str; 4] = ["Winter", "Spring", "Summer", "Autumn"];

        fn arb_record() -> impl Strategy<Value = (u8, u32, u32, usize, f64)> {
            (0u8..24, 1u32..29, 1u32..13, 0usize..4, 0.0f64..3000.0)
        }

        fn build(rows: &[(u8, u32, u32, usize, f64)]) -> Vec<Record> {
            rows.iter()
                .enumerate()
                .map(|(i, (hour, day, month, season, count))| {
                    let date = format!("{day:02}/{month:02}/2018");
                    Record::new(i, &date, *hour, *count)
                        .with_season(SEASONS[*season])
                })
                .collect()
        }

        fn dims() -> impl Strategy<Value = Dimension> {
            prop::sample::select(Dimension::ALL.to_vec())
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_grid_is_dense_and_non_negative(
                rows in prop::collection::vec(arb_record(), 0..60),
                dim_x in dims(),
                dim_y in dims(),
            ) {
                let records = build(&rows);
                let grid = Grid::build(&records, &records, dim_x, dim_y);
                prop_assert_eq!(
                    grid.len(),
                    domain(&records, dim_x).len() * domain(&records, dim_y).len()
                );
                prop_assert!(grid.cells().iter().all(|c| c.total >= 0.0));
            }

            #[test]
            fn prop_totals_conserve_counts(rows in prop::collection::vec(arb_record(), 1..60)) {
                let records = build(&rows);
                let grid = Grid::build(&records, &records, Dimension::Hours, Dimension::Months);
                let expected: f64 = records.iter().filter_map(|r| r.rented_count).sum();
                let actual: f64 = grid.cells().iter().map(|c| c.total).sum();
                prop_assert!((expected - actual).abs() < 1e-6 * expected.max(1.0));
            }
        }
    }
}
