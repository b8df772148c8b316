//! Contiguous month axis for time-phased matrices.

use crate::models::{FilledMatrix, FilledRow, MonthBucket, TimePhasedMatrix};

/// Reindexes `matrix` onto every month from its first to its last column.
///
/// Months present in no row are inserted with `None` cells; cells the
/// source row does not have stay `None` too. An empty matrix yields an
/// empty axis.
pub fn fill_gaps(matrix: &TimePhasedMatrix) -> FilledMatrix {
    let months = match matrix.month_span() {
        Some((first, last)) => MonthBucket::range_inclusive(first, last),
        None => Vec::new(),
    };

    let rows = matrix
        .rows
        .iter()
        .map(|row| FilledRow {
            activity_id: row.activity_id.clone(),
            values: months.iter().map(|m| row.cells.get(m).copied()).collect(),
        })
        .collect();

    FilledMatrix {
        kind: matrix.kind,
        months,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatrixKind, TimePhasedRow};

    fn month(s: &str) -> MonthBucket {
        s.parse().unwrap()
    }

    #[test]
    fn test_gaps_become_none() {
        let mut m = TimePhasedMatrix::new(MatrixKind::UpdateActual);
        let mut a = TimePhasedRow::new("A");
        a.cells.insert(month("2024-01"), 5.0);
        let mut b = TimePhasedRow::new("B");
        b.cells.insert(month("2024-04"), 0.0);
        m.push(a);
        m.push(b);

        let filled = fill_gaps(&m);
        let axis: Vec<String> = filled.months.iter().map(|m| m.to_string()).collect();
        assert_eq!(axis, vec!["2024-01", "2024-02", "2024-03", "2024-04"]);
        assert_eq!(filled.rows[0].values, vec![Some(5.0), None, None, None]);
        assert_eq!(filled.rows[1].values, vec![None, None, None, Some(0.0)]);

        let totals = filled.monthly_totals();
        assert_eq!(totals[1], (month("2024-02"), None));
        assert_eq!(totals[3], (month("2024-04"), Some(0.0)));
        assert_eq!(filled.get("A", month("2024-01")), Some(5.0));
        assert_eq!(filled.get("A", month("2024-03")), None);
    }

    #[test]
    fn test_empty_matrix() {
        let filled = fill_gaps(&TimePhasedMatrix::new(MatrixKind::Removed));
        assert!(filled.months.is_empty());
        assert!(filled.rows.is_empty());
        assert_eq!(filled.kind, MatrixKind::Removed);
    }
}
