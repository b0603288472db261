//! Conforming a forecast to the submission template's shape.

use crate::core::WideTable;
use crate::error::Result;
use tracing::warn;

/// A forecast reshaped to a template, plus the groups that had no values.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub table: WideTable,
    /// Template groups whose column was entirely empty and zero-filled.
    pub empty_groups: Vec<String>,
}

/// Reindex `forecast` to exactly the template's timestamps and group columns.
///
/// Timestamps or groups absent from the forecast become empty. Columns that
/// are empty in every row are zero-filled and reported once; columns with
/// some values keep their remaining empty cells.
pub fn align(forecast: &WideTable, template: &WideTable) -> Result<Alignment> {
    let mut table = forecast
        .reindex_rows(template.index())?
        .reindex_columns(template.columns())?;

    let empty_positions: Vec<usize> = (0..table.n_cols())
        .filter(|&pos| table.is_column_empty(pos))
        .collect();
    let empty_groups: Vec<String> = empty_positions
        .iter()
        .map(|&pos| table.columns()[pos].clone())
        .collect();

    if !empty_groups.is_empty() {
        warn!(
            count = empty_groups.len(),
            groups = %empty_groups.join(", "),
            "groups without forecast values, filling with 0.0"
        );
    }
    for pos in empty_positions {
        table.fill_column(pos, 0.0);
    }

    Ok(Alignment {
        table,
        empty_groups,
    })
}
