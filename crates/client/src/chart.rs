//! Bar-chart rows: quantities scaled for a text renderer.

use tally_tracker::ItemRow;

/// One chart bar, scaled to the widest quantity in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarRow {
    pub label: String,
    pub quantity: u64,
    /// Bar length in cells, in `0..=max_width`.
    pub width: usize,
}

/// Build proportionally-scaled bars from the projected row list.
///
/// The largest quantity spans `max_width` cells; every existing item gets
/// at least one cell so it never renders as nothing.
pub fn bar_rows(rows: &[ItemRow], max_width: usize) -> Vec<BarRow> {
    let max_quantity = rows.iter().map(|r| r.quantity).max().unwrap_or(0);

    rows.iter()
        .map(|row| BarRow {
            label: row.label.clone(),
            quantity: row.quantity,
            width: scale(row.quantity, max_quantity, max_width),
        })
        .collect()
}

fn scale(quantity: u64, max_quantity: u64, max_width: usize) -> usize {
    if max_quantity == 0 || max_width == 0 {
        return 0;
    }

    let width = (quantity as u128 * max_width as u128) / max_quantity as u128;
    (width as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, quantity: u64) -> ItemRow {
        ItemRow {
            name: label.to_lowercase(),
            label: label.to_string(),
            quantity,
        }
    }

    #[test]
    fn widest_quantity_spans_the_full_width() {
        let bars = bar_rows(&[row("Apple", 2), row("Pear", 8)], 40);

        assert_eq!(bars[0].width, 10);
        assert_eq!(bars[1].width, 40);
    }

    #[test]
    fn every_item_gets_at_least_one_cell() {
        let bars = bar_rows(&[row("Apple", 1), row("Pear", 1000)], 20);

        assert_eq!(bars[0].width, 1);
        assert_eq!(bars[1].width, 20);
    }

    #[test]
    fn empty_list_builds_no_bars() {
        assert!(bar_rows(&[], 40).is_empty());
    }

    #[test]
    fn zero_width_chart_collapses() {
        let bars = bar_rows(&[row("Apple", 3)], 0);
        assert_eq!(bars[0].width, 0);
    }
}
