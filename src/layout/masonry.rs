use crate::models::MediaItem;

/// One masonry column: the items assigned to it, in placement order, and
/// the accumulated relative height at unit column width.
#[derive(Debug, Clone)]
pub struct ColumnModel {
    pub column_index: usize,
    pub height_units: f32,
    pub items: Vec<MediaItem>,
}

impl ColumnModel {
    fn new(column_index: usize) -> Self {
        Self {
            column_index,
            height_units: 0.0,
            items: Vec::new(),
        }
    }
}

/// Greedy shortest-column masonry layout.
///
/// Items are streamed in input order into the currently least-filled
/// column, which balances column heights to within the tallest single
/// item. A single O(n * columns) pass, deliberately not an optimal packer:
/// the layout reruns on every viewport resize and has to stay cheap.
#[derive(Debug, Clone, Default)]
pub struct MasonryLayout;

impl MasonryLayout {
    pub fn new() -> Self {
        Self
    }

    /// Distributes `items` across `column_count` columns.
    ///
    /// Each item contributes `1 / aspect_ratio` height units to the column
    /// it lands in; ties go to the lowest column index. Deterministic: the
    /// same item order and column count always yield the same assignment.
    ///
    /// A `column_count` of 0 is clamped to 1 so every item still gets
    /// placed.
    pub fn compute(&self, items: &[MediaItem], column_count: usize) -> Vec<ColumnModel> {
        let column_count = column_count.max(1);
        let mut columns: Vec<ColumnModel> =
            (0..column_count).map(ColumnModel::new).collect();

        for item in items {
            let target = Self::shortest_column(&columns);
            columns[target].height_units += item.height_units();
            columns[target].items.push(item.clone());
        }

        columns
    }

    /// Index of the column with the minimum accumulated height; ties break
    /// to the leftmost.
    fn shortest_column(columns: &[ColumnModel]) -> usize {
        let mut best = 0usize;
        for (idx, column) in columns.iter().enumerate().skip(1) {
            if column.height_units < columns[best].height_units {
                best = idx;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::collections::HashSet;

    use super::*;

    fn make_item(id: &str, aspect_ratio: f32) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            is_video: false,
            thumbnail_url: String::new(),
            display_url: String::new(),
            aspect_ratio,
            tags: BTreeSet::new(),
            created_at: String::new(),
            folder: "g".to_string(),
        }
    }

    fn all_ids(columns: &[ColumnModel]) -> Vec<&str> {
        columns
            .iter()
            .flat_map(|c| c.items.iter().map(|i| i.id.as_str()))
            .collect()
    }

    #[test]
    fn test_empty_items() {
        let layout = MasonryLayout::new();
        let columns = layout.compute(&[], 3);
        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|c| c.items.is_empty()));
    }

    #[test]
    fn test_every_item_placed_exactly_once() {
        let layout = MasonryLayout::new();
        let items: Vec<MediaItem> = (0..60)
            .map(|i| make_item(&format!("i{i}"), 0.5 + (i % 7) as f32 * 0.3))
            .collect();

        for column_count in 1..=6 {
            let columns = layout.compute(&items, column_count);
            let placed = all_ids(&columns);
            assert_eq!(placed.len(), items.len());
            let unique: HashSet<&str> = placed.iter().copied().collect();
            assert_eq!(unique.len(), items.len(), "duplicate placement");
        }
    }

    #[test]
    fn test_single_column_preserves_order() {
        let layout = MasonryLayout::new();
        let items = vec![
            make_item("a", 1.0),
            make_item("b", 0.4),
            make_item("c", 2.5),
        ];
        let columns = layout.compute(&items, 1);
        assert_eq!(all_ids(&columns), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ties_break_to_leftmost() {
        let layout = MasonryLayout::new();
        let items = vec![make_item("first", 1.0)];
        let columns = layout.compute(&items, 4);
        assert_eq!(columns[0].items.len(), 1);
        assert!(columns[1..].iter().all(|c| c.items.is_empty()));
    }

    #[test]
    fn test_two_column_worked_example() {
        // imgA(1.0), imgB(2.0), videoC(0.5) over 2 columns:
        // both start at 0, tie -> col0 gets imgA (h=1.0);
        // col1 (0) < col0 (1.0) -> imgB to col1 (h=0.5);
        // col1 (0.5) < col0 (1.0) -> videoC to col1 (h=2.5).
        let layout = MasonryLayout::new();
        let items = vec![
            make_item("imgA", 1.0),
            make_item("imgB", 2.0),
            make_item("videoC", 0.5),
        ];
        let columns = layout.compute(&items, 2);

        let col0: Vec<&str> = columns[0].items.iter().map(|i| i.id.as_str()).collect();
        let col1: Vec<&str> = columns[1].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(col0, vec!["imgA"]);
        assert_eq!(col1, vec!["imgB", "videoC"]);
        assert!((columns[0].height_units - 1.0).abs() < 1e-6);
        assert!((columns[1].height_units - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_greedy_balance_bound() {
        // Standard greedy load-balancing guarantee: max spread between
        // columns never exceeds the tallest single item.
        let layout = MasonryLayout::new();
        let items: Vec<MediaItem> = (0..200)
            .map(|i| make_item(&format!("i{i}"), 0.3 + (i % 11) as f32 * 0.25))
            .collect();
        let tallest = items
            .iter()
            .map(|i| i.height_units())
            .fold(0.0f32, f32::max);

        for column_count in [2usize, 3, 4] {
            let columns = layout.compute(&items, column_count);
            let max = columns
                .iter()
                .map(|c| c.height_units)
                .fold(f32::MIN, f32::max);
            let min = columns
                .iter()
                .map(|c| c.height_units)
                .fold(f32::MAX, f32::min);
            assert!(
                max - min <= tallest + 1e-4,
                "spread {} exceeds tallest item {} at {} columns",
                max - min,
                tallest,
                column_count
            );
        }
    }

    #[test]
    fn test_deterministic_across_reruns() {
        let layout = MasonryLayout::new();
        let items: Vec<MediaItem> = (0..30)
            .map(|i| make_item(&format!("i{i}"), 0.6 + (i % 5) as f32 * 0.4))
            .collect();
        let a = layout.compute(&items, 3);
        let b = layout.compute(&items, 3);
        for (ca, cb) in a.iter().zip(b.iter()) {
            assert_eq!(all_ids(&[ca.clone()]), all_ids(&[cb.clone()]));
        }
    }

    #[test]
    fn test_zero_columns_clamped() {
        let layout = MasonryLayout::new();
        let items = vec![make_item("a", 1.0)];
        let columns = layout.compute(&items, 0);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].items.len(), 1);
    }
}
