//! The grid layout engine.
//!
//! Translates one box's ordered member list into a rectangular table of
//! rows and column-spanned cells. The column budget is fixed per box before
//! any row is built; every emitted row accounts for exactly that many
//! columns (cells spanning multiple rows carry their columns into the rows
//! below them).

use log::trace;

use crate::{
    config::{LayoutConfig, StyleConfig},
    diagram::{Cell, Row},
    layout::{
        LayoutError,
        member::{Item, Member, Payload},
    },
};

/// The resolved column budget for one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    left_margin: usize,
    max_left: usize,
    gap: usize,
    title_width: usize,
    max_right: usize,
    right_margin: usize,
}

impl Budget {
    /// Total columns of the box.
    pub fn cols(&self) -> usize {
        self.left_margin
            + self.max_left
            + self.gap
            + self.title_width
            + self.max_right
            + self.right_margin
    }

    /// Interior width between the margins.
    pub fn usable(&self) -> usize {
        self.cols() - self.left_margin - self.right_margin
    }

    /// Capacity of the left list area.
    pub fn max_left(&self) -> usize {
        self.max_left
    }

    /// Capacity of the right list area.
    pub fn max_right(&self) -> usize {
        self.max_right
    }
}

/// Lays out boxes against one configuration.
pub struct Engine<'a> {
    config: &'a LayoutConfig,
    style: &'a StyleConfig,
}

impl<'a> Engine<'a> {
    /// Create an engine over the given layout constants and style tags.
    pub fn new(config: &'a LayoutConfig, style: &'a StyleConfig) -> Self {
        Self { config, style }
    }

    /// Validate member shapes and compute the box's column budget.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidElements`] when any member is neither a
    /// flat attribute list nor exactly two lists.
    pub fn budget(&self, box_name: &str, members: &[Member]) -> Result<Budget, LayoutError> {
        let mut max_left = 0;
        let mut max_right = 0;

        for member in members {
            match member.payload() {
                Payload::Flat(_) => {}
                Payload::Lists(lists) => {
                    if lists.len() != 2 {
                        return Err(LayoutError::InvalidElements {
                            box_name: box_name.to_string(),
                            member: member.title().to_string(),
                            lists: lists.len(),
                        });
                    }
                    max_left = max_left.max(lists[0].len());
                    max_right = max_right.max(lists[1].len());
                }
            }
        }

        // Long lists wrap instead of widening the whole box without bound.
        let cap = self.config.max_list_columns();
        Ok(Budget {
            left_margin: self.config.left_margin(),
            max_left: max_left.min(cap),
            gap: self.config.gap(),
            title_width: self.config.title_width(),
            max_right: max_right.min(cap),
            right_margin: self.config.right_margin(),
        })
    }

    /// Emit the full row grid for one box.
    ///
    /// Row order: one blank header row carrying the box's anchor port, then
    /// each member's rows followed by a blank separator row, then one
    /// trailing full-width title row.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidElements`] when shape validation fails;
    /// no rows are produced for the box in that case.
    pub fn layout(
        &self,
        box_name: &str,
        anchor_port: &str,
        members: &[Member],
    ) -> Result<Vec<Row>, LayoutError> {
        let budget = self.budget(box_name, members)?;
        let cols = budget.cols();
        trace!(box_name, cols, members_len = members.len(); "Laying out box");

        let mut rows = Vec::new();
        rows.push(Row::new(vec![
            Cell::new("", anchor_port).with_col_span(cols),
        ]));

        for member in members {
            match member.payload() {
                Payload::Flat(items) => self.emit_flat(&mut rows, member, items, &budget),
                Payload::Lists(lists) => {
                    self.emit_dual(&mut rows, member, &lists[0], &lists[1], &budget);
                }
            }
            rows.push(Row::new(vec![Cell::blank().with_col_span(cols)]));
        }

        rows.push(Row::new(vec![
            Cell::new(box_name, "")
                .with_col_span(cols)
                .with_background(self.style.title_color()),
        ]));

        Ok(rows)
    }

    /// Chunked rows for a flat attribute list.
    fn emit_flat(&self, rows: &mut Vec<Row>, member: &Member, items: &[Item], budget: &Budget) {
        let usable = budget.usable();
        let chunk_size = (usable / 2).max(1);
        let color = self.style.color_for(member.kind());

        for chunk in items.chunks(chunk_size) {
            let count = chunk.len();
            let span = ((usable - (count - 1)) / count).max(1);

            let mut cells = blanks(budget.left_margin);
            for (index, item) in chunk.iter().enumerate() {
                if index > 0 {
                    cells.push(Cell::blank());
                }
                cells.push(
                    Cell::new(item.text(), item.port())
                        .with_col_span(span)
                        .with_background(color),
                );
            }
            pad_to(&mut cells, budget.cols());
            rows.push(Row::new(cells));
        }
    }

    /// Rows for a dual-list member.
    ///
    /// The list that needs more rows is laid out row-major; the other is laid
    /// out column-major over its own narrower column count, clustering its
    /// items next to the title. Left cells are emitted in reverse so the left
    /// list grows toward the title. The title cell appears only on the first
    /// physical row, spanning all of them.
    fn emit_dual(
        &self,
        rows: &mut Vec<Row>,
        member: &Member,
        left: &[Item],
        right: &[Item],
        budget: &Budget,
    ) {
        let left_rows = rows_for(left.len(), budget.max_left);
        let right_rows = rows_for(right.len(), budget.max_right);
        // A member with two empty lists still renders its title row.
        let rows_needed = left_rows.max(right_rows).max(1);
        let left_drives = left_rows >= right_rows;

        let left_grid = if left_drives {
            row_major(left, rows_needed, budget.max_left)
        } else {
            col_major(left, rows_needed, budget.max_left)
        };
        let right_grid = if left_drives {
            col_major(right, rows_needed, budget.max_right)
        } else {
            row_major(right, rows_needed, budget.max_right)
        };

        let color = self.style.color_for(member.kind());

        for index in 0..rows_needed {
            let mut cells = blanks(budget.left_margin);
            for slot in left_grid[index].iter().rev() {
                cells.push(item_cell(slot, color));
            }
            cells.extend(blanks(budget.gap));
            if index == 0 {
                cells.push(
                    Cell::new(member.title(), member.port())
                        .with_col_span(budget.title_width)
                        .with_row_span(rows_needed)
                        .with_background(color),
                );
            }
            for slot in &right_grid[index] {
                cells.push(item_cell(slot, color));
            }
            cells.extend(blanks(budget.right_margin));
            rows.push(Row::new(cells));
        }
    }
}

/// Physical rows a list of `len` items needs at `capacity` items per row.
fn rows_for(len: usize, capacity: usize) -> usize {
    if len == 0 || capacity == 0 {
        0
    } else {
        len.div_ceil(capacity)
    }
}

/// Fill each row to its full capacity before starting the next.
fn row_major(items: &[Item], rows: usize, capacity: usize) -> Vec<Vec<Option<&Item>>> {
    (0..rows)
        .map(|row| {
            (0..capacity)
                .map(|col| items.get(row * capacity + col))
                .collect()
        })
        .collect()
}

/// Fill columns top to bottom over the list's own natural column count,
/// padding the remaining capacity with empty slots.
fn col_major(items: &[Item], rows: usize, capacity: usize) -> Vec<Vec<Option<&Item>>> {
    let natural_cols = rows_for(items.len(), rows);
    (0..rows)
        .map(|row| {
            (0..capacity)
                .map(|col| {
                    if col < natural_cols {
                        items.get(col * rows + row)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

fn item_cell(slot: &Option<&Item>, color: &str) -> Cell {
    match slot {
        Some(item) => Cell::new(item.text(), item.port()).with_background(color),
        None => Cell::blank(),
    }
}

fn blanks(count: usize) -> Vec<Cell> {
    (0..count).map(|_| Cell::blank()).collect()
}

fn pad_to(cells: &mut Vec<Cell>, cols: usize) {
    let mut total: usize = cells.iter().map(Cell::col_span).sum();
    while total < cols {
        cells.push(Cell::blank());
        total += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demesne_core::object::Kind;

    fn engine_fixtures() -> (LayoutConfig, StyleConfig) {
        (LayoutConfig::default(), StyleConfig::default())
    }

    fn item(name: &str) -> Item {
        Item::new(name, format!("port_{name}"))
    }

    fn items(count: usize) -> Vec<Item> {
        (0..count).map(|i| item(&format!("a{i}"))).collect()
    }

    /// Checks the fixed-column invariant, carrying row-spanned cells into the
    /// rows below them.
    fn assert_uniform_cols(rows: &[Row], cols: usize) {
        let mut carry: Vec<(usize, usize)> = Vec::new();
        for row in rows {
            let carried: usize = carry.iter().map(|(_, span)| span).sum();
            assert_eq!(
                row.col_span_sum() + carried,
                cols,
                "row does not sum to the column budget"
            );

            carry = carry
                .into_iter()
                .filter_map(|(remaining, span)| {
                    (remaining > 1).then_some((remaining - 1, span))
                })
                .collect();
            for cell in row.cells() {
                if cell.row_span() > 1 {
                    carry.push((cell.row_span() - 1, cell.col_span()));
                }
            }
        }
        assert!(carry.is_empty(), "a row span extended past the last row");
    }

    #[test]
    fn test_budget_from_dual_members() {
        let (config, style) = engine_fixtures();
        let engine = Engine::new(&config, &style);
        let members = vec![
            Member::dual("A", "a", Kind::Entity, items(2), items(1)),
            Member::dual("B", "b", Kind::Entity, items(1), items(3)),
        ];

        let budget = engine.budget("app/x", &members).unwrap();
        assert_eq!(budget.max_left(), 2);
        assert_eq!(budget.max_right(), 3);
        // 1 + 2 + 1 + 1 + 3 + 1
        assert_eq!(budget.cols(), 9);
        assert_eq!(budget.usable(), 7);
    }

    #[test]
    fn test_invalid_list_count_fails_the_box() {
        let (config, style) = engine_fixtures();
        let engine = Engine::new(&config, &style);
        let bad = Member::new(
            "bad",
            "bad",
            Kind::Entity,
            Payload::Lists(vec![items(1), items(1), items(1)]),
        );

        let err = engine.layout("app/x", "x", &[bad]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidElements {
                box_name: "app/x".to_string(),
                member: "bad".to_string(),
                lists: 3,
            }
        );
    }

    #[test]
    fn test_header_body_and_title_rows() {
        let (config, style) = engine_fixtures();
        let engine = Engine::new(&config, &style);
        let members = vec![Member::dual("A", "a", Kind::Entity, items(1), items(1))];

        let rows = engine.layout("app/x", "anchor", &members).unwrap();
        // header + one member row + separator + box title
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].cells()[0].port(), "anchor");
        let last = rows.last().unwrap();
        assert_eq!(last.cells()[0].text(), "app/x");

        let budget = engine.budget("app/x", &members).unwrap();
        assert_uniform_cols(&rows, budget.cols());
    }

    #[test]
    fn test_flat_chunking_7_items_into_3_3_1() {
        let (config, style) = engine_fixtures();
        let engine = Engine::new(&config, &style);
        // The dual member widens the interior to 6 columns, so the flat
        // chunk size is 3.
        let members = vec![
            Member::dual("K", "k", Kind::Entity, items(2), items(2)),
            Member::flat("cluster", "cluster", Kind::Service, items(7)),
        ];

        let budget = engine.budget("app/x", &members).unwrap();
        assert_eq!(budget.usable(), 6);

        let rows = engine.layout("app/x", "anchor", &members).unwrap();
        // Rows: header, 1 dual row, blank, 3 chunk rows, blank, title.
        assert_eq!(rows.len(), 8);

        let chunk_rows = &rows[3..6];
        let counts: Vec<usize> = chunk_rows
            .iter()
            .map(|row| {
                row.cells()
                    .iter()
                    .filter(|cell| !cell.text().is_empty())
                    .count()
            })
            .collect();
        assert_eq!(counts, vec![3, 3, 1]);
        assert_uniform_cols(&rows, budget.cols());
    }

    #[test]
    fn test_dual_rows_needed_and_title_row_span() {
        let config = toml_config("max_list_columns = 3");
        let style = StyleConfig::default();
        let engine = Engine::new(&config, &style);
        // Left has 7 items at capacity 3: 3 physical rows.
        let members = vec![Member::dual("K", "k", Kind::Entity, items(7), items(2))];

        let budget = engine.budget("app/x", &members).unwrap();
        assert_eq!(budget.max_left(), 3);

        let rows = engine.layout("app/x", "anchor", &members).unwrap();
        // header + 3 member rows + blank + title
        assert_eq!(rows.len(), 6);

        let member_rows = &rows[1..4];
        let titles: Vec<&Cell> = member_rows
            .iter()
            .flat_map(|row| row.cells())
            .filter(|cell| cell.text() == "K")
            .collect();
        assert_eq!(titles.len(), 1, "the title cell appears exactly once");
        assert_eq!(titles[0].row_span(), 3);
        // The title is on the first of the member rows.
        assert!(member_rows[0].cells().iter().any(|cell| cell.text() == "K"));

        assert_uniform_cols(&rows, budget.cols());
    }

    #[test]
    fn test_left_cells_grow_toward_title() {
        let (config, style) = engine_fixtures();
        let engine = Engine::new(&config, &style);
        let members = vec![
            Member::dual("K", "k", Kind::Entity, items(1), vec![]),
            Member::dual("W", "w", Kind::Entity, items(3), vec![]),
        ];

        let rows = engine.layout("app/x", "anchor", &members).unwrap();
        // K's single left item must sit in the column adjacent to the gap,
        // not at the far left edge.
        let k_row = &rows[1];
        let cells = k_row.cells();
        // layout: margin, blank, blank, item, gap, title, margin
        assert_eq!(cells[3].text(), "a0");
        assert!(cells[1].text().is_empty() && cells[2].text().is_empty());
    }

    #[test]
    fn test_member_without_right_list_pads_capacity() {
        let (config, style) = engine_fixtures();
        let engine = Engine::new(&config, &style);
        let members = vec![
            Member::dual("K", "k", Kind::Entity, items(1), items(2)),
            Member::dual("N", "n", Kind::Entity, items(1), vec![]),
        ];

        let budget = engine.budget("app/x", &members).unwrap();
        let rows = engine.layout("app/x", "anchor", &members).unwrap();
        assert_uniform_cols(&rows, budget.cols());

        // N's row still accounts for the full right capacity with blanks.
        let n_row = rows
            .iter()
            .find(|row| row.cells().iter().any(|cell| cell.text() == "N"))
            .unwrap();
        assert_eq!(n_row.col_span_sum(), budget.cols());
    }

    #[test]
    fn test_empty_dual_member_still_gets_a_title_row() {
        let (config, style) = engine_fixtures();
        let engine = Engine::new(&config, &style);
        let members = vec![Member::dual("K", "k", Kind::Entity, vec![], vec![])];

        let rows = engine.layout("app/x", "anchor", &members).unwrap();
        assert!(
            rows.iter()
                .any(|row| row.cells().iter().any(|cell| cell.text() == "K"))
        );
    }

    fn toml_config(extra: &str) -> LayoutConfig {
        toml::from_str(extra).unwrap()
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn dual_member_row_count_matches_capacities(
                left_len in 0usize..12,
                right_len in 0usize..12,
                cap in 1usize..5,
            ) {
                let config: LayoutConfig =
                    toml::from_str(&format!("max_list_columns = {cap}")).unwrap();
                let style = StyleConfig::default();
                let engine = Engine::new(&config, &style);
                let members = vec![Member::dual(
                    "K",
                    "k",
                    Kind::Entity,
                    items(left_len),
                    items(right_len),
                )];

                let budget = engine.budget("app/x", &members).unwrap();
                let rows = engine.layout("app/x", "anchor", &members).unwrap();

                let expected = rows_for(left_len, budget.max_left())
                    .max(rows_for(right_len, budget.max_right()))
                    .max(1);
                // header + member rows + separator + title
                prop_assert_eq!(rows.len(), expected + 3);

                let title_cells: Vec<&Cell> = rows
                    .iter()
                    .flat_map(|row| row.cells())
                    .filter(|cell| cell.text() == "K")
                    .collect();
                prop_assert_eq!(title_cells.len(), 1);
                prop_assert_eq!(title_cells[0].row_span(), expected);
            }

            #[test]
            fn every_row_sums_to_the_column_budget(
                flat_len in 0usize..16,
                left_len in 0usize..10,
                right_len in 0usize..10,
            ) {
                let (config, style) = engine_fixtures();
                let engine = Engine::new(&config, &style);
                let members = vec![
                    Member::dual("K", "k", Kind::Entity, items(left_len), items(right_len)),
                    Member::flat("cluster", "cluster", Kind::Service, items(flat_len)),
                ];

                let budget = engine.budget("app/x", &members).unwrap();
                let rows = engine.layout("app/x", "anchor", &members).unwrap();
                assert_uniform_cols(&rows, budget.cols());
            }
        }
    }
}
