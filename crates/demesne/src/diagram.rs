//! The finished diagram model.
//!
//! A [`Diagram`] is what the pipeline hands to a renderer: grouping boxes
//! made of column-spanned cell grids, and edges between cell ports. Boxes,
//! rows, and cells are created once per build and discarded after
//! serialization; there are no incremental updates.

use demesne_core::relation::{Cardinality, RelationKind};

/// One cell of a box grid.
///
/// The `port` is the edge-anchor key the renderer uses to attach edges to
/// this cell; the background tag is an opaque color string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    port: String,
    background: Option<String>,
    row_span: usize,
    col_span: usize,
}

impl Cell {
    /// Create a 1x1 cell with text and a port key.
    pub fn new(text: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            port: port.into(),
            background: None,
            row_span: 1,
            col_span: 1,
        }
    }

    /// Create an empty 1x1 padding cell.
    pub fn blank() -> Self {
        Self::new("", "")
    }

    /// Set the column span.
    pub fn with_col_span(mut self, col_span: usize) -> Self {
        self.col_span = col_span;
        self
    }

    /// Set the row span.
    pub fn with_row_span(mut self, row_span: usize) -> Self {
        self.row_span = row_span;
        self
    }

    /// Set the background tag.
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// The cell's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The cell's edge-anchor key; empty for padding cells.
    pub fn port(&self) -> &str {
        &self.port
    }

    /// The cell's background tag, if any.
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// The cell's row span.
    pub fn row_span(&self) -> usize {
        self.row_span
    }

    /// The cell's column span.
    pub fn col_span(&self) -> usize {
        self.col_span
    }
}

/// One row of a box grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Create a row from its cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// The row's cells in column order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Sum of the cells' column spans.
    pub fn col_span_sum(&self) -> usize {
        self.cells.iter().map(Cell::col_span).sum()
    }
}

/// One grouping box: a named grid of rows.
#[derive(Debug, Clone)]
pub struct DiagramBox {
    name: String,
    rows: Vec<Row>,
}

impl DiagramBox {
    /// Create a box from its name and rows.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// The box's name (the domain's full path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The box's rows in emission order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// One end of a diagram edge: a box plus a port key inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    box_name: String,
    port: String,
}

impl Endpoint {
    /// Create an endpoint.
    pub fn new(box_name: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            box_name: box_name.into(),
            port: port.into(),
        }
    }

    /// The name of the box the port belongs to.
    pub fn box_name(&self) -> &str {
        &self.box_name
    }

    /// The port key inside the box.
    pub fn port(&self) -> &str {
        &self.port
    }
}

/// One rendered edge between two ports.
///
/// Edges keep their relation kind and cardinality so the renderer can style
/// them; repeated and self-referential relations each produce their own edge.
#[derive(Debug, Clone)]
pub struct Edge {
    from: Endpoint,
    to: Endpoint,
    kind: RelationKind,
    cardinality: Cardinality,
}

impl Edge {
    /// Create an edge between two endpoints.
    pub fn new(from: Endpoint, to: Endpoint, kind: RelationKind, cardinality: Cardinality) -> Self {
        Self {
            from,
            to,
            kind,
            cardinality,
        }
    }

    /// The edge's source endpoint.
    pub fn from(&self) -> &Endpoint {
        &self.from
    }

    /// The edge's target endpoint.
    pub fn to(&self) -> &Endpoint {
        &self.to
    }

    /// The relation kind the edge renders.
    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// The relation cardinality the edge renders.
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
}

/// The finished diagram: boxes plus edges.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    boxes: Vec<DiagramBox>,
    edges: Vec<Edge>,
}

impl Diagram {
    /// Create a diagram from its boxes and edges.
    pub fn new(boxes: Vec<DiagramBox>, edges: Vec<Edge>) -> Self {
        Self { boxes, edges }
    }

    /// The diagram's boxes in tree walk order.
    pub fn boxes(&self) -> &[DiagramBox] {
        &self.boxes
    }

    /// The diagram's edges in relation delivery order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
