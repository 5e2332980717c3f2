//! DOT serialization of a finished diagram.
//!
//! Each diagram box becomes one `shape=plain` node labelled with an HTML
//! table; cell ports become `<td port="...">` anchors, and edges attach to
//! `node:port` pairs. The DOT text is produced through the `dot-structures`
//! AST rather than string concatenation, so identifier quoting stays in one
//! place.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Port, Stmt,
    Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};

use demesne_core::relation::{Cardinality, RelationKind};

use crate::diagram::{Cell, Diagram, DiagramBox, Edge, Endpoint};

/// Render the diagram as DOT text.
pub fn render(diagram: &Diagram) -> String {
    let mut stmts = vec![
        Stmt::GAttribute(GraphAttributes::Graph(vec![plain_attr("rankdir", "TB")])),
        Stmt::GAttribute(GraphAttributes::Node(vec![plain_attr("shape", "plain")])),
    ];

    for diagram_box in diagram.boxes() {
        stmts.push(Stmt::Node(box_node(diagram_box)));
    }
    for edge in diagram.edges() {
        stmts.push(Stmt::Edge(dot_edge(edge)));
    }

    let graph = Graph::DiGraph {
        id: Id::Plain("diagram".to_string()),
        strict: false,
        stmts,
    };
    graph.print(&mut PrinterContext::default())
}

fn box_node(diagram_box: &DiagramBox) -> Node {
    Node {
        id: NodeId(quoted(diagram_box.name()), None),
        attributes: vec![Attribute(
            Id::Plain("label".to_string()),
            Id::Html(table_label(diagram_box)),
        )],
    }
}

fn table_label(diagram_box: &DiagramBox) -> String {
    let mut html = String::from("<<table border=\"0\" cellborder=\"1\" cellspacing=\"0\">");
    for row in diagram_box.rows() {
        html.push_str("<tr>");
        for cell in row.cells() {
            html.push_str(&cell_markup(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>>");
    html
}

fn cell_markup(cell: &Cell) -> String {
    let mut markup = String::from("<td");
    if !cell.port().is_empty() {
        markup.push_str(&format!(" port=\"{}\"", escape(cell.port())));
    }
    if cell.col_span() > 1 {
        markup.push_str(&format!(" colspan=\"{}\"", cell.col_span()));
    }
    if cell.row_span() > 1 {
        markup.push_str(&format!(" rowspan=\"{}\"", cell.row_span()));
    }
    if let Some(background) = cell.background() {
        markup.push_str(&format!(" bgcolor=\"{}\"", escape(background)));
    }
    markup.push('>');
    markup.push_str(&escape(cell.text()));
    markup.push_str("</td>");
    markup
}

fn dot_edge(edge: &Edge) -> DotEdge {
    let mut attributes = Vec::new();
    match edge.kind() {
        RelationKind::Refer => {}
        RelationKind::Call => attributes.push(plain_attr("arrowhead", "vee")),
        RelationKind::Implements => {
            attributes.push(plain_attr("style", "dashed"));
            attributes.push(plain_attr("arrowhead", "empty"));
        }
    }
    if edge.cardinality() == Cardinality::OneToMany {
        attributes.push(Attribute(
            Id::Plain("label".to_string()),
            quoted("1..n"),
        ));
    }

    DotEdge {
        ty: EdgeTy::Pair(vertex(edge.from()), vertex(edge.to())),
        attributes,
    }
}

fn vertex(endpoint: &Endpoint) -> Vertex {
    Vertex::N(NodeId(
        quoted(endpoint.box_name()),
        Some(Port(Some(Id::Plain(endpoint.port().to_string())), None)),
    ))
}

fn plain_attr(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), Id::Plain(value.to_string()))
}

fn quoted(text: &str) -> Id {
    Id::Escaped(format!("\"{}\"", text.replace('"', "\\\"")))
}

/// Minimal HTML escaping for table cell content.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
