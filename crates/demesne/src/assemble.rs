//! The diagram assembler.
//!
//! Walks the populated domain tree depth-first and turns every non-empty
//! domain into one diagram box, then maps the buffered relations to edges
//! between computed port keys. Boxes own their grid rows; edges are emitted
//! one per relation with no deduplication.

use indexmap::IndexMap;
use log::{debug, warn};

use demesne_core::{
    identifier::{Id, Ident, PATH_SEPARATOR, PORT_SEPARATOR, SUB_SEPARATOR},
    object::{Kind, Object},
    relation::Relation,
};

use crate::{
    config::AppConfig,
    diagram::{Diagram, DiagramBox, Edge, Endpoint},
    domain::Domain,
    layout::{
        grid::Engine,
        member::{Item, Member},
        sequence,
    },
};

/// Build the finished diagram from an assembled domain tree and its buffered
/// relations.
///
/// Domains that end up with zero members after sequencing produce no box.
/// A box whose member shapes fail layout validation is skipped with a
/// warning; the rest of the diagram is unaffected.
pub fn assemble(root: &Domain, relations: &[Relation], config: &AppConfig) -> Diagram {
    let engine = Engine::new(config.layout(), config.style());

    let mut boxes = Vec::new();
    root.walk(&mut |domain| {
        let members = members_for(domain);
        if members.is_empty() {
            return;
        }
        let members = sequence::sequence(members, relations, domain.name());

        let name = domain.name().resolve();
        let anchor = box_anchor(domain.name());
        match engine.layout(&name, &anchor, &members) {
            Ok(rows) => boxes.push(DiagramBox::new(name, rows)),
            Err(err) => {
                warn!(box_name = name, err:% = err; "Skipping box with invalid elements");
            }
        }
    });

    let edges = edges_for(relations);
    debug!(boxes_len = boxes.len(), edges_len = edges.len(); "Diagram assembled");
    Diagram::new(boxes, edges)
}

/// The whole-box anchor port: the domain path with its separators normalized
/// to the port separator.
fn box_anchor(name: Id) -> String {
    name.resolve().replace(PATH_SEPARATOR, &PORT_SEPARATOR.to_string())
}

/// Build the default-ordered member list for one domain.
///
/// Key objects (classes, entities, value objects) each become an individual
/// dual-list member with commands on the left and attributes on the right.
/// Other components are clustered into one flat member per final path
/// segment, created at the position of the segment's first object. Standalone
/// interfaces follow as dual-list members carrying their methods on the left.
fn members_for(domain: &Domain) -> Vec<Member> {
    enum Slot {
        Key(Member),
        Cluster {
            segment: String,
            kind: Kind,
            items: Vec<Item>,
        },
    }

    let mut slots: Vec<Slot> = Vec::new();
    let mut cluster_index: IndexMap<String, usize> = IndexMap::new();

    for object in domain.components() {
        let Some(port) = object.ident().port_under(domain.name()) else {
            warn!(ident:% = object.ident(), domain:% = domain.name(); "Component outside its domain");
            continue;
        };

        if object.kind().is_key_object() {
            slots.push(Slot::Key(key_member(object, domain.name(), port)));
            continue;
        }

        let segment = object.ident().path().last_segment();
        let item = Item::new(object.ident().name().resolve(), port);
        match cluster_index.get(&segment) {
            Some(&index) => {
                if let Slot::Cluster { items, .. } = &mut slots[index] {
                    items.push(item);
                }
            }
            None => {
                cluster_index.insert(segment.clone(), slots.len());
                slots.push(Slot::Cluster {
                    segment,
                    kind: object.kind(),
                    items: vec![item],
                });
            }
        }
    }

    let mut members: Vec<Member> = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Key(member) => member,
            Slot::Cluster {
                segment,
                kind,
                items,
            } => Member::flat(segment.clone(), segment, kind, items),
        })
        .collect();

    for interface in domain.interfaces() {
        let Some(port) = interface.ident().port_under(domain.name()) else {
            warn!(ident:% = interface.ident(), domain:% = domain.name(); "Interface outside its domain");
            continue;
        };
        let methods = item_list(interface.methods(), domain.name());
        members.push(Member::dual(
            interface.ident().name().resolve(),
            port,
            Kind::Interface,
            methods,
            vec![],
        ));
    }

    members
}

/// A key object as a dual-list member: commands left, attributes right.
fn key_member(object: &Object, domain: Id, port: String) -> Member {
    Member::dual(
        object.ident().name().resolve(),
        port,
        object.kind(),
        item_list(object.commands(), domain),
        item_list(object.attributes(), domain),
    )
}

fn item_list(idents: &[Ident], domain: Id) -> Vec<Item> {
    idents
        .iter()
        .filter_map(|ident| {
            let port = ident.port_under(domain)?;
            Some(Item::new(sub_name(*ident), port))
        })
        .collect()
}

/// The display text of a sub-identifier: the part after the last
/// sub-identifier separator (`Invoice.Pay` renders as `Pay`).
fn sub_name(ident: Ident) -> String {
    let name = ident.name().resolve();
    match name.rfind(SUB_SEPARATOR) {
        Some(index) => name[index + 1..].to_string(),
        None => name,
    }
}

/// One edge per buffered relation.
///
/// An endpoint's owning box is the directory portion of its path; endpoints
/// without one are dropped with a warning. Repeated and self-referential
/// relations each keep their own edge.
fn edges_for(relations: &[Relation]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for relation in relations {
        let (Some(from), Some(to)) = (endpoint(relation.from()), endpoint(relation.to())) else {
            warn!(
                from:% = relation.from(),
                to:% = relation.to();
                "Dropping relation with an unresolvable endpoint"
            );
            continue;
        };
        edges.push(Edge::new(from, to, relation.kind(), relation.cardinality()));
    }
    edges
}

fn endpoint(ident: Ident) -> Option<Endpoint> {
    let owner = ident.path().parent()?;
    let port = ident.port_under(owner)?;
    Some(Endpoint::new(owner.resolve(), port))
}
