//! Coupling-based member sequencing.
//!
//! Orders a box's members so that tightly related members sit near each
//! other. The ordering is a greedy nearest-neighbour chain over pairwise
//! coupling scores, not a minimum-total-distance optimum: the first member
//! stays fixed, the rest are sorted by their coupling to it, and the
//! procedure recurses on the remainder with its new first element.

use log::trace;

use demesne_core::{identifier::Id, relation::Relation};

use super::member::Member;

/// Sequence `members` by coupling, using the relations internal to the box
/// rooted at `box_path`.
///
/// Returns a permutation of the input: zero members yield an empty result
/// (the caller skips emitting a box), one member is returned as-is. Ties in
/// the coupling score keep the original delivery order.
pub fn sequence(members: Vec<Member>, relations: &[Relation], box_path: Id) -> Vec<Member> {
    if members.len() <= 1 {
        return members;
    }

    let scores = coupling_scores(&members, relations, box_path);
    let order = chain((0..members.len()).collect(), &scores);
    trace!(box_path:% = box_path, order:? = order; "Sequenced members");

    let mut slots: Vec<Option<Member>> = members.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}

/// Pairwise coupling counts between members.
///
/// An internal edge is a relation whose endpoints both resolve to ports under
/// `box_path`. Each internal edge with one endpoint in member `i`'s port set
/// and the other in member `j`'s (`i != j`) counts once for the pair;
/// self-relations are excluded from scoring entirely.
fn coupling_scores(
    members: &[Member],
    relations: &[Relation],
    box_path: Id,
) -> Vec<Vec<usize>> {
    let mut scores = vec![vec![0usize; members.len()]; members.len()];

    for relation in relations {
        if relation.is_self_relation() {
            continue;
        }
        let (Some(from_port), Some(to_port)) = (
            relation.from().port_under(box_path),
            relation.to().port_under(box_path),
        ) else {
            continue;
        };

        let from_member = members.iter().position(|member| member.owns_port(&from_port));
        let to_member = members.iter().position(|member| member.owns_port(&to_port));

        if let (Some(i), Some(j)) = (from_member, to_member) {
            if i != j {
                scores[i][j] += 1;
                scores[j][i] += 1;
            }
        }
    }

    scores
}

/// Greedy chain ordering over member indices.
fn chain(mut remaining: Vec<usize>, scores: &[Vec<usize>]) -> Vec<usize> {
    if remaining.len() <= 1 {
        return remaining;
    }

    let head = remaining.remove(0);
    // Stable sort: equal scores keep their current (delivery) order.
    remaining.sort_by(|&a, &b| scores[head][b].cmp(&scores[head][a]));

    let mut ordered = vec![head];
    ordered.extend(chain(remaining, scores));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use demesne_core::{
        identifier::Ident,
        object::Kind,
        position::Position,
        relation::{Cardinality, RelationKind},
    };

    use crate::layout::member::Item;

    fn relation(from: (&str, &str), to: (&str, &str)) -> Relation {
        Relation::new(
            Ident::new(Id::new(from.0), Id::new(from.1)),
            Ident::new(Id::new(to.0), Id::new(to.1)),
            Position::default(),
            Cardinality::OneToOne,
            RelationKind::Refer,
        )
    }

    fn entity(name: &str) -> Member {
        Member::dual(
            name,
            format!("entity_{name}"),
            Kind::Entity,
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_empty_and_single() {
        let box_path = Id::new("app/billing");
        assert!(sequence(vec![], &[], box_path).is_empty());

        let single = sequence(vec![entity("A")], &[], box_path);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].title(), "A");
    }

    #[test]
    fn test_coupled_member_moves_next_to_head() {
        let box_path = Id::new("app/billing");
        let members = vec![entity("A"), entity("B"), entity("C")];
        // A is coupled to C, not to B.
        let relations = vec![relation(
            ("app/billing/entity", "A"),
            ("app/billing/entity", "C"),
        )];

        let ordered = sequence(members, &relations, box_path);
        let titles: Vec<&str> = ordered.iter().map(Member::title).collect();
        assert_eq!(titles, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_tie_break_keeps_delivery_order() {
        let box_path = Id::new("app/billing");
        let members = vec![entity("A"), entity("B"), entity("C"), entity("D")];

        let ordered = sequence(members, &[], box_path);
        let titles: Vec<&str> = ordered.iter().map(Member::title).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_self_relations_do_not_score() {
        let box_path = Id::new("app/billing");
        let members = vec![entity("A"), entity("B"), entity("C")];
        let relations = vec![
            relation(("app/billing/entity", "C"), ("app/billing/entity", "C")),
            relation(("app/billing/entity", "A"), ("app/billing/entity", "B")),
        ];

        let ordered = sequence(members, &relations, box_path);
        let titles: Vec<&str> = ordered.iter().map(Member::title).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_attribute_ports_count_toward_owner() {
        let box_path = Id::new("app/billing");
        let invoice = Member::dual(
            "Invoice",
            "entity_Invoice",
            Kind::Entity,
            vec![Item::new("Pay", "entity_Invoice_Pay")],
            vec![Item::new("Amount", "entity_Invoice_Amount")],
        );
        let members = vec![entity("A"), entity("B"), invoice];
        // A couples to Invoice through an attribute endpoint.
        let relations = vec![relation(
            ("app/billing/entity", "A"),
            ("app/billing/entity", "Invoice.Amount"),
        )];

        let ordered = sequence(members, &relations, box_path);
        let titles: Vec<&str> = ordered.iter().map(Member::title).collect();
        assert_eq!(titles, vec!["A", "Invoice", "B"]);
    }

    #[test]
    fn test_external_relations_are_ignored() {
        let box_path = Id::new("app/billing");
        let members = vec![entity("A"), entity("B"), entity("C")];
        // One endpoint lives outside the box.
        let relations = vec![relation(
            ("app/billing/entity", "A"),
            ("app/catalog/entity", "C"),
        )];

        let ordered = sequence(members, &relations, box_path);
        let titles: Vec<&str> = ordered.iter().map(Member::title).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sequence_is_a_permutation() {
        let box_path = Id::new("app/billing");
        let members: Vec<Member> = (0..8).map(|i| entity(&format!("M{i}"))).collect();
        let relations = vec![
            relation(("app/billing/entity", "M0"), ("app/billing/entity", "M5")),
            relation(("app/billing/entity", "M5"), ("app/billing/entity", "M2")),
            relation(("app/billing/entity", "M7"), ("app/billing/entity", "M0")),
        ];

        let ordered = sequence(members, &relations, box_path);
        let mut titles: Vec<String> =
            ordered.iter().map(|member| member.title().to_string()).collect();
        titles.sort();
        let expected: Vec<String> = (0..8).map(|i| format!("M{i}")).collect();
        assert_eq!(titles, expected);
    }
}
