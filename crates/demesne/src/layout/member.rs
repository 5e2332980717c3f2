//! Box members as the layout stages see them.

use demesne_core::object::Kind;

/// One labelled, port-addressable entry inside a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    text: String,
    port: String,
}

impl Item {
    /// Create an item from its display text and port key.
    pub fn new(text: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            port: port.into(),
        }
    }

    /// The item's display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The item's port key.
    pub fn port(&self) -> &str {
        &self.port
    }
}

/// A member's payload shape.
///
/// The grid engine accepts exactly two shapes: a flat attribute list, or a
/// left/right list pair. The list-of-lists form is kept open here so the
/// engine's shape validation stays a real runtime check; anything other than
/// two lists invalidates the owning box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A flat ordered attribute list.
    Flat(Vec<Item>),

    /// Ordered item lists; must be exactly `[left, right]`.
    Lists(Vec<Vec<Item>>),
}

/// One sequenced member of a box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    title: String,
    port: String,
    kind: Kind,
    payload: Payload,
}

impl Member {
    /// Create a flat member.
    pub fn flat(
        title: impl Into<String>,
        port: impl Into<String>,
        kind: Kind,
        items: Vec<Item>,
    ) -> Self {
        Self {
            title: title.into(),
            port: port.into(),
            kind,
            payload: Payload::Flat(items),
        }
    }

    /// Create a dual-list member from a left and a right list.
    pub fn dual(
        title: impl Into<String>,
        port: impl Into<String>,
        kind: Kind,
        left: Vec<Item>,
        right: Vec<Item>,
    ) -> Self {
        Self {
            title: title.into(),
            port: port.into(),
            kind,
            payload: Payload::Lists(vec![left, right]),
        }
    }

    /// Create a member from an already-shaped payload.
    pub fn new(
        title: impl Into<String>,
        port: impl Into<String>,
        kind: Kind,
        payload: Payload,
    ) -> Self {
        Self {
            title: title.into(),
            port: port.into(),
            kind,
            payload,
        }
    }

    /// The member's title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The member's own port key.
    pub fn port(&self) -> &str {
        &self.port
    }

    /// The role tag used for styling.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Borrow the member's payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Every port the member owns: its own plus those of all its items,
    /// across both sub-lists for dual-list members.
    pub fn port_set(&self) -> impl Iterator<Item = &str> {
        let items: Vec<&str> = match &self.payload {
            Payload::Flat(items) => items.iter().map(Item::port).collect(),
            Payload::Lists(lists) => lists.iter().flatten().map(Item::port).collect(),
        };
        std::iter::once(self.port.as_str()).chain(items)
    }

    /// Whether the given port belongs to this member's port set.
    pub fn owns_port(&self, port: &str) -> bool {
        self.port_set().any(|candidate| candidate == port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_set_covers_both_lists() {
        let member = Member::dual(
            "Invoice",
            "entity_Invoice",
            Kind::Entity,
            vec![Item::new("Pay", "entity_Invoice_Pay")],
            vec![Item::new("Amount", "entity_Invoice_Amount")],
        );

        let ports: Vec<&str> = member.port_set().collect();
        assert_eq!(
            ports,
            vec!["entity_Invoice", "entity_Invoice_Pay", "entity_Invoice_Amount"]
        );
        assert!(member.owns_port("entity_Invoice_Amount"));
        assert!(!member.owns_port("entity_Other"));
    }

    #[test]
    fn test_flat_port_set() {
        let member = Member::flat(
            "service",
            "service",
            Kind::Service,
            vec![Item::new("Charge", "service_Charge")],
        );
        let ports: Vec<&str> = member.port_set().collect();
        assert_eq!(ports, vec!["service", "service_Charge"]);
    }
}
