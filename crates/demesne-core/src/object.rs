//! Classified domain objects.
//!
//! A domain object is the result of classifying one declaration of the
//! analyzed system. The "is-a" relationships of the classification (an entity
//! is a class, a service is a function) are modeled as composition plus kind
//! discriminators rather than nested variants: [`Body`] carries the payload
//! shape, [`PlainKind`] and [`ClassKind`] refine it, and [`Kind`] is the flat
//! role tag exposed to grouping and styling.

use std::{fmt, str::FromStr};

use crate::{identifier::Ident, position::Position};

/// Role refinement for payload-free objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainKind {
    General,
    Function,
    Service,
    Factory,
}

/// Role refinement for class-shaped objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Entity,
    ValueObject,
}

/// The flat role tag of a classified object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    General,
    Function,
    Class,
    Entity,
    ValueObject,
    Service,
    Factory,
    Interface,
    InterfaceMethod,
}

impl Kind {
    /// Whether objects of this role are rendered as individual dual-list
    /// members (key objects) rather than clustered attributes.
    pub fn is_key_object(&self) -> bool {
        matches!(self, Kind::Class | Kind::Entity | Kind::ValueObject)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::General => "general",
            Kind::Function => "function",
            Kind::Class => "class",
            Kind::Entity => "entity",
            Kind::ValueObject => "value-object",
            Kind::Service => "service",
            Kind::Factory => "factory",
            Kind::Interface => "interface",
            Kind::InterfaceMethod => "interface-method",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Kind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Kind::General),
            "function" => Ok(Kind::Function),
            "class" => Ok(Kind::Class),
            "entity" => Ok(Kind::Entity),
            "value-object" => Ok(Kind::ValueObject),
            "service" => Ok(Kind::Service),
            "factory" => Ok(Kind::Factory),
            "interface" => Ok(Kind::Interface),
            "interface-method" => Ok(Kind::InterfaceMethod),
            _ => Err("Invalid object kind"),
        }
    }
}

/// Payload of a classified object.
///
/// Attribute, command, and method lists preserve insertion order and are
/// never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// A payload-free object: a bare type, function, service, or factory.
    Plain(PlainKind),

    /// A class-shaped object with ordered attributes and commands.
    Class {
        kind: ClassKind,
        attributes: Vec<Ident>,
        commands: Vec<Ident>,
    },

    /// An interface with an ordered list of method identifiers.
    Interface { methods: Vec<Ident> },

    /// A single interface method.
    InterfaceMethod,
}

/// One classified declaration of the analyzed system.
///
/// Objects are created once by the upstream analysis collaborator and are
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    ident: Ident,
    position: Position,
    body: Body,
}

impl Object {
    /// Create a new object from its identity, position, and payload.
    pub fn new(ident: Ident, position: Position, body: Body) -> Self {
        Self {
            ident,
            position,
            body,
        }
    }

    /// Get the object's identifier.
    pub fn ident(&self) -> Ident {
        self.ident
    }

    /// Get the object's source position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Borrow the object's payload.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The flat role tag of this object.
    pub fn kind(&self) -> Kind {
        match &self.body {
            Body::Plain(PlainKind::General) => Kind::General,
            Body::Plain(PlainKind::Function) => Kind::Function,
            Body::Plain(PlainKind::Service) => Kind::Service,
            Body::Plain(PlainKind::Factory) => Kind::Factory,
            Body::Class {
                kind: ClassKind::Class,
                ..
            } => Kind::Class,
            Body::Class {
                kind: ClassKind::Entity,
                ..
            } => Kind::Entity,
            Body::Class {
                kind: ClassKind::ValueObject,
                ..
            } => Kind::ValueObject,
            Body::Interface { .. } => Kind::Interface,
            Body::InterfaceMethod => Kind::InterfaceMethod,
        }
    }

    /// Ordered attribute identifiers, empty for non-class objects.
    pub fn attributes(&self) -> &[Ident] {
        match &self.body {
            Body::Class { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Ordered command identifiers, empty for non-class objects.
    pub fn commands(&self) -> &[Ident] {
        match &self.body {
            Body::Class { commands, .. } => commands,
            _ => &[],
        }
    }

    /// Ordered method identifiers, empty for non-interface objects.
    pub fn methods(&self) -> &[Ident] {
        match &self.body {
            Body::Interface { methods } => methods,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Id;

    fn ident(path: &str, name: &str) -> Ident {
        Ident::new(Id::new(path), Id::new(name))
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(Kind::from_str("entity"), Ok(Kind::Entity));
        assert_eq!(Kind::from_str("value-object"), Ok(Kind::ValueObject));
        assert_eq!(Kind::from_str("service"), Ok(Kind::Service));
        assert!(Kind::from_str("widget").is_err());
    }

    #[test]
    fn test_kind_display_round_trip() {
        for kind in [
            Kind::General,
            Kind::Function,
            Kind::Class,
            Kind::Entity,
            Kind::ValueObject,
            Kind::Service,
            Kind::Factory,
            Kind::Interface,
            Kind::InterfaceMethod,
        ] {
            assert_eq!(Kind::from_str(&kind.to_string()), Ok(kind));
        }
    }

    #[test]
    fn test_object_kind() {
        let entity = Object::new(
            ident("app/billing/entity", "Invoice"),
            Position::default(),
            Body::Class {
                kind: ClassKind::Entity,
                attributes: vec![ident("app/billing/entity", "Invoice.Amount")],
                commands: vec![ident("app/billing/entity", "Invoice.Pay")],
            },
        );
        assert_eq!(entity.kind(), Kind::Entity);
        assert!(entity.kind().is_key_object());
        assert_eq!(entity.attributes().len(), 1);
        assert_eq!(entity.commands().len(), 1);

        let service = Object::new(
            ident("app/billing/service", "Charge"),
            Position::default(),
            Body::Plain(PlainKind::Service),
        );
        assert_eq!(service.kind(), Kind::Service);
        assert!(!service.kind().is_key_object());
        assert!(service.attributes().is_empty());
    }

    #[test]
    fn test_attribute_order_preserved() {
        let attrs = vec![
            ident("app/e", "T.b"),
            ident("app/e", "T.a"),
            ident("app/e", "T.b"),
        ];
        let object = Object::new(
            ident("app/e", "T"),
            Position::default(),
            Body::Class {
                kind: ClassKind::Class,
                attributes: attrs.clone(),
                commands: vec![],
            },
        );
        // Insertion order kept, duplicates kept.
        assert_eq!(object.attributes(), attrs.as_slice());
    }
}
