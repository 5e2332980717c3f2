//! Relations between classified objects.

use std::{fmt, str::FromStr};

use crate::{identifier::Ident, position::Position};

/// Multiplicity of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::OneToOne => write!(f, "one-to-one"),
            Cardinality::OneToMany => write!(f, "one-to-many"),
        }
    }
}

impl FromStr for Cardinality {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one-to-one" => Ok(Cardinality::OneToOne),
            "one-to-many" => Ok(Cardinality::OneToMany),
            _ => Err("Invalid cardinality"),
        }
    }
}

/// What a relation expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// A type or field reference.
    Refer,
    /// An interface implementation.
    Implements,
    /// A call.
    Call,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Refer => write!(f, "refer"),
            RelationKind::Implements => write!(f, "implements"),
            RelationKind::Call => write!(f, "call"),
        }
    }
}

impl FromStr for RelationKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "refer" => Ok(RelationKind::Refer),
            "implements" => Ok(RelationKind::Implements),
            "call" => Ok(RelationKind::Call),
            _ => Err("Invalid relation kind"),
        }
    }
}

/// A directed relation between two classified objects.
///
/// Self-relations (`from == to`) are legal; they are preserved for rendering
/// and only excluded from coupling scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    from: Ident,
    to: Ident,
    position: Position,
    cardinality: Cardinality,
    kind: RelationKind,
}

impl Relation {
    /// Create a new relation.
    pub fn new(
        from: Ident,
        to: Ident,
        position: Position,
        cardinality: Cardinality,
        kind: RelationKind,
    ) -> Self {
        Self {
            from,
            to,
            position,
            cardinality,
            kind,
        }
    }

    /// Get the source identifier.
    pub fn from(&self) -> Ident {
        self.from
    }

    /// Get the target identifier.
    pub fn to(&self) -> Ident {
        self.to
    }

    /// Get the source position the relation was extracted from.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Get the relation's cardinality.
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Get the relation's kind.
    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// Whether both endpoints are the same identifier.
    pub fn is_self_relation(&self) -> bool {
        self.from == self.to
    }
}
