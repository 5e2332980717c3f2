//! Identifier management using string interning for efficient storage and comparison.
//!
//! This module provides the [`Id`] type, an interned path-like string, and the
//! [`Ident`] value pair (hierarchical path + local name) that every classified
//! object and relation endpoint carries.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Separator between segments of a hierarchical path.
pub const PATH_SEPARATOR: char = '/';

/// Separator between an owner and a sub-identifier inside a local name
/// (for example `Invoice.Amount`).
pub const SUB_SEPARATOR: char = '.';

/// Separator used when a path is flattened into a diagram port key.
pub const PORT_SEPARATOR: char = '_';

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Efficient identifier type using string interning.
///
/// An `Id` names either a hierarchical path (`app/billing/entity`) or a local
/// name (`Invoice`, `Invoice.Pay`). Interning makes the type `Copy` and makes
/// equality and hashing cheap.
///
/// # Examples
///
/// ```
/// use demesne_core::identifier::Id;
///
/// let billing = Id::new("app/billing");
/// let entity = billing.join("entity");
/// assert_eq!(entity, "app/billing/entity");
/// assert_eq!(entity.parent(), Some(billing));
/// assert!(entity.is_nested_under(Id::new("app")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Returns the interned string as an owned `String`.
    pub fn resolve(&self) -> String {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        interner
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_string()
    }

    /// Appends a path segment, producing a new `Id`.
    pub fn join(&self, segment: &str) -> Self {
        let joined = format!("{}{}{}", self.resolve(), PATH_SEPARATOR, segment);
        Self::new(&joined)
    }

    /// Returns the directory portion of the path, or `None` for a
    /// single-segment path.
    pub fn parent(&self) -> Option<Self> {
        let full = self.resolve();
        full.rfind(PATH_SEPARATOR)
            .map(|idx| Self::new(&full[..idx]))
    }

    /// Returns the last segment of the path.
    pub fn last_segment(&self) -> String {
        let full = self.resolve();
        match full.rfind(PATH_SEPARATOR) {
            Some(idx) => full[idx + 1..].to_string(),
            None => full,
        }
    }

    /// Whether this path is strictly nested under `ancestor`.
    ///
    /// A path is not nested under itself.
    pub fn is_nested_under(&self, ancestor: Id) -> bool {
        if *self == ancestor {
            return false;
        }
        let full = self.resolve();
        let prefix = ancestor.resolve();
        full.len() > prefix.len() + 1
            && full.starts_with(&prefix)
            && full.as_bytes()[prefix.len()] == PATH_SEPARATOR as u8
    }

    /// Returns the path segments of this path relative to `ancestor`.
    ///
    /// Returns an empty list when the path equals `ancestor` and `None` when
    /// the path is not under `ancestor` at all.
    pub fn segments_under(&self, ancestor: Id) -> Option<Vec<String>> {
        if *self == ancestor {
            return Some(Vec::new());
        }
        if !self.is_nested_under(ancestor) {
            return None;
        }
        let full = self.resolve();
        let relative = &full[ancestor.resolve().len() + 1..];
        Some(
            relative
                .split(PATH_SEPARATOR)
                .map(str::to_string)
                .collect(),
        )
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        self.resolve() == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// A classified object's identity: hierarchical path plus local name.
///
/// Identifiers are value-equal by `(path, name)`.
///
/// # Examples
///
/// ```
/// use demesne_core::identifier::{Id, Ident};
///
/// let invoice = Ident::new(Id::new("app/billing/entity"), Id::new("Invoice"));
/// assert_eq!(invoice.base(), "entity.Invoice");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident {
    path: Id,
    name: Id,
}

impl Ident {
    /// Create a new identifier from a path and a local name.
    pub fn new(path: Id, name: Id) -> Self {
        Self { path, name }
    }

    /// Get the hierarchical path.
    pub fn path(&self) -> Id {
        self.path
    }

    /// Get the local name.
    pub fn name(&self) -> Id {
        self.name
    }

    /// The last path segment joined with the name using the sub-identifier
    /// separator.
    pub fn base(&self) -> String {
        format!(
            "{}{}{}",
            self.path.last_segment(),
            SUB_SEPARATOR,
            self.name
        )
    }

    /// Compute this identifier's port key relative to an owning domain path.
    ///
    /// The owning domain's prefix is stripped from the path and every
    /// remaining separator (path and sub-identifier alike) is normalized to
    /// the port separator. Returns `None` when the identifier is not under
    /// `domain`.
    pub fn port_under(&self, domain: Id) -> Option<String> {
        let segments = self.path.segments_under(domain)?;
        let mut parts = segments;
        parts.extend(self.name.resolve().split(SUB_SEPARATOR).map(str::to_string));
        Some(parts.join(&PORT_SEPARATOR.to_string()))
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.path, PATH_SEPARATOR, self.name)
    }
}
