//! TOML model manifests as a model source.
//!
//! A manifest is a hand-written stand-in for an analysis front end: it lists
//! classified objects and relations directly, and [`ManifestSource`] delivers
//! them through the push interface the pipeline consumes.
//!
//! ```toml
//! root = "app"
//!
//! [[objects]]
//! path = "app/billing/entity"
//! name = "Invoice"
//! kind = "entity"
//! commands = ["Pay"]
//! attributes = ["Amount"]
//!
//! [[relations]]
//! from = { path = "app/billing/service", name = "Charge" }
//! to = { path = "app/billing/entity", name = "Invoice" }
//! kind = "call"
//! ```

use std::{fs, path::Path, str::FromStr};

use log::debug;
use serde::Deserialize;

use demesne::{
    identifier::{Id, Ident},
    object::{Body, ClassKind, Kind, Object, PlainKind},
    position::Position,
    relation::{Cardinality, Relation, RelationKind},
    source::{ModelSink, ModelSource, SourceError},
};

#[derive(Debug, Deserialize)]
struct Manifest {
    root: String,

    #[serde(default)]
    objects: Vec<ObjectSpec>,

    #[serde(default)]
    relations: Vec<RelationSpec>,
}

#[derive(Debug, Deserialize)]
struct ObjectSpec {
    path: String,
    name: String,
    kind: String,

    #[serde(default)]
    attributes: Vec<String>,

    #[serde(default)]
    commands: Vec<String>,

    #[serde(default)]
    methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EndpointSpec {
    path: String,
    name: String,
}

fn default_relation_kind() -> String {
    "refer".to_string()
}

fn default_cardinality() -> String {
    "one-to-one".to_string()
}

#[derive(Debug, Deserialize)]
struct RelationSpec {
    from: EndpointSpec,
    to: EndpointSpec,

    #[serde(default = "default_relation_kind")]
    kind: String,

    #[serde(default = "default_cardinality")]
    cardinality: String,
}

/// A loaded manifest, ready to deliver its model.
pub struct ManifestSource {
    origin: String,
    manifest: Manifest,
}

/// Read and parse a manifest file.
///
/// # Errors
///
/// Returns [`SourceError::Io`] when the file cannot be read and
/// [`SourceError::Malformed`] when it is not valid manifest TOML.
pub fn load(path: impl AsRef<Path>) -> Result<ManifestSource, SourceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let manifest: Manifest =
        toml::from_str(&content).map_err(|err| SourceError::Malformed(err.to_string()))?;

    debug!(
        path = path.display().to_string(),
        objects_len = manifest.objects.len(),
        relations_len = manifest.relations.len();
        "Manifest loaded"
    );
    Ok(ManifestSource {
        origin: path.display().to_string(),
        manifest,
    })
}

impl ManifestSource {
    /// The root domain path declared by the manifest.
    pub fn root(&self) -> &str {
        &self.manifest.root
    }

    fn deliver_object(&self, spec: &ObjectSpec, sink: &mut dyn ModelSink) -> Result<(), SourceError> {
        let path = Id::new(&spec.path);
        let ident = Ident::new(path, Id::new(&spec.name));
        let position = Position::in_file(&self.origin);

        let kind = Kind::from_str(&spec.kind)
            .map_err(|_| SourceError::UnknownKind(spec.kind.clone()))?;

        let body = match kind {
            Kind::General => Body::Plain(PlainKind::General),
            Kind::Function => Body::Plain(PlainKind::Function),
            Kind::Service => Body::Plain(PlainKind::Service),
            Kind::Factory => Body::Plain(PlainKind::Factory),
            Kind::Class => class_body(ClassKind::Class, path, spec),
            Kind::Entity => class_body(ClassKind::Entity, path, spec),
            Kind::ValueObject => class_body(ClassKind::ValueObject, path, spec),
            Kind::Interface => Body::Interface {
                methods: sub_idents(path, &spec.name, &spec.methods),
            },
            Kind::InterfaceMethod => Body::InterfaceMethod,
        };

        // Interface methods are also delivered as standalone objects, the
        // way an analysis front end reports each declaration it sees.
        if let Body::Interface { methods } = &body {
            for method in methods {
                sink.object(Object::new(*method, position.clone(), Body::InterfaceMethod));
            }
        }

        sink.object(Object::new(ident, position, body));
        Ok(())
    }

    fn deliver_relation(
        &self,
        spec: &RelationSpec,
        sink: &mut dyn ModelSink,
    ) -> Result<(), SourceError> {
        let kind = RelationKind::from_str(&spec.kind).map_err(|_| {
            SourceError::UnsupportedRelation(format!("unknown relation kind: {}", spec.kind))
        })?;
        let cardinality = Cardinality::from_str(&spec.cardinality).map_err(|_| {
            SourceError::UnsupportedRelation(format!("unknown cardinality: {}", spec.cardinality))
        })?;

        sink.relation(Relation::new(
            Ident::new(Id::new(&spec.from.path), Id::new(&spec.from.name)),
            Ident::new(Id::new(&spec.to.path), Id::new(&spec.to.name)),
            Position::in_file(&self.origin),
            cardinality,
            kind,
        ));
        Ok(())
    }
}

fn class_body(kind: ClassKind, path: Id, spec: &ObjectSpec) -> Body {
    Body::Class {
        kind,
        attributes: sub_idents(path, &spec.name, &spec.attributes),
        commands: sub_idents(path, &spec.name, &spec.commands),
    }
}

fn sub_idents(path: Id, owner: &str, names: &[String]) -> Vec<Ident> {
    names
        .iter()
        .map(|name| Ident::new(path, Id::new(&format!("{owner}.{name}"))))
        .collect()
}

impl ModelSource for ManifestSource {
    fn deliver(&mut self, sink: &mut dyn ModelSink) -> Result<(), SourceError> {
        for spec in &self.manifest.objects {
            self.deliver_object(spec, sink)?;
        }
        for spec in &self.manifest.relations {
            self.deliver_relation(spec, sink)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn source_from(text: &str) -> Result<ManifestSource, SourceError> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        load(file.path())
    }

    #[derive(Default)]
    struct Collector(Vec<Object>, Vec<Relation>);

    impl ModelSink for Collector {
        fn object(&mut self, object: Object) {
            self.0.push(object);
        }

        fn relation(&mut self, relation: Relation) {
            self.1.push(relation);
        }
    }

    #[test]
    fn test_delivers_objects_and_relations() {
        let mut source = source_from(
            r#"
            root = "app"

            [[objects]]
            path = "app/billing/entity"
            name = "Invoice"
            kind = "entity"
            commands = ["Pay"]
            attributes = ["Amount"]

            [[objects]]
            path = "app/billing/service"
            name = "Charge"
            kind = "service"

            [[relations]]
            from = { path = "app/billing/service", name = "Charge" }
            to = { path = "app/billing/entity", name = "Invoice" }
            kind = "call"
            "#,
        )
        .unwrap();
        assert_eq!(source.root(), "app");

        let mut sink = Collector::default();
        source.deliver(&mut sink).unwrap();

        assert_eq!(sink.0.len(), 2);
        assert_eq!(sink.1.len(), 1);

        let invoice = &sink.0[0];
        assert_eq!(invoice.kind(), Kind::Entity);
        assert_eq!(invoice.commands().len(), 1);
        assert_eq!(invoice.commands()[0].name(), "Invoice.Pay");
        assert_eq!(sink.1[0].kind(), RelationKind::Call);
    }

    #[test]
    fn test_interface_methods_are_delivered_individually() {
        let mut source = source_from(
            r#"
            root = "app"

            [[objects]]
            path = "app/billing/spec"
            name = "Payable"
            kind = "interface"
            methods = ["Pay", "Refund"]
            "#,
        )
        .unwrap();

        let mut sink = Collector::default();
        source.deliver(&mut sink).unwrap();

        // Two method objects, then the interface itself.
        assert_eq!(sink.0.len(), 3);
        assert_eq!(sink.0[0].kind(), Kind::InterfaceMethod);
        assert_eq!(sink.0[2].kind(), Kind::Interface);
        assert_eq!(sink.0[2].methods().len(), 2);
    }

    #[test]
    fn test_unknown_kind_fails_delivery() {
        let mut source = source_from(
            r#"
            root = "app"

            [[objects]]
            path = "app/x"
            name = "Widget"
            kind = "widget"
            "#,
        )
        .unwrap();

        let err = source.deliver(&mut Collector::default()).unwrap_err();
        assert!(matches!(err, SourceError::UnknownKind(kind) if kind == "widget"));
    }

    #[test]
    fn test_unsupported_relation_shape_fails_delivery() {
        let mut source = source_from(
            r#"
            root = "app"

            [[relations]]
            from = { path = "app/a", name = "X" }
            to = { path = "app/b", name = "Y" }
            cardinality = "many-to-many"
            "#,
        )
        .unwrap();

        let err = source.deliver(&mut Collector::default()).unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedRelation(_)));
    }

    #[test]
    fn test_malformed_manifest_is_rejected_at_load() {
        assert!(matches!(
            source_from("root = "),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn test_relation_defaults() {
        let mut source = source_from(
            r#"
            root = "app"

            [[relations]]
            from = { path = "app/a", name = "X" }
            to = { path = "app/b", name = "Y" }
            "#,
        )
        .unwrap();

        let mut sink = Collector::default();
        source.deliver(&mut sink).unwrap();
        assert_eq!(sink.1[0].kind(), RelationKind::Refer);
        assert_eq!(sink.1[0].cardinality(), Cardinality::OneToOne);
    }
}
