//! Metadata loader.
//!
//! Walks the element tree of one GIR metadata file, builds entities for the
//! elements it recognises and registers each top-level entity as soon as it
//! has been built. Unrecognised elements are skipped.

use crate::error::{ParseError, SchemaError};
use crate::functions::{Argument, Function};
use crate::registry::{Registration, TypeRegistry};
use crate::tree::{XmlNode, parse_document, parse_file};
use crate::types::{
    Alias, Constant, Entity, EntityBase, Enumeration, Member, Record, TypeRef,
};
use std::path::Path;
use std::sync::Arc;

/// Result of loading one metadata file.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Name of the namespace declared by the file, if any.
    pub namespace: Option<String>,
    /// Top-level entities in declaration order.
    pub entities: Vec<Arc<Entity>>,
    /// Number of names that were new to the registry.
    pub added: usize,
    /// Number of registrations that replaced an existing entity.
    pub replaced: usize,
    /// Number of entities dropped in favour of an existing one.
    pub kept: usize,
}

impl LoadReport {
    /// Module name for generated output: the namespace, or `fallback`.
    #[must_use]
    pub fn module_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.namespace.as_deref().unwrap_or(fallback)
    }
}

/// Loads metadata trees into a registry.
pub struct Loader<'r> {
    registry: &'r mut TypeRegistry,
}

impl<'r> Loader<'r> {
    /// Creates a loader writing into `registry`.
    pub fn new(registry: &'r mut TypeRegistry) -> Self {
        Self { registry }
    }

    /// Loads one parsed metadata file.
    ///
    /// Entities registered before an error stay registered.
    ///
    /// # Errors
    /// Returns `SchemaError` if a recognised element lacks a required
    /// attribute or the registry rejects a name.
    pub fn load(&mut self, root: &XmlNode) -> Result<LoadReport, SchemaError> {
        let mut report = LoadReport::default();
        self.walk(root, &mut report)?;
        tracing::debug!(
            "Loaded {} entities ({} new) from namespace {:?}",
            report.entities.len(),
            report.added,
            report.namespace
        );
        Ok(report)
    }

    fn walk(&mut self, node: &XmlNode, report: &mut LoadReport) -> Result<(), SchemaError> {
        match node.tag.as_str() {
            "repository" => {}
            "namespace" => {
                if report.namespace.is_none() {
                    report.namespace = node.attr("name").map(str::to_string);
                }
            }
            _ => {
                if let Some(entity) = parse_entity(node)? {
                    self.register(entity, report)?;
                } else {
                    tracing::trace!("Skipping unrecognised element '{}'", node.tag);
                }
                return Ok(());
            }
        }

        for child in &node.children {
            self.walk(child, report)?;
        }
        Ok(())
    }

    fn register(&mut self, entity: Entity, report: &mut LoadReport) -> Result<(), SchemaError> {
        let entity = Arc::new(entity);
        match self.registry.register(Arc::clone(&entity))? {
            Registration::Added => report.added += 1,
            Registration::Replaced => report.replaced += 1,
            Registration::Kept => report.kept += 1,
        }
        report.entities.push(entity);
        Ok(())
    }
}

/// Parses a metadata document and loads it into `registry`.
///
/// # Errors
/// Returns `SchemaError` if the XML is malformed or loading fails.
pub fn load_str(xml: &str, registry: &mut TypeRegistry) -> Result<LoadReport, SchemaError> {
    let root = parse_document(xml)?;
    Loader::new(registry).load(&root)
}

/// Reads a metadata file and loads it into `registry`.
///
/// # Errors
/// Returns `SchemaError` if the file cannot be read, parsed or loaded.
pub fn load_file(path: &Path, registry: &mut TypeRegistry) -> Result<LoadReport, SchemaError> {
    let root = parse_file(path)?;
    Loader::new(registry).load(&root)
}

/// Builds the entity for a recognised top-level element.
///
/// Returns `Ok(None)` for element kinds that are not modelled.
///
/// # Errors
/// Returns `ParseError::MissingAttribute` if a required attribute is absent.
pub fn parse_entity(node: &XmlNode) -> Result<Option<Entity>, ParseError> {
    let entity = match node.tag.as_str() {
        "alias" => Entity::Alias(parse_alias(node)?),
        "constant" => Entity::Constant(parse_constant(node)?),
        "enumeration" | "bitfield" => Entity::Enumeration(parse_enumeration(node)?),
        "record" => Entity::Record(parse_record(node)?),
        "union" => Entity::Union(parse_record(node)?),
        "class" => Entity::Class(parse_record(node)?),
        "function" => Entity::Function(parse_function(node)?),
        "method" => Entity::Method(parse_function(node)?),
        "signal" | "glib:signal" => Entity::Signal(parse_function(node)?),
        _ => return Ok(None),
    };
    Ok(Some(entity))
}

/// Reads the attributes shared by all entities.
fn parse_base(node: &XmlNode) -> Result<EntityBase, ParseError> {
    let name = node.required_attr("name")?;
    let c_type = node.first_attr(&["c:type", "glib:type-name"]).unwrap_or("");
    let c_name = node
        .first_attr(&["c:identifier", "c:type", "glib:type-name"])
        .unwrap_or(name);

    let mut base = EntityBase::new(name)
        .with_c_name(c_name)
        .with_c_type(c_type);

    if let Some(doc) = node.child("doc") {
        base.doc = doc.text.clone();
    }
    if let Some(notice) = node.child("doc-deprecated") {
        base.deprecated = Some(notice.text.clone());
    } else if node.attr("deprecated").is_some_and(is_true) {
        base.deprecated = Some(String::new());
    }

    Ok(base)
}

/// Reads the type referenced by a typed element.
///
/// The type comes from a nested `type` (or `array`) element, falling back to
/// `type` and `c:type` attributes on the element itself.
fn parse_type_ref(node: &XmlNode) -> TypeRef {
    if let Some(ty) = node.child("type") {
        return TypeRef::new(
            ty.attr("name").unwrap_or_default(),
            ty.attr("c:type").unwrap_or_default(),
        );
    }
    if let Some(array) = node.child("array") {
        let element = array
            .child("type")
            .and_then(|t| t.attr("name"))
            .unwrap_or_default();
        let name = array.attr("name").unwrap_or(element);
        return TypeRef::new(name, array.attr("c:type").unwrap_or_default());
    }
    if node.child("varargs").is_some() {
        return TypeRef::new("...", "");
    }
    TypeRef::new(
        node.attr("type").unwrap_or_default(),
        node.attr("c:type").unwrap_or_default(),
    )
}

fn parse_alias(node: &XmlNode) -> Result<Alias, ParseError> {
    let base = parse_base(node)?;
    let aliased_type = parse_type_ref(node);
    if aliased_type.is_empty() {
        return Err(ParseError::missing_attr(&node.tag, "type"));
    }
    Ok(Alias { base, aliased_type })
}

fn parse_constant(node: &XmlNode) -> Result<Constant, ParseError> {
    let base = parse_base(node)?;
    let value = node.required_attr("value")?.to_string();
    let type_ref = parse_type_ref(node);
    Ok(Constant {
        base,
        type_ref,
        value,
    })
}

fn parse_enumeration(node: &XmlNode) -> Result<Enumeration, ParseError> {
    let mut enumeration = Enumeration::new(parse_base(node)?);
    for child in node.children_named("member") {
        let base = parse_base(child)?;
        let value = child.required_attr("value")?;
        enumeration.add_member(Member::new(base, value));
    }
    Ok(enumeration)
}

fn parse_record(node: &XmlNode) -> Result<Record, ParseError> {
    let mut record = Record::new(parse_base(node)?);
    record.parent = node
        .attr("parent")
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    for child in &node.children {
        match child.tag.as_str() {
            "method" => record.add_method(parse_function(child)?),
            "signal" | "glib:signal" => record.add_signal(parse_function(child)?),
            _ => {}
        }
    }
    Ok(record)
}

fn parse_function(node: &XmlNode) -> Result<Function, ParseError> {
    let mut function = Function::new(parse_base(node)?);

    if let Some(params) = node.child("parameters") {
        for child in &params.children {
            match child.tag.as_str() {
                "instance-parameter" => function.add_arg(parse_argument(child, true)?),
                "parameter" => {
                    let instance = child.attr("instance").is_some_and(is_true);
                    function.add_arg(parse_argument(child, instance)?);
                }
                _ => {}
            }
        }
    }

    if let Some(ret) = node.child("return-value") {
        let ty = parse_type_ref(ret);
        let mut returns = Argument::new("", ty.name, ty.ctype);
        if let Some(doc) = ret.child("doc") {
            returns.base.doc = doc.text.clone();
        }
        function.returns = returns;
    }

    Ok(function)
}

fn parse_argument(node: &XmlNode, instance: bool) -> Result<Argument, ParseError> {
    let base = parse_base(node)?;
    let ty = parse_type_ref(node);
    let c_type = if ty.ctype.is_empty() {
        base.c_type.clone()
    } else {
        ty.ctype
    };
    Ok(Argument {
        base: EntityBase { c_type, ..base },
        type_name: ty.name,
        instance,
    })
}

fn is_true(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes")
}
