//! Per-file Swift generation.

use crate::builder::{Code, DEFAULT_INDENTATION};
use crate::swift::{
    TypeResolver, alias_code, constant_code, enumeration_code, function_code, record_code,
};
use gir2swift_schema::{Entity, EntityKind, LoadReport, Record, TypeRegistry};

/// Settings shared by all emitters.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Indentation unit for nested declarations.
    pub indentation: String,
    /// Emit private entities (names starting with `_`) too.
    pub generate_all: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indentation: DEFAULT_INDENTATION.to_string(),
            generate_all: false,
        }
    }
}

/// Generated code for one top-level entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Declared name of the entity.
    pub name: String,
    /// Kind of the entity.
    pub kind: EntityKind,
    /// Swift source, without a trailing line break.
    pub code: String,
}

/// Swift generator over a populated registry.
pub struct Generator<'a> {
    registry: &'a TypeRegistry,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a generator with default options.
    #[must_use]
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self::with_options(registry, GeneratorOptions::default())
    }

    /// Creates a generator with the given options.
    #[must_use]
    pub fn with_options(registry: &'a TypeRegistry, options: GeneratorOptions) -> Self {
        Self { registry, options }
    }

    /// Returns the options in use.
    #[must_use]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Returns true if `entity` passes the visibility filter.
    #[must_use]
    pub fn should_emit(&self, entity: &Entity) -> bool {
        self.options.generate_all || !entity.is_private()
    }

    /// Generates the Swift code for one entity.
    #[must_use]
    pub fn emit(&self, entity: &Entity) -> String {
        let resolver = TypeResolver::new(self.registry);
        let indentation = self.options.indentation.as_str();

        let code = match entity {
            Entity::Alias(alias) => alias_code(alias, &resolver),
            Entity::Constant(constant) => constant_code(constant, &resolver),
            Entity::Enumeration(e) => enumeration_code(e, indentation),
            Entity::Record(record) | Entity::Union(record) | Entity::Class(record) => {
                let parent = self.parent_protocol(record);
                record_code(record, parent.as_deref(), &resolver, indentation)
            }
            Entity::Function(function) | Entity::Method(function) | Entity::Signal(function) => {
                function_code(function, &resolver, "", indentation)
            }
        };

        Code::render(code)
    }

    /// Protocol name for the parent of `record`, if it has one.
    ///
    /// Namespace-qualified parents (`GObject.Object`) are looked up both as
    /// written and by their local name. An unknown parent yields a protocol
    /// name derived from its local name.
    #[must_use]
    pub fn parent_protocol(&self, record: &Record) -> Option<String> {
        let parent = record.parent.as_deref()?;
        let local = parent.rsplit('.').next().unwrap_or(parent);

        Some(match self.registry.resolve_qualified(parent) {
            Ok(entity) => match entity.as_record() {
                Some(parent_record) => parent_record.protocol_name(),
                None => format!("{}Type", entity.name()),
            },
            Err(err) => {
                tracing::debug!("{} for parent of '{}'", err, record.base.name);
                format!("{local}Type")
            }
        })
    }

    /// Generates one unit per emitted entity of `report`, in declaration order.
    #[must_use]
    pub fn generate_units(&self, report: &LoadReport) -> Vec<GeneratedUnit> {
        report
            .entities
            .iter()
            .filter(|entity| {
                let keep = self.should_emit(entity);
                if !keep {
                    tracing::debug!("Skipping private {} '{}'", entity.kind(), entity.name());
                }
                keep
            })
            .map(|entity| GeneratedUnit {
                name: entity.name().to_string(),
                kind: entity.kind(),
                code: self.emit(entity),
            })
            .collect()
    }

    /// Generates the Swift code for all entities of `report`.
    #[must_use]
    pub fn generate(&self, report: &LoadReport) -> String {
        join_units(&self.generate_units(report))
    }
}

/// Joins generated units into one source text.
///
/// Units are separated by a blank line; non-empty output ends with a line
/// break.
#[must_use]
pub fn join_units(units: &[GeneratedUnit]) -> String {
    if units.is_empty() {
        return String::new();
    }
    let mut output = units
        .iter()
        .map(|unit| unit.code.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    output.push('\n');
    output
}
