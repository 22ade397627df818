//! Native type translation and type name resolution.

use gir2swift_schema::{SchemaError, TypeRef, TypeRegistry};

/// Swift words that must be escaped with backticks when used as identifiers.
const RESERVED_WORDS: &[&str] = &[
    "as", "associatedtype", "break", "case", "catch", "class", "continue", "default", "defer",
    "deinit", "do", "else", "enum", "extension", "fallthrough", "false", "fileprivate", "for",
    "func", "guard", "if", "import", "in", "init", "inout", "internal", "is", "let", "nil",
    "operator", "private", "protocol", "public", "repeat", "rethrows", "return", "self", "Self",
    "static", "struct", "subscript", "super", "switch", "throw", "throws", "true", "try",
    "typealias", "var", "where", "while",
];

/// Translates a native (C) type spelling into its Swift spelling.
///
/// Pointers become `UnsafePointer`/`UnsafeMutablePointer` depending on
/// constness; unknown names pass through unchanged.
#[must_use]
pub fn swift_type(ctype: &str) -> String {
    let trimmed = ctype.trim();

    if let Some(pointee) = trimmed.strip_suffix('*') {
        let pointee = pointee.trim_end();
        let (is_const, inner) = match pointee.strip_prefix("const ") {
            Some(rest) => (true, rest.trim()),
            None => (false, pointee),
        };
        if inner == "void" {
            return if is_const {
                "UnsafeRawPointer"
            } else {
                "UnsafeMutableRawPointer"
            }
            .to_string();
        }
        let wrapper = if is_const {
            "UnsafePointer"
        } else {
            "UnsafeMutablePointer"
        };
        return format!("{}<{}>", wrapper, swift_type(inner));
    }

    let name = trimmed.strip_prefix("const ").unwrap_or(trimmed).trim();
    let swift = match name {
        "void" => "Void",
        "gpointer" => "UnsafeMutableRawPointer",
        "gconstpointer" => "UnsafeRawPointer",
        "gchar" | "char" => "CChar",
        "guchar" | "unsigned char" => "CUnsignedChar",
        "gshort" | "short" => "CShort",
        "gushort" | "unsigned short" => "CUnsignedShort",
        "gint" | "int" => "CInt",
        "guint" | "unsigned int" | "unsigned" => "CUnsignedInt",
        "glong" | "long" => "CLong",
        "gulong" | "unsigned long" => "CUnsignedLong",
        "gfloat" | "float" => "CFloat",
        "gdouble" | "double" => "CDouble",
        "gint8" | "int8_t" => "Int8",
        "guint8" | "uint8_t" => "UInt8",
        "gint16" | "int16_t" => "Int16",
        "guint16" | "uint16_t" => "UInt16",
        "gint32" | "int32_t" => "Int32",
        "guint32" | "uint32_t" => "UInt32",
        "gint64" | "int64_t" => "Int64",
        "guint64" | "uint64_t" => "UInt64",
        "gsize" | "size_t" => "Int",
        "gssize" | "ssize_t" => "Int",
        other => other,
    };
    swift.to_string()
}

/// Turns a metadata name into a valid Swift identifier.
///
/// Characters other than ASCII letters, digits and `_` become `_`, a leading
/// digit gets a `_` prefix, and reserved words are escaped with backticks.
#[must_use]
pub fn swift_identifier(name: &str) -> String {
    if RESERVED_WORDS.contains(&name) {
        return format!("`{}`", name);
    }

    let mut identifier: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if identifier.is_empty() || identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    identifier
}

/// Resolves type names to their Swift spelling.
///
/// Names registered in the registry keep their declared spelling. Anything
/// else falls back to the native spelling carried by the referencing entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeResolver<'a> {
    registry: Option<&'a TypeRegistry>,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver backed by `registry`.
    #[must_use]
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// Creates a resolver that always uses native spellings.
    #[must_use]
    pub fn native() -> Self {
        Self { registry: None }
    }

    /// Looks `name` up in the registry.
    ///
    /// Namespace-qualified names (`Gdk.Rectangle`) resolve to the entity
    /// registered under their local name.
    ///
    /// # Errors
    /// Returns `SchemaError::UnresolvedType` if the name is not registered or
    /// no registry is attached.
    pub fn resolve_name(&self, name: &str) -> Result<String, SchemaError> {
        self.registry
            .ok_or_else(|| SchemaError::unresolved(name))?
            .resolve_qualified(name)
            .map(|entity| entity.name().to_string())
    }

    /// Returns the Swift spelling of a type.
    #[must_use]
    pub fn spelling(&self, name: &str, ctype: &str) -> String {
        if !name.is_empty() {
            match self.resolve_name(name) {
                Ok(resolved) => return resolved,
                Err(err) => tracing::trace!("{}, using native spelling", err),
            }
        }
        native_spelling(name, ctype)
    }

    /// Returns the Swift spelling of a type reference.
    #[must_use]
    pub fn spelling_of(&self, ty: &TypeRef) -> String {
        self.spelling(&ty.name, &ty.ctype)
    }

    /// Returns the Swift spelling of a return type.
    ///
    /// The native spelling wins when present; otherwise the metadata name is
    /// resolved.
    #[must_use]
    pub fn return_spelling(&self, name: &str, ctype: &str) -> String {
        if ctype.trim().is_empty() {
            self.spelling(name, ctype)
        } else {
            swift_type(ctype)
        }
    }
}

/// Spelling used when a name cannot be resolved.
fn native_spelling(name: &str, ctype: &str) -> String {
    if !ctype.trim().is_empty() {
        swift_type(ctype)
    } else if name.is_empty() || name == "none" {
        "Void".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gir2swift_schema::{Entity, EntityBase, Record};
    use std::sync::Arc;

    #[test]
    fn test_swift_type_scalars() {
        assert_eq!(swift_type("void"), "Void");
        assert_eq!(swift_type("gint"), "CInt");
        assert_eq!(swift_type("double"), "CDouble");
        assert_eq!(swift_type("guint64"), "UInt64");
        assert_eq!(swift_type("gboolean"), "gboolean");
        assert_eq!(swift_type("GtkAlign"), "GtkAlign");
    }

    #[test]
    fn test_swift_type_pointers() {
        assert_eq!(swift_type("GtkWidget*"), "UnsafeMutablePointer<GtkWidget>");
        assert_eq!(swift_type("const gchar*"), "UnsafePointer<CChar>");
        assert_eq!(swift_type("gchar **"), "UnsafeMutablePointer<UnsafeMutablePointer<CChar>>");
        assert_eq!(swift_type("void*"), "UnsafeMutableRawPointer");
        assert_eq!(swift_type("const void*"), "UnsafeRawPointer");
    }

    #[test]
    fn test_swift_identifier_escapes_keywords() {
        assert_eq!(swift_identifier("default"), "`default`");
        assert_eq!(swift_identifier("in"), "`in`");
        assert_eq!(swift_identifier("opacity"), "opacity");
    }

    #[test]
    fn test_swift_identifier_sanitises_names() {
        assert_eq!(swift_identifier("2button_press"), "_2button_press");
        assert_eq!(swift_identifier("size-allocate"), "size_allocate");
        assert_eq!(swift_identifier("3d-mode"), "_3d_mode");
        assert_eq!(swift_identifier(""), "_");
    }

    #[test]
    fn test_resolver_prefers_registered_names() {
        let mut registry = TypeRegistry::new();
        registry
            .register(Arc::new(Entity::Record(Record::new(
                EntityBase::new("Widget").with_c_type("GtkWidget"),
            ))))
            .expect("register");

        let resolver = TypeResolver::new(&registry);
        assert_eq!(resolver.spelling("Widget", "GtkWidget*"), "Widget");
        assert_eq!(resolver.spelling("gdouble", "double"), "CDouble");
        assert_eq!(resolver.spelling("utf8", ""), "utf8");
        assert!(matches!(
            resolver.resolve_name("Label"),
            Err(SchemaError::UnresolvedType { .. })
        ));
    }

    #[test]
    fn test_resolver_strips_namespace_of_registered_names() {
        let mut registry = TypeRegistry::new();
        registry
            .register(Arc::new(Entity::Record(Record::new(
                EntityBase::new("Rectangle").with_c_type("GdkRectangle"),
            ))))
            .expect("register");

        let resolver = TypeResolver::new(&registry);
        assert_eq!(resolver.spelling("Gdk.Rectangle", "GdkRectangle*"), "Rectangle");
        assert_eq!(
            resolver.spelling("Gdk.Point", "GdkPoint*"),
            "UnsafeMutablePointer<GdkPoint>"
        );
    }

    #[test]
    fn test_native_resolver_falls_back() {
        let resolver = TypeResolver::native();
        assert_eq!(resolver.spelling("Widget", "GtkWidget*"), "UnsafeMutablePointer<GtkWidget>");
        assert_eq!(resolver.spelling("none", ""), "Void");
        assert_eq!(resolver.return_spelling("gboolean", "gboolean"), "gboolean");
        assert_eq!(resolver.return_spelling("Widget", ""), "Widget");
    }
}
