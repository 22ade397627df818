//! Type alias and constant code generation.

use crate::swift::comments::documented;
use crate::swift::types::TypeResolver;
use gir2swift_schema::{Alias, Constant};

/// Generates the type alias for `alias`.
#[must_use]
pub fn alias_code(alias: &Alias, resolver: &TypeResolver<'_>) -> String {
    let target = resolver.spelling_of(&alias.aliased_type);
    documented(
        alias,
        "",
        format!("public typealias {} = {}", alias.base.name, target),
    )
}

/// Generates the value binding for `constant`.
///
/// The binding forwards to the native symbol and keeps the metadata literal
/// as a trailing comment.
#[must_use]
pub fn constant_code(constant: &Constant, resolver: &TypeResolver<'_>) -> String {
    let ty = resolver.spelling_of(&constant.type_ref);
    documented(
        constant,
        "",
        format!(
            "public let {}: {} = {} /* {} */",
            constant.base.name, ty, constant.base.c_name, constant.value
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gir2swift_schema::{EntityBase, TypeRef};

    #[test]
    fn test_alias_code() {
        let alias = Alias {
            base: EntityBase::new("Allocation")
                .with_c_type("GtkAllocation")
                .with_doc("A rectangle."),
            aliased_type: TypeRef::new("Gdk.Rectangle", "GdkRectangle"),
        };
        assert_eq!(
            alias_code(&alias, &TypeResolver::native()),
            "/// A rectangle.\npublic typealias Allocation = GdkRectangle"
        );
    }

    #[test]
    fn test_alias_without_native_spelling() {
        let alias = Alias {
            base: EntityBase::new("Handle"),
            aliased_type: TypeRef::new("Pointer", ""),
        };
        assert_eq!(
            alias_code(&alias, &TypeResolver::native()),
            "public typealias Handle = Pointer"
        );
    }

    #[test]
    fn test_constant_code() {
        let constant = Constant {
            base: EntityBase::new("MAJOR_VERSION").with_c_name("GTK_MAJOR_VERSION"),
            type_ref: TypeRef::new("gint", "gint"),
            value: "3".to_string(),
        };
        assert_eq!(
            constant_code(&constant, &TypeResolver::native()),
            "public let MAJOR_VERSION: CInt = GTK_MAJOR_VERSION /* 3 */"
        );
    }

    #[test]
    fn test_deprecated_constant() {
        let constant = Constant {
            base: EntityBase::new("OLD")
                .with_c_name("GTK_OLD")
                .with_deprecated("Do not use."),
            type_ref: TypeRef::new("utf8", "gchar*"),
            value: "old".to_string(),
        };
        let code = constant_code(&constant, &TypeResolver::native());
        assert_eq!(
            code,
            "/// Do not use.\npublic let OLD: UnsafeMutablePointer<CChar> = GTK_OLD /* old */"
        );
    }
}
