//! Enumeration code generation.

use crate::builder::{Code, CodeBuilder};
use crate::swift::comments::documented;
use crate::swift::types::swift_identifier;
use gir2swift_schema::{Enumeration, Member};

/// Generates the type alias to the native backing type of `e`.
#[must_use]
pub fn type_alias_code(e: &Enumeration) -> String {
    documented(
        e,
        "",
        format!("public typealias {} = {}", e.base.name, e.backing_type()),
    )
}

/// Generates the binding for one member at `indentation`.
#[must_use]
pub fn value_code(member: &Member, indentation: &str) -> String {
    documented(
        member,
        indentation,
        format!(
            "{}public static let {} = {} /* {} */",
            indentation,
            swift_identifier(&member.base.name),
            member.base.c_name,
            member.value
        ),
    )
}

/// Generates the type alias and the extension declaring every member.
#[must_use]
pub fn enumeration_code(e: &Enumeration, indentation: &str) -> String {
    CodeBuilder::new()
        .append(type_alias_code(e))
        .blank_line()
        .append(format!("public extension {} {{", e.base.name))
        .append(Code::loop_over(&e.members, |m| value_code(m, indentation)))
        .append("}")
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gir2swift_schema::EntityBase;

    fn color() -> Enumeration {
        let mut e = Enumeration::new(EntityBase::new("Color").with_c_type("GtkColor"));
        e.add_member(Member::new(
            EntityBase::new("Red").with_c_name("GTK_COLOR_RED"),
            "0",
        ));
        e.add_member(Member::new(
            EntityBase::new("Green").with_c_name("GTK_COLOR_GREEN"),
            "1",
        ));
        e
    }

    #[test]
    fn test_enumeration_code() {
        let code = enumeration_code(&color(), "    ");
        assert_eq!(
            code,
            "public typealias Color = GtkColor\n\
             \n\
             public extension Color {\n    \
             public static let Red = GTK_COLOR_RED /* 0 */\n    \
             public static let Green = GTK_COLOR_GREEN /* 1 */\n\
             }"
        );
    }

    #[test]
    fn test_members_keep_declaration_order() {
        let code = enumeration_code(&color(), "    ");
        let red = code.find("Red").expect("Red");
        let green = code.find("Green").expect("Green");
        assert!(red < green);
    }

    #[test]
    fn test_digit_leading_member_name() {
        let member = Member::new(
            EntityBase::new("2button_press").with_c_name("GDK_2BUTTON_PRESS"),
            "5",
        );
        assert_eq!(
            value_code(&member, ""),
            "public static let _2button_press = GDK_2BUTTON_PRESS /* 5 */"
        );
    }

    #[test]
    fn test_empty_enumeration() {
        let e = Enumeration::new(EntityBase::new("Empty").with_c_type("GtkEmpty"));
        assert_eq!(
            enumeration_code(&e, "    "),
            "public typealias Empty = GtkEmpty\n\npublic extension Empty {\n}"
        );
    }

    #[test]
    fn test_member_documentation_is_indented() {
        let member = Member::new(
            EntityBase::new("default")
                .with_c_name("GTK_DEFAULT")
                .with_doc("The default."),
            "0",
        );
        assert_eq!(
            value_code(&member, "  "),
            "  /// The default.\n  public static let `default` = GTK_DEFAULT /* 0 */"
        );
    }
}
