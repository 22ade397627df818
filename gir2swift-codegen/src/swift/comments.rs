//! Documentation and deprecation comments.

use crate::builder::{Code, CodeBuilder, IGNORED};
use gir2swift_schema::Documented;

/// Renders `text` as `///` comment lines at `indentation`.
fn comment_lines(text: &str, indentation: &str) -> String {
    Code::loop_over(text.split('\n'), |line| {
        if line.is_empty() {
            format!("{indentation}///")
        } else {
            format!("{indentation}/// {line}")
        }
    })
}

/// Renders the documentation and deprecation comment of `thing`.
///
/// Yields [`IGNORED`] when there is nothing to say.
#[must_use]
pub fn comment_code(thing: &impl Documented, indentation: &str) -> String {
    let base = thing.base();
    let deprecated = base.deprecated.as_deref().filter(|d| !d.is_empty());
    let has_doc = !base.doc.is_empty();

    if !has_doc && deprecated.is_none() {
        return IGNORED.to_string();
    }

    CodeBuilder::new()
        .append_if(has_doc, || comment_lines(&base.doc, indentation))
        .append_if(has_doc && deprecated.is_some(), || {
            format!("{indentation}///")
        })
        .append_optional(deprecated.map(|d| comment_lines(d, indentation)))
        .finish()
}

/// Places the comment of `thing` directly above `code`.
#[must_use]
pub fn documented(thing: &impl Documented, indentation: &str, code: impl Into<String>) -> String {
    Code::compose([comment_code(thing, indentation), code.into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use gir2swift_schema::EntityBase;

    fn strip(comment: &str, indentation: &str) -> String {
        comment
            .split('\n')
            .map(|line| {
                let line = line.strip_prefix(indentation).expect("indentation");
                let line = line.strip_prefix("///").expect("comment marker");
                line.strip_prefix(' ').unwrap_or(line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_doc_round_trip() {
        for doc in ["single", "first\nsecond", "para one\n\npara two", "  leading", "x\n"] {
            let base = EntityBase::new("Thing").with_doc(doc);
            let comment = comment_code(&base, "    ");
            assert_eq!(strip(&comment, "    "), doc);
        }
    }

    #[test]
    fn test_no_comment_when_empty() {
        let base = EntityBase::new("Thing");
        assert_eq!(comment_code(&base, ""), IGNORED);
        assert_eq!(documented(&base, "", "let x = 1"), "let x = 1");

        let blank = EntityBase::new("Thing").with_deprecated("");
        assert_eq!(documented(&blank, "", "let x = 1"), "let x = 1");
    }

    #[test]
    fn test_deprecation_paragraph() {
        let base = EntityBase::new("Thing")
            .with_doc("Does things.")
            .with_deprecated("Use other().");
        assert_eq!(
            comment_code(&base, "  "),
            "  /// Does things.\n  ///\n  /// Use other()."
        );
    }

    #[test]
    fn test_deprecation_only() {
        let base = EntityBase::new("Thing").with_deprecated("Gone.");
        assert_eq!(documented(&base, "", "func f()"), "/// Gone.\nfunc f()");
    }
}
