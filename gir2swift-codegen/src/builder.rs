//! Text composition DSL.
//!
//! Fragments are plain strings. Composition joins fragments with single line
//! breaks; the [`IGNORED`] marker stands for "contributes nothing" and is
//! filtered out before joining, so optional parts and empty loops never leave
//! blank lines behind. Every operation is a pure function of its inputs.

/// Marker for a fragment that contributes nothing to its composition.
pub const IGNORED: &str = "<%IGNORED%>";

/// Indentation used by [`Code::indent`].
pub const DEFAULT_INDENTATION: &str = "    ";

/// Namespace for fragment operations.
pub struct Code;

impl Code {
    /// Indents `body` by `indentation`.
    ///
    /// The first line and every line after an internal line break get the
    /// prefix. An empty line left behind by a trailing line break is not
    /// indented. `None` or an empty indentation returns `body` unmodified.
    #[must_use]
    pub fn block(indentation: Option<&str>, body: impl Into<String>) -> String {
        let body = body.into();
        let indentation = match indentation {
            Some(i) if !i.is_empty() => i,
            _ => return body,
        };
        if body.is_empty() || body == IGNORED {
            return body;
        }

        let mut out = String::with_capacity(body.len() + indentation.len() * 4);
        let mut lines = body.split('\n').peekable();
        while let Some(line) = lines.next() {
            let trailing = lines.peek().is_none();
            if !(trailing && line.is_empty()) {
                out.push_str(indentation);
            }
            out.push_str(line);
            if !trailing {
                out.push('\n');
            }
        }
        out
    }

    /// Indents `body` by [`DEFAULT_INDENTATION`].
    #[must_use]
    pub fn indent(body: impl Into<String>) -> String {
        Self::block(Some(DEFAULT_INDENTATION), body)
    }

    /// Removes every line break from `body`.
    #[must_use]
    pub fn line(body: impl Into<String>) -> String {
        let body = body.into();
        if body == IGNORED {
            return body;
        }
        body.split('\n').collect()
    }

    /// Evaluates `body` for each item and joins the non-empty results.
    ///
    /// Contributes nothing when there are no items.
    pub fn loop_over<T>(
        items: impl IntoIterator<Item = T>,
        body: impl FnMut(T) -> String,
    ) -> String {
        Self::join_present(items.into_iter().map(body))
    }

    /// Like [`Code::loop_over`], passing the zero-based position of each item.
    pub fn loop_enumerated<T>(
        items: impl IntoIterator<Item = T>,
        mut body: impl FnMut(usize, T) -> String,
    ) -> String {
        Self::join_present(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| body(index, item)),
        )
    }

    /// Joins fragments with line breaks, skipping ignored ones.
    ///
    /// Yields [`IGNORED`] when every fragment is ignored.
    pub fn compose<S: AsRef<str>>(parts: impl IntoIterator<Item = S>) -> String {
        let kept: Vec<S> = parts
            .into_iter()
            .filter(|p| p.as_ref() != IGNORED)
            .collect();
        if kept.is_empty() {
            return IGNORED.to_string();
        }
        let mut out = String::new();
        for (index, part) in kept.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(part.as_ref());
        }
        out
    }

    /// Chooses between two fragments.
    pub fn either(
        condition: bool,
        first: impl FnOnce() -> String,
        second: impl FnOnce() -> String,
    ) -> String {
        if condition { first() } else { second() }
    }

    /// Yields the fragment if present, otherwise [`IGNORED`].
    #[must_use]
    pub fn optional(fragment: Option<String>) -> String {
        fragment.unwrap_or_else(|| IGNORED.to_string())
    }

    /// Returns true if `fragment` contributes nothing.
    #[must_use]
    pub fn is_ignored(fragment: &str) -> bool {
        fragment == IGNORED
    }

    /// Converts a finished fragment into output text.
    #[must_use]
    pub fn render(fragment: String) -> String {
        if fragment == IGNORED {
            String::new()
        } else {
            fragment
        }
    }

    fn join_present(results: impl Iterator<Item = String>) -> String {
        Self::compose(results.filter(|r| !r.is_empty()))
    }
}

/// Staged builder over [`Code::compose`].
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    parts: Vec<String>,
}

impl CodeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment.
    #[must_use]
    pub fn append(mut self, fragment: impl Into<String>) -> Self {
        self.parts.push(fragment.into());
        self
    }

    /// Appends an empty line.
    #[must_use]
    pub fn blank_line(self) -> Self {
        self.append(String::new())
    }

    /// Appends the fragment only when `condition` holds.
    #[must_use]
    pub fn append_if(self, condition: bool, fragment: impl FnOnce() -> String) -> Self {
        if condition {
            self.append(fragment())
        } else {
            self
        }
    }

    /// Appends one of two fragments.
    #[must_use]
    pub fn append_if_else(
        self,
        condition: bool,
        first: impl FnOnce() -> String,
        second: impl FnOnce() -> String,
    ) -> Self {
        self.append(Code::either(condition, first, second))
    }

    /// Appends the fragment if present.
    #[must_use]
    pub fn append_optional(self, fragment: Option<String>) -> Self {
        self.append(Code::optional(fragment))
    }

    /// Appends the joined results of `body` over `items`.
    #[must_use]
    pub fn append_for_each<T>(
        self,
        items: impl IntoIterator<Item = T>,
        body: impl FnMut(T) -> String,
    ) -> Self {
        self.append(Code::loop_over(items, body))
    }

    /// Joins the collected fragments.
    #[must_use]
    pub fn finish(self) -> String {
        Code::compose(self.parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_indents_every_line() {
        assert_eq!(Code::block(Some("  "), "a\nb"), "  a\n  b");
        assert_eq!(Code::indent("a\n\nb"), "    a\n    \n    b");
    }

    #[test]
    fn test_block_skips_trailing_empty_line() {
        assert_eq!(Code::block(Some("  "), "a\nb\n"), "  a\n  b\n");
    }

    #[test]
    fn test_block_without_indentation() {
        assert_eq!(Code::block(None, "a\nb"), "a\nb");
        assert_eq!(Code::block(Some(""), "a\nb"), "a\nb");
    }

    #[test]
    fn test_block_is_referentially_transparent() {
        let first = Code::block(Some("\t"), "x\ny\n");
        let second = Code::block(Some("\t"), "x\ny\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_block_passes_ignored_through() {
        assert_eq!(Code::indent(IGNORED), IGNORED);
        assert_eq!(Code::line(IGNORED), IGNORED);
    }

    #[test]
    fn test_line_removes_breaks() {
        assert_eq!(Code::line("a\nb\nc"), "abc");
    }

    #[test]
    fn test_empty_loop_adds_no_blank_line() {
        let empty: Vec<&str> = Vec::new();
        let code = Code::compose([
            "before".to_string(),
            Code::loop_over(empty, |s| s.to_string()),
            "after".to_string(),
        ]);
        assert_eq!(code, "before\nafter");
    }

    #[test]
    fn test_loop_joins_results() {
        let code = Code::loop_over(["a", "b"], |s| format!("let {s}"));
        assert_eq!(code, "let a\nlet b");
    }

    #[test]
    fn test_loop_enumerated_passes_positions() {
        let code = Code::loop_enumerated(["x", "y"], |i, s| format!("{i}:{s}"));
        assert_eq!(code, "0:x\n1:y");
    }

    #[test]
    fn test_loop_skips_empty_results() {
        let code = Code::loop_over([1, 2, 3], |n| {
            if n == 2 { String::new() } else { n.to_string() }
        });
        assert_eq!(code, "1\n3");
    }

    #[test]
    fn test_compose_all_ignored() {
        assert_eq!(Code::compose([IGNORED, IGNORED]), IGNORED);
        assert_eq!(Code::render(Code::compose([IGNORED])), "");
    }

    #[test]
    fn test_either_and_optional() {
        assert_eq!(Code::either(true, || "a".into(), || "b".into()), "a");
        assert_eq!(Code::either(false, || "a".into(), || "b".into()), "b");
        assert!(Code::is_ignored(&Code::optional(None)));
        assert_eq!(Code::optional(Some("x".into())), "x");
    }

    #[test]
    fn test_builder_filters_ignored_parts() {
        let code = CodeBuilder::new()
            .append("struct S {")
            .append_if(false, || "never".to_string())
            .append_optional(None)
            .append_for_each(["a", "b"], |f| Code::indent(format!("let {f}: Int")))
            .append("}")
            .blank_line()
            .append_if_else(true, || "end".to_string(), || "other".to_string())
            .finish();
        assert_eq!(code, "struct S {\n    let a: Int\n    let b: Int\n}\n\nend");
    }

    #[test]
    fn test_empty_builder_is_ignored() {
        let inner = CodeBuilder::new().append_if(false, String::new).finish();
        let outer = CodeBuilder::new().append("a").append(inner).append("b").finish();
        assert_eq!(outer, "a\nb");
    }
}
