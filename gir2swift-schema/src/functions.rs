//! Callable definitions.
//!
//! Functions, methods and signals share one shape: an ordered argument list
//! and a return value. They differ only by the [`EntityKind`](crate::EntityKind)
//! of the entity that wraps them.

use crate::types::EntityBase;

/// Argument (or return value) of a callable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argument {
    /// Common attributes. `base.c_type` is the native spelling.
    pub base: EntityBase,
    /// Target-language type spelling.
    pub type_name: String,
    /// Whether this argument is the implicit receiver.
    pub instance: bool,
}

impl Argument {
    /// Creates an ordinary argument.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        c_type: impl Into<String>,
    ) -> Self {
        Self {
            base: EntityBase::new(name).with_c_type(c_type),
            type_name: type_name.into(),
            instance: false,
        }
    }

    /// Creates the receiver argument of a method.
    #[must_use]
    pub fn instance(
        name: impl Into<String>,
        type_name: impl Into<String>,
        c_type: impl Into<String>,
    ) -> Self {
        Self {
            instance: true,
            ..Self::new(name, type_name, c_type)
        }
    }

    /// Creates a void return value.
    #[must_use]
    pub fn void() -> Self {
        Self::new("", "none", "void")
    }

    /// Returns the argument name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.base.name
    }

    /// Returns the native type spelling.
    #[must_use]
    pub fn ctype(&self) -> &str {
        &self.base.c_type
    }

    /// Returns true if this describes the absence of a value.
    #[must_use]
    pub fn is_void(&self) -> bool {
        let ctype = self.ctype().trim();
        if ctype.is_empty() {
            self.type_name.is_empty() || self.type_name == "none"
        } else {
            ctype == "void"
        }
    }
}

/// Function, method or signal definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Common attributes. `base.c_name` is the forwarded native symbol.
    pub base: EntityBase,
    /// Arguments in declaration order, including the receiver.
    pub args: Vec<Argument>,
    /// Return value.
    pub returns: Argument,
}

impl Function {
    /// Creates a function with no arguments returning void.
    #[must_use]
    pub fn new(base: EntityBase) -> Self {
        Self {
            base,
            args: Vec::new(),
            returns: Argument::void(),
        }
    }

    /// Adds an argument.
    pub fn add_arg(&mut self, arg: Argument) {
        self.args.push(arg);
    }

    /// Returns true if the function returns no value.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.returns.is_void()
    }

    /// Returns the receiver argument, if any.
    #[must_use]
    pub fn instance_arg(&self) -> Option<&Argument> {
        self.args.iter().find(|a| a.instance)
    }

    /// Iterates over the arguments that appear in a parameter list.
    pub fn parameters(&self) -> impl Iterator<Item = &Argument> {
        self.args.iter().filter(|a| !a.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_detection() {
        assert!(Argument::void().is_void());
        assert!(Argument::new("", "none", "").is_void());
        assert!(!Argument::new("", "gint", "gint").is_void());
        assert!(!Argument::new("", "utf8", "").is_void());
        assert!(!Argument::new("", "gpointer", "void*").is_void());
    }

    #[test]
    fn test_parameters_skip_instance() {
        let mut method = Function::new(EntityBase::new("set_x").with_c_name("point_set_x"));
        method.add_arg(Argument::instance("self", "Point", "Point*"));
        method.add_arg(Argument::new("x", "gint", "gint"));

        let params: Vec<_> = method.parameters().map(Argument::name).collect();
        assert_eq!(params, ["x"]);
        assert_eq!(method.instance_arg().map(Argument::name), Some("self"));
        assert!(method.is_void());
    }
}
