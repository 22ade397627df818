//! Function, method and signal code generation.
//!
//! Every callable becomes a Swift function whose body forwards to the native
//! symbol. The receiver argument is dropped from the parameter list and
//! passed as `ptr` at the call site.

use crate::builder::{Code, CodeBuilder};
use crate::swift::comments::documented;
use crate::swift::types::{TypeResolver, swift_identifier};
use gir2swift_schema::{Argument, Function};

/// Call-site expression for the receiver.
pub const RECEIVER: &str = "ptr";

/// Generates a parameter declaration (`name: Type`).
#[must_use]
pub fn argument_code(arg: &Argument, resolver: &TypeResolver<'_>) -> String {
    format!(
        "{}: {}",
        swift_identifier(arg.name()),
        resolver.spelling(&arg.type_name, arg.ctype())
    )
}

/// Generates the call-site expression for an argument.
#[must_use]
pub fn call_argument(arg: &Argument) -> String {
    if arg.instance {
        RECEIVER.to_string()
    } else {
        swift_identifier(arg.name())
    }
}

/// Generates the comma-separated parameter list of `function`.
#[must_use]
pub fn parameter_list(function: &Function, resolver: &TypeResolver<'_>) -> String {
    Code::render(Code::line(Code::loop_enumerated(
        function.parameters(),
        |index, arg| {
            let separator = if index == 0 { "" } else { ", " };
            format!("{}{}", separator, argument_code(arg, resolver))
        },
    )))
}

/// Generates the comma-separated call arguments of `function`.
#[must_use]
pub fn call_arguments(function: &Function) -> String {
    Code::render(Code::line(Code::loop_enumerated(&function.args, |index, arg| {
        let separator = if index == 0 { "" } else { ", " };
        format!("{}{}", separator, call_argument(arg))
    })))
}

/// Generates a forwarding function at `indentation`.
///
/// `body_indentation` is added on top of `indentation` for the body.
#[must_use]
pub fn function_code(
    function: &Function,
    resolver: &TypeResolver<'_>,
    indentation: &str,
    body_indentation: &str,
) -> String {
    let returns = resolver.return_spelling(&function.returns.type_name, function.returns.ctype());
    let call = format!("{}({})", function.base.c_name, call_arguments(function));

    let code = CodeBuilder::new()
        .append(format!(
            "public func {}({}) -> {} {{",
            swift_identifier(&function.base.name),
            parameter_list(function, resolver),
            returns
        ))
        .append_if_else(
            function.is_void(),
            || Code::block(Some(body_indentation), call.clone()),
            || Code::block(Some(body_indentation), format!("return {call}")),
        )
        .append("}")
        .finish();

    documented(function, indentation, Code::block(Some(indentation), code))
}
