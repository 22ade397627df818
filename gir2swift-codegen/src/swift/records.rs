//! Record, union and class code generation.
//!
//! A record is wrapped by four declarations: a protocol requiring the
//! underlying pointer, a struct and a class conforming to it, and a protocol
//! extension forwarding each method to its native function.

use crate::builder::{Code, CodeBuilder};
use crate::swift::comments::documented;
use crate::swift::functions::function_code;
use crate::swift::types::TypeResolver;
use gir2swift_schema::Record;

fn pointer_type(record: &Record) -> String {
    format!("UnsafeMutablePointer<{}>", record.ctype)
}

/// Generates the protocol requiring the `ptr` accessor.
#[must_use]
pub fn record_protocol_code(record: &Record, indentation: &str) -> String {
    let code = CodeBuilder::new()
        .append(format!("public protocol {} {{", record.protocol_name()))
        .append(Code::block(
            Some(indentation),
            format!("var ptr: {} {{ get }}", pointer_type(record)),
        ))
        .append("}")
        .finish();
    documented(record, "", code)
}

/// Generates the two pointer-converting initialisers.
///
/// `assign` receives the converted pointer expression and yields the
/// initialiser body.
fn initialisers(
    record: &Record,
    modifiers: &str,
    indentation: &str,
    assign: impl Fn(String) -> String,
) -> String {
    let typed = CodeBuilder::new()
        .append(format!(
            "{modifiers}init<T>(cPointer: UnsafeMutablePointer<T>) {{"
        ))
        .append(Code::block(
            Some(indentation),
            assign(format!(
                "UnsafeMutableRawPointer(cPointer).assumingMemoryBound(to: {}.self)",
                record.ctype
            )),
        ))
        .append("}")
        .finish();

    let opaque = CodeBuilder::new()
        .append(format!("{modifiers}init(opaquePointer: OpaquePointer) {{"))
        .append(Code::block(
            Some(indentation),
            assign(format!("{}(opaquePointer)", pointer_type(record))),
        ))
        .append("}")
        .finish();

    CodeBuilder::new()
        .append(Code::block(Some(indentation), typed))
        .blank_line()
        .append(Code::block(Some(indentation), opaque))
        .finish()
}

/// Generates the value type wrapping the pointer.
#[must_use]
pub fn record_struct_code(record: &Record, indentation: &str) -> String {
    let name = record.struct_name();
    CodeBuilder::new()
        .append(format!(
            "public struct {}: {} {{",
            name,
            record.protocol_name()
        ))
        .append(Code::block(
            Some(indentation),
            format!("public let ptr: {}", pointer_type(record)),
        ))
        .append("}")
        .blank_line()
        .append(format!("public extension {} {{", name))
        .append(initialisers(record, "", indentation, |p| {
            format!("ptr = {p}")
        }))
        .append("}")
        .finish()
}

/// Generates the reference type wrapping the pointer.
///
/// `parent` names an additional protocol the class conforms to; `None`
/// renders no parent clause.
#[must_use]
pub fn record_class_code(record: &Record, parent: Option<&str>, indentation: &str) -> String {
    let parent_clause = parent
        .filter(|p| !p.is_empty())
        .map(|p| format!("{p}, "))
        .unwrap_or_default();
    let pointer = pointer_type(record);

    let designated = CodeBuilder::new()
        .append(format!("public init(ptr: {pointer}) {{"))
        .append(Code::block(Some(indentation), "self.ptr = ptr"))
        .append("}")
        .finish();

    let code = CodeBuilder::new()
        .append(format!(
            "public class {}: {}{} {{",
            record.base.name,
            parent_clause,
            record.protocol_name()
        ))
        .append(Code::block(
            Some(indentation),
            format!("public let ptr: {pointer}"),
        ))
        .blank_line()
        .append(Code::block(Some(indentation), designated))
        .append("}")
        .blank_line()
        .append(format!("public extension {} {{", record.base.name))
        .append(initialisers(record, "convenience ", indentation, |p| {
            format!("self.init(ptr: {p})")
        }))
        .append("}")
        .finish();
    documented(record, "", code)
}

/// Generates the protocol extension forwarding each method.
///
/// Signals have no native symbol to forward to and are not emitted.
#[must_use]
pub fn record_extension_code(
    record: &Record,
    resolver: &TypeResolver<'_>,
    indentation: &str,
) -> String {
    CodeBuilder::new()
        .append(format!("public extension {} {{", record.protocol_name()))
        .append(Code::loop_over(
            &record.methods,
            |method| function_code(method, resolver, indentation, indentation),
        ))
        .append("}")
        .finish()
}

/// Generates the complete four-part bundle for a record.
#[must_use]
pub fn record_code(
    record: &Record,
    parent: Option<&str>,
    resolver: &TypeResolver<'_>,
    indentation: &str,
) -> String {
    CodeBuilder::new()
        .append(record_protocol_code(record, indentation))
        .blank_line()
        .append(record_struct_code(record, indentation))
        .blank_line()
        .append(record_class_code(record, parent, indentation))
        .blank_line()
        .append(record_extension_code(record, resolver, indentation))
        .finish()
}
