//! Swift code generation modules.

pub mod aliases;
pub mod comments;
pub mod enums;
pub mod functions;
pub mod records;
pub mod types;

pub use aliases::{alias_code, constant_code};
pub use comments::{comment_code, documented};
pub use enums::enumeration_code;
pub use functions::function_code;
pub use records::record_code;
pub use types::{TypeResolver, swift_identifier, swift_type};
