//! Target renderers.

pub mod rust;
pub mod swift;
pub mod typescript;

pub use rust::RustRenderer;
pub use swift::SwiftRenderer;
pub use typescript::TypeScriptRenderer;

/// Renders `header { ... }` with one member per indented line, or
/// `header {}` when there are no members.
pub(crate) fn block(header: &str, members: &[String], indent: &str) -> String {
    if members.is_empty() {
        return format!("{header} {{}}");
    }
    let mut output = String::new();
    output.push_str(&format!("{header} {{\n"));
    for member in members {
        output.push_str(&format!("{indent}{member}\n"));
    }
    output.push('}');
    output
}
