//! Instruction templates
//!
//! Templates are compiled in from `prompts/` and filled in a single pass, so a
//! placeholder that appears inside substituted text is left alone.

pub(crate) const STRUCTURE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/structure.md"
));
pub(crate) const CONTENT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/content.md"
));
pub(crate) const DESIGN: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/design.md"
));
pub(crate) const HTML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts/html.md"));
pub(crate) const DIRECT_SYSTEM: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/direct_system.md"
));
pub(crate) const DIRECT_USER: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/direct_user.md"
));

/// Replace `{name}` placeholders with their values
///
/// Unknown placeholders and stray braces are copied through unchanged.
pub(crate) fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let template = template.trim_end();
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out
}
