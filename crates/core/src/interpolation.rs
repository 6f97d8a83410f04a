use std::collections::HashMap;

use leon::Template;

use crate::error::Result;

/// Renders a command template such as `{kubectl} get pods -n {namespace}`.
///
/// Values are inserted verbatim; they are never parsed as templates
/// themselves, so a value may safely contain braces (jsonpath expressions).
///
/// # Errors
///
/// Returns an error if the template cannot be parsed or if a placeholder
/// has no value in `context`.
pub fn render_command<S: ::std::hash::BuildHasher>(
    template: &str,
    context: &HashMap<String, String, S>,
) -> Result<String> {
    let template = Template::parse(template)?;
    Ok(template.render(context)?)
}
