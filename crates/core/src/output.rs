//! Light reformatting of client output before it is printed.

/// Width of the pod name column in the image listing.
pub const IMAGE_NAME_COLUMN_WIDTH: usize = 40;

/// Marker the client puts in the CURRENT column of the active context.
pub const ACTIVE_CONTEXT_MARKER: char = '*';

/// Prefix the client uses when a query or delete matched nothing.
pub const NO_RESOURCES_FOUND: &str = "No resources found";

/// One line of `config get-contexts` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextLine<'a> {
    pub text: &'a str,
    pub is_active: bool,
}

/// Marks the line(s) of a context table that describe the active context.
///
/// The marker sits in the CURRENT column, so only lines starting with it
/// count; a context *named* with an asterisk elsewhere does not.
#[must_use]
pub fn mark_active_context(output: &str) -> Vec<ContextLine<'_>> {
    output
        .lines()
        .map(|line| ContextLine {
            text: line,
            is_active: line.trim_start().starts_with(ACTIVE_CONTEXT_MARKER),
        })
        .collect()
}

/// Pads or truncates `name` to exactly `width` characters.
#[must_use]
pub fn fit_to_width(name: &str, width: usize) -> String {
    let length = name.chars().count();

    if length <= width {
        return format!("{name:<width$}");
    }

    if width == 0 {
        return String::new();
    }

    let mut truncated: String = name.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

/// Formats `name<TAB>image` lines into an aligned table with a header.
///
/// A line without a tab is a further container of the pod above it and is
/// shown with an empty name column.
#[must_use]
pub fn format_image_table(output: &str, width: usize) -> Vec<String> {
    let mut rows = vec![format!("{} Image", fit_to_width("Pod Name", width))];

    rows.extend(
        output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let (name, image) = line.split_once('\t').unwrap_or(("", line));
                format!("{} {}", fit_to_width(name, width), image.trim())
            }),
    );

    rows
}

/// Whether a delete left nothing to report.
///
/// The client prints "No resources found" (usually on stderr, so stdout is
/// empty) when the selector matched no pods.
#[must_use]
pub fn is_empty_result(output: &str) -> bool {
    let trimmed = output.trim();
    trimmed.is_empty() || trimmed.starts_with(NO_RESOURCES_FOUND)
}
