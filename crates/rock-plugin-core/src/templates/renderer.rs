//! Template rendering: placeholder substitution and conditional blocks
//!
//! The scanner walks the template linearly, switching between literal text,
//! `{{ name }}` placeholders, and `{% if name == true %} ... {% endif %}`
//! blocks. Blocks do not nest; a nested `{% if %}` is rejected instead of
//! being mis-rendered. Rendering is pure: no I/O, byte-identical output for
//! identical inputs.

use std::collections::BTreeSet;
use std::path::MAIN_SEPARATOR;

use crate::config::{ConfigValue, ScaffoldConfig};
use crate::error::{ToolError, ToolResult};

const VAR_OPEN: &str = "{{";
const VAR_CLOSE: &str = "}}";
const TAG_OPEN: &str = "{%";
const TAG_CLOSE: &str = "%}";

/// A template body plus the author's rendering directives.
#[derive(Debug, Clone)]
pub struct Template {
    body: String,
    /// Variables whose values are filesystem paths; their separators are
    /// normalized to the target platform on substitution.
    path_vars: BTreeSet<String>,
}

impl Template {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            path_vars: BTreeSet::new(),
        }
    }

    pub fn with_path_vars<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.path_vars = vars.into_iter().collect();
        self
    }

    /// Produce the rendered file for this template and configuration.
    pub fn render(&self, config: &ScaffoldConfig) -> ToolResult<String> {
        render_str(&self.body, config, &self.path_vars)
    }
}

fn render_str(
    input: &str,
    config: &ScaffoldConfig,
    path_vars: &BTreeSet<String>,
) -> ToolResult<String> {
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        let Some(brace) = rest.find('{') else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..brace]);
        pos += brace;
        let rest = &input[pos..];

        if rest.starts_with(VAR_OPEN) {
            let (value, consumed) = resolve_placeholder(rest, config, path_vars)?;
            out.push_str(&value);
            pos += consumed;
        } else if rest.starts_with(TAG_OPEN) {
            let at_line_start = pos == 0 || input.as_bytes()[pos - 1] == b'\n';
            let (tag, tag_len) = read_tag(rest)?;

            if tag == "endif" {
                return Err(syntax("'{% endif %}' without a matching '{% if %}'"));
            }
            let Some(condition) = tag.strip_prefix("if ") else {
                return Err(syntax(format!("unknown template tag `{}`", tag)));
            };
            let key = parse_condition(condition)?;

            // A marker alone on its own line takes the line break with it,
            // so elided blocks leave no blank-line artifact.
            let mut body_start = pos + tag_len;
            body_start += line_break_len(input, body_start, at_line_start);

            let (inner, after_block) = find_block_end(input, body_start)?;
            if condition_holds(key, config)? {
                out.push_str(&render_str(inner, config, path_vars)?);
            }
            pos = after_block;
        } else {
            // A lone `{` is literal text
            out.push('{');
            pos += 1;
        }
    }

    Ok(out)
}

fn resolve_placeholder(
    rest: &str,
    config: &ScaffoldConfig,
    path_vars: &BTreeSet<String>,
) -> ToolResult<(String, usize)> {
    let close = rest
        .find(VAR_CLOSE)
        .ok_or_else(|| syntax("unterminated '{{' placeholder"))?;
    let name = rest[VAR_OPEN.len()..close].trim();
    if name.is_empty() {
        return Err(syntax("empty '{{ }}' placeholder"));
    }

    let value = config
        .get(name)
        .ok_or_else(|| ToolError::UnresolvedVariable {
            name: name.to_string(),
        })?;

    let mut text = value.to_string();
    if path_vars.contains(name) {
        text = normalize_separators(&text);
    }

    Ok((text, close + VAR_CLOSE.len()))
}

/// Read one `{% ... %}` tag; returns the trimmed tag text and its span.
fn read_tag(rest: &str) -> ToolResult<(String, usize)> {
    let close = rest
        .find(TAG_CLOSE)
        .ok_or_else(|| syntax("unterminated '{%' tag"))?;
    let tag = rest[TAG_OPEN.len()..close].trim().to_string();
    Ok((tag, close + TAG_CLOSE.len()))
}

/// The condition grammar is fixed: `<name> == true`.
fn parse_condition(condition: &str) -> ToolResult<&str> {
    let mut parts = condition.split_whitespace();
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(name), Some("=="), Some("true"), None) => Ok(name),
        _ => Err(syntax(format!("unsupported condition `{}`", condition))),
    }
}

fn condition_holds(key: &str, config: &ScaffoldConfig) -> ToolResult<bool> {
    match config.get(key) {
        Some(ConfigValue::Bool(value)) => Ok(*value),
        Some(_) => Err(syntax(format!(
            "conditional guard `{}` is not a boolean",
            key
        ))),
        None => Err(ToolError::UnresolvedVariable {
            name: key.to_string(),
        }),
    }
}

/// Scan forward from `body_start` for the closing `{% endif %}`.
///
/// Returns the block's inner text and the position just past the end marker
/// (including its trailing newline when the marker owns the whole line).
/// Another `{% if %}` before the end marker means nesting and is rejected.
fn find_block_end(input: &str, body_start: usize) -> ToolResult<(&str, usize)> {
    let rest = &input[body_start..];
    let Some(tag_at) = rest.find(TAG_OPEN) else {
        return Err(syntax("'{% if %}' without a matching '{% endif %}'"));
    };
    let tag_pos = body_start + tag_at;
    let (tag, tag_len) = read_tag(&input[tag_pos..])?;

    if tag == "if" || tag.starts_with("if ") {
        return Err(syntax("nested '{% if %}' blocks are not supported"));
    }
    if tag != "endif" {
        return Err(syntax(format!("unknown template tag `{}`", tag)));
    }

    let inner = &input[body_start..tag_pos];
    let at_line_start = tag_pos == 0 || input.as_bytes()[tag_pos - 1] == b'\n';
    let mut after = tag_pos + tag_len;
    after += line_break_len(input, after, at_line_start);

    Ok((inner, after))
}

/// Length of the line break directly after a marker that owns its line.
/// Handles both `\n` and `\r\n` endings.
fn line_break_len(input: &str, at: usize, at_line_start: bool) -> usize {
    if !at_line_start {
        return 0;
    }
    let rest = &input[at..];
    if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    }
}

/// Rewrite `/` and `\` to the separator of the platform the project is
/// generated on.
pub fn normalize_separators(path: &str) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

fn syntax(message: impl Into<String>) -> ToolError {
    ToolError::TemplateSyntax {
        message: message.into(),
    }
}
