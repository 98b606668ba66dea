//! Terminal rendering of API results
//!
//! Formats decoded response bodies as one aligned line per result - a
//! display name padded against a web link - with optional field sub-lines
//! and a result count footer. Rendering never aborts on a malformed item;
//! it warns and degrades to a raw dump or a placeholder link.

use std::convert::Infallible;
use std::io::{self, Write};
use std::str::FromStr;

use log::warn;
use serde_json::Value;

/// Shown when no link rule matches a result item
const LINK_PLACEHOLDER: &str = "NOT YET IMPLEMENTED";

/// Name fields probed on each result, first present wins
const NAME_FIELDS: [&str; 3] = ["name", "title", "content"];

/// Space reserved around the link column (brackets plus breathing room)
const LINK_PADDING: usize = 4;

/// Which fields of each result to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSpec {
    /// Render nothing at all
    Suppress,
    /// Print every field on each result
    All,
    /// Print the named fields on each result (may be empty)
    Fields(Vec<String>),
}

impl OutputSpec {
    /// Parses a spec from CLI text
    ///
    /// `"false"` suppresses output, a `*` anywhere selects every field, and
    /// anything else is a comma-separated field list with blanks dropped.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "false" {
            return Self::Suppress;
        }
        let fields: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        if fields.iter().any(|field| field == "*") {
            Self::All
        } else {
            Self::Fields(fields)
        }
    }
}

impl FromStr for OutputSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self::Fields(Vec::new())
    }
}

/// Renders result items as aligned terminal lines
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Base URL for constructed web links
    app_url: String,
    /// Terminal width the output is fitted to
    width: usize,
}

impl Renderer {
    pub fn new(app_url: impl Into<String>, width: usize) -> Self {
        Self {
            app_url: app_url.into(),
            width,
        }
    }

    /// Prints one line per result plus requested field sub-lines
    ///
    /// The body may be an array or a single object; a single object is
    /// rendered as a one-element list. A null or empty body prints a short
    /// notice instead of results.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        body: &Value,
        spec: &OutputSpec,
    ) -> io::Result<()> {
        if matches!(spec, OutputSpec::Suppress) {
            return Ok(());
        }

        let items: Vec<&Value> = match body {
            Value::Array(list) => list.iter().collect(),
            Value::Null => Vec::new(),
            single => vec![single],
        };
        if items.is_empty() {
            writeln!(out, "No results in response.")?;
            return Ok(());
        }

        for item in &items {
            self.render_item(out, item, spec)?;
        }

        writeln!(out, "{}", "-".repeat(self.width))?;
        writeln!(out, "Total Results: {}", items.len())
    }

    fn render_item<W: Write>(
        &self,
        out: &mut W,
        item: &Value,
        spec: &OutputSpec,
    ) -> io::Result<()> {
        let name = match display_name(item) {
            Some(name) => name,
            None => {
                warn!("unable to find a name field on this result");
                writeln!(out, "{item}")?;
                String::new()
            }
        };

        let link = self.result_link(item);
        let column = self.width.saturating_sub(link.len() + LINK_PADDING);
        let name = fit_to_column(strip_markup(&name).trim(), column);
        writeln!(out, "{name} [{link}]")?;

        match spec {
            OutputSpec::All => {
                if let Some(fields) = item.as_object() {
                    for (field, value) in fields {
                        writeln!(out, " -- {field}: {}", stringify(value))?;
                    }
                }
            }
            OutputSpec::Fields(fields) => {
                for field in fields {
                    let value = item.get(field).map(stringify).unwrap_or_default();
                    writeln!(out, " -- {field}: {value}")?;
                }
            }
            OutputSpec::Suppress => {}
        }
        Ok(())
    }

    /// Maps a result item to a canonical web link
    ///
    /// Items carrying their own `html_url` win; repository-shaped items
    /// (`full_name`) get a constructed link; anything else gets a visible
    /// placeholder.
    fn result_link(&self, item: &Value) -> String {
        if let Some(url) = item.get("html_url").and_then(Value::as_str) {
            return url.to_string();
        }
        if let Some(full_name) = item.get("full_name").and_then(Value::as_str) {
            return format!("{}/{}", self.app_url, full_name);
        }
        LINK_PLACEHOLDER.to_string()
    }
}

/// Probes the name fields in priority order, skipping null values
fn display_name(item: &Value) -> Option<String> {
    NAME_FIELDS
        .iter()
        .find_map(|field| item.get(field).filter(|value| !value.is_null()))
        .map(stringify)
}

/// Strips HTML tags and bold/italic markers down to plain terminal text
fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => out.push(c),
        }
    }
    out.replace("**", "").replace("__", "")
}

/// Truncates with an ellipsis or right-pads a name to exactly `column` chars
fn fit_to_column(name: &str, column: usize) -> String {
    let len = name.chars().count();
    if len > column {
        let mut cut: String = name.chars().take(column.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    } else {
        format!("{name:<column$}")
    }
}

/// Renders scalars directly and composite values as compact JSON
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WIDTH: usize = 80;

    fn render_to_string(body: &Value, spec: &OutputSpec) -> String {
        let renderer = Renderer::new("https://github.com", WIDTH);
        let mut out = Vec::new();
        renderer.render(&mut out, body, spec).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn test_output_spec_false_suppresses() {
        assert_eq!(OutputSpec::parse("false"), OutputSpec::Suppress);
        assert_eq!(OutputSpec::parse("  false  "), OutputSpec::Suppress);
    }

    #[test]
    fn test_output_spec_wildcard_selects_all() {
        assert_eq!(OutputSpec::parse("*"), OutputSpec::All);
        assert_eq!(OutputSpec::parse("state, *"), OutputSpec::All);
    }

    #[test]
    fn test_output_spec_field_list_is_trimmed() {
        assert_eq!(
            OutputSpec::parse(" state , number "),
            OutputSpec::Fields(vec!["state".to_string(), "number".to_string()])
        );
        assert_eq!(OutputSpec::parse(""), OutputSpec::Fields(Vec::new()));
    }

    #[test]
    fn test_suppressed_output_renders_nothing() {
        let body = json!([{"title": "Bug A", "html_url": "http://x/1"}]);
        let output = render_to_string(&body, &OutputSpec::Suppress);
        assert!(output.is_empty(), "Suppressed render should print no lines");
    }

    #[test]
    fn test_issue_line_with_absent_field_and_footer() {
        let body = json!([{"title": "Bug A", "html_url": "http://x/1"}]);
        let spec = OutputSpec::Fields(vec!["state".to_string()]);
        let output = render_to_string(&body, &spec);

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("Bug A"));
        assert!(lines[0].ends_with(" [http://x/1]"));
        assert_eq!(lines[1], " -- state: ");
        assert_eq!(lines[2], "-".repeat(WIDTH));
        assert_eq!(lines[3], "Total Results: 1");
    }

    #[test]
    fn test_name_column_is_padded_for_alignment() {
        let body = json!([{"title": "Bug A", "html_url": "http://x/1"}]);
        let output = render_to_string(&body, &OutputSpec::default());

        let line = output.lines().next().unwrap();
        let column = WIDTH - ("http://x/1".len() + LINK_PADDING);
        assert_eq!(line.len(), column + " [http://x/1]".len());
        assert!(line.len() <= WIDTH);
    }

    #[test]
    fn test_long_name_is_truncated_with_ellipsis_within_width() {
        let long_name = "x".repeat(200);
        let body = json!([{"name": long_name, "html_url": "http://x/1"}]);
        let output = render_to_string(&body, &OutputSpec::default());

        let line = output.lines().next().unwrap();
        assert!(line.contains("..."), "Truncated name should end with an ellipsis");
        assert!(line.len() <= WIDTH, "Line must fit the terminal width");
        let name_part = line.split(" [").next().unwrap();
        assert!(name_part.ends_with("..."));
    }

    #[test]
    fn test_wildcard_prints_one_sub_line_per_field() {
        let body = json!([{
            "name": "widget",
            "html_url": "http://x/1",
            "stargazers_count": 7,
            "private": false
        }]);
        let output = render_to_string(&body, &OutputSpec::All);

        let sub_lines: Vec<&str> = output.lines().filter(|l| l.starts_with(" -- ")).collect();
        assert_eq!(sub_lines.len(), 4, "One sub-line per field on the item");
        assert!(sub_lines.iter().any(|l| *l == " -- stargazers_count: 7"));
        assert!(sub_lines.iter().any(|l| *l == " -- private: false"));
    }

    #[test]
    fn test_composite_field_values_render_as_compact_json() {
        let body = json!([{
            "title": "Bug A",
            "html_url": "http://x/1",
            "labels": [{"name": "bug"}]
        }]);
        let spec = OutputSpec::Fields(vec!["labels".to_string()]);
        let output = render_to_string(&body, &spec);

        assert!(output.contains(" -- labels: [{\"name\":\"bug\"}]"));
    }

    #[test]
    fn test_single_object_body_is_wrapped_as_one_result() {
        let body = json!({"name": "octocat", "html_url": "http://x/u"});
        let output = render_to_string(&body, &OutputSpec::default());

        assert!(output.contains("octocat"));
        assert!(output.trim_end().ends_with("Total Results: 1"));
    }

    #[test]
    fn test_null_body_prints_notice() {
        let output = render_to_string(&Value::Null, &OutputSpec::default());
        assert_eq!(output, "No results in response.\n");
    }

    #[test]
    fn test_empty_array_prints_notice() {
        let output = render_to_string(&json!([]), &OutputSpec::default());
        assert_eq!(output, "No results in response.\n");
    }

    #[test]
    fn test_name_probing_priority_order() {
        assert_eq!(
            display_name(&json!({"title": "T", "name": "N"})),
            Some("N".to_string())
        );
        assert_eq!(
            display_name(&json!({"content": "C", "title": "T"})),
            Some("T".to_string())
        );
        assert_eq!(display_name(&json!({"content": "C"})), Some("C".to_string()));
        assert_eq!(display_name(&json!({"id": 1})), None);
        assert_eq!(display_name(&json!({"name": null, "title": "T"})), Some("T".to_string()));
    }

    #[test]
    fn test_nameless_item_is_dumped_raw_but_rendering_continues() {
        let body = json!([
            {"id": 42},
            {"title": "Bug B", "html_url": "http://x/2"}
        ]);
        let output = render_to_string(&body, &OutputSpec::default());

        assert!(output.contains("{\"id\":42}"), "Raw item dump expected");
        assert!(output.contains("Bug B"), "Later items still render");
        assert!(output.trim_end().ends_with("Total Results: 2"));
    }

    #[test]
    fn test_repository_link_is_built_from_full_name() {
        let body = json!([{"name": "widget", "full_name": "acme/widget"}]);
        let output = render_to_string(&body, &OutputSpec::default());
        assert!(output.contains("[https://github.com/acme/widget]"));
    }

    #[test]
    fn test_unknown_item_kind_gets_placeholder_link() {
        let body = json!([{"name": "mystery"}]);
        let output = render_to_string(&body, &OutputSpec::default());
        assert!(output.contains("[NOT YET IMPLEMENTED]"));
    }

    #[test]
    fn test_markup_is_stripped_from_names() {
        assert_eq!(strip_markup("**bold** and <em>italic</em>"), "bold and italic");
        assert_eq!(strip_markup("__under__<br/>"), "under");
        assert_eq!(strip_markup("plain_snake_case"), "plain_snake_case");
    }

    #[test]
    fn test_fit_to_column_exact_and_short() {
        assert_eq!(fit_to_column("abc", 5), "abc  ");
        assert_eq!(fit_to_column("abcde", 5), "abcde");
        assert_eq!(fit_to_column("abcdefgh", 5), "ab...");
    }
}
