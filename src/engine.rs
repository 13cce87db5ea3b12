use crate::error::RenderError;
use log::debug;
use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

/// Opens a variable marker, e.g. `{% name %}`.
pub const VARIABLE_START: &str = "{%";
/// Closes a variable marker.
pub const VARIABLE_END: &str = "%}";

const BLOCK_START: &str = "{%@";
const BLOCK_END: &str = "@%}";
const COMMENT_START: &str = "{%#";
const COMMENT_END: &str = "#%}";

/// Renders template file contents against a data context.
///
/// Markers use `{% expr %}` so that `{{ }}` and `${ }` in scaffolded sources
/// pass through untouched. Missing fields are errors, not empty strings.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_syntax(marker_syntax());
        // null descriptor fields render as nothing
        env.set_formatter(|out, state, value| {
            if value.is_none() {
                Ok(())
            } else {
                minijinja::escape_formatter(out, state, value)
            }
        });
        crate::filters::register(&mut env);
        Self { env }
    }

    /// Registers a value visible to every rendered file.
    pub fn add_global<T: Serialize>(&mut self, name: String, value: T) {
        self.env
            .add_global(name, minijinja::Value::from_serialize(&value));
    }

    /// Renders raw file contents.
    ///
    /// Bytes without an open marker, and bytes that are not UTF-8, are returned
    /// as they are.
    pub fn render<S: Serialize + ?Sized>(
        &self,
        content: &[u8],
        data: &S,
    ) -> Result<Vec<u8>, RenderError> {
        if !contains_marker(content) {
            return Ok(content.to_vec());
        }
        match std::str::from_utf8(content) {
            Ok(text) => self.render_string(text, data).map(String::into_bytes),
            Err(_) => {
                debug!("Copying non UTF-8 content verbatim");
                Ok(content.to_vec())
            }
        }
    }

    /// Renders a template string.
    pub fn render_string<S: Serialize + ?Sized>(
        &self,
        template_str: &str,
        data: &S,
    ) -> Result<String, RenderError> {
        self.env
            .render_str(template_str, data)
            .map_err(|e| RenderError {
                message: e.to_string(),
                line: e.line(),
                source_line: e
                    .line()
                    .and_then(|line| template_str.lines().nth(line.saturating_sub(1)))
                    .map(str::to_string),
            })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn marker_syntax() -> SyntaxConfig {
    SyntaxConfig::builder()
        .block_delimiters(BLOCK_START, BLOCK_END)
        .variable_delimiters(VARIABLE_START, VARIABLE_END)
        .comment_delimiters(COMMENT_START, COMMENT_END)
        .build()
        .expect("marker delimiters are static and distinct")
}

fn contains_marker(content: &[u8]) -> bool {
    content
        .windows(VARIABLE_START.len())
        .any(|w| w == VARIABLE_START.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_render_substitutes_marker() {
        let renderer = Renderer::new();
        let data = HashMap::from([("name", "foo")]);
        let rendered = renderer.render(b"# {% name %}\n\nHello.\n", &data).unwrap();
        assert_eq!(rendered, b"# foo\n\nHello.\n");
    }

    #[test]
    fn test_render_without_markers_is_verbatim() {
        let renderer = Renderer::new();
        let data = HashMap::from([("name", "foo")]);
        let source = b"module.exports = {};\r\n\r\n\n";
        assert_eq!(renderer.render(source, &data).unwrap(), source.to_vec());
    }

    #[test]
    fn test_double_braces_pass_through() {
        let renderer = Renderer::new();
        let data = HashMap::from([("name", "foo")]);
        let rendered = renderer
            .render_string("<p>{{ user }}</p> {% name %} ${x}", &data)
            .unwrap();
        assert_eq!(rendered, "<p>{{ user }}</p> foo ${x}");
    }

    #[test]
    fn test_keeps_trailing_newline() {
        let renderer = Renderer::new();
        let data = HashMap::from([("name", "foo")]);
        assert_eq!(renderer.render_string("{% name %}\n", &data).unwrap(), "foo\n");
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = Renderer::new();
        let data = HashMap::from([("author", "Tom & Jerry <tj@example.com>")]);
        assert_eq!(
            renderer.render_string("{% author %}", &data).unwrap(),
            "Tom & Jerry <tj@example.com>"
        );
    }

    #[test]
    fn test_nested_field_and_filter() {
        let renderer = Renderer::new();
        let data = serde_json::json!({ "name": "my-lib", "author": { "name": "Ada" } });
        let rendered = renderer
            .render_string("{% name | pascalcase %} by {% author.name %}", &data)
            .unwrap();
        assert_eq!(rendered, "MyLib by Ada");
    }

    #[test]
    fn test_undefined_field_fails() {
        let renderer = Renderer::new();
        let data = HashMap::from([("name", "foo")]);
        let err = renderer
            .render_string("line one\nversion: {% version %}\n", &data)
            .unwrap_err();
        assert_eq!(err.line, Some(2));
        assert_eq!(err.source_line.as_deref(), Some("version: {% version %}"));
    }

    #[test]
    fn test_null_field_renders_empty() {
        let renderer = Renderer::new();
        let data = serde_json::json!({ "name": "foo", "homepage": null });
        assert_eq!(
            renderer
                .render_string("\"homepage\": \"{% homepage %}\"", &data)
                .unwrap(),
            "\"homepage\": \"\""
        );
    }

    #[test]
    fn test_unterminated_marker_fails() {
        let renderer = Renderer::new();
        let data = HashMap::from([("name", "foo")]);
        assert!(renderer.render(b"Hello {% name", &data).is_err());
    }

    #[test]
    fn test_non_utf8_is_copied() {
        let renderer = Renderer::new();
        let data = HashMap::from([("name", "foo")]);
        let source = [0xff, b'{', b'%', b' ', 0xfe];
        assert_eq!(renderer.render(&source, &data).unwrap(), source.to_vec());
    }

    #[test]
    fn test_render_with_globals() {
        let mut renderer = Renderer::new();
        renderer.add_global("year".to_string(), 2026);
        let data = HashMap::from([("name", "foo")]);
        assert_eq!(
            renderer.render_string("(c) {% year %} {% name %}", &data).unwrap(),
            "(c) 2026 foo"
        );
    }
}
