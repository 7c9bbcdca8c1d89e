//! Generic value printer with pluggable serializers.
//!
//! The printer renders any `Value` into multi-line text. Before rendering a
//! value it asks each registered plugin, in registration order, whether it
//! claims the value; the first one that does renders it. Plugins receive the
//! printer back so nested values go through the same decision.
//!
//! Rendering rules for unclaimed values:
//! - scalars: `undefined`, `null`, `true`, `1`, `"text"`
//! - arrays: `Array [` ... `]`, one item per line, `Array []` when empty
//! - records: `Object {` (or `<Class> {`) with sorted, quoted keys

use crate::Result;
use crate::value::{Record, Value};

/// Printer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintConfig {
    /// One indentation unit.
    pub indent: String,
    /// Containers nested deeper than this render as `[Array]`/`[Object]`.
    pub max_depth: usize,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_owned(),
            max_depth: usize::MAX,
        }
    }
}

/// A serializer that takes over rendering for the values it recognizes.
pub trait Plugin: Send + Sync {
    /// Whether this plugin renders `value`.
    fn test(&self, value: &Value) -> bool;

    /// Render `value`. The first line is not indented (the caller has
    /// already positioned it); following lines are indented relative to
    /// `indentation`.
    fn serialize(
        &self,
        value: &Value,
        printer: &Printer,
        indentation: &str,
        depth: usize,
    ) -> Result<String>;
}

/// Renders values, delegating to plugins where they apply.
#[derive(Default)]
pub struct Printer {
    config: PrintConfig,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PrintConfig) -> Self {
        Self {
            config,
            plugins: Vec::new(),
        }
    }

    /// Register a plugin. Earlier plugins win.
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// Render a top-level value.
    pub fn render(&self, value: &Value) -> Result<String> {
        self.print(value, "", 0)
    }

    /// Render a value positioned at `indentation`, `depth` containers deep.
    pub fn print(&self, value: &Value, indentation: &str, depth: usize) -> Result<String> {
        if let Some(plugin) = self.plugins.iter().find(|p| p.test(value)) {
            return plugin.serialize(value, self, indentation, depth);
        }

        match value {
            Value::Undefined => Ok("undefined".to_owned()),
            Value::Null => Ok("null".to_owned()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(format_number(*n)),
            Value::String(s) => Ok(quote(s)),
            Value::Array(items) => self.print_array(items, indentation, depth + 1),
            Value::Object(record) => self.print_record(record, indentation, depth + 1),
        }
    }

    fn print_array(&self, items: &[Value], indentation: &str, depth: usize) -> Result<String> {
        if depth > self.config.max_depth {
            return Ok("[Array]".to_owned());
        }
        if items.is_empty() {
            return Ok("Array []".to_owned());
        }

        let inner = format!("{indentation}{}", self.config.indent);
        let mut out = String::from("Array [\n");
        for item in items {
            out.push_str(&inner);
            out.push_str(&self.print(item, &inner, depth)?);
            out.push_str(",\n");
        }
        out.push_str(indentation);
        out.push(']');
        Ok(out)
    }

    fn print_record(&self, record: &Record, indentation: &str, depth: usize) -> Result<String> {
        let name = record.class().unwrap_or("Object");
        if depth > self.config.max_depth {
            return Ok(format!("[{name}]"));
        }
        if record.is_empty() {
            return Ok(format!("{name} {{}}"));
        }

        let mut keys: Vec<&str> = record.keys().collect();
        keys.sort_unstable();

        let inner = format!("{indentation}{}", self.config.indent);
        let mut out = format!("{name} {{\n");
        for key in keys {
            let Some(value) = record.get(key) else {
                continue;
            };
            out.push_str(&inner);
            out.push_str(&quote(key));
            out.push_str(": ");
            out.push_str(&self.print(value, &inner, depth)?);
            out.push_str(",\n");
        }
        out.push_str(indentation);
        out.push('}');
        Ok(out)
    }
}

/// Format a number the way a JavaScript engine prints it.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }
    // Shortest round-trip digits; positional for exponents in [-6, 21).
    let scientific = format!("{n:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{n}");
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();
    if (-6..21).contains(&exponent) {
        return format!("{n}");
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{}", exponent.unsigned_abs())
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
