//! Output formatting

use serde_json::{Map, Value};

/// Collects fields for `--json` mode and lines for the human-readable mode
pub struct Output {
    json_mode: bool,
    fields: Map<String, Value>,
    lines: Vec<String>,
}

impl Output {
    /// Create a new output builder
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            lines: Vec::new(),
        }
    }

    /// Add a string field, shown as `key: value`
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
        self.lines.push(format!("{}: {}", key, value));
        self
    }

    /// Add a numeric field
    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(key.to_string(), Value::Number(value.into()));
        self.lines.push(format!("{}: {}", key, value));
        self
    }

    /// Add a boolean field
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), Value::Bool(value));
        self.lines.push(format!("{}: {}", key, value));
        self
    }

    /// Add a byte string, rendered as 0x-prefixed hex
    pub fn field_hex(self, key: &str, bytes: &[u8]) -> Self {
        let rendered = format!("0x{}", hex::encode(bytes));
        self.field(key, &rendered)
    }

    /// Add a list of strings
    pub fn field_list(mut self, key: &str, values: &[String]) -> Self {
        self.fields.insert(
            key.to_string(),
            Value::Array(values.iter().cloned().map(Value::String).collect()),
        );
        self.lines.push(format!("{}: [{}]", key, values.len()));
        for (i, value) in values.iter().enumerate() {
            self.lines.push(format!("  [{}] {}", i, value));
        }
        self
    }

    /// Add a JSON value that only appears in `--json` mode
    pub fn field_value(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Add a free-form line to the human-readable output
    pub fn message(mut self, msg: &str) -> Self {
        self.lines.push(msg.to_string());
        self
    }

    /// Render without printing
    pub fn render(&self) -> String {
        if self.json_mode {
            serde_json::to_string_pretty(&self.fields).unwrap_or_default()
        } else {
            self.lines.join("\n")
        }
    }

    /// Print the output
    pub fn print(self) {
        println!("{}", self.render());
    }
}
