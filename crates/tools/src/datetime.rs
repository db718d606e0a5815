//! Built-in `datetime` tool.

use std::fmt::Write as _;

use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;

use wren_domain::{Error, Result, Tool};

/// Reports the current local date and time.
pub struct DateTimeTool;

#[async_trait]
impl Tool for DateTimeTool {
    fn name(&self) -> &str {
        "datetime"
    }

    fn description(&self) -> &str {
        "Get the current local date and time."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "format": {
                    "type": "string",
                    "description": "Optional strftime format string (e.g. '%Y-%m-%d'). Defaults to RFC 3339."
                }
            }
        })
    }

    async fn execute(&self, arguments: Value) -> Result<String> {
        let now = Local::now();
        match arguments.get("format").and_then(Value::as_str) {
            Some(fmt) => {
                // An invalid strftime specifier makes the Display impl fail,
                // so render through write! instead of to_string().
                let mut out = String::new();
                write!(out, "{}", now.format(fmt))
                    .map_err(|_| Error::Other(format!("invalid format string: '{fmt}'")))?;
                Ok(out)
            }
            None => Ok(now.to_rfc3339()),
        }
    }
}
