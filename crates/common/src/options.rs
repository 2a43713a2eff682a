//! Keyword-style options as they arrive from a catalog entry.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// Free-form options: connection configuration, load and save arguments.
pub type Options = BTreeMap<String, Value>;

/// Pulls typed values out of an [`Options`] map and rejects leftovers.
///
/// Every `take_*` call removes the key, so once all known keys are read
/// [`OptionReader::finish`] can report anything the caller did not expect.
#[derive(Debug)]
pub struct OptionReader {
    context: String,
    options: Options,
}

impl OptionReader {
    pub fn new(context: impl Into<String>, options: Options) -> Self {
        Self { context: context.into(), options }
    }

    pub fn take_bool(&mut self, key: &str) -> Result<Option<bool>> {
        match self.options.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(other) => Err(self.type_error(key, "a boolean", &other)),
        }
    }

    pub fn take_usize(&mut self, key: &str) -> Result<Option<usize>> {
        match self.options.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => match n.as_u64().and_then(|n| usize::try_from(n).ok()) {
                Some(n) => Ok(Some(n)),
                None => Err(self.type_error(key, "a non-negative integer", &Value::Number(n))),
            },
            Some(other) => Err(self.type_error(key, "a non-negative integer", &other)),
        }
    }

    pub fn take_string(&mut self, key: &str) -> Result<Option<String>> {
        match self.options.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.type_error(key, "a string", &other)),
        }
    }

    /// A single ASCII character, as used for delimiters and quote characters.
    pub fn take_byte(&mut self, key: &str) -> Result<Option<u8>> {
        match self.take_string(key)? {
            None => Ok(None),
            Some(s) if s.len() == 1 && s.is_ascii() => Ok(Some(s.as_bytes()[0])),
            Some(s) => Err(Error::Config(format!(
                "{}: `{key}` must be a single ASCII character, got {s:?}",
                self.context
            ))),
        }
    }

    /// Fails if any option was left unread.
    pub fn finish(self) -> Result<()> {
        if self.options.is_empty() {
            return Ok(());
        }
        let unexpected: Vec<String> = self.options.keys().map(|k| format!("`{k}`")).collect();
        Err(Error::Config(format!(
            "{}: unexpected option(s) {}",
            self.context,
            unexpected.join(", ")
        )))
    }

    fn type_error(&self, key: &str, expected: &str, got: &Value) -> Error {
        Error::Config(format!("{}: `{key}` must be {expected}, got {got}", self.context))
    }
}
