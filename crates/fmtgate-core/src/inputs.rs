//! Raw action inputs.
//!
//! Inputs are plain strings looked up by name. Nothing here interprets them;
//! that is the job of [`FormatOptions::from_inputs`](crate::FormatOptions::from_inputs).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::FmtgateError;

/// A string-keyed source of raw input values.
///
/// Returning `None` and returning `Some("")` mean the same thing to the
/// normalizer: the input was not provided.
pub trait InputSource {
    /// Look up the raw value for `name`.
    fn get(&self, name: &str) -> Option<String>;
}

impl InputSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// Inputs passed by the Actions runner as `INPUT_<NAME>` environment variables.
///
/// # Examples
///
/// ```
/// use fmtgate_core::{EnvInputs, InputSource};
///
/// let inputs = EnvInputs::from_vars([("INPUT_FAIL-FAST".to_string(), " true ".to_string())]);
/// assert_eq!(inputs.get("fail-fast").as_deref(), Some("true"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvInputs {
    vars: HashMap<String, String>,
}

impl EnvInputs {
    /// Snapshot the `INPUT_*` variables of the current process.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Build from an explicit set of environment variables.
    ///
    /// Variables without the `INPUT_` prefix are ignored.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = vars
            .into_iter()
            .filter(|(key, _)| key.starts_with("INPUT_"))
            .collect();
        Self { vars }
    }
}

impl InputSource for EnvInputs {
    fn get(&self, name: &str) -> Option<String> {
        self.vars
            .get(&env_key(name))
            .map(|value| value.trim().to_string())
    }
}

/// The environment variable the runner uses for input `name`.
///
/// # Examples
///
/// ```
/// assert_eq!(fmtgate_core::inputs::env_key("log-level"), "INPUT_LOG-LEVEL");
/// assert_eq!(fmtgate_core::inputs::env_key("repo token"), "INPUT_REPO_TOKEN");
/// ```
pub fn env_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Inputs read from the `[inputs]` table of a TOML file.
///
/// Useful for running fmtgate outside the Actions runner.
///
/// # Examples
///
/// ```
/// use fmtgate_core::{InputSource, TomlInputs};
///
/// let inputs = TomlInputs::from_toml(r#"
/// [inputs]
/// workspace = "src/App.sln"
/// fail-fast = true
/// "#).unwrap();
/// assert_eq!(inputs.get("workspace").as_deref(), Some("src/App.sln"));
/// assert_eq!(inputs.get("fail-fast").as_deref(), Some("true"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TomlInputs {
    values: HashMap<String, String>,
}

#[derive(Deserialize)]
struct InputsFile {
    #[serde(default)]
    inputs: HashMap<String, toml::Value>,
}

impl TomlInputs {
    /// Load inputs from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FmtgateError::FileNotFound`] if there is no file at `path`,
    /// [`FmtgateError::Io`] if it cannot be read, or a parse error if the
    /// content is not valid.
    pub fn from_file(path: &Path) -> Result<Self, FmtgateError> {
        if !path.exists() {
            return Err(FmtgateError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse inputs from a TOML string.
    ///
    /// Strings, booleans, integers and floats are accepted and kept in their
    /// textual form.
    ///
    /// # Errors
    ///
    /// Returns [`FmtgateError::Toml`] on malformed TOML, or
    /// [`FmtgateError::Config`] if an input is a table, array or datetime.
    pub fn from_toml(content: &str) -> Result<Self, FmtgateError> {
        let file: InputsFile = toml::from_str(content)?;
        let mut values = HashMap::with_capacity(file.inputs.len());
        for (name, value) in file.inputs {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                other => {
                    return Err(FmtgateError::Config(format!(
                        "input '{name}' must be a string or boolean, got {}",
                        other.type_str()
                    )))
                }
            };
            values.insert(name, text);
        }
        Ok(Self { values })
    }
}

impl InputSource for TomlInputs {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).map(|value| value.trim().to_string())
    }
}

/// Two sources where `primary` wins whenever it has a non-empty value.
///
/// The runner exports every declared input, often as an empty string, so an
/// empty primary value falls through to `fallback`.
#[derive(Debug, Clone)]
pub struct LayeredInputs<P, F> {
    primary: P,
    fallback: F,
}

impl<P: InputSource, F: InputSource> LayeredInputs<P, F> {
    /// Layer `primary` over `fallback`.
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: InputSource, F: InputSource> InputSource for LayeredInputs<P, F> {
    fn get(&self, name: &str) -> Option<String> {
        match self.primary.get(name) {
            Some(value) if !value.is_empty() => Some(value),
            _ => self.fallback.get(name),
        }
    }
}
