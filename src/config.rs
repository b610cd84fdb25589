//! Rendering configuration parsed from environment variables.

pub const DEFAULT_TITLE_BGCOLOR: &str = "chartreuse1";
pub const DEFAULT_FIELD_BGCOLOR: &str = "grey96";
pub const DEFAULT_DESCRIPTOR_COLOR: &str = "#535353";

pub const TITLE_BGCOLOR_VAR: &str = "SQL_GRAPHVIZ_TITLE_BGCOLOR";
pub const FIELD_BGCOLOR_VAR: &str = "SQL_GRAPHVIZ_FIELD_BGCOLOR";
pub const DESCRIPTOR_COLOR_VAR: &str = "SQL_GRAPHVIZ_DESCRIPTOR_COLOR";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is set but empty")]
    EmptyValue { var: &'static str },
}

/// Colors used in table node labels. Any Graphviz color name or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub title_bgcolor: String,
    pub field_bgcolor: String,
    pub descriptor_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title_bgcolor: DEFAULT_TITLE_BGCOLOR.to_owned(),
            field_bgcolor: DEFAULT_FIELD_BGCOLOR.to_owned(),
            descriptor_color: DEFAULT_DESCRIPTOR_COLOR.to_owned(),
        }
    }
}

impl RenderConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SQL_GRAPHVIZ_TITLE_BGCOLOR`: default `chartreuse1`
    /// - `SQL_GRAPHVIZ_FIELD_BGCOLOR`: default `grey96`
    /// - `SQL_GRAPHVIZ_DESCRIPTOR_COLOR`: default `#535353`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if a variable is set to an empty string.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var_os(var).map(|value| value.to_string_lossy().into_owned()))
    }

    /// Like [`RenderConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if a looked-up value is blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            title_bgcolor: color_or(&lookup, TITLE_BGCOLOR_VAR, defaults.title_bgcolor)?,
            field_bgcolor: color_or(&lookup, FIELD_BGCOLOR_VAR, defaults.field_bgcolor)?,
            descriptor_color: color_or(&lookup, DESCRIPTOR_COLOR_VAR, defaults.descriptor_color)?,
        })
    }
}

fn color_or(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: String,
) -> Result<String, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue { var }),
        Some(value) => Ok(value.trim().to_owned()),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
