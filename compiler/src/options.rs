use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

lazy_static! {
    static ref OPTION:      Regex = Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?:=\s*(.*?))?\s*$").unwrap();
    static ref MODULE_PATH: Regex = Regex::new(r"^[A-Za-z0-9_@./-]+$").unwrap();
}

pub const DEFAULT_CLIENT_MODULE: &str = "../mqclient";

/// Settings carried in the protoc parameter string, e.g.
/// `--widgets_opt=client_module=firment-ui,keep_case=true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Module the widgets import `sendMessage` / `setMessageHandler` from.
    pub client_module: String,
    /// Use schema field names as-is instead of protobufjs' lowerCamelCase.
    pub keep_case:     bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            client_module: DEFAULT_CLIENT_MODULE.to_string(),
            keep_case:     false,
        }
    }
}

impl GeneratorOptions {
    /// Parses a comma-separated `key=value` list. Unknown keys and malformed
    /// entries are reported and ignored.
    pub fn parse(parameter: Option<&str>) -> Self {
        let mut options = GeneratorOptions::default();
        let Some(parameter) = parameter else {
            return options;
        };

        for entry in parameter.split(',').filter(|e| !e.trim().is_empty()) {
            let Some(caps) = OPTION.captures(entry) else {
                warn!(entry, "ignoring malformed generator option");
                continue;
            };
            let key = &caps[1];
            let value = caps.get(2).map(|m| m.as_str());

            match key {
                "client_module" => match value {
                    Some(v) if MODULE_PATH.is_match(v) => options.client_module = v.to_string(),
                    _ => warn!(entry, "client_module needs a module path"),
                },
                "keep_case" => match value {
                    None | Some("true") => options.keep_case = true,
                    Some("false") => options.keep_case = false,
                    Some(_) => warn!(entry, "keep_case expects true or false"),
                },
                _ => warn!(key, "ignoring unknown generator option"),
            }
        }

        options
    }
}
