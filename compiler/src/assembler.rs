use serde::Serialize;

use crate::classify::Role;

/// Rendered text for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    pub role: Role,
    pub text: String,
}

impl GeneratedUnit {
    pub fn new(role: Role, text: String) -> Self {
        GeneratedUnit { role, text }
    }

    /// The contribution of a message that is not rendered.
    pub fn empty(role: Role) -> Self {
        GeneratedUnit {
            role,
            text: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub name:    String,
    pub content: String,
}

/// Fixed text surrounding the units of a generated file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub preamble: String,
    pub epilogue: String,
}

impl Frame {
    pub fn new(preamble: impl Into<String>) -> Self {
        Frame {
            preamble: preamble.into(),
            epilogue: String::new(),
        }
    }

    pub fn with_epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = epilogue.into();
        self
    }
}

/// Concatenates the frame's preamble, the units in order, and the epilogue.
/// Empty units contribute nothing.
pub fn assemble(name: &str, frame: &Frame, units: &[GeneratedUnit]) -> GeneratedFile {
    let body_len: usize = units.iter().map(|u| u.text.len()).sum();
    let mut content =
        String::with_capacity(frame.preamble.len() + body_len + frame.epilogue.len());

    content.push_str(&frame.preamble);
    for unit in units.iter().filter(|u| !u.is_empty()) {
        content.push_str(&unit.text);
    }
    content.push_str(&frame.epilogue);

    GeneratedFile {
        name: name.to_string(),
        content,
    }
}

/// Output name for one selected file: the generator's fixed name when it is
/// the only selection, otherwise prefixed by the file's path stem, so
/// `left/msgs.proto` and `right/msgs.proto` land in separate directories.
pub fn output_name(fixed: &str, path_stem: &str, selected: usize) -> String {
    if selected <= 1 {
        fixed.to_string()
    } else {
        format!("{}.{}", path_stem, fixed)
    }
}

/// Last path component of an output name, as seen from a sibling file.
pub fn base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
