use serde::Serialize;

/// Every file present in a request, plus the names selected for generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestModel {
    pub files:             Vec<FileSchema>,
    pub files_to_generate: Vec<String>,
    pub parameter:         Option<String>,
}

impl RequestModel {
    pub fn file(&self, name: &str) -> Option<&FileSchema> {
        self.files.iter().find(|file| file.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSchema {
    pub name:     String,
    pub package:  Option<String>,
    pub messages: Vec<MessageSchema>,
    pub enums:    Vec<EnumSchema>,
}

impl FileSchema {
    /// File name relative to the include root, without the `.proto`
    /// extension: `left/msgs.proto` becomes `left/msgs`.
    pub fn path_stem(&self) -> &str {
        self.name.strip_suffix(".proto").unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageSchema {
    pub name:   String,
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name:   String,
    pub number: i32,
    pub wire:   WireType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WireType {
    Int32,
    Int64,
    UInt32,
    UInt64,
    Float,
    Double,
    Bool,
    /// Reference to an enumeration by its fully-qualified name (`.pkg.Mode`).
    Enum { type_name: String },
    Message,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumSchema {
    /// Fully-qualified, with a leading dot, as protoc spells field type names.
    pub name:   String,
    pub values: Vec<EnumValue>,
}

impl EnumSchema {
    /// Declared name without package or enclosing messages.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub label:  String,
    pub number: i32,
}
