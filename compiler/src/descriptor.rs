use prost_types::{
    compiler::CodeGeneratorRequest,
    field_descriptor_proto::{Label, Type},
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
};
use tracing::debug;

use crate::types::{
    EnumSchema, EnumValue, FieldSchema, FileSchema, MessageSchema, RequestModel, WireType,
};

/// Rebuild the schema model for every file protoc supplied, selected for
/// generation or not.
pub fn build_request_model(request: &CodeGeneratorRequest) -> RequestModel {
    let files = request.proto_file.iter().map(build_file).collect();

    RequestModel {
        files,
        files_to_generate: request.file_to_generate.clone(),
        parameter:         request.parameter.clone(),
    }
}

pub fn build_file(file: &FileDescriptorProto) -> FileSchema {
    let scope = match file.package() {
        "" => String::new(),
        package => format!(".{}", package),
    };

    // Top-level enums first, then enums nested inside messages.
    let mut enums: Vec<EnumSchema> = file
        .enum_type
        .iter()
        .map(|e| build_enum(&scope, e))
        .collect();
    for message in &file.message_type {
        collect_nested_enums(&scope, message, &mut enums);
    }

    let messages = file.message_type.iter().map(build_message).collect();

    debug!(
        file = file.name(),
        messages = file.message_type.len(),
        enums = enums.len(),
        "built file schema"
    );

    FileSchema {
        name: file.name().to_string(),
        package: file.package.clone(),
        messages,
        enums,
    }
}

fn collect_nested_enums(scope: &str, message: &DescriptorProto, out: &mut Vec<EnumSchema>) {
    let inner = format!("{}.{}", scope, message.name());
    for e in &message.enum_type {
        out.push(build_enum(&inner, e));
    }
    for nested in &message.nested_type {
        collect_nested_enums(&inner, nested, out);
    }
}

fn build_enum(scope: &str, e: &EnumDescriptorProto) -> EnumSchema {
    EnumSchema {
        name:   format!("{}.{}", scope, e.name()),
        values: e
            .value
            .iter()
            .map(|v| EnumValue {
                label:  v.name().to_string(),
                number: v.number(),
            })
            .collect(),
    }
}

fn build_message(message: &DescriptorProto) -> MessageSchema {
    MessageSchema {
        name:   message.name().to_string(),
        fields: message.field.iter().map(build_field).collect(),
    }
}

fn build_field(field: &FieldDescriptorProto) -> FieldSchema {
    FieldSchema {
        name:   field.name().to_string(),
        number: field.number(),
        wire:   wire_type(field),
    }
}

/// Maps a descriptor field onto the wire-type tags the generators understand.
/// Repeated fields have no single-value representation and fall into `Other`.
fn wire_type(field: &FieldDescriptorProto) -> WireType {
    if field.label == Some(Label::Repeated as i32) {
        return WireType::Other;
    }

    let Some(ty) = field.r#type.and_then(|t| Type::try_from(t).ok()) else {
        return WireType::Other;
    };

    match ty {
        Type::Int32 | Type::Sint32 | Type::Sfixed32 => WireType::Int32,
        Type::Int64 | Type::Sint64 | Type::Sfixed64 => WireType::Int64,
        Type::Uint32 | Type::Fixed32 => WireType::UInt32,
        Type::Uint64 | Type::Fixed64 => WireType::UInt64,
        Type::Float => WireType::Float,
        Type::Double => WireType::Double,
        Type::Bool => WireType::Bool,
        Type::Enum => WireType::Enum {
            type_name: field.type_name().to_string(),
        },
        Type::Message => WireType::Message,
        Type::String | Type::Bytes | Type::Group => WireType::Other,
    }
}
