#![allow(dead_code)]

use firment_compiler::{
    assembler::GeneratedFile,
    codec::decode_response,
    run, FirmentError, Generator,
};
use prost::Message;
use prost_types::{
    compiler::{CodeGeneratorRequest, Version},
    field_descriptor_proto::{Label, Type},
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto,
};

pub fn field(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

pub fn repeated(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        label: Some(Label::Repeated as i32),
        ..field(name, number, ty)
    }
}

pub fn enum_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_string()),
        ..field(name, number, Type::Enum)
    }
}

pub fn message_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_string()),
        ..field(name, number, Type::Message)
    }
}

pub fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

pub fn enumeration(name: &str, values: &[(&str, i32)]) -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some(name.to_string()),
        value: values
            .iter()
            .map(|(label, number)| EnumValueDescriptorProto {
                name: Some(label.to_string()),
                number: Some(*number),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

pub fn file(
    name: &str,
    package: Option<&str>,
    messages: Vec<DescriptorProto>,
    enums: Vec<EnumDescriptorProto>,
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: package.map(str::to_string),
        message_type: messages,
        enum_type: enums,
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

pub fn request(files: Vec<FileDescriptorProto>, to_generate: &[&str]) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: to_generate.iter().map(|s| s.to_string()).collect(),
        proto_file: files,
        compiler_version: Some(Version {
            major: Some(4),
            minor: Some(25),
            patch: Some(1),
            suffix: Some(String::new()),
        }),
        ..Default::default()
    }
}

/// Drives `generator` through the same bytes-in, bytes-out path as protoc.
pub fn run_request(
    request: &CodeGeneratorRequest,
    generator: &dyn Generator,
) -> Result<Vec<GeneratedFile>, FirmentError> {
    let response = run(&request.encode_to_vec(), generator)?;
    decode_response(&response)
}

/// `message PumpCtl { float speed = 1; bool enabled = 2; }` and
/// `message PumpTlm { float speed = 1; }` in `pump.proto`.
pub fn pump_file() -> FileDescriptorProto {
    file(
        "pump.proto",
        None,
        vec![
            message(
                "PumpCtl",
                vec![field("speed", 1, Type::Float), field("enabled", 2, Type::Bool)],
            ),
            message("PumpTlm", vec![field("speed", 1, Type::Float)]),
        ],
        vec![],
    )
}
