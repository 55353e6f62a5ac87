mod common;

use common::*;
use firment_compiler::{
    assembler::{assemble, base_name, output_name, Frame, GeneratedFile, GeneratedUnit},
    classify::Role,
    codec::{
        decode_request, decode_response, encode_response, model_to_json, request_from_descriptor_set,
    },
    descriptor::build_request_model,
    run, FirmentError, WidgetGenerator,
};
use prost::Message;
use prost_types::{
    compiler::{CodeGeneratorResponse, Version},
    FileDescriptorSet,
};

#[test]
fn test_malformed_request_is_decode_error() {
    // Length-delimited field claiming five bytes with one present.
    let bytes = [0x0a, 0x05, 0x61];
    assert!(matches!(decode_request(&bytes), Err(FirmentError::DecodeError(_))));
    assert!(matches!(run(&bytes, &WidgetGenerator), Err(FirmentError::DecodeError(_))));
}

#[test]
fn test_old_compiler_is_rejected() {
    let mut req = request(vec![pump_file()], &["pump.proto"]);
    req.compiler_version = Some(Version {
        major: Some(2),
        minor: Some(6),
        patch: Some(1),
        suffix: None,
    });
    let result = decode_request(&req.encode_to_vec());
    assert!(matches!(result, Err(FirmentError::DecodeError(msg)) if msg.contains("2.6.1")));

    req.compiler_version = None;
    assert!(decode_request(&req.encode_to_vec()).is_ok());
}

#[test]
fn test_response_carries_files_and_features() {
    let files = vec![
        GeneratedFile { name: "a.txt".to_string(), content: "alpha".to_string() },
        GeneratedFile { name: "b.txt".to_string(), content: String::new() },
    ];
    let bytes = encode_response(&files);

    let response = CodeGeneratorResponse::decode(bytes.as_slice()).expect("decode failed");
    assert_eq!(response.supported_features, Some(1));
    assert!(response.error.is_none());
    assert_eq!(decode_response(&bytes).expect("decode failed"), files);
}

#[test]
fn test_descriptor_set_request_selects_all_by_default() {
    let set = FileDescriptorSet {
        file: vec![
            file("a.proto", None, vec![], vec![]),
            file("b.proto", None, vec![], vec![]),
        ],
    };

    let all = request_from_descriptor_set(set.clone(), &[], Some("keep_case".to_string()));
    assert_eq!(all.file_to_generate, ["a.proto", "b.proto"]);
    assert_eq!(all.parameter.as_deref(), Some("keep_case"));
    assert_eq!(all.proto_file.len(), 2);

    let one = request_from_descriptor_set(set, &["b.proto".to_string()], None);
    assert_eq!(one.file_to_generate, ["b.proto"]);
}

#[test]
fn test_assemble_skips_empty_units() {
    let frame = Frame::new("// head\n").with_epilogue("// tail\n");
    let units = vec![
        GeneratedUnit::new(Role::Outgoing, "one\n".to_string()),
        GeneratedUnit::empty(Role::Unclassified),
        GeneratedUnit::new(Role::Incoming, "two\n".to_string()),
    ];

    let assembled = assemble("out.txt", &frame, &units);
    assert_eq!(assembled.name, "out.txt");
    assert_eq!(assembled.content, "// head\none\ntwo\n// tail\n");

    let bare = assemble("bare.txt", &Frame::new("// head\n"), &[GeneratedUnit::empty(Role::Unclassified)]);
    assert_eq!(bare.content, "// head\n");

    assert_eq!(output_name("widgets.pb.tsx", "msgs", 1), "widgets.pb.tsx");
    assert_eq!(output_name("widgets.pb.tsx", "msgs", 2), "msgs.widgets.pb.tsx");
    assert_eq!(output_name("can.pb.h", "left/msgs", 2), "left/msgs.can.pb.h");
    assert_eq!(base_name("left/msgs.can.pb.h"), "msgs.can.pb.h");
    assert_eq!(base_name("can.pb.h"), "can.pb.h");
}

#[test]
fn test_model_json_and_encode_error() {
    let model = build_request_model(&request(vec![pump_file()], &["pump.proto"]));
    let json = model_to_json(&model).expect("serialization failed");
    assert!(json.contains("\"files_to_generate\": [\n    \"pump.proto\"\n  ]"));
    assert!(json.contains("\"name\": \"PumpCtl\""));

    let err = FirmentError::EncodeError("key must be a string".to_string());
    assert_eq!(err.to_string(), "Encode error: key must be a string");
}
