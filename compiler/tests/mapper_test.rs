mod common;

use common::*;
use firment_compiler::{
    classify::{classify_name, Role},
    descriptor::{build_file, build_request_model},
    mapper::{
        map_field, map_message, Affordance, Control, DefaultValue, Readout, Repr, Width,
        TELEMETRY_PRECISION,
    },
    options::GeneratorOptions,
    registry::EnumRegistry,
    types::{FileSchema, WireType},
    verifier::verify_request,
    FirmentError,
};
use prost_types::field_descriptor_proto::Type;

fn schema() -> Vec<FileSchema> {
    let shared = file(
        "shared.proto",
        Some("fw"),
        vec![],
        vec![enumeration("Mode", &[("IDLE", 3), ("RUN", 1), ("ALIAS", 1)])],
    );
    let device = file(
        "device.proto",
        Some("fw.dev"),
        vec![message(
            "DriveTlm",
            vec![
                field("current", 1, Type::Float),
                field("ticks", 2, Type::Uint64),
                field("armed", 3, Type::Bool),
                enum_field("mode", 4, ".fw.Mode"),
                message_field("nested", 5, ".fw.dev.Other"),
            ],
        )],
        vec![],
    );
    vec![build_file(&shared), build_file(&device)]
}

#[test]
fn test_classify_by_suffix() {
    assert_eq!(classify_name("PumpCtl"), Role::Outgoing);
    assert_eq!(classify_name("PumpTlm"), Role::Incoming);
    assert_eq!(classify_name("Foo"), Role::Unclassified);
    assert_eq!(classify_name("CtlPump"), Role::Unclassified);
    assert_eq!(classify_name("Tlm"), Role::Incoming);
}

#[test]
fn test_build_file_qualifies_enums_and_tags_wire_types() {
    let files = schema();
    assert_eq!(files[0].enums[0].name, ".fw.Mode");
    assert_eq!(files[0].enums[0].short_name(), "Mode");
    assert_eq!(files[1].path_stem(), "device");
    assert_eq!(build_file(&file("left/msgs.proto", None, vec![], vec![])).path_stem(), "left/msgs");

    let wires: Vec<&WireType> = files[1].messages[0].fields.iter().map(|f| &f.wire).collect();
    assert_eq!(
        wires,
        [
            &WireType::Float,
            &WireType::UInt64,
            &WireType::Bool,
            &WireType::Enum { type_name: ".fw.Mode".to_string() },
            &WireType::Message,
        ]
    );
}

#[test]
fn test_registry_spans_all_files() {
    let files = schema();
    let registry = EnumRegistry::build(&files);

    assert_eq!(registry.len(), 1);
    assert!(registry.get(".fw.Mode").is_some());
    assert!(registry.get("Mode").is_none());
    assert!(matches!(
        registry.resolve(".fw.Gone", "DriveTlm", "mode"),
        Err(FirmentError::UnresolvedEnum { .. })
    ));
}

#[test]
fn test_duplicate_enum_keeps_first() {
    let a = build_file(&file("a.proto", None, vec![], vec![enumeration("E", &[("A", 0)])]));
    let b = build_file(&file("b.proto", None, vec![], vec![enumeration("E", &[("B", 5)])]));
    let files = vec![a, b];
    let registry = EnumRegistry::build(&files);

    let e = registry.get(".E").expect("enum missing");
    assert_eq!(e.values[0].label, "A");
}

#[test]
fn test_telemetry_bindings() {
    let files = schema();
    let registry = EnumRegistry::build(&files);
    let message = &files[1].messages[0];

    let bindings = map_message(message, Role::Incoming, &registry, &GeneratorOptions::default())
        .expect("mapping failed");
    assert_eq!(bindings.len(), 4);

    assert_eq!(bindings[0].id, "DriveTlm-1");
    assert_eq!(bindings[0].repr, Repr::Real { width: Width::W32 });
    assert_eq!(bindings[0].default, DefaultValue::Real(0.0));
    assert_eq!(
        bindings[0].affordance,
        Affordance::Readout(Readout::Number { precision: Some(TELEMETRY_PRECISION) })
    );

    assert_eq!(bindings[1].repr, Repr::Integer { width: Width::W64, signed: false });
    assert_eq!(
        bindings[1].affordance,
        Affordance::Readout(Readout::Number { precision: None })
    );

    assert_eq!(bindings[2].affordance, Affordance::Readout(Readout::Flag));
    assert_eq!(bindings[2].default.literal(), "false");

    assert_eq!(bindings[3].affordance, Affordance::Readout(Readout::Label));
    assert_eq!(bindings[3].default, DefaultValue::Choice(3));
    match &bindings[3].repr {
        Repr::Choice { enum_name, options } => {
            assert_eq!(enum_name, ".fw.Mode");
            assert_eq!(options.len(), 3);
        }
        other => panic!("expected a choice, got {:?}", other),
    }
}

#[test]
fn test_command_bindings() {
    let files = schema();
    let registry = EnumRegistry::build(&files);
    let message = &files[1].messages[0];
    let options = GeneratorOptions::default();

    let controls: Vec<Affordance> = map_message(message, Role::Outgoing, &registry, &options)
        .expect("mapping failed")
        .into_iter()
        .map(|b| b.affordance)
        .collect();
    assert_eq!(
        controls,
        [
            Affordance::Control(Control::Stepper { whole: false }),
            Affordance::Control(Control::Stepper { whole: true }),
            Affordance::Control(Control::Toggle),
            Affordance::Control(Control::Select),
        ]
    );

    let nested = &message.fields[4];
    let skipped = map_field(message, nested, Role::Outgoing, &registry, &options)
        .expect("mapping failed");
    assert!(skipped.is_none());
}

#[test]
fn test_unresolved_enum_is_eager() {
    let f = build_file(&file(
        "lonely.proto",
        None,
        vec![message("LonelyCtl", vec![enum_field("mode", 1, ".fw.Mode")])],
        vec![],
    ));
    let files = vec![f];
    let registry = EnumRegistry::build(&files);
    let message = &files[0].messages[0];

    let result = map_message(message, Role::Outgoing, &registry, &GeneratorOptions::default());
    assert!(matches!(result, Err(FirmentError::UnresolvedEnum { .. })));
}

#[test]
fn test_verify_returns_selection_in_order() {
    let req = request(
        vec![
            file("a.proto", None, vec![], vec![]),
            file("b.proto", None, vec![], vec![]),
            file("c.proto", None, vec![], vec![]),
        ],
        &["c.proto", "a.proto"],
    );
    let model = build_request_model(&req);

    let selected = verify_request(&model).expect("verification failed");
    let names: Vec<&str> = selected.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["c.proto", "a.proto"]);

    let mut missing = req.clone();
    missing.file_to_generate.push("ghost.proto".to_string());
    match verify_request(&build_request_model(&missing)) {
        Err(FirmentError::SchemaError(msg)) => assert!(msg.contains("\"ghost.proto\"")),
        other => panic!("expected SchemaError, got {:?}", other),
    }
}
