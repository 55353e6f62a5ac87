//! C pack/unpack routines for command and telemetry messages.
//!
//! Every bound field is laid out in declaration order, little-endian and
//! without padding: 4 or 8 bytes for numbers and enums, 1 byte for booleans.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    assembler::{assemble, base_name, output_name, Frame, GeneratedFile, GeneratedUnit},
    classify::{classify, Role},
    error::FirmentError,
    mapper::{map_message, FieldBinding, Repr, Width},
    traits::{Context, Generator},
    types::{EnumValue, FileSchema, MessageSchema},
    utils::{escape_c_keyword, to_upper_snake_case},
};

pub const HEADER_FILE: &str = "can.pb.h";
pub const SOURCE_FILE: &str = "can.pb.c";

pub struct CanGenerator;

impl Generator for CanGenerator {
    fn name(&self) -> &'static str {
        "can"
    }

    fn generate_file(
        &self,
        file: &FileSchema,
        ctx: &Context<'_>,
    ) -> Result<Vec<GeneratedFile>, FirmentError> {
        let header_name = output_name(HEADER_FILE, file.path_stem(), ctx.selected);
        let source_name = output_name(SOURCE_FILE, file.path_stem(), ctx.selected);

        let mut declarations = Vec::with_capacity(file.messages.len());
        let mut definitions = Vec::with_capacity(file.messages.len());
        let mut declared_enums: HashSet<String> = HashSet::new();

        for message in &file.messages {
            let role = classify(message);
            if role == Role::Unclassified {
                declarations.push(GeneratedUnit::empty(role));
                definitions.push(GeneratedUnit::empty(role));
                continue;
            }

            let bindings = map_message(message, role, ctx.registry, ctx.options)?;
            if bindings.is_empty() {
                // A C struct needs at least one member.
                debug!(message = %message.name, "no packable fields");
                declarations.push(GeneratedUnit::empty(role));
                definitions.push(GeneratedUnit::empty(role));
                continue;
            }

            let mut enums = String::new();
            for binding in &bindings {
                if let Repr::Choice { enum_name, options } = &binding.repr {
                    if declared_enums.insert(enum_name.clone()) {
                        enums.push_str(&render_enum(enum_name, options));
                    }
                }
            }

            let declaration = render_declaration(message, role, &bindings);
            declarations.push(GeneratedUnit::new(role, enums + &declaration.text));
            definitions.push(render_definition(message, role, &bindings));
        }

        let guard = include_guard(&header_name);
        let header_frame = Frame::new(header_preamble(&guard))
            .with_epilogue(format!("\n#endif /* {} */\n", guard));
        let source_frame = Frame::new(source_preamble(base_name(&header_name)));

        Ok(vec![
            assemble(&header_name, &header_frame, &declarations),
            assemble(&source_name, &source_frame, &definitions),
        ])
    }
}

pub fn header_preamble(guard: &str) -> String {
    format!(
        "/**\n\
         * Generated file!  Do not track.\n\
         * Interface to pack and unpack data structures for CAN tx/rx.\n\
         */\n\
         #ifndef {guard}\n\
         #define {guard}\n\
         \n\
         #include <stdbool.h>\n\
         #include <stddef.h>\n\
         #include <stdint.h>\n"
    )
}

pub fn source_preamble(header_name: &str) -> String {
    let mut text = format!(
        "/**\n\
         * Generated File, do not track!\n\
         * Implements functions to pack and unpack data structures for CAN tx/rx.\n\
         */\n\
         #include <string.h>\n\
         \n\
         #include \"{}\"\n",
        header_name
    );
    text.push_str(BYTE_HELPERS);
    text
}

const BYTE_HELPERS: &str = r#"
static inline void put_u32(uint8_t *buf, uint32_t v) {
  buf[0] = (uint8_t)v;
  buf[1] = (uint8_t)(v >> 8);
  buf[2] = (uint8_t)(v >> 16);
  buf[3] = (uint8_t)(v >> 24);
}

static inline uint32_t get_u32(const uint8_t *buf) {
  return (uint32_t)buf[0] | ((uint32_t)buf[1] << 8) |
         ((uint32_t)buf[2] << 16) | ((uint32_t)buf[3] << 24);
}

static inline void put_u64(uint8_t *buf, uint64_t v) {
  put_u32(buf, (uint32_t)v);
  put_u32(buf + 4, (uint32_t)(v >> 32));
}

static inline uint64_t get_u64(const uint8_t *buf) {
  return (uint64_t)get_u32(buf) | ((uint64_t)get_u32(buf + 4) << 32);
}

static inline void put_f32(uint8_t *buf, float v) {
  uint32_t bits;
  memcpy(&bits, &v, sizeof bits);
  put_u32(buf, bits);
}

static inline float get_f32(const uint8_t *buf) {
  uint32_t bits = get_u32(buf);
  float v;
  memcpy(&v, &bits, sizeof v);
  return v;
}

static inline void put_f64(uint8_t *buf, double v) {
  uint64_t bits;
  memcpy(&bits, &v, sizeof bits);
  put_u64(buf, bits);
}

static inline double get_f64(const uint8_t *buf) {
  uint64_t bits = get_u64(buf);
  double v;
  memcpy(&v, &bits, sizeof v);
  return v;
}
"#;

/// Struct typedef, packed size and prototypes for one message.
pub fn render_declaration(
    message: &MessageSchema,
    role: Role,
    bindings: &[FieldBinding],
) -> GeneratedUnit {
    if role == Role::Unclassified || bindings.is_empty() {
        return GeneratedUnit::empty(role);
    }
    let name = &message.name;

    let mut lines = vec![String::new(), "typedef struct {".to_string()];
    for binding in bindings {
        lines.push(format!(
            "  {} {};",
            c_type(&binding.repr),
            escape_c_keyword(&binding.name)
        ));
    }
    lines.push(format!("}} {}_t;", name));
    lines.push(String::new());
    lines.push(format!("#define {} {}u", size_macro(name), packed_size(bindings)));
    lines.push(String::new());
    lines.push(format!(
        "int pack_{}(const {}_t *msg, uint8_t *buf, size_t len);",
        name, name
    ));
    lines.push(format!(
        "int unpack_{}({}_t *msg, const uint8_t *buf, size_t len);",
        name, name
    ));

    GeneratedUnit::new(role, lines.join("\n") + "\n")
}

/// Pack and unpack bodies for one message. Both return the number of bytes
/// consumed, or -1 when `len` is too small.
pub fn render_definition(
    message: &MessageSchema,
    role: Role,
    bindings: &[FieldBinding],
) -> GeneratedUnit {
    if role == Role::Unclassified || bindings.is_empty() {
        return GeneratedUnit::empty(role);
    }
    let name = &message.name;
    let size = size_macro(name);

    let mut pack = Vec::new();
    let mut unpack = Vec::new();
    let mut offset = 0;
    for binding in bindings {
        let field = format!("msg->{}", escape_c_keyword(&binding.name));
        let at = format!("&buf[{}]", offset);
        match &binding.repr {
            Repr::Integer { width, signed } => {
                let (put, get, bits) = match width {
                    Width::W32 => ("put_u32", "get_u32", 32),
                    Width::W64 => ("put_u64", "get_u64", 64),
                };
                pack.push(format!("  {}({}, (uint{}_t){});", put, at, bits, field));
                if *signed {
                    unpack.push(format!("  {} = (int{}_t){}({});", field, bits, get, at));
                } else {
                    unpack.push(format!("  {} = {}({});", field, get, at));
                }
            }
            Repr::Real { width } => {
                let (put, get) = match width {
                    Width::W32 => ("put_f32", "get_f32"),
                    Width::W64 => ("put_f64", "get_f64"),
                };
                pack.push(format!("  {}({}, {});", put, at, field));
                unpack.push(format!("  {} = {}({});", field, get, at));
            }
            Repr::Boolean => {
                pack.push(format!("  buf[{}] = {} ? 1u : 0u;", offset, field));
                unpack.push(format!("  {} = buf[{}] != 0u;", field, offset));
            }
            Repr::Choice { enum_name, .. } => {
                pack.push(format!("  put_u32({}, (uint32_t)(int32_t){});", at, field));
                unpack.push(format!(
                    "  {} = ({})(int32_t)get_u32({});",
                    field,
                    c_enum_type(enum_name),
                    at
                ));
            }
        }
        offset += field_size(&binding.repr);
    }

    let guard = format!("  if (len < {}) {{\n    return -1;\n  }}", size);
    let text = format!(
        "\nint pack_{name}(const {name}_t *msg, uint8_t *buf, size_t len) {{\n\
         {guard}\n\
         {pack}\n  \
         return (int){size};\n\
         }}\n\
         \n\
         int unpack_{name}({name}_t *msg, const uint8_t *buf, size_t len) {{\n\
         {guard}\n\
         {unpack}\n  \
         return (int){size};\n\
         }}\n",
        name = name,
        guard = guard,
        pack = pack.join("\n"),
        unpack = unpack.join("\n"),
        size = size,
    );

    GeneratedUnit::new(role, text)
}

/// Enum typedef under its own guard: headers generated for different files
/// may each declare the same enum and still be included together.
fn render_enum(enum_name: &str, options: &[EnumValue]) -> String {
    let base = c_enum_base(enum_name);
    let guard = enum_guard(enum_name);
    let mut lines = vec![
        String::new(),
        format!("#ifndef {}", guard),
        format!("#define {}", guard),
        "typedef enum {".to_string(),
    ];
    for option in options {
        lines.push(format!("  {}_{} = {},", base, option.label, option.number));
    }
    lines.push(format!("}} {};", c_enum_type(enum_name)));
    lines.push(format!("#endif /* {} */", guard));
    lines.join("\n") + "\n"
}

fn c_type(repr: &Repr) -> String {
    match repr {
        Repr::Integer { width: Width::W32, signed: true } => "int32_t".to_string(),
        Repr::Integer { width: Width::W64, signed: true } => "int64_t".to_string(),
        Repr::Integer { width: Width::W32, signed: false } => "uint32_t".to_string(),
        Repr::Integer { width: Width::W64, signed: false } => "uint64_t".to_string(),
        Repr::Real { width: Width::W32 } => "float".to_string(),
        Repr::Real { width: Width::W64 } => "double".to_string(),
        Repr::Boolean => "bool".to_string(),
        Repr::Choice { enum_name, .. } => c_enum_type(enum_name),
    }
}

fn field_size(repr: &Repr) -> usize {
    match repr {
        Repr::Integer { width, .. } | Repr::Real { width } => width.bytes(),
        Repr::Boolean => 1,
        Repr::Choice { .. } => 4,
    }
}

pub fn packed_size(bindings: &[FieldBinding]) -> usize {
    bindings.iter().map(|b| field_size(&b.repr)).sum()
}

/// `.pkg.Outer.Mode` becomes `pkg_Outer_Mode`.
fn c_enum_base(enum_name: &str) -> String {
    enum_name.trim_start_matches('.').replace('.', "_")
}

fn c_enum_type(enum_name: &str) -> String {
    format!("{}_t", c_enum_base(enum_name))
}

/// `.fw.Mode` becomes `FW_MODE_DEFINED`.
pub fn enum_guard(enum_name: &str) -> String {
    format!("{}_DEFINED", include_guard(&c_enum_base(enum_name)))
}

fn size_macro(message: &str) -> String {
    format!("{}_PACKED_SIZE", to_upper_snake_case(message))
}

/// `left/msgs.can.pb.h` becomes `LEFT_MSGS_CAN_PB_H`.
pub fn include_guard(header_name: &str) -> String {
    header_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}
