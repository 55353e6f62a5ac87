use serde::Serialize;

use crate::{
    classify::Role,
    error::FirmentError,
    options::GeneratorOptions,
    registry::EnumRegistry,
    types::{EnumValue, FieldSchema, MessageSchema, WireType},
    utils::to_camel_case,
};

/// Significant digits shown for real-valued telemetry.
pub const TELEMETRY_PRECISION: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Width {
    W32,
    W64,
}

impl Width {
    pub fn bytes(self) -> usize {
        match self {
            Width::W32 => 4,
            Width::W64 => 8,
        }
    }
}

/// Target-side data representation of a bound field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Repr {
    Integer { width: Width, signed: bool },
    Real { width: Width },
    Boolean,
    Choice { enum_name: String, options: Vec<EnumValue> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DefaultValue {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Choice(i32),
}

impl DefaultValue {
    /// Literal spelling, valid in both TypeScript and C.
    pub fn literal(&self) -> String {
        match self {
            DefaultValue::Integer(v) => v.to_string(),
            DefaultValue::Real(v) => format!("{:?}", v),
            DefaultValue::Boolean(v) => v.to_string(),
            DefaultValue::Choice(v) => v.to_string(),
        }
    }
}

/// How a bound field is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Affordance {
    Control(Control),
    Readout(Readout),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Control {
    /// Numeric input; `whole` restricts it to integers.
    Stepper { whole: bool },
    Toggle,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Readout {
    /// `precision` is the number of significant digits, when rounded.
    Number { precision: Option<u32> },
    /// Only shown while true.
    Flag,
    /// Enum value shown by its label.
    Label,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldBinding {
    /// Field name as declared in the schema.
    pub name:       String,
    /// Property name the field has in decoded message objects.
    pub key:        String,
    /// Stable element identifier, `<Message>-<field number>`.
    pub id:         String,
    pub repr:       Repr,
    pub default:    DefaultValue,
    pub affordance: Affordance,
}

/// Binds one field for `role`. Fields without a scalar representation
/// (message references, strings, repeated fields) yield `Ok(None)`.
pub fn map_field(
    message: &MessageSchema,
    field: &FieldSchema,
    role: Role,
    registry: &EnumRegistry<'_>,
    options: &GeneratorOptions,
) -> Result<Option<FieldBinding>, FirmentError> {
    let (repr, default) = match &field.wire {
        WireType::Int32 => (integer(Width::W32, true), DefaultValue::Integer(0)),
        WireType::Int64 => (integer(Width::W64, true), DefaultValue::Integer(0)),
        WireType::UInt32 => (integer(Width::W32, false), DefaultValue::Integer(0)),
        WireType::UInt64 => (integer(Width::W64, false), DefaultValue::Integer(0)),
        WireType::Float => (Repr::Real { width: Width::W32 }, DefaultValue::Real(0.0)),
        WireType::Double => (Repr::Real { width: Width::W64 }, DefaultValue::Real(0.0)),
        WireType::Bool => (Repr::Boolean, DefaultValue::Boolean(false)),
        WireType::Enum { type_name } => {
            let schema = registry.resolve(type_name, &message.name, &field.name)?;
            let first = schema.values.first().map(|v| v.number).unwrap_or(0);
            (
                Repr::Choice {
                    enum_name: schema.name.clone(),
                    options:   schema.values.clone(),
                },
                DefaultValue::Choice(first),
            )
        }
        WireType::Message | WireType::Other => return Ok(None),
    };

    let affordance = match role {
        Role::Outgoing => Affordance::Control(match &repr {
            Repr::Integer { .. } => Control::Stepper { whole: true },
            Repr::Real { .. } => Control::Stepper { whole: false },
            Repr::Boolean => Control::Toggle,
            Repr::Choice { .. } => Control::Select,
        }),
        Role::Incoming | Role::Unclassified => Affordance::Readout(match &repr {
            Repr::Integer { .. } => Readout::Number { precision: None },
            Repr::Real { .. } => Readout::Number {
                precision: Some(TELEMETRY_PRECISION),
            },
            Repr::Boolean => Readout::Flag,
            Repr::Choice { .. } => Readout::Label,
        }),
    };

    let key = if options.keep_case {
        field.name.clone()
    } else {
        to_camel_case(&field.name)
    };

    Ok(Some(FieldBinding {
        name: field.name.clone(),
        key,
        id: format!("{}-{}", message.name, field.number),
        repr,
        default,
        affordance,
    }))
}

/// Binds every field of `message`, in declaration order, skipping the
/// unsupported ones.
pub fn map_message(
    message: &MessageSchema,
    role: Role,
    registry: &EnumRegistry<'_>,
    options: &GeneratorOptions,
) -> Result<Vec<FieldBinding>, FirmentError> {
    let mut bindings = Vec::with_capacity(message.fields.len());
    for field in &message.fields {
        if let Some(binding) = map_field(message, field, role, registry, options)? {
            bindings.push(binding);
        }
    }
    Ok(bindings)
}

fn integer(width: Width, signed: bool) -> Repr {
    Repr::Integer { width, signed }
}
