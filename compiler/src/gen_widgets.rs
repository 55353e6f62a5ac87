//! React widgets for command and telemetry messages.
//!
//! Each `...Ctl` message becomes a form that edits a local copy of the
//! message and publishes it with `sendMessage`; each `...Tlm` message becomes
//! a read-only panel whose whole state is replaced by `setMessageHandler`
//! whenever a message of that name arrives.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    assembler::{assemble, output_name, Frame, GeneratedFile, GeneratedUnit},
    classify::{classify, Role},
    error::FirmentError,
    mapper::{map_message, Affordance, Control, FieldBinding, Readout, Repr},
    options::GeneratorOptions,
    traits::{Context, Generator},
    types::{EnumValue, FileSchema, MessageSchema},
    utils::quote,
};

pub const WIDGETS_FILE: &str = "widgets.pb.tsx";

pub struct WidgetGenerator;

impl Generator for WidgetGenerator {
    fn name(&self) -> &'static str {
        "widgets"
    }

    fn generate_file(
        &self,
        file: &FileSchema,
        ctx: &Context<'_>,
    ) -> Result<Vec<GeneratedFile>, FirmentError> {
        let mut units = Vec::with_capacity(file.messages.len());
        for message in &file.messages {
            let role = classify(message);
            if role == Role::Unclassified {
                debug!(message = %message.name, "no widget for unclassified message");
                units.push(GeneratedUnit::empty(role));
                continue;
            }
            let bindings = map_message(message, role, ctx.registry, ctx.options)?;
            units.push(render_unit(message, role, &bindings));
        }

        let name = output_name(WIDGETS_FILE, file.path_stem(), ctx.selected);
        Ok(vec![assemble(&name, &Frame::new(preamble(ctx.options)), &units)])
    }
}

pub fn preamble(options: &GeneratorOptions) -> String {
    format!(
        "// Generated File, do not track.\n\
         // Implements react modules for each message defined in .proto files.\n\
         import {{ useState, useEffect }} from \"react\";\n\
         import {{ setMessageHandler, sendMessage }} from {};\n",
        quote(&options.client_module)
    )
}

pub fn render_unit(message: &MessageSchema, role: Role, bindings: &[FieldBinding]) -> GeneratedUnit {
    match role {
        Role::Outgoing => GeneratedUnit::new(role, render_command(&message.name, bindings)),
        Role::Incoming => GeneratedUnit::new(role, render_telemetry(&message.name, bindings)),
        Role::Unclassified => GeneratedUnit::empty(role),
    }
}

fn render_command(name: &str, bindings: &[FieldBinding]) -> String {
    let state = format!("{}State", name);
    let setter = format!("set{}State", name);

    let mut lines = Vec::new();
    lines.push(String::new());
    lines.push(format!("export function {}() {{", name));
    lines.push(state_declaration(&state, &setter, bindings));
    lines.push(String::new());
    lines.push("  function handleSubmit(submitEvent: React.FormEvent) {".to_string());
    lines.push("    submitEvent.preventDefault();".to_string());
    lines.push(format!("    sendMessage({}, {});", quote(name), state));
    lines.push("  }".to_string());
    lines.push(String::new());
    lines.push("  return (".to_string());
    lines.push("    <div className=\"widget\">".to_string());
    lines.push(format!("      <h4>{}</h4>", name));
    lines.push("      <form className=\"command\" onSubmit={handleSubmit}>".to_string());

    for binding in bindings {
        let Affordance::Control(control) = binding.affordance else {
            continue;
        };
        let key = &binding.key;
        let update = |value: &str| {
            format!(
                "onChange={{(e) => {}({{ ...{}, {}: {} }})}}",
                setter, state, key, value
            )
        };

        lines.push(format!(
            "        <label htmlFor={}>{}</label>",
            quote(&binding.id),
            binding.name
        ));
        match control {
            Control::Stepper { whole } => {
                let (step, value) = if whole {
                    ("\"1\"", "Math.trunc(Number(e.target.value))")
                } else {
                    ("\"any\"", "Number(e.target.value)")
                };
                lines.push(format!(
                    "        <input id={} type=\"number\" step={}",
                    quote(&binding.id),
                    step
                ));
                lines.push(format!("          value={{{}.{}}}", state, key));
                lines.push(format!("          {} />", update(value)));
            }
            Control::Toggle => {
                lines.push(format!(
                    "        <input id={} type=\"checkbox\"",
                    quote(&binding.id)
                ));
                lines.push(format!("          checked={{{}.{}}}", state, key));
                lines.push(format!("          {} />", update("e.target.checked")));
            }
            Control::Select => {
                lines.push(format!("        <select id={}", quote(&binding.id)));
                lines.push(format!("          value={{{}.{}}}", state, key));
                lines.push(format!("          {}>", update("Number(e.target.value)")));
                if let Repr::Choice { options, .. } = &binding.repr {
                    for option in options {
                        lines.push(format!(
                            "          <option value={{{}}}>{}</option>",
                            option.number, option.label
                        ));
                    }
                }
                lines.push("        </select>".to_string());
            }
        }
    }

    lines.push("        <button type=\"submit\">Send</button>".to_string());
    lines.push("      </form>".to_string());
    lines.push("    </div>".to_string());
    lines.push("  );".to_string());
    lines.push("}".to_string());

    lines.join("\n") + "\n"
}

fn render_telemetry(name: &str, bindings: &[FieldBinding]) -> String {
    let state = format!("{}State", name);
    let setter = format!("set{}State", name);

    let mut lines = Vec::new();
    lines.push(String::new());
    lines.push(format!("export function {}() {{", name));
    lines.push(state_declaration(&state, &setter, bindings));
    lines.push("  useEffect(() => {".to_string());
    lines.push(format!("    return setMessageHandler({}, {});", quote(name), setter));
    lines.push("  }, []);".to_string());
    lines.push(String::new());
    lines.push("  return (".to_string());
    lines.push("    <div className=\"widget\">".to_string());
    lines.push(format!("      <h4>{}</h4>", name));
    lines.push("      <dl className=\"telemetry\">".to_string());

    for binding in bindings {
        let Affordance::Readout(readout) = binding.affordance else {
            continue;
        };
        let value = format!("{}.{}", state, binding.key);
        let id = quote(&binding.id);

        match readout {
            Readout::Number { precision } => {
                let shown = match precision {
                    Some(digits) => format!("{}.toPrecision({})", value, digits),
                    None => value,
                };
                lines.push(format!("        <dt>{}</dt>", binding.name));
                lines.push(format!("        <dd data-testid={}>{{{}}}</dd>", id, shown));
            }
            Readout::Flag => {
                lines.push(format!("        {{{} && (", value));
                lines.push("          <>".to_string());
                lines.push(format!("            <dt>{}</dt>", binding.name));
                lines.push(format!("            <dd data-testid={}>true</dd>", id));
                lines.push("          </>".to_string());
                lines.push("        )}".to_string());
            }
            Readout::Label => {
                let options = match &binding.repr {
                    Repr::Choice { options, .. } => label_entries(options),
                    _ => String::new(),
                };
                lines.push(format!("        <dt>{}</dt>", binding.name));
                lines.push(format!(
                    "        <dd data-testid={}>{{new Map<number, string>([{}]).get({}) ?? {}}}</dd>",
                    id, options, value, value
                ));
            }
        }
    }

    lines.push("      </dl>".to_string());
    lines.push("    </div>".to_string());
    lines.push("  );".to_string());
    lines.push("}".to_string());

    lines.join("\n") + "\n"
}

fn state_declaration(state: &str, setter: &str, bindings: &[FieldBinding]) -> String {
    if bindings.is_empty() {
        return format!("  const [{}, {}] = useState({{}});", state, setter);
    }

    let mut lines = vec![format!("  const [{}, {}] = useState({{", state, setter)];
    for binding in bindings {
        lines.push(format!("    {}: {},", binding.key, binding.default.literal()));
    }
    lines.push("  });".to_string());
    lines.join("\n")
}

/// `[number, label]` pairs for a label lookup; aliased numbers keep their
/// first label.
fn label_entries(options: &[EnumValue]) -> String {
    let mut seen = HashSet::with_capacity(options.len());
    let mut entries = Vec::with_capacity(options.len());
    for option in options {
        if !seen.insert(option.number) {
            continue;
        }
        entries.push(format!("[{}, {}]", option.number, quote(&option.label)));
    }
    entries.join(", ")
}
