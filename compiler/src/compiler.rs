use prost_types::compiler::CodeGeneratorRequest;
use tracing::{debug, info};

use crate::{
    assembler::GeneratedFile,
    codec::{decode_request, encode_response},
    descriptor::build_request_model,
    error::FirmentError,
    options::GeneratorOptions,
    registry::EnumRegistry,
    traits::{Context, Generator},
    verifier::verify_request,
};

/// Run `generator` over a decoded request.
/// Returns one set of output files per file selected for generation, in
/// selection order, or the first error encountered.
pub fn generate(
    request: &CodeGeneratorRequest,
    generator: &dyn Generator,
) -> Result<Vec<GeneratedFile>, FirmentError> {
    let model = build_request_model(request);
    let selected = verify_request(&model)?;

    let registry = EnumRegistry::build(&model.files);
    let options = GeneratorOptions::parse(model.parameter.as_deref());
    debug!(enums = registry.len(), ?options, "collected enums");

    let ctx = Context {
        registry: &registry,
        options:  &options,
        selected: selected.len(),
    };

    let mut files = Vec::new();
    for &file in &selected {
        files.extend(generator.generate_file(file, &ctx)?);
    }

    info!(
        generator = generator.name(),
        inputs = selected.len(),
        outputs = files.len(),
        "generation finished"
    );
    Ok(files)
}

/// Request bytes in, response bytes out. Nothing is produced on error.
pub fn run(buffer: &[u8], generator: &dyn Generator) -> Result<Vec<u8>, FirmentError> {
    let request = decode_request(buffer)?;
    let files = generate(&request, generator)?;
    Ok(encode_response(&files))
}
