use prost::Message;
use prost_types::{
    compiler::{code_generator_response, CodeGeneratorRequest, CodeGeneratorResponse},
    FileDescriptorSet,
};

use crate::{assembler::GeneratedFile, error::FirmentError, types::RequestModel};

/// Oldest protoc major version whose requests we understand.
pub const MIN_COMPILER_MAJOR: i32 = 3;

/// `CodeGeneratorResponse.Feature.FEATURE_PROTO3_OPTIONAL`.
const FEATURE_PROTO3_OPTIONAL: u64 = 1;

/// Decode a `CodeGeneratorRequest` as written by protoc.
/// Returns `Err(FirmentError::DecodeError)` for malformed bytes or a request
/// produced by an unsupported compiler version.
pub fn decode_request(buffer: &[u8]) -> Result<CodeGeneratorRequest, FirmentError> {
    let request = CodeGeneratorRequest::decode(buffer)
        .map_err(|e| FirmentError::DecodeError(format!("Malformed CodeGeneratorRequest: {}", e)))?;

    if let Some(version) = &request.compiler_version {
        if version.major() < MIN_COMPILER_MAJOR {
            return Err(FirmentError::DecodeError(format!(
                "Unsupported compiler version {}.{}.{}",
                version.major(),
                version.minor(),
                version.patch()
            )));
        }
    }

    Ok(request)
}

/// Encode the generated files into a `CodeGeneratorResponse`.
pub fn encode_response(files: &[GeneratedFile]) -> Vec<u8> {
    let response = CodeGeneratorResponse {
        supported_features: Some(FEATURE_PROTO3_OPTIONAL),
        file: files
            .iter()
            .map(|f| code_generator_response::File {
                name: Some(f.name.clone()),
                content: Some(f.content.clone()),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };
    response.encode_to_vec()
}

/// Decode the files carried by a response, in order.
pub fn decode_response(buffer: &[u8]) -> Result<Vec<GeneratedFile>, FirmentError> {
    let response = CodeGeneratorResponse::decode(buffer)
        .map_err(|e| FirmentError::DecodeError(format!("Malformed CodeGeneratorResponse: {}", e)))?;
    Ok(response
        .file
        .into_iter()
        .map(|f| GeneratedFile {
            name:    f.name.unwrap_or_default(),
            content: f.content.unwrap_or_default(),
        })
        .collect())
}

/// Decode a `FileDescriptorSet`, as written by `protoc --descriptor_set_out`.
pub fn decode_descriptor_set(buffer: &[u8]) -> Result<FileDescriptorSet, FirmentError> {
    FileDescriptorSet::decode(buffer)
        .map_err(|e| FirmentError::DecodeError(format!("Malformed FileDescriptorSet: {}", e)))
}

/// Build the request protoc would send for `set`. An empty `selected` list
/// selects every file in the set.
pub fn request_from_descriptor_set(
    set: FileDescriptorSet,
    selected: &[String],
    parameter: Option<String>,
) -> CodeGeneratorRequest {
    let file_to_generate = if selected.is_empty() {
        set.file.iter().map(|f| f.name().to_string()).collect()
    } else {
        selected.to_vec()
    };

    CodeGeneratorRequest {
        file_to_generate,
        parameter,
        proto_file: set.file,
        ..Default::default()
    }
}

/// Pretty-printed JSON view of a schema model, for `fgen inspect`.
pub fn model_to_json(model: &RequestModel) -> Result<String, FirmentError> {
    serde_json::to_string_pretty(model).map_err(|e| FirmentError::EncodeError(e.to_string()))
}
