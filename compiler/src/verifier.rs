use crate::{
    error::FirmentError,
    types::{FileSchema, RequestModel},
    utils::quote,
};

/// Returns the files selected for generation, in selection order, or
/// `Err(FirmentError::SchemaError(_))` if one of them was not supplied.
pub fn verify_request(model: &RequestModel) -> Result<Vec<&FileSchema>, FirmentError> {
    model
        .files_to_generate
        .iter()
        .map(|name| {
            model.file(name).ok_or_else(|| {
                FirmentError::SchemaError(format!(
                    "The file {} is selected for generation but its descriptor was not supplied",
                    quote(name)
                ))
            })
        })
        .collect()
}
