use crate::{
    assembler::GeneratedFile,
    error::FirmentError,
    options::GeneratorOptions,
    registry::EnumRegistry,
    types::FileSchema,
};

/// Request-wide state shared by every file a generator renders.
pub struct Context<'a> {
    pub registry: &'a EnumRegistry<'a>,
    pub options:  &'a GeneratorOptions,
    /// Number of files selected for generation in this request.
    pub selected: usize,
}

/// A backend turning one selected file into one or more output files.
pub trait Generator {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    fn generate_file(
        &self,
        file: &FileSchema,
        ctx: &Context<'_>,
    ) -> Result<Vec<GeneratedFile>, FirmentError>;
}
