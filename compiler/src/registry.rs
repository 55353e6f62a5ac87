use std::collections::HashMap;

use tracing::warn;

use crate::{
    error::FirmentError,
    types::{EnumSchema, FileSchema},
};

/// Every enumeration in a request, keyed by fully-qualified name.
///
/// Built once from all files, including ones that are only imported, so that
/// a field in a generated file can reference an enum declared elsewhere.
#[derive(Debug, Default)]
pub struct EnumRegistry<'a> {
    enums: HashMap<&'a str, &'a EnumSchema>,
}

impl<'a> EnumRegistry<'a> {
    pub fn build(files: &'a [FileSchema]) -> Self {
        let mut enums: HashMap<&'a str, &'a EnumSchema> = HashMap::new();

        for file in files {
            for e in &file.enums {
                if enums.contains_key(e.name.as_str()) {
                    // First declaration wins.
                    warn!(enum_name = %e.name, file = %file.name, "duplicate enum declaration ignored");
                    continue;
                }
                enums.insert(e.name.as_str(), e);
            }
        }

        EnumRegistry { enums }
    }

    pub fn get(&self, name: &str) -> Option<&'a EnumSchema> {
        self.enums.get(name).copied()
    }

    /// Resolves `name` for the field `message.field`, failing eagerly when the
    /// enum is unknown.
    pub fn resolve(
        &self,
        name: &str,
        message: &str,
        field: &str,
    ) -> Result<&'a EnumSchema, FirmentError> {
        self.get(name).ok_or_else(|| FirmentError::UnresolvedEnum {
            enum_name: name.to_string(),
            message:   message.to_string(),
            field:     field.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}
