use serde::Serialize;
use crate::helpers::StringExt;
use crate::struct_renderer::RenderOptions;

/// A single generated struct, derived from one table and its columns.
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize)]
pub struct StructDefinition {
    pub struct_name: String,
    pub source_comment: String,
    /// In the same order as the catalog returned the columns.
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub field_name: String,
    /// The bare Rust type, without the `Option` wrapper for nullable columns.
    pub type_name: String,
    pub nullable: bool,
}

impl FieldDefinition {
    pub fn rendered_type(&self) -> String {
        if self.nullable {
            format!("Option<{}>", self.type_name)
        } else {
            self.type_name.clone()
        }
    }
}

impl StructDefinition {
    pub fn to_declaration(&self, options: &RenderOptions) -> String {
        let mut decl = String::new();

        decl.push_str("// ");
        decl.push_str(&self.source_comment);
        decl.push('\n');

        if !options.derives.is_empty() {
            decl.push_str("#[derive(");
            decl.push_join(", ", &options.derives);
            decl.push_str(")]\n");
        }

        decl.push_str("pub struct ");
        decl.push_str(&self.struct_name);
        decl.push_str(" {\n");

        for field in &self.fields {
            decl.push_str("    pub ");
            decl.push_str(&field.field_name);
            decl.push_str(": ");
            decl.push_str(&field.rendered_type());
            decl.push_str(",\n");
        }

        decl.push('}');

        decl
    }
}
