use crate::helpers::StringExt;
use crate::models::{ColumnDescriptor, FieldDefinition, StructDefinition};

/// The derives put on every generated struct unless configured otherwise.
pub const DEFAULT_DERIVES: &[&str] = &["Debug", "Clone", "Serialize", "Deserialize", "RowValue"];

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RenderOptions {
    /// Names placed in the `#[derive(...)]` attribute. No attribute is emitted when empty.
    pub derives: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            derives: DEFAULT_DERIVES.iter().map(|d| d.to_string()).collect(),
        }
    }
}

pub struct StructRenderer {
    options: RenderOptions,
}

impl StructRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders the declaration block for a table.
    pub fn render(&self, owner: &str, table_name: &str, columns: &[ColumnDescriptor]) -> String {
        self.build(owner, table_name, columns)
            .to_declaration(&self.options)
    }

    pub fn build(&self, owner: &str, table_name: &str, columns: &[ColumnDescriptor]) -> StructDefinition {
        self.build_named(struct_name(table_name), owner, table_name, columns)
    }

    /// Like [`StructRenderer::build`], but with a struct name decided by the caller.
    pub(crate) fn build_named(
        &self,
        struct_name: String,
        owner: &str,
        table_name: &str,
        columns: &[ColumnDescriptor],
    ) -> StructDefinition {
        let fields = columns
            .iter()
            .map(|column| FieldDefinition {
                field_name: field_name(&column.name),
                type_name: column.rust_type().to_string(),
                nullable: column.nullable,
            })
            .collect();

        StructDefinition {
            struct_name,
            source_comment: format!("Table: {}.{}", owner, table_name),
            fields,
        }
    }
}

/// Converts a table name to a struct name: `user_accounts` becomes `UserAccounts`.
///
/// Characters that cannot appear in an identifier split segments the same way `_` does,
/// and a name starting with a digit gets a leading `_`.
pub fn struct_name(table_name: &str) -> String {
    let mut name = String::with_capacity(table_name.len());

    for segment in table_name.split(|c: char| !c.is_alphanumeric()) {
        name.push_capitalized(segment);
    }

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    name
}

pub fn field_name(column_name: &str) -> String {
    column_name.to_lowercase()
}
