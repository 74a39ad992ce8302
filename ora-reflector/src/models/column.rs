use crate::type_mapper::{lookup_type, map_type, RustType};

#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ColumnDescriptor {
    pub name: String,
    /// The type as reported by the catalog, before any mapping.
    pub native_type: String,
    pub nullable: bool,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
}

impl ColumnDescriptor {
    pub fn new(name: &str, native_type: &str, nullable: bool) -> Self {
        ColumnDescriptor {
            name: name.to_string(),
            native_type: native_type.to_string(),
            nullable,
            ..Default::default()
        }
    }

    pub fn with_precision(mut self, precision: i32, scale: i32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// The Rust type of this column, falling back to `String` for unknown native types.
    pub fn rust_type(&self) -> RustType {
        map_type(&self.native_type, self.precision, self.scale)
    }

    /// Like [`ColumnDescriptor::rust_type`], but `None` when the native type is unknown.
    pub fn known_rust_type(&self) -> Option<RustType> {
        lookup_type(&self.native_type, self.precision, self.scale)
    }
}
