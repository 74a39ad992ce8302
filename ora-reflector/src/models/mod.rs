mod column;
mod struct_definition;
mod table;

pub use column::*;
pub use struct_definition::*;
pub use table::*;
