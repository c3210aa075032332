pub mod symbol;
pub mod value;

pub use symbol::SymbolTable;
pub use value::{ParamKind, ParamValue};
