mod category;
mod kinds;
mod table;

pub use category::FunctionCategory;
pub use kinds::{ClientFunction, Function, ProtocolFunction};
pub use table::FunctionSpec;
