mod error;
mod facade;
mod variant;

pub use error::Error;
pub use facade::{Direction, FieldTranslator};
pub use variant::{Variant, VariantKind};
