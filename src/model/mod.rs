pub mod binding;
pub mod catalog;
pub mod property;

pub use binding::{Attribution, BindingSelection, PropertyBinding};
pub use catalog::PropertyCatalog;
pub use property::{Property, PropertySet, PropertyValue, RawValue};
