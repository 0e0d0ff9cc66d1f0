mod categorization;
mod list;

pub use categorization::*;
pub use list::*;
