mod scale;
mod store;
mod types;

pub use scale::*;
pub use store::*;
pub use types::*;
