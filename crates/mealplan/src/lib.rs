mod extras;
mod goals;
mod nutrition;
mod plan;
mod planner;
mod service;
mod types;

pub use extras::*;
pub use goals::*;
pub use nutrition::*;
pub use plan::*;
pub use planner::*;
pub use service::*;
pub use types::*;
