pub mod backup;
pub mod extras;
pub mod goals;
pub mod plan;
pub mod recipes;
pub mod report;

pub use extras::ExtraCommand;
pub use goals::GoalsCommand;
pub use plan::PlanCommand;
pub use recipes::RecipesCommand;
