//! Decides how much of a filter a backend can evaluate.

pub mod capabilities;
pub mod plan;
pub mod prune;
pub mod resolver;
pub mod transform;

pub use capabilities::CapabilitySet;
pub use plan::{FixedWidthRewrite, plan, plan_tree};
pub use prune::{CapabilityPruner, prune};
pub use resolver::ColumnResolver;
pub use transform::BpCharTransformer;
