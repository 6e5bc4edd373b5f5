pub mod bpchar;

pub use bpchar::BpCharTransformer;
