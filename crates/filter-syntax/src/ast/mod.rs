pub mod display;
pub mod node;
pub mod operand;
pub mod operator;
pub mod visitor;
