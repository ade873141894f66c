pub mod rule;
pub mod story;
pub mod symbol;
