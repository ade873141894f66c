pub mod catalog;
pub mod engine;
pub mod matcher;
pub mod stories;
pub mod synthesis;
pub mod validation;
