pub mod mapping;
pub mod node;
pub mod quote;
pub mod table;
pub mod types;
