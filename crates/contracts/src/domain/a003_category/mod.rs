pub mod aggregate;
pub mod tree;

pub use tree::CategoryNode;
