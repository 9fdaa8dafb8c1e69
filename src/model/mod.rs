pub mod graph;
pub mod node;
pub mod outline;
pub mod parser;
pub mod performance;
