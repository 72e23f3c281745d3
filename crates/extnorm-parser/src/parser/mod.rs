pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
pub use node::{Node, NodeArena, NodeFlags, syntax_kind_ext};

mod node_factory;

pub mod state;
pub use state::ParserState;

mod state_expressions;
mod state_statements;
