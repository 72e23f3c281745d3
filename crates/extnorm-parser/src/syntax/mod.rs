pub mod node_util;
pub mod traversal;

pub use node_util::{
    ValueType, get_qualified_name, is_valid_qualified_name, is_valid_simple_name,
    known_value_type, new_qname, new_qname_declaration,
};
pub use traversal::{NodeTraversal, PostOrderCallback};
