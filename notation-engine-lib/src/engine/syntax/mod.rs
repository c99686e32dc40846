pub mod expression_tree;
pub(crate) mod stack_visitor;
