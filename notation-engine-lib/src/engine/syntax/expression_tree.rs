use crate::engine::error::NotationError;
use crate::engine::evaluator::Evaluation;
use crate::engine::operator::BinaryOperator;
use crate::engine::syntax::stack_visitor::{walk, StackVisitor};
use crate::engine::token::{AsToken, Operand, Token};
use crate::engine::validator::{check_postfix, check_prefix};
use crate::engine::Notation;
use itertools::Itertools;
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::mem;

/// Subtrees nested deeper than this are drawn as one line of prefix tokens.
const MAX_DRAWN_DEPTH: usize = 128;

/// A node of an expression tree.
///
/// Every traversal keeps its own stack instead of recursing, so trees as deep as the
/// longest expression the evaluators accept can be rendered, evaluated and dropped.
pub enum Node {
    // Terminal symbols (leaves)
    Operand(Operand),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
}

impl Node {
    pub fn new_operand(value: i32) -> Node {
        Node::Operand(Operand::from(value))
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    /// Builds the tree of a prefix expression.
    ///
    /// # Examples
    ///
    /// ```
    /// # use notation_engine::engine::NotationError;
    /// use notation_engine::engine::syntax::expression_tree::Node;
    ///
    /// let tree = Node::from_prefix(&["-", "5", "3"])?;
    /// assert_eq!(tree.evaluate()?, 2);
    /// print!("{}", tree);
    /// # Ok::<(), NotationError>(())
    /// ```
    pub fn from_prefix<T: AsToken>(tokens: &[T]) -> Result<Node, NotationError> {
        let tokens = check_prefix(tokens)?;
        walk(&tokens, Notation::Prefix, &mut TreeBuilding)
    }

    /// Builds the tree of a postfix expression.
    pub fn from_postfix<T: AsToken>(tokens: &[T]) -> Result<Node, NotationError> {
        let tokens = check_postfix(tokens)?;
        walk(&tokens, Notation::Postfix, &mut TreeBuilding)
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Node::Operand(_))
    }

    /// Number of tokens in the prefix or postfix rendering of this subtree.
    pub fn token_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            if let Node::BinaryOperation {
                left_operand,
                right_operand,
                ..
            } = node
            {
                pending.push(left_operand);
                pending.push(right_operand);
            }
        }
        count
    }

    /// Evaluates the tree.
    ///
    /// Errors locate the failing operator by its index in the prefix rendering of the tree.
    pub fn evaluate(&self) -> Result<i32, NotationError> {
        walk(&self.to_prefix(), Notation::Prefix, &mut Evaluation)
    }

    pub fn to_prefix(&self) -> Vec<Token> {
        self.build_expression(Notation::Prefix)
    }

    pub fn to_postfix(&self) -> Vec<Token> {
        self.build_expression(Notation::Postfix)
    }

    pub fn to_infix(&self) -> Vec<Token> {
        self.build_expression(Notation::Infix)
    }

    pub fn to_notation(&self, notation: Notation) -> Vec<Token> {
        self.build_expression(notation)
    }

    fn build_expression(&self, notation: Notation) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pending = vec![Rendering::Node(self)];
        while let Some(next) = pending.pop() {
            match next {
                Rendering::Token(token) => tokens.push(token),
                Rendering::Node(Node::Operand(operand)) => {
                    tokens.push(Token::Operand(operand.clone()))
                }
                Rendering::Node(Node::BinaryOperation {
                    operator,
                    left_operand,
                    right_operand,
                }) => {
                    let left = Rendering::Node(left_operand);
                    let right = Rendering::Node(right_operand);
                    let operator = Rendering::Token(operator.token());
                    // Pushed in reverse, the last one pushed is emitted first.
                    match notation {
                        Notation::Prefix => pending.extend([right, left, operator]),
                        Notation::Postfix => pending.extend([operator, right, left]),
                        Notation::Infix => pending.extend([
                            Rendering::Token(Token::RightParenthesis),
                            right,
                            operator,
                            left,
                            Rendering::Token(Token::LeftParenthesis),
                        ]),
                    }
                }
            }
        }
        tokens
    }

    fn add_to_tree(&self, builder: &mut TreeBuilder) {
        let mut pending = vec![Drawing::Node(self, 0)];
        while let Some(next) = pending.pop() {
            match next {
                Drawing::EndChild => {
                    builder.end_child();
                }
                Drawing::Node(Node::Operand(operand), _) => {
                    builder.add_empty_child(operand.text().to_string());
                }
                Drawing::Node(node, depth) if depth >= MAX_DRAWN_DEPTH => {
                    builder.add_empty_child(node.to_prefix().iter().join(" "));
                }
                Drawing::Node(
                    Node::BinaryOperation {
                        operator,
                        left_operand,
                        right_operand,
                    },
                    depth,
                ) => {
                    builder.begin_child(format!("{}", operator));
                    pending.push(Drawing::EndChild);
                    pending.push(Drawing::Node(right_operand, depth + 1));
                    pending.push(Drawing::Node(left_operand, depth + 1));
                }
            }
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut builder = TreeBuilder::new("expression".into());
        self.add_to_tree(&mut builder);

        let mut buffer: Vec<u8> = Vec::new();
        if write_tree(&builder.build(), &mut buffer).is_err() {
            return Err(fmt::Error);
        }
        let text = std::str::from_utf8(&buffer).map_err(|_| fmt::Error)?;
        f.write_str(text)
    }

    /// Moves child operations out into `detached`, leaving placeholder leaves behind.
    fn detach_operations(&mut self, detached: &mut Vec<Node>) {
        if let Node::BinaryOperation {
            left_operand,
            right_operand,
            ..
        } = self
        {
            for child in [left_operand, right_operand] {
                if !child.is_operand() {
                    let placeholder = Node::Operand(Operand::placeholder());
                    detached.push(mem::replace(&mut **child, placeholder));
                }
            }
        }
    }
}

enum Rendering<'a> {
    Node(&'a Node),
    Token(Token),
}

enum Drawing<'a> {
    Node(&'a Node, usize),
    EndChild,
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_operations(&mut detached);
        while let Some(mut node) = detached.pop() {
            // Left with leaf children only, so dropping it does not recurse.
            node.detach_operations(&mut detached);
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Node::Operand(operand), Node::Operand(other_operand)) => {
                    if operand != other_operand {
                        return false;
                    }
                }
                (
                    Node::BinaryOperation {
                        operator,
                        left_operand,
                        right_operand,
                    },
                    Node::BinaryOperation {
                        operator: other_operator,
                        left_operand: other_left_operand,
                        right_operand: other_right_operand,
                    },
                ) => {
                    if operator != other_operator {
                        return false;
                    }
                    pending.push((&**left_operand, &**other_left_operand));
                    pending.push((&**right_operand, &**other_right_operand));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Node {}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.to_prefix().iter().join(" "))
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

/// Generates an expression tree from tokens written in the given notation.
///
/// # Arguments
///
/// * `tokens`: The expression to build a tree of.
/// * `notation`: Either prefix or postfix; infix can not be read.
///
/// returns: The root of the generated expression tree.
pub fn new_tree<T: AsToken>(tokens: &[T], notation: Notation) -> Result<Node, NotationError> {
    match notation {
        Notation::Prefix => Node::from_prefix(tokens),
        Notation::Postfix => Node::from_postfix(tokens),
        Notation::Infix => Err(NotationError::UnsupportedNotation { notation }),
    }
}

struct TreeBuilding;

impl StackVisitor for TreeBuilding {
    type Output = Node;

    fn visit_operand(&mut self, operand: &Operand, _position: usize) -> Result<Node, NotationError> {
        Ok(Node::Operand(operand.clone()))
    }

    fn visit_operator(
        &mut self,
        operator: BinaryOperator,
        _position: usize,
        left_operand: Node,
        right_operand: Node,
    ) -> Result<Node, NotationError> {
        Ok(Node::new_binary_operation(
            operator,
            left_operand,
            right_operand,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::converter::{postfix_to_infix, prefix_to_postfix};
    use crate::engine::evaluator::evaluate_prefix;
    use crate::engine::render;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_prefix_expression_returns_correct_tree() {
        let tree = Node::from_prefix(&["-", "5", "3"]).unwrap();

        assert_eq!(tree, create_simple_tree());
    }

    #[test]
    fn complex_postfix_expression_returns_correct_tree() {
        let tree = Node::from_postfix(&create_complex_postfix_tokens()).unwrap();

        assert_eq!(tree, create_complex_tree());
    }

    #[test]
    fn prefix_and_postfix_of_same_expression_give_same_tree() {
        let prefix = ["+", "1", "*", "-", "2", "3", "4"];
        let postfix = render(&prefix_to_postfix(&prefix).unwrap());

        assert_eq!(
            new_tree(&prefix, Notation::Prefix).unwrap(),
            new_tree(&postfix, Notation::Postfix).unwrap()
        );
    }

    #[test]
    fn complex_tree_converts_back_to_every_notation() {
        let tree = create_complex_tree();
        let postfix = create_complex_postfix_tokens();

        assert_eq!(render(&tree.to_postfix()), postfix);
        assert_eq!(render(&tree.to_prefix()), ["+", "1", "*", "-", "2", "3", "4"]);
        assert_eq!(tree.to_infix(), postfix_to_infix(&postfix).unwrap());
    }

    #[test]
    fn tree_evaluates_like_the_evaluators() {
        assert_eq!(create_complex_tree().evaluate(), Ok(-3));
        assert_eq!(create_simple_tree().evaluate(), Ok(2));
    }

    #[test]
    fn tree_evaluation_locates_division_by_zero_in_prefix_order() {
        let tree = Node::from_postfix(&["1", "6", "0", "/", "+"]).unwrap();

        assert_eq!(
            tree.evaluate(),
            Err(NotationError::DivisionByZero { position: 2 })
        );
    }

    #[test]
    fn to_notation_matches_dedicated_renderers() {
        let tree = create_complex_tree();

        assert!(!tree.is_operand());
        assert_eq!(tree.to_notation(Notation::Infix), tree.to_infix());
        assert_eq!(tree.to_notation(Notation::Prefix), tree.to_prefix());
    }

    #[test]
    fn tree_length_counts_every_token() {
        assert_eq!(create_complex_tree().token_count(), 7);
    }

    #[test]
    fn new_tree_from_infix_returns_err() {
        let result = new_tree(&["1"], Notation::Infix);
        assert!(matches!(
            result,
            Err(NotationError::UnsupportedNotation { .. })
        ))
    }

    #[test]
    fn invalid_expression_returns_err() {
        assert!(Node::from_prefix(&["1", "+"]).is_err());
        assert!(Node::from_postfix(&["+", "1"]).is_err());
    }

    #[test]
    fn print_succeeds() {
        let tree = create_complex_tree();

        let printed = format!("{}", tree);

        assert!(printed.starts_with("expression"));
        assert!(printed.contains('*'));
    }

    #[test]
    fn deep_tree_is_built_evaluated_and_dropped() {
        let prefix = create_left_leaning_prefix(20_000);
        let postfix = prefix_to_postfix(&prefix).unwrap();

        let tree = Node::from_prefix(&prefix).unwrap();

        assert_eq!(tree.evaluate(), evaluate_prefix(&prefix));
        assert_eq!(tree.evaluate(), Ok(20_001));
        assert_eq!(tree.token_count(), prefix.len());
        assert!(tree.to_postfix() == postfix);
        assert!(tree == Node::from_postfix(&postfix).unwrap());
    }

    #[test]
    fn deep_tree_prints_its_deepest_part_as_tokens() {
        let tree = Node::from_prefix(&create_left_leaning_prefix(1_000)).unwrap();

        let printed = format!("{}", tree);

        assert!(printed.starts_with("expression"));
        assert!(printed.contains("+ + +"));
    }

    #[test]
    fn trees_with_different_operators_are_not_equal() {
        let subtraction = Node::from_prefix(&["-", "5", "3"]).unwrap();
        let addition = Node::from_prefix(&["+", "5", "3"]).unwrap();

        assert_ne!(subtraction, addition);
        assert_ne!(subtraction, Node::new_operand(2));
        assert_eq!(format!("{:?}", subtraction), "Node(- 5 3)");
    }

    /// `operators` additions of ones, nested on the left.
    fn create_left_leaning_prefix(operators: usize) -> Vec<String> {
        let mut tokens = vec!["+".to_string(); operators];
        tokens.extend(vec!["1".to_string(); operators + 1]);
        tokens
    }

    fn create_simple_tree() -> Node {
        Node::new_binary_operation(
            BinaryOperator::Subtract,
            Node::new_operand(5),
            Node::new_operand(3),
        )
    }

    fn create_complex_postfix_tokens() -> Vec<&'static str> {
        // 1 + ((2 - 3) * 4)
        vec!["1", "2", "3", "-", "4", "*", "+"]
    }

    fn create_complex_tree() -> Node {
        let one = Node::new_operand(1);
        let two = Node::new_operand(2);
        let three = Node::new_operand(3);
        let four = Node::new_operand(4);
        let minus = Node::new_binary_operation(BinaryOperator::Subtract, two, three);
        let star = Node::new_binary_operation(BinaryOperator::Multiply, minus, four);
        Node::new_binary_operation(BinaryOperator::Add, one, star)
    }
}
