//! Parse tree to AST.
//!
//! [`build`] dispatches on the rule tag of a parse-tree node and produces
//! exactly one [`Node`]: an AST node, a list, or the raw text of a leaf. The
//! match is exhaustive over [`Rule`], so a rule added to the grammar without
//! a handler here fails to compile.
//!
//! Precedence is never decided here. Each level of the expression ladder is
//! matched by the grammar as `operand (operator operand)*` and folded
//! left-to-right, except `**` whose grammar rule is right-recursive and is
//! built by plain recursion.

use log::trace;
use pest::iterators::{Pair, Pairs};

use crate::ast::*;
use crate::errors::ParseError;
use crate::syntax::grammar::Rule;

/// The result of building one parse-tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program(Program),
    Body(Body),
    Statement(Statement),
    Expression(Expression),
    List(Vec<Node>),
    /// Raw source text: identifiers, keywords and operators.
    Text(String),
}

impl Node {
    /// Identifiers in expression position become [`Expression::Identifier`].
    fn into_expression(self) -> Option<Expression> {
        match self {
            Node::Expression(expr) => Some(expr),
            Node::Text(name) => Some(Expression::Identifier(name)),
            _ => None,
        }
    }

    fn into_statement(self) -> Option<Statement> {
        match self {
            Node::Statement(stmt) => Some(stmt),
            other => other.into_expression().map(Statement::Expression),
        }
    }

    fn into_body(self) -> Option<Body> {
        match self {
            Node::Body(body) => Some(body),
            _ => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Builds the [`Program`] rooted at a `program` parse-tree node.
pub fn build_program(pair: Pair<'_, Rule>) -> Result<Program, ParseError> {
    let rule = pair.as_rule();
    match build(pair)? {
        Node::Program(program) => Ok(program),
        _ => Err(ParseError::unhandled(rule)),
    }
}

/// Builds one parse-tree node.
pub fn build(pair: Pair<'_, Rule>) -> Result<Node, ParseError> {
    let rule = pair.as_rule();
    trace!("build {:?}: {:?}", rule, pair.as_str());

    match rule {
        // --------------------------------------------------------------------
        // Structure: delimiters and block markers are not part of the tree.
        // --------------------------------------------------------------------
        Rule::program => {
            let mut inner = pair.into_inner();
            let body = body(next(&mut inner, rule)?)?;
            Ok(Node::Program(Program { body }))
        }

        Rule::body => {
            let statements = pair
                .into_inner()
                .map(statement)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::Body(Body::new(statements)))
        }

        Rule::suite => {
            let mut inner = pair.into_inner();
            body(next(&mut inner, rule)?).map(Node::Body)
        }

        // --------------------------------------------------------------------
        // Statements
        // --------------------------------------------------------------------
        Rule::declaration => {
            let mut inner = pair.into_inner();
            let names = names(next(&mut inner, rule)?)?;
            let initializers = expressions(next(&mut inner, rule)?)?;
            Ok(Node::Statement(Statement::VarDec(VariableDeclaration {
                names,
                initializers,
            })))
        }

        Rule::assignment => {
            let mut inner = pair.into_inner();
            let targets = names(next(&mut inner, rule)?)?;
            let values = expressions(next(&mut inner, rule)?)?;
            Ok(Node::Statement(Statement::VarAsgn(Assignment {
                targets,
                values,
            })))
        }

        Rule::while_statement => {
            let mut inner = pair.into_inner();
            next(&mut inner, rule)?; // `while`
            let condition = expression(next(&mut inner, rule)?)?;
            let body = body(next(&mut inner, rule)?)?;
            Ok(Node::Statement(Statement::While(WhileStatement {
                condition,
                body,
            })))
        }

        Rule::return_statement => {
            let mut inner = pair.into_inner();
            next(&mut inner, rule)?; // `return`
            let value = unpack(inner.next())?;
            Ok(Node::Statement(Statement::Return(Return { value })))
        }

        Rule::function_declaration => {
            let mut inner = pair.into_inner();
            next(&mut inner, rule)?; // `fn`
            let name = text(next(&mut inner, rule)?)?;
            let mut rest = next(&mut inner, rule)?;
            let parameters = if rest.as_rule() == Rule::identifier_list {
                let parameters = names(rest)?;
                rest = next(&mut inner, rule)?;
                parameters
            } else {
                Vec::new()
            };
            let body = body(rest)?;
            Ok(Node::Statement(Statement::FunctionDeclaration(
                FunctionDeclaration {
                    name,
                    parameters,
                    body,
                },
            )))
        }

        // --------------------------------------------------------------------
        // Expression ladder
        // --------------------------------------------------------------------
        Rule::expression => {
            let mut inner = pair.into_inner();
            let condition = next(&mut inner, rule)?;
            match (inner.next(), inner.next()) {
                (None, _) => build(condition),
                (Some(then_branch), Some(else_branch)) => {
                    Ok(Node::Expression(Expression::Ternary(TernaryExpression {
                        condition: Box::new(expression(condition)?),
                        then_branch: Box::new(expression(then_branch)?),
                        else_branch: Box::new(expression(else_branch)?),
                    })))
                }
                (Some(_), None) => Err(ParseError::unhandled(rule)),
            }
        }

        Rule::disjunction
        | Rule::exclusive
        | Rule::conjunction
        | Rule::comparison
        | Rule::additive
        | Rule::multiplicative => binary_chain(pair),

        Rule::power => {
            let mut inner = pair.into_inner();
            let base = next(&mut inner, rule)?;
            let Some(op) = inner.next() else {
                return build(base);
            };
            let operator = binary_operator(op)?;
            let exponent = expression(next(&mut inner, rule)?)?;
            Ok(Node::Expression(binary(operator, expression(base)?, exponent)))
        }

        Rule::negation => {
            let mut inner = pair.into_inner();
            let first = next(&mut inner, rule)?;
            let Some(operand) = inner.next() else {
                return build(first);
            };
            let operator = unary_operator(first)?;
            Ok(Node::Expression(Expression::Unary(UnaryExpression {
                operator,
                operand: Box::new(expression(operand)?),
            })))
        }

        Rule::member => {
            let mut inner = pair.into_inner();
            let first = next(&mut inner, rule)?;
            if inner.peek().is_none() {
                return build(first);
            }
            let mut object = expression(first)?;
            while let Some(link) = inner.next() {
                let operand = expression(next(&mut inner, rule)?)?;
                object = match link.as_rule() {
                    Rule::dot => Expression::Accessor(Accessor {
                        object: Box::new(object),
                        property: Box::new(operand),
                    }),
                    _ => binary(binary_operator(link)?, object, operand),
                };
            }
            Ok(Node::Expression(object))
        }

        // --------------------------------------------------------------------
        // Postfix and primary forms
        // --------------------------------------------------------------------
        Rule::call => {
            let mut inner = pair.into_inner();
            let callee = expression(next(&mut inner, rule)?)?;
            let arguments = match inner.next() {
                Some(list) => expressions(list)?,
                None => Vec::new(),
            };
            Ok(Node::Expression(Expression::Call(FunctionCall {
                callee: Box::new(callee),
                arguments,
            })))
        }

        Rule::subscript => {
            let mut inner = pair.into_inner();
            let base = expression(next(&mut inner, rule)?)?;
            let index = expression(next(&mut inner, rule)?)?;
            Ok(Node::Expression(Expression::Subscripted(
                SubscriptedExpression {
                    base: Box::new(base),
                    index: Box::new(index),
                },
            )))
        }

        Rule::parenthesized => build(ungroup(pair)),

        Rule::identifier_list | Rule::expression_list => pair
            .into_inner()
            .map(build)
            .collect::<Result<Vec<_>, _>>()
            .map(Node::List),

        Rule::const_id | Rule::package_id | Rule::var_id => Ok(Node::Text(pair.as_str().into())),

        // --------------------------------------------------------------------
        // Literals
        // --------------------------------------------------------------------
        Rule::boolean_literal => Ok(Node::Expression(Expression::BooleanLiteral(
            pair.as_str() == "true",
        ))),

        Rule::numeric_literal => pair
            .as_str()
            .parse::<f64>()
            .map(|value| Node::Expression(Expression::NumericLiteral(value)))
            .map_err(|_| ParseError::unhandled(rule)),

        Rule::string_literal => Ok(Node::Expression(Expression::StringLiteral(
            pair.as_str().into(),
        ))),

        Rule::error_literal => Ok(Node::Expression(Expression::ErrorLiteral(
            pair.as_str().into(),
        ))),

        // --------------------------------------------------------------------
        // Leaf tokens
        // --------------------------------------------------------------------
        Rule::kw_while
        | Rule::kw_return
        | Rule::kw_fn
        | Rule::op_or
        | Rule::op_xor
        | Rule::op_and
        | Rule::op_not
        | Rule::op_comparison
        | Rule::op_additive
        | Rule::op_multiplicative
        | Rule::op_power
        | Rule::op_range
        | Rule::dot => Ok(Node::Text(pair.as_str().into())),

        // Silent or lookahead-only rules never reach the builder.
        Rule::WHITESPACE
        | Rule::COMMENT
        | Rule::indent
        | Rule::dedent
        | Rule::statement
        | Rule::compound_statement
        | Rule::simple_statement
        | Rule::property
        | Rule::primary
        | Rule::literal
        | Rule::identifier
        | Rule::ident_char
        | Rule::keyword
        | Rule::EOI => Err(ParseError::unhandled(rule)),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn next<'i>(inner: &mut Pairs<'i, Rule>, parent: Rule) -> Result<Pair<'i, Rule>, ParseError> {
    inner.next().ok_or_else(|| ParseError::unhandled(parent))
}

fn expect<T>(pair: Pair<'_, Rule>, convert: fn(Node) -> Option<T>) -> Result<T, ParseError> {
    let rule = pair.as_rule();
    convert(build(pair)?).ok_or_else(|| ParseError::unhandled(rule))
}

fn list<T>(pair: Pair<'_, Rule>, convert: fn(Node) -> Option<T>) -> Result<Vec<T>, ParseError> {
    let rule = pair.as_rule();
    match build(pair)? {
        Node::List(items) => items
            .into_iter()
            .map(|item| convert(item).ok_or_else(|| ParseError::unhandled(rule)))
            .collect(),
        _ => Err(ParseError::unhandled(rule)),
    }
}

fn expression(pair: Pair<'_, Rule>) -> Result<Expression, ParseError> {
    expect(pair, Node::into_expression)
}

fn statement(pair: Pair<'_, Rule>) -> Result<Statement, ParseError> {
    expect(pair, Node::into_statement)
}

fn body(pair: Pair<'_, Rule>) -> Result<Body, ParseError> {
    expect(pair, Node::into_body)
}

fn text(pair: Pair<'_, Rule>) -> Result<String, ParseError> {
    expect(pair, Node::into_text)
}

fn names(pair: Pair<'_, Rule>) -> Result<Vec<String>, ParseError> {
    list(pair, Node::into_text)
}

fn expressions(pair: Pair<'_, Rule>) -> Result<Vec<Expression>, ParseError> {
    list(pair, Node::into_expression)
}

/// Builds an optional expression child, looking through any grouping.
fn unpack(pair: Option<Pair<'_, Rule>>) -> Result<Option<Expression>, ParseError> {
    pair.map(|pair| expression(ungroup(pair))).transpose()
}

/// Descends through parentheses and single-operand ladder levels to the node
/// that actually carries the expression.
fn ungroup(pair: Pair<'_, Rule>) -> Pair<'_, Rule> {
    let mut pair = pair;
    while is_transparent(pair.as_rule()) {
        let mut inner = pair.clone().into_inner();
        match (inner.next(), inner.next()) {
            (Some(only), None) => pair = only,
            _ => break,
        }
    }
    pair
}

fn is_transparent(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::parenthesized
            | Rule::expression
            | Rule::disjunction
            | Rule::exclusive
            | Rule::conjunction
            | Rule::comparison
            | Rule::additive
            | Rule::multiplicative
            | Rule::power
            | Rule::negation
            | Rule::member
    )
}

/// Folds `operand (operator operand)*` to the left.
fn binary_chain(pair: Pair<'_, Rule>) -> Result<Node, ParseError> {
    let rule = pair.as_rule();
    let mut inner = pair.into_inner();
    let first = next(&mut inner, rule)?;
    if inner.peek().is_none() {
        return build(first);
    }

    let mut left = expression(first)?;
    while let Some(op) = inner.next() {
        let operator = binary_operator(op)?;
        let right = expression(next(&mut inner, rule)?)?;
        left = binary(operator, left, right);
    }
    Ok(Node::Expression(left))
}

fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
    Expression::Binary(BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn binary_operator(pair: Pair<'_, Rule>) -> Result<BinaryOperator, ParseError> {
    let rule = pair.as_rule();
    let symbol = text(pair)?;
    BinaryOperator::from_symbol(&symbol).ok_or_else(|| ParseError::unhandled(rule))
}

fn unary_operator(pair: Pair<'_, Rule>) -> Result<UnaryOperator, ParseError> {
    let rule = pair.as_rule();
    let symbol = text(pair)?;
    UnaryOperator::from_symbol(&symbol).ok_or_else(|| ParseError::unhandled(rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::JenParser;
    use pest::Parser;

    fn build_rule(rule: Rule, input: &str) -> Node {
        let pair = JenParser::parse(rule, input).unwrap().next().unwrap();
        build(pair).unwrap()
    }

    fn expr(input: &str) -> String {
        match build_rule(Rule::expression, input).into_expression() {
            Some(expr) => expr.to_string(),
            None => panic!("not an expression: {}", input),
        }
    }

    #[test]
    fn test_identifier_list_keeps_order() {
        let node = build_rule(Rule::identifier_list, "a, b, c");
        assert_eq!(
            node,
            Node::List(vec![
                Node::Text("a".into()),
                Node::Text("b".into()),
                Node::Text("c".into()),
            ])
        );
    }

    #[test]
    fn test_identifiers_are_raw_text() {
        assert_eq!(build_rule(Rule::var_id, "count"), Node::Text("count".into()));
        assert_eq!(build_rule(Rule::const_id, "MAX"), Node::Text("MAX".into()));
        assert_eq!(build_rule(Rule::package_id, "Math"), Node::Text("Math".into()));
    }

    #[test]
    fn test_operators_fall_back_to_source_text() {
        assert_eq!(build_rule(Rule::op_comparison, "<="), Node::Text("<=".into()));
        assert_eq!(build_rule(Rule::op_not, "not"), Node::Text("not".into()));
    }

    #[test]
    fn test_left_associative_levels_fold_left() {
        assert_eq!(
            expr("a - b - c"),
            r#"BinaryExpression("-", BinaryExpression("-", "a", "b"), "c")"#
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            expr("a ** b ** c"),
            r#"BinaryExpression("**", "a", BinaryExpression("**", "b", "c"))"#
        );
    }

    #[test]
    fn test_ungroup_reaches_the_inner_expression() {
        let pair = JenParser::parse(Rule::expression, "((x + 1))")
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(ungroup(pair).as_rule(), Rule::additive);
    }

    #[test]
    fn test_silent_rules_are_unhandled() {
        let pair = JenParser::parse(Rule::program, "").unwrap().next().unwrap();
        let eoi = pair.into_inner().nth(1).unwrap();
        assert_eq!(eoi.as_rule(), Rule::EOI);
        assert!(matches!(
            build(eoi),
            Err(ParseError::UnhandledRule { rule }) if rule == "EOI"
        ));
    }
}
