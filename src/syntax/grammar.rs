//! The Jen grammar matcher.
//!
//! `JenParser` is generated from `grammar.pest` at build time. The grammar
//! text is also embedded so tooling can inspect the declared rule set.

use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
pub struct JenParser;

/// Source text of the grammar the parser was generated from.
pub const GRAMMAR_SOURCE: &str = include_str!("grammar.pest");

/// Every rule the generated parser knows about, in grammar order.
pub const RULES: &[Rule] = &[
    Rule::WHITESPACE,
    Rule::COMMENT,
    Rule::indent,
    Rule::dedent,
    Rule::program,
    Rule::body,
    Rule::suite,
    Rule::statement,
    Rule::compound_statement,
    Rule::simple_statement,
    Rule::declaration,
    Rule::assignment,
    Rule::while_statement,
    Rule::return_statement,
    Rule::function_declaration,
    Rule::identifier_list,
    Rule::expression_list,
    Rule::expression,
    Rule::disjunction,
    Rule::exclusive,
    Rule::conjunction,
    Rule::comparison,
    Rule::additive,
    Rule::multiplicative,
    Rule::power,
    Rule::negation,
    Rule::member,
    Rule::property,
    Rule::primary,
    Rule::call,
    Rule::subscript,
    Rule::parenthesized,
    Rule::literal,
    Rule::boolean_literal,
    Rule::numeric_literal,
    Rule::string_literal,
    Rule::error_literal,
    Rule::identifier,
    Rule::const_id,
    Rule::package_id,
    Rule::var_id,
    Rule::ident_char,
    Rule::keyword,
    Rule::kw_while,
    Rule::kw_return,
    Rule::kw_fn,
    Rule::op_or,
    Rule::op_xor,
    Rule::op_and,
    Rule::op_not,
    Rule::op_comparison,
    Rule::op_additive,
    Rule::op_multiplicative,
    Rule::op_power,
    Rule::op_range,
    Rule::dot,
    Rule::EOI,
];

/// Human-readable name of a rule, used in "expected ..." messages.
pub fn describe(rule: Rule) -> &'static str {
    match rule {
        Rule::WHITESPACE => "whitespace",
        Rule::COMMENT => "comment",
        Rule::indent => "indented block",
        Rule::dedent => "end of block",
        Rule::program => "program",
        Rule::body
        | Rule::statement
        | Rule::compound_statement
        | Rule::simple_statement => "statement",
        Rule::suite => "`:` followed by an indented block",
        Rule::declaration => "declaration",
        Rule::assignment => "assignment",
        Rule::while_statement => "while statement",
        Rule::return_statement => "return statement",
        Rule::function_declaration => "function declaration",
        Rule::identifier_list => "identifier list",
        Rule::expression_list => "expression list",
        Rule::expression
        | Rule::disjunction
        | Rule::exclusive
        | Rule::conjunction
        | Rule::comparison
        | Rule::additive
        | Rule::multiplicative
        | Rule::power
        | Rule::negation
        | Rule::member
        | Rule::primary
        | Rule::parenthesized => "expression",
        Rule::property => "property name",
        Rule::call => "function call",
        Rule::subscript => "subscript",
        Rule::literal => "literal",
        Rule::boolean_literal => "boolean",
        Rule::numeric_literal => "number",
        Rule::string_literal => "string",
        Rule::error_literal => "error literal",
        Rule::identifier
        | Rule::const_id
        | Rule::package_id
        | Rule::var_id
        | Rule::ident_char => "identifier",
        Rule::keyword => "keyword",
        Rule::kw_while => "`while`",
        Rule::kw_return => "`return`",
        Rule::kw_fn => "`fn`",
        Rule::op_or
        | Rule::op_xor
        | Rule::op_and
        | Rule::op_not
        | Rule::op_comparison
        | Rule::op_additive
        | Rule::op_multiplicative
        | Rule::op_power
        | Rule::op_range => "operator",
        Rule::dot => "`.`",
        Rule::EOI => "end of input",
    }
}
