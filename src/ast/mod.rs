//! AST module for the Jen language
//!
//! The typed tree produced by [`crate::syntax::parse_program`]. Nodes are
//! built once and never mutated by the front end; every composite node owns
//! its children, so a [`Program`] is a plain acyclic tree.

use serde::Serialize;

mod display;

// ============================================================================
// PROGRAM STRUCTURE
// ============================================================================

/// Root of every parsed source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub body: Body,
}

/// An ordered block of statements, in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Body {
    pub statements: Vec<Statement>,
}

impl Body {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

// ============================================================================
// STATEMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    VarDec(VariableDeclaration),
    VarAsgn(Assignment),
    While(WhileStatement),
    Return(Return),
    FunctionDeclaration(FunctionDeclaration),
    Expression(Expression),
}

/// `a, b := 1, 2`. The two lists are not required to have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub names: Vec<String>,
    pub initializers: Vec<Expression>,
}

/// `a, b = 1, 2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub targets: Vec<String>,
    pub values: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Body,
}

/// `return` or `return value`. A bare `return` has no value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Return {
    pub value: Option<Expression>,
}

/// `fn name(params):` followed by an indented body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Body,
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    Ternary(TernaryExpression),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Accessor(Accessor),
    Subscripted(SubscriptedExpression),
    Call(FunctionCall),
    BooleanLiteral(bool),
    NumericLiteral(f64),
    /// Source text of the literal, quotes and escapes included.
    StringLiteral(String),
    /// Source text of the literal, `err` prefix and quotes included.
    ErrorLiteral(String),
    /// A variable, constant or package name, as written.
    Identifier(String),
}

/// `condition ? then_branch : else_branch`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TernaryExpression {
    pub condition: Box<Expression>,
    pub then_branch: Box<Expression>,
    pub else_branch: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

/// `object.property`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accessor {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
}

/// `base[index]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptedExpression {
    pub base: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCall {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

// ============================================================================
// OPERATORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    Or,
    Xor,
    And,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    Less,
    Greater,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Range,
}

impl BinaryOperator {
    /// Parses the operator's source spelling.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        use BinaryOperator::*;
        let operator = match symbol {
            "or" => Or,
            "xor" => Xor,
            "and" => And,
            "<=" => LessEqual,
            ">=" => GreaterEqual,
            "==" => Equal,
            "!=" => NotEqual,
            "<" => Less,
            ">" => Greater,
            "+" => Add,
            "-" => Subtract,
            "*" => Multiply,
            "/" => Divide,
            "%" => Modulo,
            "**" => Power,
            ".." => Range,
            _ => return None,
        };
        Some(operator)
    }

    pub fn symbol(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Or => "or",
            Xor => "xor",
            And => "and",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
            Power => "**",
            Range => "..",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    Not,
}

impl UnaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "not" => Some(UnaryOperator::Not),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "not",
        }
    }
}
