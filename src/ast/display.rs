//! Canonical text form of the AST.
//!
//! `x = 3` renders as `Program(Body([VarAsgn(["x"], [NumericLiteral(3)])]))`.
//! Names and verbatim literal text are written as quoted strings.

use std::fmt::{self, Display, Formatter};

use super::{Body, Expression, Program, Statement};

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Program({})", self.body)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Body(")?;
        write_list(f, &self.statements)?;
        write!(f, ")")
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::VarDec(dec) => {
                write!(f, "VarDec(")?;
                write_names(f, &dec.names)?;
                write!(f, ", ")?;
                write_list(f, &dec.initializers)?;
                write!(f, ")")
            }
            Statement::VarAsgn(asgn) => {
                write!(f, "VarAsgn(")?;
                write_names(f, &asgn.targets)?;
                write!(f, ", ")?;
                write_list(f, &asgn.values)?;
                write!(f, ")")
            }
            Statement::While(stmt) => {
                write!(f, "WhileStatement({}, {})", stmt.condition, stmt.body)
            }
            Statement::Return(ret) => match &ret.value {
                Some(value) => write!(f, "Return({})", value),
                None => write!(f, "Return(None)"),
            },
            Statement::FunctionDeclaration(func) => {
                write!(f, "FunctionDeclaration({:?}, ", func.name)?;
                write_names(f, &func.parameters)?;
                write!(f, ", {})", func.body)
            }
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Expression::*;
        match self {
            Ternary(t) => write!(
                f,
                "TernaryExpression({}, {}, {})",
                t.condition, t.then_branch, t.else_branch
            ),
            Binary(b) => write!(
                f,
                "BinaryExpression({:?}, {}, {})",
                b.operator.symbol(),
                b.left,
                b.right
            ),
            Unary(u) => write!(f, "UnaryExpression({:?}, {})", u.operator.symbol(), u.operand),
            Accessor(a) => write!(f, "Accessor({}, {})", a.object, a.property),
            Subscripted(s) => write!(f, "SubscriptedExpression({}, {})", s.base, s.index),
            Call(call) => {
                write!(f, "FunctionCall({}, ", call.callee)?;
                write_list(f, &call.arguments)?;
                write!(f, ")")
            }
            BooleanLiteral(value) => write!(f, "BooleanLiteral({})", value),
            NumericLiteral(value) => write!(f, "NumericLiteral({})", value),
            StringLiteral(text) => write!(f, "StringLiteral({:?})", text),
            ErrorLiteral(text) => write!(f, "ErrorLiteral({:?})", text),
            Identifier(name) => write!(f, "{:?}", name),
        }
    }
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

fn write_names(f: &mut Formatter<'_>, names: &[String]) -> fmt::Result {
    write!(f, "[")?;
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", name)?;
    }
    write!(f, "]")
}

#[cfg(test)]
mod tests {
    use crate::ast::*;

    #[test]
    fn test_assignment_renders_in_canonical_form() {
        let program = Program {
            body: Body::new(vec![Statement::VarAsgn(Assignment {
                targets: vec!["x".into()],
                values: vec![Expression::NumericLiteral(3.0)],
            })]),
        };
        assert_eq!(
            program.to_string(),
            r#"Program(Body([VarAsgn(["x"], [NumericLiteral(3)])]))"#
        );
    }

    #[test]
    fn test_literals_keep_source_text() {
        let string = Expression::StringLiteral(r#""a\n""#.into());
        assert_eq!(string.to_string(), r#"StringLiteral("\"a\\n\"")"#);
        assert_eq!(
            Expression::NumericLiteral(2.5).to_string(),
            "NumericLiteral(2.5)"
        );
    }

    #[test]
    fn test_bare_return() {
        let ret = Statement::Return(Return { value: None });
        assert_eq!(ret.to_string(), "Return(None)");
    }
}
