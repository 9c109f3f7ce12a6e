//! Concrete syntax for patterns and guard expressions.
//!
//! Used by obligation text and diagnostics. Binary subexpressions are
//! parenthesised, so the output re-parses to the same tree without a
//! precedence table.

use std::fmt::{self, Write as _};

use vdm_ir::{Expr, ExprKind, Literal, Name, PatternKind, PatternNode, StringLookup};
use vdm_stack::ensure_sufficient_stack;
use vdm_types::TypePool;

/// Displays a pattern of any stage.
pub struct PatternDisplay<'a, N> {
    pattern: &'a N,
    pool: &'a TypePool,
    names: &'a dyn StringLookup,
}

pub fn display_pattern<'a, N: PatternNode>(
    pattern: &'a N,
    pool: &'a TypePool,
    names: &'a dyn StringLookup,
) -> PatternDisplay<'a, N> {
    PatternDisplay {
        pattern,
        pool,
        names,
    }
}

/// Displays an expression.
pub struct ExprDisplay<'a> {
    expr: &'a Expr,
    pool: &'a TypePool,
    names: &'a dyn StringLookup,
}

pub fn display_expr<'a>(
    expr: &'a Expr,
    pool: &'a TypePool,
    names: &'a dyn StringLookup,
) -> ExprDisplay<'a> {
    ExprDisplay { expr, pool, names }
}

impl<N: PatternNode> fmt::Display for PatternDisplay<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer {
            out: f,
            pool: self.pool,
            names: self.names,
        }
        .pattern(self.pattern)
    }
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer {
            out: f,
            pool: self.pool,
            names: self.names,
        }
        .expr(self.expr)
    }
}

struct Printer<'a, 'f> {
    out: &'a mut fmt::Formatter<'f>,
    pool: &'a TypePool,
    names: &'a dyn StringLookup,
}

impl Printer<'_, '_> {
    fn name(&mut self, name: Name) -> fmt::Result {
        self.out.write_str(self.names.lookup(name))
    }

    fn list<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        mut each: impl FnMut(&mut Self, T) -> fmt::Result,
    ) -> fmt::Result {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            each(self, item)?;
        }
        Ok(())
    }

    fn literal(&mut self, lit: Literal) -> fmt::Result {
        match lit {
            Literal::Bool(b) => write!(self.out, "{b}"),
            Literal::Char(c) => write!(self.out, "'{c}'"),
            Literal::Int(i) => write!(self.out, "{i}"),
            Literal::Real(_) => write!(self.out, "{}", lit.as_real().unwrap_or_default()),
            Literal::Quote(tag) => write!(self.out, "<{}>", self.names.lookup(tag)),
            Literal::String(s) => write!(self.out, "{:?}", self.names.lookup(s)),
            Literal::Nil => self.out.write_str("nil"),
        }
    }

    fn pattern<N: PatternNode>(&mut self, pattern: &N) -> fmt::Result {
        ensure_sufficient_stack(|| match pattern.kind() {
            PatternKind::Identifier(name) => self.name(*name),
            PatternKind::Ignore => self.out.write_str("-"),
            PatternKind::Literal(lit) => self.literal(*lit),
            PatternKind::Tuple(list) => {
                self.out.write_str("mk_(")?;
                self.list(list, |p, item| p.pattern(item))?;
                self.out.write_char(')')
            }
            PatternKind::Record {
                typename, fields, ..
            } => {
                self.out.write_str("mk_")?;
                self.name(*typename)?;
                self.out.write_char('(')?;
                self.list(fields, |p, item| p.pattern(item))?;
                self.out.write_char(')')
            }
            PatternKind::Object {
                classname, fields, ..
            } => {
                self.out.write_str("obj_")?;
                self.name(*classname)?;
                self.out.write_char('(')?;
                self.list(fields, |p, field| {
                    p.name(field.field)?;
                    p.out.write_str(" |-> ")?;
                    p.pattern(&field.pattern)
                })?;
                self.out.write_char(')')
            }
            PatternKind::Set(list) => {
                self.out.write_char('{')?;
                self.list(list, |p, item| p.pattern(item))?;
                self.out.write_char('}')
            }
            PatternKind::Seq(list) => {
                self.out.write_char('[')?;
                self.list(list, |p, item| p.pattern(item))?;
                self.out.write_char(']')
            }
            PatternKind::Map(maplets) if maplets.is_empty() => self.out.write_str("{|->}"),
            PatternKind::Map(maplets) => {
                self.out.write_char('{')?;
                self.list(maplets, |p, m| {
                    p.pattern(&m.from)?;
                    p.out.write_str(" |-> ")?;
                    p.pattern(&m.to)
                })?;
                self.out.write_char('}')
            }
            PatternKind::MapUnion(left, right) => self.infix(&**left, "munion", &**right),
            PatternKind::Concatenation(left, right) => self.infix(&**left, "^", &**right),
            PatternKind::Union(left, right) => self.infix(&**left, "union", &**right),
            PatternKind::Expression(expr) => {
                self.out.write_char('(')?;
                self.expr(expr)?;
                self.out.write_char(')')
            }
        })
    }

    fn infix<N: PatternNode>(&mut self, left: &N, op: &str, right: &N) -> fmt::Result {
        self.pattern(left)?;
        write!(self.out, " {op} ")?;
        self.pattern(right)
    }

    /// An operand of an operator: parenthesised when it is itself an
    /// operator application.
    fn operand(&mut self, expr: &Expr) -> fmt::Result {
        if matches!(expr.kind, ExprKind::Binary { .. } | ExprKind::Unary { .. }) {
            self.out.write_char('(')?;
            self.expr(expr)?;
            self.out.write_char(')')
        } else {
            self.expr(expr)
        }
    }

    fn expr(&mut self, expr: &Expr) -> fmt::Result {
        ensure_sufficient_stack(|| match &expr.kind {
            ExprKind::Variable(name) => self.name(*name),
            ExprKind::Literal(lit) => self.literal(*lit),
            ExprKind::Unary { op, operand } => {
                self.out.write_str(op.as_str())?;
                if op.as_str().chars().all(char::is_alphabetic) {
                    self.out.write_char(' ')?;
                }
                self.operand(operand)
            }
            ExprKind::Binary { op, left, right } => {
                self.operand(left)?;
                write!(self.out, " {} ", op.as_str())?;
                self.operand(right)
            }
            ExprKind::Apply { root, args } => {
                self.operand(root)?;
                self.out.write_char('(')?;
                self.list(args, |p, arg| p.expr(arg))?;
                self.out.write_char(')')
            }
            ExprKind::Tuple(list) => {
                self.out.write_str("mk_(")?;
                self.list(list, |p, e| p.expr(e))?;
                self.out.write_char(')')
            }
            ExprKind::SetEnum(list) => {
                self.out.write_char('{')?;
                self.list(list, |p, e| p.expr(e))?;
                self.out.write_char('}')
            }
            ExprKind::SeqEnum(list) => {
                self.out.write_char('[')?;
                self.list(list, |p, e| p.expr(e))?;
                self.out.write_char(']')
            }
            ExprKind::MapEnum(pairs) if pairs.is_empty() => self.out.write_str("{|->}"),
            ExprKind::MapEnum(pairs) => {
                self.out.write_char('{')?;
                self.list(pairs, |p, (k, v)| {
                    p.expr(k)?;
                    p.out.write_str(" |-> ")?;
                    p.expr(v)
                })?;
                self.out.write_char('}')
            }
            ExprKind::FieldSelect { object, field } => {
                self.operand(object)?;
                self.out.write_char('.')?;
                self.name(*field)
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.out.write_str("if ")?;
                self.expr(cond)?;
                self.out.write_str(" then ")?;
                self.expr(then_branch)?;
                self.out.write_str(" else ")?;
                self.expr(else_branch)
            }
            ExprKind::Let { bindings, body } => {
                self.out.write_str("let ")?;
                self.list(bindings, |p, b| {
                    p.pattern(&b.pattern)?;
                    if let Some(ty) = b.declared {
                        write!(p.out, " : {}", p.pool.format_type(ty, p.names))?;
                    }
                    p.out.write_str(" = ")?;
                    p.expr(&b.value)
                })?;
                self.out.write_str(" in ")?;
                self.expr(body)
            }
            ExprKind::Cases {
                scrutinee,
                arms,
                others,
            } => {
                self.out.write_str("cases ")?;
                self.expr(scrutinee)?;
                self.out.write_str(": ")?;
                self.list(arms, |p, arm| {
                    p.pattern(&arm.pattern)?;
                    p.out.write_str(" -> ")?;
                    p.expr(&arm.body)
                })?;
                if let Some(others) = others {
                    if !arms.is_empty() {
                        self.out.write_str(", ")?;
                    }
                    self.out.write_str("others -> ")?;
                    self.expr(others)?;
                }
                self.out.write_str(" end")
            }
            ExprKind::Lambda { params, body } => {
                self.out.write_str("lambda ")?;
                self.list(params, |p, (pattern, ty)| {
                    p.pattern(pattern)?;
                    write!(p.out, " : {}", p.pool.format_type(*ty, p.names))
                })?;
                self.out.write_str(" & ")?;
                self.expr(body)
            }
        })
    }
}
