//! Default traversals: fold the children, combine left to right.

use vdm_ir::{
    Expr, ExprKind, ItemKind, LetBinding, PatternKind, PatternNode, Span, Stmt, StmtKind, TypeId,
};
use vdm_stack::ensure_sufficient_stack;
use vdm_types::{TypeKind, TypePool};

use crate::Fold;

/// Fold every element of `items` with `each` and combine the results.
pub fn fold_all<F: Fold, T>(
    f: &mut F,
    items: impl IntoIterator<Item = T>,
    mut each: impl FnMut(&mut F, T) -> F::Output,
) -> F::Output {
    let mut acc = f.identity();
    for item in items {
        let next = each(f, item);
        acc = f.combine(acc, next);
    }
    acc
}

pub fn walk_pattern<F: Fold, N: PatternNode>(f: &mut F, pattern: &N) -> F::Output {
    ensure_sufficient_stack(|| {
        let span = pattern.span();
        match pattern.kind() {
            PatternKind::Identifier(name) => f.fold_identifier(*name, span),
            PatternKind::Ignore => f.fold_ignore(span),
            PatternKind::Literal(lit) => f.fold_pattern_literal(*lit, span),
            PatternKind::Expression(expr) => f.fold_expr(expr),
            PatternKind::Record { ty, .. } | PatternKind::Object { ty, .. } => {
                let head = f.fold_type_ref(*ty, span);
                let fields = fold_all(f, pattern.kind().children(), |f, p| f.fold_pattern(p));
                f.combine(head, fields)
            }
            kind => fold_all(f, kind.children(), |f, p| f.fold_pattern(p)),
        }
    })
}

/// `let` bindings: each pattern, then its declared type, then its value.
fn walk_bindings<F: Fold>(f: &mut F, bindings: &[LetBinding]) -> F::Output {
    fold_all(f, bindings, |f, binding| {
        let pattern = f.fold_pattern(&binding.pattern);
        let declared = match binding.declared {
            Some(ty) => f.fold_type_ref(ty, binding.pattern.span),
            None => f.identity(),
        };
        let value = f.fold_expr(&binding.value);
        let head = f.combine(pattern, declared);
        f.combine(head, value)
    })
}

fn walk_exprs<F: Fold>(f: &mut F, exprs: &[Expr]) -> F::Output {
    fold_all(f, exprs, |f, e| f.fold_expr(e))
}

pub fn walk_expr<F: Fold>(f: &mut F, expr: &Expr) -> F::Output {
    ensure_sufficient_stack(|| match &expr.kind {
        ExprKind::Variable(name) => f.fold_variable(*name, expr.span),
        ExprKind::Literal(_) => f.identity(),
        ExprKind::Unary { operand, .. } => f.fold_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            let l = f.fold_expr(left);
            let r = f.fold_expr(right);
            f.combine(l, r)
        }
        ExprKind::Apply { root, args } => {
            let head = f.fold_expr(root);
            let rest = walk_exprs(f, args);
            f.combine(head, rest)
        }
        ExprKind::Tuple(list) | ExprKind::SetEnum(list) | ExprKind::SeqEnum(list) => {
            walk_exprs(f, list)
        }
        ExprKind::MapEnum(pairs) => fold_all(f, pairs, |f, (k, v)| {
            let k = f.fold_expr(k);
            let v = f.fold_expr(v);
            f.combine(k, v)
        }),
        ExprKind::FieldSelect { object, .. } => f.fold_expr(object),
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => fold_all(f, [cond, then_branch, else_branch], |f, e| f.fold_expr(e)),
        ExprKind::Let { bindings, body } => {
            let head = walk_bindings(f, bindings);
            let body = f.fold_expr(body);
            f.combine(head, body)
        }
        ExprKind::Cases {
            scrutinee,
            arms,
            others,
        } => {
            let head = f.fold_expr(scrutinee);
            let arms = fold_all(f, arms, |f, arm| {
                let p = f.fold_pattern(&arm.pattern);
                let b = f.fold_expr(&arm.body);
                f.combine(p, b)
            });
            let acc = f.combine(head, arms);
            match others {
                Some(others) => {
                    let o = f.fold_expr(others);
                    f.combine(acc, o)
                }
                None => acc,
            }
        }
        ExprKind::Lambda { params, body } => {
            let params = fold_all(f, params, |f, (pattern, ty)| {
                let p = f.fold_pattern(pattern);
                let t = f.fold_type_ref(*ty, pattern.span);
                f.combine(p, t)
            });
            let body = f.fold_expr(body);
            f.combine(params, body)
        }
    })
}

pub fn walk_stmt<F: Fold>(f: &mut F, stmt: &Stmt) -> F::Output {
    ensure_sufficient_stack(|| match &stmt.kind {
        StmtKind::Assign { target, value } => {
            let t = f.fold_variable(*target, stmt.span);
            let v = f.fold_expr(value);
            f.combine(t, v)
        }
        StmtKind::Block { bindings, body } => {
            let head = walk_bindings(f, bindings);
            let body = fold_all(f, body, |f, s| f.fold_stmt(s));
            f.combine(head, body)
        }
        StmtKind::Call { name, args } => {
            let head = f.fold_variable(*name, stmt.span);
            let args = walk_exprs(f, args);
            f.combine(head, args)
        }
        StmtKind::Return(Some(value)) => f.fold_expr(value),
        StmtKind::Return(None) | StmtKind::Skip => f.identity(),
    })
}

/// Items: the declared type first, then the patterns, then the body.
pub fn walk_item<F: Fold, N: PatternNode>(f: &mut F, item: &ItemKind<N>) -> F::Output {
    match item {
        ItemKind::Value {
            pattern,
            declared,
            value,
        } => {
            let p = f.fold_pattern(pattern);
            let t = match declared {
                Some(ty) => f.fold_type_ref(*ty, pattern.span()),
                None => f.identity(),
            };
            let v = f.fold_expr(value);
            let head = f.combine(p, t);
            f.combine(head, v)
        }
        ItemKind::Function {
            ty, params, body, ..
        } => {
            let t = f.fold_type_ref(*ty, body.span);
            let p = fold_all(f, params.iter().flatten(), |f, p| f.fold_pattern(p));
            let b = f.fold_expr(body);
            let head = f.combine(t, p);
            f.combine(head, b)
        }
        ItemKind::Operation {
            ty, params, body, ..
        } => {
            let t = f.fold_type_ref(*ty, body.span);
            let p = fold_all(f, params, |f, p| f.fold_pattern(p));
            let b = f.fold_stmt(body);
            let head = f.combine(t, p);
            f.combine(head, b)
        }
        ItemKind::Type { ty, .. } => f.fold_type_ref(*ty, Span::DUMMY),
    }
}

/// Fold the structure of `ty`; named and record types are leaves.
pub fn walk_type<F: Fold>(f: &mut F, pool: &TypePool, ty: TypeId) -> F::Output {
    ensure_sufficient_stack(|| match pool.kind(ty) {
        TypeKind::Basic(_)
        | TypeKind::Quote(_)
        | TypeKind::Named(_)
        | TypeKind::Record(_)
        | TypeKind::Parameter(_)
        | TypeKind::Unresolved(_)
        | TypeKind::Class(_)
        | TypeKind::Void
        | TypeKind::Unknown
        | TypeKind::Undefined => f.fold_type_leaf(pool, ty),
        kind => fold_all(f, kind.children(), |f, child| f.fold_type(pool, child)),
    })
}
