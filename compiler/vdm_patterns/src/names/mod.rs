//! Names a pattern introduces, uses and hides.
//!
//! All three computations are folds. They differ only in which leaves they
//! record and in whether they descend into expression guards.

use vdm_diagnostic::{Diagnostic, ErrorCode};
use vdm_fold::{walk_expr, Fold};
use vdm_ir::{Expr, ExprKind, Name, PatternNode, Span, StringLookup};
use vdm_types::{Environment, NameScope};

/// Identifiers of `pattern` in source order, duplicates kept.
///
/// Guards are not entered: a name used in `(expr)` is not introduced by the
/// pattern.
pub fn variable_names<N: PatternNode>(pattern: &N) -> Vec<Name> {
    Binders.fold_pattern(pattern).into_iter().map(|(name, _)| name).collect()
}

/// Identifier occurrences with their spans; guards are skipped.
struct Binders;

impl Fold for Binders {
    type Output = Vec<(Name, Span)>;

    fn identity(&mut self) -> Self::Output {
        Vec::new()
    }

    fn combine(&mut self, mut left: Self::Output, right: Self::Output) -> Self::Output {
        left.extend(right);
        left
    }

    fn fold_identifier(&mut self, name: Name, span: Span) -> Self::Output {
        vec![(name, span)]
    }

    fn fold_expr(&mut self, _: &Expr) -> Self::Output {
        Vec::new()
    }
}

/// Names used by the guards of `pattern` that neither `env` nor a binder
/// inside the guard defines. Each name is reported once, first use first.
pub fn free_variables<N: PatternNode>(pattern: &N, env: &dyn Environment) -> Vec<Name> {
    let mut free = FreeNames {
        env,
        locals: Vec::new(),
        found: Vec::new(),
    };
    free.fold_pattern(pattern);
    free.found
}

struct FreeNames<'a> {
    env: &'a dyn Environment,
    /// Names bound by enclosing `let`, `cases` and lambda binders.
    locals: Vec<Name>,
    found: Vec<Name>,
}

impl FreeNames<'_> {
    /// Fold `inner` with the identifiers of `patterns` in scope.
    fn scoped<'p, N: PatternNode + 'p>(
        &mut self,
        patterns: impl IntoIterator<Item = &'p N>,
        inner: impl FnOnce(&mut Self),
    ) {
        let mark = self.locals.len();
        for pattern in patterns {
            self.locals.extend(variable_names(pattern));
        }
        inner(self);
        self.locals.truncate(mark);
    }
}

impl Fold for FreeNames<'_> {
    type Output = ();

    fn identity(&mut self) {}

    fn combine(&mut self, (): (), (): ()) {}

    fn fold_variable(&mut self, name: Name, _: Span) {
        if self.locals.contains(&name) || self.found.contains(&name) {
            return;
        }
        if self.env.find_name(name, NameScope::NAMESANDSTATE).is_none() {
            self.found.push(name);
        }
    }

    fn fold_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Let { bindings, body } => {
                let mark = self.locals.len();
                // Each binding sees the ones before it.
                for binding in bindings {
                    self.fold_pattern(&binding.pattern);
                    self.fold_expr(&binding.value);
                    self.locals.extend(variable_names(&binding.pattern));
                }
                self.fold_expr(body);
                self.locals.truncate(mark);
            }
            ExprKind::Cases {
                scrutinee,
                arms,
                others,
            } => {
                self.fold_expr(scrutinee);
                for arm in arms {
                    self.fold_pattern(&arm.pattern);
                    self.scoped([&arm.pattern], |this| this.fold_expr(&arm.body));
                }
                if let Some(others) = others {
                    self.fold_expr(others);
                }
            }
            ExprKind::Lambda { params, body } => {
                for (pattern, _) in params {
                    self.fold_pattern(pattern);
                }
                self.scoped(params.iter().map(|(p, _)| p), |this| this.fold_expr(body));
            }
            _ => walk_expr(self, expr),
        }
    }
}

/// Identifiers of `pattern` that hide a name already visible in `env`,
/// in source order.
pub fn hidden_variables<N: PatternNode>(pattern: &N, env: &dyn Environment) -> Vec<(Name, Span)> {
    Binders
        .fold_pattern(pattern)
        .into_iter()
        .filter(|(name, _)| env.find_name(*name, NameScope::NAMESANDSTATE).is_some())
        .collect()
}

/// W5001 for every identifier of `pattern` that hides a visible name.
pub fn hidden_variable_warnings<N: PatternNode>(
    pattern: &N,
    env: &dyn Environment,
    names: &dyn StringLookup,
) -> Vec<Diagnostic> {
    hidden_variables(pattern, env)
        .into_iter()
        .map(|(name, span)| {
            let text = names.lookup(name);
            let warning = Diagnostic::warning(ErrorCode::W5001)
                .with_message(format!("`{text}` hides an outer definition"))
                .with_label(span, "hiding binding");
            match env.find_name(name, NameScope::NAMESANDSTATE) {
                Some(def) if !def.span.is_dummy() => {
                    warning.with_secondary_label(def.span, format!("`{text}` defined here"))
                }
                _ => warning,
            }
        })
        .collect()
}
