//! Matching patterns against types.
//!
//! [`Binder::bind`] walks a pattern alongside a type and produces one
//! [`Binding`] per identifier occurrence. Mismatches are recorded as
//! diagnostics and the walk carries on with the next sibling, so one bad
//! sub-pattern never hides problems elsewhere in the same definition list.
//!
//! Union and map-union patterns are checked for shape, but their operands
//! are bound against the declared type even when the check fails.

mod error;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};
use vdm_diagnostic::{Diagnostic, ErrorCode};
use vdm_ir::{Name, PatternKind, PatternNode, Span, StringLookup, TypeId};
use vdm_stack::ensure_sufficient_stack;
use vdm_types::{types_equal, DefKind, Environment, NameScope, TypeKind, TypePool};

pub use error::BindErrorKind;

/// A name introduced by a pattern.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Binding {
    pub name: Name,
    pub ty: TypeId,
    /// Scope the resulting definition answers to.
    pub scope: NameScope,
    pub span: Span,
}

/// Result of binding one pattern.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Bound {
    pub bindings: Vec<Binding>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Bind `pattern` against `ty` and deduplicate the result by name.
///
/// `ty` is `None` only for outermost patterns with no declared type, which
/// bind against `Unknown`.
pub fn bind<N: PatternNode>(
    pattern: &N,
    ty: Option<TypeId>,
    scope: NameScope,
    pool: &mut TypePool,
    env: &dyn Environment,
    names: &dyn StringLookup,
) -> Bound {
    let mut binder = Binder::new(pool, env, names);
    let bindings = binder.bind_definitions(pattern, ty, scope);
    Bound {
        bindings,
        diagnostics: binder.finish(),
    }
}

/// Pattern/type matching state: the pool, the environment and the
/// diagnostics collected so far.
pub struct Binder<'a> {
    pool: &'a mut TypePool,
    env: &'a dyn Environment,
    names: &'a dyn StringLookup,
    from: Name,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Binder<'a> {
    pub fn new(
        pool: &'a mut TypePool,
        env: &'a dyn Environment,
        names: &'a dyn StringLookup,
    ) -> Self {
        Binder {
            pool,
            env,
            names,
            from: env.enclosing_module(),
            diagnostics: Vec::new(),
        }
    }

    pub fn pool(&mut self) -> &mut TypePool {
        self.pool
    }

    /// Module the bound definitions belong to.
    pub fn module(&self) -> Name {
        self.from
    }

    /// Diagnostics collected so far, in traversal order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Every binding `pattern` produces against `ty`, one per identifier
    /// occurrence, in source order.
    pub fn bind<N: PatternNode>(
        &mut self,
        pattern: &N,
        ty: Option<TypeId>,
        scope: NameScope,
    ) -> Vec<Binding> {
        let mut out = Vec::new();
        self.bind_into(pattern, ty.unwrap_or(TypeId::UNKNOWN), scope, &mut out);
        out
    }

    /// Bind, then keep the first binding of each name.
    #[tracing::instrument(level = "debug", skip_all, fields(span = ?pattern.span()))]
    pub fn bind_definitions<N: PatternNode>(
        &mut self,
        pattern: &N,
        ty: Option<TypeId>,
        scope: NameScope,
    ) -> Vec<Binding> {
        let all = self.bind(pattern, ty, scope);
        self.dedup(all)
    }

    /// Bind a parameter list positionally.
    ///
    /// A count mismatch is reported once; surplus patterns bind against
    /// `Unknown` so their names still exist.
    #[tracing::instrument(level = "debug", skip_all, fields(patterns = patterns.len(), types = types.len()))]
    pub fn bind_list<N: PatternNode>(
        &mut self,
        patterns: &[N],
        types: &[TypeId],
        scope: NameScope,
    ) -> Vec<Binding> {
        if patterns.len() != types.len() {
            let span = patterns
                .iter()
                .map(PatternNode::span)
                .reduce(Span::merge)
                .unwrap_or(Span::DUMMY);
            self.report(
                span,
                BindErrorKind::ParameterCount {
                    expected: types.len(),
                    found: patterns.len(),
                },
            );
        }
        let mut out = Vec::new();
        for (i, pattern) in patterns.iter().enumerate() {
            let ty = types.get(i).copied().unwrap_or(TypeId::UNKNOWN);
            self.bind_into(pattern, ty, scope, &mut out);
        }
        self.dedup(out)
    }

    /// Keep the first binding of each name; warn when a later occurrence
    /// has a different type.
    pub fn dedup(&mut self, bindings: Vec<Binding>) -> Vec<Binding> {
        let mut first_of: FxHashMap<Name, usize> = FxHashMap::default();
        let mut kept: Vec<Binding> = Vec::with_capacity(bindings.len());
        for binding in bindings {
            let Some(&index) = first_of.get(&binding.name) else {
                first_of.insert(binding.name, kept.len());
                kept.push(binding);
                continue;
            };
            let first = kept[index];
            if types_equal(self.pool, first.ty, binding.ty)
                || types_equal(self.pool, binding.ty, first.ty)
            {
                continue;
            }
            let diagnostic = Diagnostic::warning(ErrorCode::W5002)
                .with_message(format!(
                    "`{}` is bound as `{}` and as `{}`",
                    self.names.lookup(binding.name),
                    self.pool.format_type(first.ty, self.names),
                    self.pool.format_type(binding.ty, self.names),
                ))
                .with_label(binding.span, "bound again here")
                .with_secondary_label(first.span, "first bound here");
            self.diagnostics.push(diagnostic);
        }
        kept
    }

    fn report(&mut self, span: Span, kind: BindErrorKind) {
        debug!(code = %kind.error_code(), "pattern does not match");
        let diagnostic = kind.to_diagnostic(span, self.pool, self.names);
        self.diagnostics.push(diagnostic);
    }

    fn bind_into<N: PatternNode>(
        &mut self,
        pattern: &N,
        ty: TypeId,
        scope: NameScope,
        out: &mut Vec<Binding>,
    ) {
        ensure_sufficient_stack(|| {
            let span = pattern.span();
            let from = self.from;
            match pattern.kind() {
                PatternKind::Identifier(name) => {
                    trace!(name = self.names.lookup(*name), ty = ty.raw(), "bind");
                    out.push(Binding {
                        name: *name,
                        ty,
                        scope,
                        span,
                    });
                }

                PatternKind::Ignore | PatternKind::Literal(_) | PatternKind::Expression(_) => {}

                PatternKind::Tuple(list) => match self.pool.product_of(ty, list.len(), from) {
                    Some(components) => {
                        for (p, t) in list.iter().zip(components) {
                            self.bind_into(p, t, scope, out);
                        }
                    }
                    None => self.report(
                        span,
                        BindErrorKind::TupleArity {
                            arity: list.len(),
                            found: ty,
                        },
                    ),
                },

                PatternKind::Record {
                    typename,
                    ty: pattern_ty,
                    fields,
                } => self.bind_record(span, *typename, *pattern_ty, fields, ty, scope, out),

                PatternKind::Object {
                    classname, fields, ..
                } => {
                    if !self.pool.is_unknown(ty) {
                        let env = self.env;
                        let matched = self.pool.class_of(ty, from);
                        if !matched.is_some_and(|c| env.is_subclass(c, *classname)) {
                            self.report(
                                span,
                                BindErrorKind::ObjectMismatch {
                                    classname: *classname,
                                    found: ty,
                                },
                            );
                            return;
                        }
                    }
                    for field in fields {
                        let at = field.pattern.span();
                        if let Some(field_ty) = self.member_type(*classname, field.field, at) {
                            self.bind_into(&field.pattern, field_ty, scope, out);
                        }
                    }
                }

                PatternKind::Set(list) => match self.pool.set_of(ty, from) {
                    Some(shape) if shape.empty => {}
                    Some(shape) => {
                        for p in list {
                            self.bind_into(p, shape.elem, scope, out);
                        }
                    }
                    None => self.report(span, BindErrorKind::NotASet { found: ty }),
                },

                PatternKind::Seq(list) => match self.pool.seq_of(ty, from) {
                    Some(shape) if shape.empty => {}
                    Some(shape) => {
                        for p in list {
                            self.bind_into(p, shape.elem, scope, out);
                        }
                    }
                    None => self.report(span, BindErrorKind::NotASeq { found: ty }),
                },

                PatternKind::Map(maplets) => match self.pool.map_of(ty, from) {
                    Some(shape) if shape.empty => {}
                    Some(shape) => {
                        for maplet in maplets {
                            self.bind_into(&maplet.from, shape.dom, scope, out);
                            self.bind_into(&maplet.to, shape.rng, scope, out);
                        }
                    }
                    None => self.report(span, BindErrorKind::NotAMap { found: ty }),
                },

                PatternKind::Union(left, right) => {
                    if !self.pool.is_set(ty, from) {
                        self.report(span, BindErrorKind::UnionNotSet { found: ty });
                    }
                    self.bind_into(&**left, ty, scope, out);
                    self.bind_into(&**right, ty, scope, out);
                }

                PatternKind::MapUnion(left, right) => {
                    if !self.pool.is_map(ty, from) {
                        self.report(span, BindErrorKind::MapUnionNotMap { found: ty });
                    }
                    self.bind_into(&**left, ty, scope, out);
                    self.bind_into(&**right, ty, scope, out);
                }

                PatternKind::Concatenation(left, right) => {
                    self.bind_into(&**left, ty, scope, out);
                    self.bind_into(&**right, ty, scope, out);
                }
            }
        });
    }

    #[allow(clippy::too_many_arguments, reason = "one argument per record pattern part")]
    fn bind_record<N: PatternNode>(
        &mut self,
        span: Span,
        typename: Name,
        pattern_ty: TypeId,
        fields: &[N],
        ty: TypeId,
        scope: NameScope,
        out: &mut Vec<Binding>,
    ) {
        let from = self.from;
        let matched = self.pool.find_named(ty, typename, from);
        if matched.is_none() && !self.pool.is_unknown(ty) {
            self.report(span, BindErrorKind::RecordMismatch { typename, found: ty });
            return;
        }

        let record = self
            .pool
            .record_of(pattern_ty, from)
            .or_else(|| matched.and_then(|m| self.pool.record_of(m, from)));
        let field_types: Vec<TypeId> = match record.map(|r| self.pool.kind(r)) {
            Some(TypeKind::Record(rec)) => rec.fields.iter().map(|f| f.ty).collect(),
            _ if matched.is_none() && self.pool.is_unknown(pattern_ty) => {
                vec![TypeId::UNKNOWN; fields.len()]
            }
            _ => {
                self.report(span, BindErrorKind::RecordMismatch { typename, found: ty });
                return;
            }
        };
        if field_types.len() != fields.len() {
            self.report(
                span,
                BindErrorKind::RecordArity {
                    typename,
                    expected: field_types.len(),
                    found: fields.len(),
                },
            );
            return;
        }
        for (p, t) in fields.iter().zip(field_types) {
            self.bind_into(p, t, scope, out);
        }
    }

    /// Type of instance variable `field` of `classname`, or a diagnostic.
    fn member_type(&mut self, classname: Name, field: Name, span: Span) -> Option<TypeId> {
        let env = self.env;
        let error = match env.find_member(classname, field) {
            None => BindErrorKind::UnknownMember { classname, field },
            Some(def) if def.kind != DefKind::InstanceVariable => {
                BindErrorKind::NotAField { classname, field }
            }
            Some(def) if !env.is_accessible(def) => {
                BindErrorKind::InaccessibleMember { classname, field }
            }
            Some(def) => return Some(def.ty),
        };
        self.report(span, error);
        None
    }
}
