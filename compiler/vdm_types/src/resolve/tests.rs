use super::*;
use crate::env::{Definition, ModuleEnv, ScopedEnv};
use crate::pool::Derived;
use crate::NamedType;
use pretty_assertions::assert_eq;
use vdm_ir::{Span, StringInterner};

struct Fixture {
    names: StringInterner,
    pool: TypePool,
    env: ModuleEnv,
    diagnostics: DiagnosticQueue,
}

impl Fixture {
    fn new() -> Self {
        let names = StringInterner::new();
        let env = ModuleEnv::new(names.intern("M"));
        Fixture {
            names,
            pool: TypePool::new(),
            env,
            diagnostics: DiagnosticQueue::new(),
        }
    }

    /// Define `name = body` as a named type in the module.
    fn define_type(&mut self, name: &str, body: TypeId) -> TypeId {
        let name = self.names.intern(name);
        let module = self.env.enclosing_module();
        let ty = self
            .pool
            .named(NamedType::new(name, module, body), Span::DUMMY);
        self.env
            .define(Definition::new(name, DefKind::Type, ty, Span::DUMMY));
        ty
    }

    fn reference(&mut self, name: &str) -> TypeId {
        let name = self.names.intern(name);
        self.pool.unresolved(name, Span::new(3, 4))
    }

    fn resolve(&mut self, id: TypeId) -> Result<TypeId, ErrorGuaranteed> {
        Resolver::new(&mut self.pool, &self.env, &self.names, &mut self.diagnostics).resolve(id)
    }

    fn codes(&mut self) -> Vec<ErrorCode> {
        self.diagnostics.flush().into_iter().map(|d| d.code).collect()
    }
}

#[test]
fn reference_resolves_to_its_definition() {
    let mut f = Fixture::new();
    let t = f.define_type("T", TypeId::NAT);
    let r = f.reference("T");
    let seq = f.pool.seq(r);

    assert_eq!(f.resolve(seq), Ok(seq));
    assert_eq!(f.pool.kind(seq).children().as_slice(), &[t]);
    assert!(f.pool.is_resolved(seq));
    assert!(f.codes().is_empty());
}

#[test]
fn self_reference_terminates() {
    let mut f = Fixture::new();
    let r = f.reference("T");
    let body = f.pool.seq(r);
    let t = f.define_type("T", body);

    assert_eq!(f.resolve(t), Ok(t));
    assert_eq!(f.pool.kind(body).children().as_slice(), &[t]);
}

#[test]
fn resolution_is_idempotent() {
    let mut f = Fixture::new();
    let r = f.reference("T");
    let body = f.pool.set(r);
    let t = f.define_type("T", body);

    let first = f.resolve(t);
    let len = f.pool.len();
    let second = f.resolve(t);
    assert_eq!(first, second);
    assert_eq!(f.pool.len(), len);
    assert_eq!(f.pool.kind(body).children().as_slice(), &[t]);
}

#[test]
fn unknown_name_is_reported() {
    let mut f = Fixture::new();
    let r = f.reference("Missing");
    let seq = f.pool.seq(r);

    assert!(f.resolve(seq).is_err());
    let diags = f.diagnostics.flush();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::E1001);
    assert_eq!(diags[0].primary_span(), Some(Span::new(3, 4)));
}

#[test]
fn value_name_is_not_a_type() {
    let mut f = Fixture::new();
    let x = f.names.intern("x");
    f.env
        .define(Definition::new(x, DefKind::Value, TypeId::NAT, Span::DUMMY));
    let r = f.reference("x");

    assert!(f.resolve(r).is_err());
    assert_eq!(f.codes(), vec![ErrorCode::E1002]);
}

#[test]
fn failure_clears_resolved_bits_and_allows_retry() {
    let mut f = Fixture::new();
    let r = f.reference("X");
    let body = f.pool.seq(r);
    let a = f.define_type("A", body);

    assert!(f.resolve(a).is_err());
    assert!(!f.pool.is_resolved(a));
    assert!(!f.pool.is_resolved(body));
    assert_eq!(f.codes(), vec![ErrorCode::E1001]);

    let x = f.define_type("X", TypeId::BOOL);
    assert_eq!(f.resolve(a), Ok(a));
    assert_eq!(f.pool.kind(body).children().as_slice(), &[x]);
}

#[test]
fn parameters_must_be_in_scope() {
    let mut f = Fixture::new();
    let name = f.names.intern("T");
    let param = f.pool.parameter(name, Span::DUMMY);

    let mut scope = ScopedEnv::new(&f.env);
    scope.define(Definition::new(
        name,
        DefKind::TypeParameter,
        TypeId::UNKNOWN,
        Span::DUMMY,
    ));
    let ok = Resolver::new(&mut f.pool, &scope, &f.names, &mut f.diagnostics).resolve(param);
    assert_eq!(ok, Ok(param));

    let other = f.names.intern("U");
    let unbound = f.pool.parameter(other, Span::DUMMY);
    assert!(f.resolve(unbound).is_err());
    assert_eq!(f.codes(), vec![ErrorCode::E1003]);
}

#[test]
fn resolve_all_reports_every_failure() {
    let mut f = Fixture::new();
    let a = f.reference("A");
    let b = f.reference("B");
    let c = f.define_type("C", TypeId::NAT);

    let result = Resolver::new(&mut f.pool, &f.env, &f.names, &mut f.diagnostics)
        .resolve_all([a, c, b]);
    match result {
        Err((handles, _)) => assert_eq!(handles, vec![a, c, b]),
        Ok(handles) => panic!("expected failure, got {handles:?}"),
    }
    assert_eq!(f.codes(), vec![ErrorCode::E1001, ErrorCode::E1001]);
}

#[test]
fn unresolve_leaves_primitives_alone() {
    let mut pool = TypePool::new();
    pool.unresolve(TypeId::NAT);
    assert!(pool.is_resolved(TypeId::NAT));
}

#[test]
fn name_defined_as_itself_is_reported_not_followed() {
    let mut f = Fixture::new();
    let (a, b) = (f.names.intern("A"), f.names.intern("B"));
    let a_ref = f.reference("B");
    let b_ref = f.reference("A");
    f.env
        .define(Definition::new(a, DefKind::Type, a_ref, Span::DUMMY));
    f.env
        .define(Definition::new(b, DefKind::Type, b_ref, Span::DUMMY));

    assert!(f.resolve(a_ref).is_err());
    let diags = f.diagnostics.flush();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::E1011);
    assert!(!f.pool.is_resolved(a_ref));
    assert!(!f.pool.is_resolved(b_ref));
}

#[test]
fn shared_reference_resolves_more_than_once() {
    let mut f = Fixture::new();
    let t = f.define_type("T", TypeId::NAT);
    let r = f.reference("T");
    assert_eq!(f.resolve(r), Ok(t));
    assert_eq!(f.resolve(r), Ok(t));
    assert!(f.codes().is_empty());
}

#[test]
fn unresolve_forgets_derived_shapes() {
    let mut pool = TypePool::new();
    let nats = pool.set(TypeId::NAT);
    let chars = pool.set(TypeId::CHAR);
    let both = pool.union(vec![nats, chars]);
    let Some(before) = pool.set_of(both, Name::EMPTY) else {
        panic!("a union of sets is a set");
    };
    assert_eq!(pool.derived(both, Derived::SetElem), Some(before.elem));

    pool.unresolve(both);
    assert_eq!(pool.derived(both, Derived::SetElem), None);

    for slot in pool.kind_mut(chars).children_mut() {
        *slot = TypeId::BOOL;
    }
    let Some(after) = pool.set_of(both, Name::EMPTY) else {
        panic!("a union of sets is a set");
    };
    assert_ne!(after.elem, before.elem);
    assert!(pool.kind(after.elem).children().contains(&TypeId::BOOL));
}
