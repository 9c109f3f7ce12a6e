//! End-to-end binding scenarios and the binding laws.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vdm_diagnostic::ErrorCode;
use vdm_ir::{Name, Pattern, Span, StringInterner, TypeId};
use vdm_patterns::{always_matches, bind, length, Binder, Bound, Length};
use vdm_types::{Field, ModuleEnv, NameScope, RecordType, TypePool};

struct World {
    names: StringInterner,
    pool: TypePool,
    env: ModuleEnv,
}

impl World {
    fn new() -> Self {
        let names = StringInterner::new();
        let env = ModuleEnv::new(names.intern("M"));
        World {
            names,
            pool: TypePool::new(),
            env,
        }
    }

    fn id(&self, s: &str) -> Pattern {
        Pattern::identifier(self.names.intern(s), Span::DUMMY)
    }

    fn bind(&mut self, pattern: &Pattern, ty: TypeId) -> Bound {
        bind(
            pattern,
            Some(ty),
            NameScope::LOCAL,
            &mut self.pool,
            &self.env,
            &self.names,
        )
    }

    fn shown(&self, bound: &Bound) -> Vec<String> {
        bound
            .bindings
            .iter()
            .map(|b| {
                format!(
                    "{}:{}",
                    self.names.lookup(b.name),
                    self.pool.format_type(b.ty, &self.names)
                )
            })
            .collect()
    }
}

#[test]
fn scenario_a_tuple_against_product() {
    let mut w = World::new();
    let pattern = Pattern::tuple(vec![w.id("a"), w.id("b")], Span::DUMMY);
    let ty = w.pool.product(vec![TypeId::INT, TypeId::BOOL]);
    let bound = w.bind(&pattern, ty);
    assert_eq!(w.shown(&bound), vec!["a:int", "b:bool"]);
    assert!(bound.diagnostics.is_empty());
}

#[test]
fn scenario_b_concatenation_against_sequence() {
    let mut w = World::new();
    let rest = w.id("rest");
    assert_eq!(length(&rest, &w.names), Length::Any);
    let pattern = Pattern::concatenation(Pattern::seq(vec![w.id("x")], Span::DUMMY), rest);
    let ty = w.pool.seq(TypeId::NAT);
    let bound = w.bind(&pattern, ty);
    assert_eq!(w.shown(&bound), vec!["x:nat", "rest:seq of nat"]);
    assert!(bound.diagnostics.is_empty());
}

#[test]
fn scenario_c_map_against_map_and_int() {
    let mut w = World::new();
    let pattern = Pattern::map(vec![(w.id("a"), w.id("b"))], Span::DUMMY);
    let ty = w.pool.map(TypeId::NAT, TypeId::BOOL);
    let bound = w.bind(&pattern, ty);
    assert_eq!(w.shown(&bound), vec!["a:nat", "b:bool"]);

    let bound = w.bind(&pattern, TypeId::INT);
    assert!(bound.bindings.is_empty());
    assert_eq!(
        bound.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![ErrorCode::E2006]
    );
}

#[test]
fn scenario_d_record_arity_mismatch() {
    let mut w = World::new();
    let point = w.names.intern("Point");
    let fields = ["x", "y", "z"]
        .iter()
        .map(|f| Field::new(w.names.intern(f), TypeId::REAL))
        .collect();
    let module = w.names.intern("M");
    let ty = w.pool.record(RecordType::new(point, module, fields), Span::DUMMY);
    let pattern = Pattern::record(point, ty, vec![w.id("x"), w.id("y")], Span::DUMMY);

    let bound = w.bind(&pattern, ty);
    assert!(bound.bindings.is_empty());
    assert_eq!(
        bound.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![ErrorCode::E2003]
    );
}

#[test]
fn scenario_e_ignore_against_anything() {
    let mut w = World::new();
    let ignore = Pattern::ignore(Span::DUMMY);
    let set = w.pool.set(TypeId::CHAR);
    for ty in [TypeId::NAT, set, TypeId::UNKNOWN] {
        let bound = w.bind(&ignore, ty);
        assert!(bound.bindings.is_empty());
        assert!(bound.diagnostics.is_empty());
    }
    assert_eq!(length(&ignore, &w.names), Length::Any);
    assert!(always_matches(&ignore));
}

/// A type shape to generate matching patterns from.
#[derive(Clone, Debug)]
enum Shape {
    Basic(usize),
    Set(Box<Shape>),
    Seq(Box<Shape>),
    Product(Vec<Shape>),
}

const BASICS: [TypeId; 5] = [
    TypeId::BOOL,
    TypeId::NAT,
    TypeId::INT,
    TypeId::REAL,
    TypeId::CHAR,
];

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = (0..BASICS.len()).prop_map(Shape::Basic);
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Set(Box::new(s))),
            inner.clone().prop_map(|s| Shape::Seq(Box::new(s))),
            prop::collection::vec(inner, 2..4).prop_map(Shape::Product),
        ]
    })
}

fn build(pool: &mut TypePool, shape: &Shape) -> TypeId {
    match shape {
        Shape::Basic(i) => BASICS[*i],
        Shape::Set(inner) => {
            let elem = build(pool, inner);
            pool.set(elem)
        }
        Shape::Seq(inner) => {
            let elem = build(pool, inner);
            pool.seq(elem)
        }
        Shape::Product(list) => {
            let fields = list.iter().map(|s| build(pool, s)).collect();
            pool.product(fields)
        }
    }
}

/// A pattern for a value of `shape`: identifiers and ignores at the leaves,
/// tuples for products. `choices` picks identifier or ignore at each leaf.
fn matching(names: &StringInterner, shape: &Shape, choices: &mut impl Iterator<Item = bool>, n: &mut u32) -> Pattern {
    if let Shape::Product(list) = shape {
        if choices.next().unwrap_or(true) {
            let parts = list.iter().map(|s| matching(names, s, choices, n)).collect();
            return Pattern::tuple(parts, Span::DUMMY);
        }
    }
    if choices.next().unwrap_or(false) {
        *n += 1;
        Pattern::identifier(names.intern(&format!("v{n}")), Span::DUMMY)
    } else {
        Pattern::ignore(Span::DUMMY)
    }
}

proptest! {
    #[test]
    fn tuple_bindings_follow_arity_and_dedup(picks in prop::collection::vec(0usize..4, 1..8)) {
        let mut w = World::new();
        let letters = ["p", "q", "r", "s"];
        let parts: Vec<Pattern> = picks.iter().map(|i| w.id(letters[*i])).collect();
        let pattern = Pattern::tuple(parts, Span::DUMMY);
        let ty = w.pool.product(vec![TypeId::NAT; picks.len()]);

        let mut expected: Vec<Name> = Vec::new();
        for i in &picks {
            let name = w.names.intern(letters[*i]);
            if !expected.contains(&name) {
                expected.push(name);
            }
        }

        let mut binder = Binder::new(&mut w.pool, &w.env, &w.names);
        let raw = binder.bind(&pattern, Some(ty), NameScope::LOCAL);
        prop_assert_eq!(raw.len(), picks.len());
        let kept = binder.dedup(raw);
        prop_assert_eq!(kept.iter().map(|b| b.name).collect::<Vec<_>>(), expected);
        prop_assert!(binder.finish().is_empty());
    }

    #[test]
    fn always_matching_patterns_bind_cleanly(
        shape in shape(),
        choices in prop::collection::vec(any::<bool>(), 0..32),
    ) {
        let mut w = World::new();
        let ty = build(&mut w.pool, &shape);
        let pattern = matching(&w.names, &shape, &mut choices.into_iter(), &mut 0);
        prop_assert!(always_matches(&pattern));
        let bound = w.bind(&pattern, ty);
        prop_assert!(bound.diagnostics.is_empty());
    }
}
