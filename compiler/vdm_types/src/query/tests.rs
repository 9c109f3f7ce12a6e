use super::*;
use crate::{Field, NamedType, RecordType};
use pretty_assertions::assert_eq;
use vdm_ir::{Span, StringInterner};

struct Fixture {
    names: StringInterner,
    pool: TypePool,
    module: Name,
}

fn fixture() -> Fixture {
    let names = StringInterner::new();
    let module = names.intern("M");
    Fixture {
        names,
        pool: TypePool::new(),
        module,
    }
}

#[test]
fn predicates_look_through_brackets_optionals_and_names() {
    let Fixture {
        names,
        mut pool,
        module,
    } = fixture();
    let set = pool.set(TypeId::NAT);
    let opt = pool.optional(set);
    let bracketed = pool.bracket(opt);
    let named = pool.named(
        NamedType::new(names.intern("S"), module, bracketed),
        Span::DUMMY,
    );

    assert!(pool.is_set(named, module));
    assert!(!pool.is_seq(named, module));
    assert!(pool.is_optional(opt));
    assert!(!pool.is_optional(named));
}

#[test]
fn opaque_types_hide_their_shape_outside_their_module() {
    let Fixture {
        names,
        mut pool,
        module,
    } = fixture();
    let other = names.intern("Other");
    let seq = pool.seq(TypeId::CHAR);
    let hidden = pool.named(
        NamedType::new(names.intern("Str"), module, seq).opaque(),
        Span::DUMMY,
    );

    assert!(pool.is_seq(hidden, module));
    assert!(!pool.is_seq(hidden, other));
    assert_eq!(pool.seq_of(hidden, other), None);

    let rec = pool.record(
        RecordType::new(names.intern("R"), module, Vec::new()).opaque(),
        Span::DUMMY,
    );
    assert!(pool.is_record(rec, module));
    assert!(!pool.is_record(rec, other));
}

#[test]
fn unknown_satisfies_every_predicate() {
    let Fixture {
        mut pool, module, ..
    } = fixture();
    let u = TypeId::UNKNOWN;
    assert!(pool.is_set(u, module));
    assert!(pool.is_map(u, module));
    assert!(pool.is_product(u, 3, module));
    assert!(pool.is_numeric(u, module));
    assert!(pool.is_ordered(u, module));
    assert!(pool.is_unknown(u));

    assert_eq!(pool.product_of(u, 3, module), Some(vec![TypeId::UNKNOWN; 3]));
    assert_eq!(
        pool.map_of(u, module),
        Some(MapShape {
            dom: TypeId::UNKNOWN,
            rng: TypeId::UNKNOWN,
            empty: false,
            injective: false,
        })
    );
}

#[test]
fn union_accessors_combine_member_components() {
    let Fixture {
        mut pool, module, ..
    } = fixture();
    let a = pool.set(TypeId::NAT);
    let b = pool.set1(TypeId::BOOL);
    let union = pool.union(vec![a, b, TypeId::CHAR]);

    assert!(pool.is_set(union, module));
    assert!(pool.is_union(union, module));

    let shape = pool.set_of(union, module);
    let elem = shape.map(|s| s.elem).unwrap_or(TypeId::UNDEFINED);
    assert_eq!(
        pool.kind(elem),
        &TypeKind::Union(vec![TypeId::NAT, TypeId::BOOL])
    );
    assert_eq!(shape.map(|s| s.non_empty), Some(false));

    let before = pool.len();
    let again = pool.set_of(union, module).map(|s| s.elem);
    assert_eq!(again, Some(elem));
    assert_eq!(pool.len(), before);
}

#[test]
fn union_elements_absorb_numeric_types() {
    let Fixture {
        mut pool, module, ..
    } = fixture();
    let a = pool.seq(TypeId::NAT);
    let b = pool.seq(TypeId::INT);
    let union = pool.union(vec![a, b]);
    assert_eq!(pool.seq_of(union, module).map(|s| s.elem), Some(TypeId::INT));
}

#[test]
fn empty_members_contribute_no_elements() {
    let Fixture {
        mut pool, module, ..
    } = fixture();
    let empty = pool.empty_set();
    assert_eq!(pool.set_of(empty, module).map(|s| s.empty), Some(true));

    let set = pool.set(TypeId::NAT);
    let union = pool.union(vec![empty, set]);
    assert_eq!(
        pool.set_of(union, module),
        Some(SetShape {
            elem: TypeId::NAT,
            empty: false,
            non_empty: false,
        })
    );
}

#[test]
fn product_queries_respect_arity() {
    let Fixture {
        mut pool, module, ..
    } = fixture();
    let pair = pool.product(vec![TypeId::NAT, TypeId::BOOL]);
    let triple = pool.product(vec![TypeId::NAT, TypeId::BOOL, TypeId::CHAR]);
    let union = pool.union(vec![pair, triple]);

    assert!(pool.is_product(union, 2, module));
    assert!(pool.is_product(union, 3, module));
    assert!(!pool.is_product(union, 4, module));
    assert_eq!(
        pool.product_of(union, 2, module),
        Some(vec![TypeId::NAT, TypeId::BOOL])
    );
    assert_eq!(pool.product_of(pair, 3, module), None);
}

#[test]
fn record_and_class_accessors_find_first_match() {
    let Fixture {
        names,
        mut pool,
        module,
    } = fixture();
    let (r, c, x) = (names.intern("R"), names.intern("C"), names.intern("x"));
    let rec = pool.record(
        RecordType::new(r, module, vec![Field::new(x, TypeId::NAT)]),
        Span::DUMMY,
    );
    let class = pool.class(c, Span::DUMMY);
    let union = pool.union(vec![TypeId::NAT, rec, class]);

    assert_eq!(pool.record_of(union, module), Some(rec));
    assert_eq!(pool.class_of(union, module), Some(c));
    assert_eq!(pool.find_named(union, r, module), Some(rec));
    assert_eq!(pool.find_named(union, c, module), None);
    assert_eq!(pool.record_of(TypeId::NAT, module), None);
}

#[test]
fn find_named_descends_into_visible_names() {
    let Fixture {
        names,
        mut pool,
        module,
    } = fixture();
    let (r, t) = (names.intern("R"), names.intern("T"));
    let rec = pool.record(RecordType::new(r, module, Vec::new()), Span::DUMMY);
    let opt = pool.optional(rec);
    let outer = pool.named(NamedType::new(t, module, opt), Span::DUMMY);

    assert_eq!(pool.find_named(outer, t, module), Some(outer));
    assert_eq!(pool.find_named(outer, r, module), Some(rec));
}

#[test]
fn ordering_and_equality_clauses() {
    let Fixture {
        names,
        mut pool,
        module,
    } = fixture();
    let ord = crate::TypeFunctions::new(None, None, Some(names.intern("ord_T")));
    let eq = crate::TypeFunctions::new(None, Some(names.intern("eq_U")), None);
    let t = pool.named(
        NamedType::new(names.intern("T"), module, TypeId::CHAR).with_functions(ord),
        Span::DUMMY,
    );
    let u = pool.named(
        NamedType::new(names.intern("U"), module, TypeId::NAT).with_functions(eq),
        Span::DUMMY,
    );

    assert!(pool.is_ordered(t, module));
    assert!(!pool.is_eq(t, module));
    assert!(pool.is_ordered(u, module));
    assert!(pool.is_eq(u, module));
    assert!(!pool.is_ordered(TypeId::CHAR, module));
    assert!(!pool.is_ordered(TypeId::BOOL, module));
}

#[test]
fn self_referential_names_terminate() {
    let Fixture {
        names,
        mut pool,
        module,
    } = fixture();
    let t = pool.named(
        NamedType::new(names.intern("T"), module, TypeId::UNKNOWN),
        Span::DUMMY,
    );
    if let TypeKind::Named(named) = pool.kind_mut(t) {
        named.inner = t;
    }
    assert!(!pool.is_set(t, module));
    assert!(!pool.is_union(t, module));
    assert!(!pool.is_eq(t, module));
}

#[test]
fn function_and_operation_accessors() {
    let Fixture {
        mut pool, module, ..
    } = fixture();
    let f = pool.function(vec![TypeId::NAT], TypeId::BOOL, false);
    let op = pool.operation(Vec::new(), TypeId::VOID);

    let ft = pool.function_of(f, module);
    assert_eq!(ft.as_ref().map(|f| f.partial), Some(false));
    assert_eq!(ft.map(|f| f.params), Some(vec![TypeId::NAT]));
    assert!(pool.is_operation(op, module));
    assert_eq!(pool.operation_of(op, module).map(|o| o.result), Some(TypeId::VOID));
    assert_eq!(pool.function_of(op, module), None);
}
