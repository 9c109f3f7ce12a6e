use super::*;
use crate::{Field, NamedType, RecordType};
use pretty_assertions::assert_eq;
use vdm_ir::StringInterner;

#[test]
fn fixed_slots_hold_basic_types() {
    let pool = TypePool::new();
    for basic in BasicType::ALL {
        assert_eq!(pool.kind(basic.id()), &TypeKind::Basic(basic));
        assert!(pool.is_resolved(basic.id()));
    }
    assert_eq!(pool.kind(TypeId::VOID), &TypeKind::Void);
    assert_eq!(pool.kind(TypeId::UNKNOWN), &TypeKind::Unknown);
    assert_eq!(pool.kind(TypeId::UNDEFINED), &TypeKind::Undefined);
    assert_eq!(pool.len(), TypeId::PRIMITIVE_COUNT as usize);
    assert!(pool.is_empty());
}

#[test]
fn alloc_reuses_fixed_slots() {
    let mut pool = TypePool::new();
    assert_eq!(
        pool.alloc(TypeKind::Basic(BasicType::Int), Span::DUMMY),
        TypeId::INT
    );
    assert_eq!(pool.alloc(TypeKind::Unknown, Span::DUMMY), TypeId::UNKNOWN);
    assert!(pool.is_empty());
}

#[test]
fn constructors_build_expected_kinds() {
    let mut pool = TypePool::new();

    let s1 = pool.set1(TypeId::NAT);
    assert_eq!(
        pool.kind(s1),
        &TypeKind::Set {
            elem: TypeId::NAT,
            empty: false,
            non_empty: true
        }
    );

    let m = pool.inmap(TypeId::INT, TypeId::BOOL);
    assert!(matches!(
        pool.kind(m),
        TypeKind::Map {
            injective: true,
            empty: false,
            ..
        }
    ));

    let empty = pool.empty_seq();
    assert!(matches!(pool.kind(empty), TypeKind::Seq { empty: true, .. }));

    let f = pool.function(vec![TypeId::NAT, TypeId::CHAR], TypeId::BOOL, true);
    assert_eq!(
        pool.kind(f).children().as_slice(),
        &[TypeId::NAT, TypeId::CHAR, TypeId::BOOL]
    );
    assert!(!pool.is_resolved(f));
}

#[test]
fn children_mut_rewrites_record_fields() {
    let names = StringInterner::new();
    let (r, m, a, b) = (
        names.intern("R"),
        names.intern("M"),
        names.intern("a"),
        names.intern("b"),
    );
    let mut pool = TypePool::new();
    let rec = pool.record(
        RecordType::new(
            r,
            m,
            vec![Field::new(a, TypeId::NAT), Field::new(b, TypeId::BOOL)],
        ),
        Span::DUMMY,
    );
    for slot in pool.kind_mut(rec).children_mut() {
        *slot = TypeId::INT;
    }
    assert_eq!(
        pool.kind(rec).children().as_slice(),
        &[TypeId::INT, TypeId::INT]
    );
}

#[test]
fn debracket_skips_nested_brackets() {
    let mut pool = TypePool::new();
    let inner = pool.bracket(TypeId::NAT);
    let outer = pool.bracket(inner);
    assert_eq!(pool.debracket(outer), TypeId::NAT);
    assert_eq!(pool.debracket(TypeId::BOOL), TypeId::BOOL);
}

#[test]
fn maximal_of_copies_named_type() {
    let names = StringInterner::new();
    let (t, m) = (names.intern("T"), names.intern("M"));
    let mut pool = TypePool::new();
    let named = pool.named(NamedType::new(t, m, TypeId::NAT), Span::new(4, 5));

    let max = pool.maximal_of(named);
    assert_ne!(max, named);
    match pool.kind(max) {
        TypeKind::Named(n) => {
            assert!(n.maximal);
            assert_eq!(n.name, t);
        }
        other => panic!("expected a named type, got {other:?}"),
    }
    assert_eq!(pool.span(max), Span::new(4, 5));
    assert_eq!(pool.maximal_of(max), max);
    assert_eq!(pool.maximal_of(TypeId::INT), TypeId::INT);
}
