use super::*;
use pretty_assertions::assert_eq;

fn members(set: &TypeSet) -> Vec<TypeId> {
    set.iter().collect()
}

#[test]
fn seq1_is_absorbed_by_seq() {
    let mut pool = TypePool::new();
    let seq = pool.seq(TypeId::NAT);
    let seq1 = pool.seq1(TypeId::NAT);

    let set = TypeSet::from_types(&pool, [seq, seq1]);
    assert_eq!(members(&set), vec![seq]);

    let set = TypeSet::from_types(&pool, [seq1, seq]);
    assert_eq!(members(&set), vec![seq]);
}

#[test]
fn set1_is_absorbed_by_set() {
    let mut pool = TypePool::new();
    let set = pool.set(TypeId::CHAR);
    let set1 = pool.set1(TypeId::CHAR);
    let other = pool.set1(TypeId::BOOL);

    let ts = TypeSet::from_types(&pool, [set1, other, set]);
    assert_eq!(members(&ts), vec![other, set]);
}

#[test]
fn only_the_widest_numeric_type_is_kept() {
    let pool = TypePool::new();
    let ts = TypeSet::from_types(&pool, [TypeId::NAT1, TypeId::INT, TypeId::NAT]);
    assert_eq!(members(&ts), vec![TypeId::INT]);

    let ts = TypeSet::from_types(&pool, [TypeId::NAT, TypeId::CHAR, TypeId::REAL]);
    assert_eq!(members(&ts), vec![TypeId::CHAR, TypeId::REAL]);
}

#[test]
fn optional_absorbs_its_inner_type() {
    let mut pool = TypePool::new();
    let opt = pool.optional(TypeId::BOOL);

    let ts = TypeSet::from_types(&pool, [TypeId::BOOL, opt]);
    assert_eq!(members(&ts), vec![opt]);

    let ts = TypeSet::from_types(&pool, [opt, TypeId::BOOL]);
    assert_eq!(members(&ts), vec![opt]);
}

#[test]
fn nested_unions_are_flattened() {
    let mut pool = TypePool::new();
    let inner = pool.union(vec![TypeId::CHAR, TypeId::BOOL]);
    let ts = TypeSet::from_types(&pool, [TypeId::TOKEN, inner, TypeId::CHAR]);
    assert_eq!(members(&ts), vec![TypeId::TOKEN, TypeId::CHAR, TypeId::BOOL]);
}

#[test]
fn into_type_collapses_small_sets() {
    let mut pool = TypePool::new();
    assert_eq!(TypeSet::new().into_type(&mut pool), TypeId::UNKNOWN);

    let single = TypeSet::from_types(&pool, [TypeId::CHAR, TypeId::CHAR]);
    assert_eq!(single.into_type(&mut pool), TypeId::CHAR);

    let pair = TypeSet::from_types(&pool, [TypeId::CHAR, TypeId::BOOL]);
    let union = pair.into_type(&mut pool);
    assert_eq!(
        pool.kind(union),
        &TypeKind::Union(vec![TypeId::CHAR, TypeId::BOOL])
    );
}

#[test]
fn contains_uses_structural_identity() {
    let mut pool = TypePool::new();
    let a = pool.seq(TypeId::NAT);
    let b = pool.seq(TypeId::NAT);
    let ts = TypeSet::from_types(&pool, [a]);
    assert!(ts.contains(&pool, b));
    assert_eq!(ts.len(), 1);
    assert!(!ts.is_empty());
}
