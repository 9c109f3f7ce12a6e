use super::*;
use pretty_assertions::assert_eq;
use vdm_ir::{Expr, Pattern, Span, StringInterner};
use vdm_types::TypeKind;

fn id(names: &StringInterner, s: &str) -> Pattern {
    Pattern::identifier(names.intern(s), Span::DUMMY)
}

fn int(v: i64) -> Pattern {
    Pattern::literal(Literal::Int(v), Span::DUMMY)
}

#[test]
fn length_of_leaves() {
    let names = StringInterner::new();
    assert_eq!(length(&id(&names, "x"), &names), Length::Any);
    assert_eq!(length(&Pattern::ignore(Span::DUMMY), &names), Length::Any);
    assert_eq!(length(&int(7), &names), Length::Fixed(1));

    let s = Pattern::literal(Literal::String(names.intern("héllo")), Span::DUMMY);
    assert_eq!(length(&s, &names), Length::Fixed(5));

    let guard = Pattern::expression(Expr::variable(names.intern("k"), Span::DUMMY));
    assert_eq!(length(&guard, &names), Length::Any);
}

#[test]
fn length_of_aggregates_and_combinators() {
    let names = StringInterner::new();
    let seq = Pattern::seq(vec![id(&names, "a"), id(&names, "b")], Span::DUMMY);
    assert_eq!(length(&seq, &names), Length::Fixed(2));

    let tuple = Pattern::tuple(vec![id(&names, "a"), int(1), int(2)], Span::DUMMY);
    assert_eq!(length(&tuple, &names), Length::Fixed(3));

    let fixed = Pattern::concatenation(seq.clone(), Pattern::seq(vec![int(1)], Span::DUMMY));
    assert_eq!(length(&fixed, &names), Length::Fixed(3));

    let open = Pattern::concatenation(seq, id(&names, "rest"));
    assert_eq!(length(&open, &names), Length::Any);
}

#[test]
fn length_arithmetic() {
    assert_eq!(Length::Fixed(2) + Length::Fixed(3), Length::Fixed(5));
    assert_eq!(Length::Fixed(2) + Length::Any, Length::Any);
    assert_eq!(Length::Any.fixed(), None);
    assert!(Length::Any.is_any());
    assert_eq!(Length::Fixed(4).to_string(), "4");
    assert_eq!(Length::Any.to_string(), "any");
}

#[test]
fn always_matches_rules() {
    let names = StringInterner::new();
    let binders = Pattern::tuple(
        vec![id(&names, "a"), Pattern::ignore(Span::DUMMY)],
        Span::DUMMY,
    );
    assert!(always_matches(&binders));
    assert!(always_matches(&Pattern::union(id(&names, "s"), id(&names, "t"))));

    let with_literal = Pattern::tuple(vec![id(&names, "a"), int(0)], Span::DUMMY);
    assert!(!always_matches(&with_literal));
    assert!(!always_matches(&Pattern::seq(vec![id(&names, "x")], Span::DUMMY)));
    assert!(!always_matches(&Pattern::map_union(
        id(&names, "m"),
        id(&names, "n")
    )));
    assert!(!always_matches(&Pattern::object(
        names.intern("C"),
        TypeId::UNKNOWN,
        Vec::new(),
        Span::DUMMY
    )));
}

#[test]
fn simple_patterns_have_no_variables() {
    let names = StringInterner::new();
    let constant = Pattern::seq(vec![int(1), int(2)], Span::DUMMY);
    assert!(is_simple(&constant));
    assert!(is_simple(&Pattern::expression(Expr::variable(
        names.intern("k"),
        Span::DUMMY
    ))));
    assert!(!is_simple(&Pattern::seq(vec![int(1), id(&names, "x")], Span::DUMMY)));
    assert!(!is_simple(&Pattern::ignore(Span::DUMMY)));
}

#[test]
fn literal_types() {
    let names = StringInterner::new();
    let mut pool = TypePool::new();
    assert_eq!(literal_type(Literal::Int(3), &mut pool), TypeId::NAT1);
    assert_eq!(literal_type(Literal::Int(0), &mut pool), TypeId::NAT);
    assert_eq!(literal_type(Literal::Int(-3), &mut pool), TypeId::INT);
    assert_eq!(literal_type(Literal::real(0.5), &mut pool), TypeId::REAL);
    assert_eq!(literal_type(Literal::Bool(true), &mut pool), TypeId::BOOL);

    let s = literal_type(Literal::String(names.intern("ab")), &mut pool);
    assert_eq!(pool.format_type(s, &names), "seq of char");
    let nil = literal_type(Literal::Nil, &mut pool);
    assert_eq!(pool.format_type(nil, &names), "[?]");
    let quote = literal_type(Literal::Quote(names.intern("RED")), &mut pool);
    assert_eq!(pool.format_type(quote, &names), "<RED>");
}

#[test]
fn possible_types_of_aggregates() {
    let names = StringInterner::new();
    let mut pool = TypePool::new();

    let tuple = Pattern::tuple(vec![id(&names, "a"), int(1)], Span::DUMMY);
    let ty = possible_type(&tuple, &mut pool);
    assert_eq!(pool.format_type(ty, &names), "(? * nat1)");

    let set = Pattern::set(vec![int(1), int(-1)], Span::DUMMY);
    let ty = possible_type(&set, &mut pool);
    assert_eq!(pool.format_type(ty, &names), "set of int");

    let empty = Pattern::seq(Vec::new(), Span::DUMMY);
    let ty = possible_type(&empty, &mut pool);
    assert!(matches!(pool.kind(ty), TypeKind::Seq { empty: true, .. }));

    let map = Pattern::map(vec![(int(1), id(&names, "v"))], Span::DUMMY);
    let ty = possible_type(&map, &mut pool);
    assert_eq!(pool.format_type(ty, &names), "map nat1 to ?");
}

#[test]
fn possible_types_of_combinators() {
    let names = StringInterner::new();
    let mut pool = TypePool::new();

    let concat = Pattern::concatenation(
        Pattern::seq(vec![id(&names, "x")], Span::DUMMY),
        id(&names, "rest"),
    );
    let ty = possible_type(&concat, &mut pool);
    assert_eq!(pool.format_type(ty, &names), "seq of ?");

    let union = Pattern::union(id(&names, "s"), id(&names, "t"));
    let ty = possible_type(&union, &mut pool);
    assert_eq!(pool.format_type(ty, &names), "set of ?");

    let munion = Pattern::map_union(id(&names, "m"), id(&names, "n"));
    let ty = possible_type(&munion, &mut pool);
    assert_eq!(pool.format_type(ty, &names), "map ? to ?");

    let known = Pattern::union(
        Pattern::set(vec![int(1)], Span::DUMMY),
        Pattern::set(vec![int(2)], Span::DUMMY),
    );
    let ty = possible_type(&known, &mut pool);
    assert_eq!(pool.format_type(ty, &names), "set of nat1");
}
