use super::*;
use crate::StringInterner;
use pretty_assertions::assert_eq;

fn sp(start: u32) -> Span {
    Span::new(start, start + 1)
}

#[test]
fn tags_cover_every_variant_once() {
    let mut seen = std::collections::HashSet::new();
    for tag in PatternTag::ALL {
        assert!(seen.insert(tag), "{tag} listed twice");
    }
    assert_eq!(seen.len(), 13);
}

#[test]
fn children_are_in_source_order() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let b = interner.intern("b");
    let c = interner.intern("c");

    let map = Pattern::map(
        vec![
            (Pattern::identifier(a, sp(1)), Pattern::identifier(b, sp(3))),
            (Pattern::ignore(sp(5)), Pattern::identifier(c, sp(7))),
        ],
        Span::new(0, 9),
    );

    let tags: Vec<_> = map.kind.children().iter().map(|p| p.kind.tag()).collect();
    assert_eq!(
        tags,
        vec![
            PatternTag::Identifier,
            PatternTag::Identifier,
            PatternTag::Ignore,
            PatternTag::Identifier
        ]
    );
    assert_eq!(map.kind.children()[3].span, sp(7));
}

#[test]
fn try_map_copies_shape_and_payload_fields() {
    let interner = StringInterner::new();
    let point = interner.intern("Point");
    let x = interner.intern("x");

    let record = Pattern::record(
        point,
        TypeId::from_raw(40),
        vec![Pattern::identifier(x, sp(8)), Pattern::ignore(sp(11))],
        Span::new(0, 12),
    );

    let copied: PatternKind<Span> = record
        .kind
        .try_map(&mut |child: &Pattern| Ok::<_, ()>(child.span))
        .unwrap_or(PatternKind::Ignore);

    assert_eq!(
        copied,
        PatternKind::Record {
            typename: point,
            ty: TypeId::from_raw(40),
            fields: vec![sp(8), sp(11)],
        }
    );
}

#[test]
fn try_map_stops_at_first_error() {
    let union = Pattern::union(Pattern::ignore(sp(0)), Pattern::ignore(sp(4)));
    let mut calls = 0;
    let result: Result<PatternKind<()>, &str> = union.kind.try_map(&mut |_| {
        calls += 1;
        Err("stop")
    });
    assert_eq!(result, Err("stop"));
    assert_eq!(calls, 1);
}

#[test]
fn combinator_spans_cover_both_sides() {
    let cat = Pattern::concatenation(Pattern::ignore(Span::new(0, 3)), Pattern::ignore(Span::new(6, 10)));
    assert_eq!(cat.span, Span::new(0, 10));
}
