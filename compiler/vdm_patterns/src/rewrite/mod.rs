//! Pattern rewrites: structural copies and in-place type resolution.

use std::convert::Infallible;

use tracing::trace;
use vdm_diagnostic::ErrorGuaranteed;
use vdm_ir::{Name, Pattern, PatternKind, PatternNode, Span, StringInterner, TypeId};
use vdm_stack::ensure_sufficient_stack;
use vdm_types::Resolver;

/// Generator of `$any1`, `$any2`, ... for positions the source left
/// anonymous. `$` cannot start a source identifier, so the names never
/// collide with user names.
pub struct FreshNames<'a> {
    interner: &'a StringInterner,
    counter: u32,
}

impl<'a> FreshNames<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        FreshNames {
            interner,
            counter: 0,
        }
    }

    pub fn next_name(&mut self) -> Name {
        self.counter += 1;
        self.interner.intern(&format!("$any{}", self.counter))
    }
}

/// Copy a pattern of any stage back into a parser pattern.
pub fn to_pattern<N: PatternNode>(pattern: &N) -> Pattern {
    copy(pattern, &mut Pattern::ignore)
}

/// Copy of `pattern` with every `-` replaced by a fresh identifier.
pub fn remove_ignore_patterns<N: PatternNode>(pattern: &N, fresh: &mut FreshNames<'_>) -> Pattern {
    copy(pattern, &mut |span| Pattern::identifier(fresh.next_name(), span))
}

fn copy<'f, N: PatternNode>(
    pattern: &N,
    ignore: &mut (dyn FnMut(Span) -> Pattern + 'f),
) -> Pattern {
    ensure_sufficient_stack(|| {
        let span = pattern.span();
        if let PatternKind::Ignore = pattern.kind() {
            return ignore(span);
        }
        let copied = pattern
            .kind()
            .try_map(&mut |child| Ok::<_, Infallible>(copy(child, &mut *ignore)));
        match copied {
            Ok(kind) => Pattern::new(kind, span),
            Err(never) => match never {},
        }
    })
}

/// Resolve the type handles of record and object patterns in place.
///
/// A handle that fails to resolve becomes `Unknown`, so binding the pattern
/// later does not report the same name again. The walk continues past
/// failures; the first failure is returned.
pub fn resolve_pattern_types(
    pattern: &mut Pattern,
    resolver: &mut Resolver<'_>,
) -> Result<(), ErrorGuaranteed> {
    ensure_sufficient_stack(|| {
        let mut failed = None;
        if let PatternKind::Record { ty, .. } | PatternKind::Object { ty, .. } = &mut pattern.kind {
            match resolver.resolve(*ty) {
                Ok(resolved) => *ty = resolved,
                Err(guarantee) => {
                    trace!(span = ?pattern.span, "pattern type left unknown");
                    *ty = TypeId::UNKNOWN;
                    failed = Some(guarantee);
                }
            }
        }
        for child in pattern.kind.children_mut() {
            if let Err(guarantee) = resolve_pattern_types(child, resolver) {
                failed.get_or_insert(guarantee);
            }
        }
        failed.map_or(Ok(()), Err)
    })
}
