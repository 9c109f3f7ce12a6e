//! Stack growth for deep recursive descents.
//!
//! Type resolution, pattern binding and every fold over pattern, expression
//! and type trees recurse once per nesting level. Source trees are unbounded
//! in depth (a machine-generated `[x] ^ [y] ^ ...` chain is a right-leaning
//! list thousands of nodes long), so each recursive step runs through
//! [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`; on
//! `wasm32` the closure is called directly.

/// Grow when less than this remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const GROWTH: usize = 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// ```text
/// fn depth(p: &Pattern) -> usize {
///     ensure_sufficient_stack(|| {
///         1 + p.kind.children().into_iter().map(depth).max().unwrap_or(0)
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
