//! Type resolution.
//!
//! Resolution replaces every `Unresolved` reference with the handle of the
//! type it names and checks that every generic `@T` is in scope. Each node is
//! visited at most once: its `resolved` bit is set on entry, so resolving a
//! definition whose body mentions its own name stops at the second visit.
//!
//! A node whose subtree fails to resolve clears its own bit and every bit
//! below it (`unresolve`), so the next attempt starts from a clean tree.
//! Whether a self-reference makes the type recursive or infinite is a
//! separate question; see [`classify_recursion`](crate::classify_recursion).

use smallvec::SmallVec;
use tracing::{debug, trace};
use vdm_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, ErrorGuaranteed};
use vdm_ir::{Name, StringLookup, TypeId};
use vdm_stack::ensure_sufficient_stack;

use crate::env::{DefKind, Environment, NameScope};
use crate::{TypeKind, TypePool};

/// Resolves types against an environment, reporting into a diagnostic queue.
pub struct Resolver<'a> {
    pool: &'a mut TypePool,
    env: &'a dyn Environment,
    names: &'a dyn StringLookup,
    diagnostics: &'a mut DiagnosticQueue,
}

impl<'a> Resolver<'a> {
    pub fn new(
        pool: &'a mut TypePool,
        env: &'a dyn Environment,
        names: &'a dyn StringLookup,
        diagnostics: &'a mut DiagnosticQueue,
    ) -> Self {
        Resolver {
            pool,
            env,
            names,
            diagnostics,
        }
    }

    /// Resolve `id`, returning the handle to use in its place.
    ///
    /// For an `Unresolved` reference this is the referenced definition's
    /// type; for anything else it is `id` itself, with its children
    /// rewritten in place. Resolving an already resolved type returns it
    /// unchanged.
    #[tracing::instrument(level = "debug", skip_all, fields(ty = id.raw()))]
    pub fn resolve(&mut self, id: TypeId) -> Result<TypeId, ErrorGuaranteed> {
        let result = self.resolve_node(id);
        if result.is_err() {
            debug!("type resolution failed");
        }
        result
    }

    /// Resolve several types, reporting every failure.
    ///
    /// Returns the resolved handles in order; a failed entry keeps its
    /// original handle.
    pub fn resolve_all(
        &mut self,
        ids: impl IntoIterator<Item = TypeId>,
    ) -> Result<Vec<TypeId>, (Vec<TypeId>, ErrorGuaranteed)> {
        let mut failed = None;
        let resolved = ids
            .into_iter()
            .map(|id| {
                self.resolve(id).unwrap_or_else(|err| {
                    failed = Some(err);
                    id
                })
            })
            .collect();
        match failed {
            None => Ok(resolved),
            Some(err) => Err((resolved, err)),
        }
    }

    fn resolve_node(&mut self, id: TypeId) -> Result<TypeId, ErrorGuaranteed> {
        ensure_sufficient_stack(|| {
            match *self.pool.kind(id) {
                TypeKind::Unresolved(name) => {
                    // The bit marks a reference being followed; it is
                    // cleared again once the target is known.
                    if self.pool.mark_resolved(id) {
                        return Err(self.report_alias_cycle(id, name));
                    }
                    let result = self.resolve_name(id, name);
                    self.pool.clear_resolved(id);
                    return result;
                }
                TypeKind::Parameter(name) => return self.resolve_parameter(id, name),
                _ => {}
            }
            if self.pool.mark_resolved(id) {
                return Ok(id);
            }

            let children = self.pool.kind(id).children();
            let mut fixed: SmallVec<[TypeId; 4]> = SmallVec::with_capacity(children.len());
            let mut failed = None;
            for child in children {
                match self.resolve_node(child) {
                    Ok(resolved) => fixed.push(resolved),
                    Err(err) => {
                        failed = Some(err);
                        fixed.push(child);
                    }
                }
            }

            if let Some(err) = failed {
                self.pool.unresolve(id);
                return Err(err);
            }
            for (slot, resolved) in self.pool.kind_mut(id).children_mut().into_iter().zip(fixed) {
                *slot = resolved;
            }
            Ok(id)
        })
    }

    fn resolve_name(&mut self, id: TypeId, name: Name) -> Result<TypeId, ErrorGuaranteed> {
        let env = self.env;
        let from = env.enclosing_module();
        if let Some(def) = env.find_type(name, from) {
            trace!(name = self.names.lookup(name), target = def.ty.raw(), "resolved type name");
            return self.resolve_node(def.ty);
        }

        let text = self.names.lookup(name);
        let span = self.pool.span(id);
        let diagnostic = if env.find_name(name, NameScope::all()).is_some() {
            Diagnostic::error(ErrorCode::E1002)
                .with_message(format!("`{text}` is not a type"))
                .with_label(span, "expected a type name")
        } else {
            debug!(name = text, "unresolvable type name");
            Diagnostic::error(ErrorCode::E1001)
                .with_message(format!("unable to resolve type name `{text}`"))
                .with_label(span, "not found in this scope")
        };
        Err(self.diagnostics.emit_error(diagnostic))
    }

    fn report_alias_cycle(&mut self, id: TypeId, name: Name) -> ErrorGuaranteed {
        let text = self.names.lookup(name);
        debug!(name = text, "type name defined as itself");
        let diagnostic = Diagnostic::error(ErrorCode::E1011)
            .with_message(format!("type `{text}` is defined only in terms of itself"))
            .with_label(self.pool.span(id), "this reference leads back to itself");
        self.diagnostics.emit_error(diagnostic)
    }

    fn resolve_parameter(&mut self, id: TypeId, name: Name) -> Result<TypeId, ErrorGuaranteed> {
        let env = self.env;
        match env.find_type(name, env.enclosing_module()) {
            Some(def) if def.kind == DefKind::TypeParameter => {
                self.pool.mark_resolved(id);
                Ok(id)
            }
            _ => {
                let text = self.names.lookup(name);
                let diagnostic = Diagnostic::error(ErrorCode::E1003)
                    .with_message(format!("type parameter `@{text}` is not defined"))
                    .with_label(self.pool.span(id), "undefined type parameter");
                Err(self.diagnostics.emit_error(diagnostic))
            }
        }
    }
}

impl TypePool {
    /// Clear the resolved bit on `id` and everything reachable below it,
    /// along with the shapes derived from those nodes.
    ///
    /// Stops at nodes whose bit is already clear, so each node is visited
    /// at most once.
    pub fn unresolve(&mut self, id: TypeId) {
        ensure_sufficient_stack(|| {
            self.forget_derived(id);
            if !self.clear_resolved(id) {
                return;
            }
            for child in self.kind(id).children() {
                self.unresolve(child);
            }
        });
    }
}

#[cfg(test)]
mod tests;
