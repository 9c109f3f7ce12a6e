//! Pre-check stage driver.
//!
//! Resolves the type handles a definition list mentions, lowers the list to
//! the [`PreCheck`] stage and binds every pattern against its type. The walk
//! never stops at a bad definition: each problem becomes a diagnostic and
//! the next definition is checked as usual.

use tracing::{debug, trace};
use vdm_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue};
use vdm_ir::{Item, ItemKind, Name, Pattern, Span, StringInterner, TypeId};
use vdm_patterns::{hidden_variable_warnings, resolve_pattern_types, Binder, Binding};
use vdm_types::{compose_types, report_recursion, Environment, NameScope, Resolver, TypePool};

use crate::lower::{LoweringError, LoweringTable};
use crate::stage::{PreCheck, StagedItem};

/// Pre-check options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// Warn (W5001) when a pattern identifier hides a visible definition.
    pub warn_hidden: bool,
    pub diagnostics: DiagnosticConfig,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            warn_hidden: true,
            diagnostics: DiagnosticConfig::default(),
        }
    }
}

/// Pre-check payload of an item.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct CheckedItem {
    /// Names the item defines at module level.
    pub definitions: Vec<Binding>,
    /// Parameter names visible in the body of a function or operation.
    pub locals: Vec<Binding>,
}

/// A checked definition list.
#[derive(Clone, PartialEq, Debug)]
pub struct CheckedModule {
    pub items: Vec<StagedItem<PreCheck>>,
    /// Module-level definitions of all items, in item order.
    pub definitions: Vec<Binding>,
    /// Resolution, recursion and binding diagnostics, in traversal order.
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckedModule {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Lowering from parser items: no pattern payload, empty item payload.
pub fn precheck_table() -> LoweringTable<Item<Pattern>, PreCheck> {
    LoweringTable::uniform(|_| (), |_| CheckedItem::default())
}

/// Check a definition list against `env`.
#[tracing::instrument(level = "debug", skip_all, fields(items = items.len()))]
pub fn check_module(
    mut items: Vec<Item<Pattern>>,
    pool: &mut TypePool,
    env: &dyn Environment,
    names: &StringInterner,
    config: &CheckConfig,
) -> Result<CheckedModule, LoweringError> {
    let mut queue = DiagnosticQueue::with_config(config.diagnostics.clone());

    let type_defs = resolve_items(&mut items, pool, env, names, &mut queue);
    report_recursion(pool, &type_defs, names, &mut queue);

    let mut staged = precheck_table().lower_items(&items)?;
    let mut definitions = Vec::new();
    for item in &mut staged {
        let mut binder = Binder::new(pool, env, names);
        let checked = check_item(&mut binder, item);
        queue.extend(binder.finish());
        if config.warn_hidden {
            for pattern in item.kind.patterns() {
                queue.extend(hidden_variable_warnings(pattern, env, names));
            }
        }
        definitions.extend(checked.definitions.iter().copied());
        item.data = checked;
    }

    let diagnostics = queue.flush();
    debug!(
        definitions = definitions.len(),
        diagnostics = diagnostics.len(),
        "definition list checked"
    );
    Ok(CheckedModule {
        items: staged,
        definitions,
        diagnostics,
    })
}

/// Resolve every type handle of `items` in place and return the type
/// definitions, followed by the inline `compose` records inside them. A
/// handle that fails to resolve becomes `Unknown`.
fn resolve_items(
    items: &mut [Item<Pattern>],
    pool: &mut TypePool,
    env: &dyn Environment,
    names: &StringInterner,
    queue: &mut DiagnosticQueue,
) -> Vec<TypeId> {
    let mut resolver = Resolver::new(pool, env, names, queue);
    let mut resolve = |ty: &mut TypeId| {
        *ty = resolver.resolve(*ty).unwrap_or(TypeId::UNKNOWN);
    };
    let mut type_defs = Vec::new();
    let mut patterns: Vec<&mut Pattern> = Vec::new();
    for item in items.iter_mut() {
        match &mut item.kind {
            ItemKind::Value {
                pattern, declared, ..
            } => {
                if let Some(ty) = declared {
                    resolve(ty);
                }
                patterns.push(pattern);
            }
            ItemKind::Function { ty, params, .. } => {
                resolve(ty);
                patterns.extend(params.iter_mut().flatten());
            }
            ItemKind::Operation { ty, params, .. } => {
                resolve(ty);
                patterns.extend(params.iter_mut());
            }
            ItemKind::Type { ty, .. } => {
                resolve(ty);
                if *ty != TypeId::UNKNOWN {
                    type_defs.push(*ty);
                }
            }
        }
    }
    for pattern in patterns {
        // Failures are already reported; the handle is left `Unknown`.
        let _ = resolve_pattern_types(pattern, &mut resolver);
    }

    let inline: Vec<TypeId> = type_defs
        .iter()
        .flat_map(|&def| compose_types(pool, def))
        .collect();
    for ty in inline {
        if !type_defs.contains(&ty) {
            type_defs.push(ty);
        }
    }
    type_defs
}

fn check_item(binder: &mut Binder<'_>, item: &StagedItem<PreCheck>) -> CheckedItem {
    let defined = |name: Name, ty: TypeId, scope: NameScope, span: Span| Binding {
        name,
        ty,
        scope,
        span,
    };
    match &item.kind {
        ItemKind::Value {
            pattern, declared, ..
        } => CheckedItem {
            definitions: binder.bind_definitions(pattern, *declared, NameScope::GLOBAL),
            locals: Vec::new(),
        },
        ItemKind::Function {
            name, ty, params, ..
        } => {
            let mut locals = Vec::new();
            let mut current = *ty;
            for group in params {
                let (types, result) = function_params(binder, current, group.len());
                locals.extend(binder.bind_list(group, &types, NameScope::LOCAL));
                current = result;
            }
            CheckedItem {
                definitions: vec![defined(*name, *ty, NameScope::GLOBAL, item.span)],
                locals: binder.dedup(locals),
            }
        }
        ItemKind::Operation {
            name, ty, params, ..
        } => {
            let from = binder.module();
            let types = match binder.pool().operation_of(*ty, from) {
                Some(op) if !binder.pool().is_unknown(*ty) => op.params,
                _ => vec![TypeId::UNKNOWN; params.len()],
            };
            CheckedItem {
                definitions: vec![defined(*name, *ty, NameScope::GLOBAL, item.span)],
                locals: binder.bind_list(params, &types, NameScope::LOCAL),
            }
        }
        ItemKind::Type { name, ty } => CheckedItem {
            definitions: vec![defined(*name, *ty, NameScope::TYPENAME, item.span)],
            locals: Vec::new(),
        },
    }
}

/// Parameter types of one curried group of a function typed `ty`, and the
/// type of the rest. Anything that is not a function binds `Unknown`.
fn function_params(binder: &mut Binder<'_>, ty: TypeId, arity: usize) -> (Vec<TypeId>, TypeId) {
    let from = binder.module();
    let pool = binder.pool();
    match pool.function_of(ty, from) {
        Some(function) if !pool.is_unknown(ty) => (function.params, function.result),
        _ => {
            trace!(ty = ty.raw(), "parameters bound without a function type");
            (vec![TypeId::UNKNOWN; arity], TypeId::UNKNOWN)
        }
    }
}
