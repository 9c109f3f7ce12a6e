//! Parallel checking of independent units.
//!
//! A unit owns its type pool and environment, so units share nothing but
//! the interner and are checked on rayon's pool without locking.

use rayon::prelude::*;
use tracing::debug;
use vdm_ir::{Item, Name, StringInterner};
use vdm_types::{ModuleEnv, TypePool};

use crate::check::{check_module, CheckConfig, CheckedModule};
use crate::lower::LoweringError;

/// One independently checkable definition list.
pub struct Unit {
    pub name: Name,
    pub pool: TypePool,
    pub env: ModuleEnv,
    pub items: Vec<Item>,
}

/// Outcome of checking one unit. The pool is returned so the bindings'
/// types can still be inspected.
pub struct UnitReport {
    pub name: Name,
    pub pool: TypePool,
    pub result: Result<CheckedModule, LoweringError>,
}

/// Check `units` in parallel; reports come back in input order.
#[tracing::instrument(level = "debug", skip_all, fields(units = units.len()))]
pub fn check_units(
    units: Vec<Unit>,
    names: &StringInterner,
    config: &CheckConfig,
) -> Vec<UnitReport> {
    units
        .into_par_iter()
        .map(|unit| {
            let Unit {
                name,
                mut pool,
                env,
                items,
            } = unit;
            let result = check_module(items, &mut pool, &env, names, config);
            debug!(unit = names.lookup(name), ok = result.is_ok(), "unit checked");
            UnitReport { name, pool, result }
        })
        .collect()
}
