//! Type formatting for diagnostics and obligations.
//!
//! Output uses the modelling language's type syntax, so a formatted type can
//! be pasted into a generated obligation.

use vdm_ir::{StringLookup, TypeId};

use crate::{TypeKind, TypePool};

impl TypePool {
    /// Format a type as a human-readable string.
    pub fn format_type(&self, id: TypeId, names: &dyn StringLookup) -> String {
        let mut buf = String::new();
        self.format_type_into(id, names, &mut buf);
        buf
    }

    fn format_list(&self, list: &[TypeId], sep: &str, names: &dyn StringLookup, buf: &mut String) {
        for (i, &ty) in list.iter().enumerate() {
            if i > 0 {
                buf.push_str(sep);
            }
            self.format_type_into(ty, names, buf);
        }
    }

    fn format_params(&self, params: &[TypeId], names: &dyn StringLookup, buf: &mut String) {
        if params.is_empty() {
            buf.push_str("()");
        } else {
            self.format_list(params, " * ", names, buf);
        }
    }

    /// Format a type into an existing string buffer.
    ///
    /// Named and record types print as their name, so cyclic types terminate.
    pub fn format_type_into(&self, id: TypeId, names: &dyn StringLookup, buf: &mut String) {
        match self.kind(id) {
            TypeKind::Basic(basic) => buf.push_str(basic.as_str()),
            TypeKind::Quote(tag) => {
                buf.push('<');
                buf.push_str(names.lookup(*tag));
                buf.push('>');
            }
            TypeKind::Set { empty: true, .. } => buf.push_str("{}"),
            TypeKind::Set {
                elem, non_empty, ..
            } => {
                buf.push_str(if *non_empty { "set1 of " } else { "set of " });
                self.format_type_into(*elem, names, buf);
            }
            TypeKind::Seq { empty: true, .. } => buf.push_str("[]"),
            TypeKind::Seq {
                elem, non_empty, ..
            } => {
                buf.push_str(if *non_empty { "seq1 of " } else { "seq of " });
                self.format_type_into(*elem, names, buf);
            }
            TypeKind::Map { empty: true, .. } => buf.push_str("{|->}"),
            TypeKind::Map {
                dom,
                rng,
                injective,
                ..
            } => {
                buf.push_str(if *injective { "inmap " } else { "map " });
                self.format_type_into(*dom, names, buf);
                buf.push_str(" to ");
                self.format_type_into(*rng, names, buf);
            }
            TypeKind::Product(list) => {
                buf.push('(');
                self.format_list(list, " * ", names, buf);
                buf.push(')');
            }
            TypeKind::Union(list) => {
                buf.push('(');
                self.format_list(list, " | ", names, buf);
                buf.push(')');
            }
            TypeKind::Optional(inner) => {
                buf.push('[');
                self.format_type_into(*inner, names, buf);
                buf.push(']');
            }
            TypeKind::Bracket(inner) => {
                buf.push('(');
                self.format_type_into(*inner, names, buf);
                buf.push(')');
            }
            TypeKind::Function(f) => {
                buf.push('(');
                self.format_params(&f.params, names, buf);
                buf.push_str(if f.partial { " -> " } else { " +> " });
                self.format_type_into(f.result, names, buf);
                buf.push(')');
            }
            TypeKind::Operation(op) => {
                buf.push('(');
                self.format_params(&op.params, names, buf);
                buf.push_str(" ==> ");
                self.format_type_into(op.result, names, buf);
                buf.push(')');
            }
            TypeKind::Named(named) => {
                buf.push_str(names.lookup(named.name));
                if named.maximal {
                    buf.push('!');
                }
            }
            TypeKind::Record(record) => {
                buf.push_str(names.lookup(record.name));
                if record.maximal {
                    buf.push('!');
                }
            }
            TypeKind::Parameter(name) => {
                buf.push('@');
                buf.push_str(names.lookup(*name));
            }
            TypeKind::Unresolved(name) | TypeKind::Class(name) => buf.push_str(names.lookup(*name)),
            TypeKind::Void => buf.push_str("()"),
            TypeKind::Unknown => buf.push('?'),
            TypeKind::Undefined => buf.push_str("undefined"),
        }
    }
}
