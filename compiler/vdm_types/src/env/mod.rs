//! Name environments.
//!
//! Resolution and binding never own definitions; they query an
//! [`Environment`]. [`ModuleEnv`] is the flat table for one module or class
//! and [`ScopedEnv`] pushes a frame of local definitions in front of another
//! environment.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use vdm_ir::{Access, Name, Span, TypeId};

bitflags! {
    /// Which kinds of definition a name lookup may return.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct NameScope: u8 {
        const LOCAL = 1 << 0;
        const GLOBAL = 1 << 1;
        const STATE = 1 << 2;
        /// State as it was before an operation (`x~`).
        const OLDSTATE = 1 << 3;
        const TYPENAME = 1 << 4;
        const CLASSNAME = 1 << 5;

        const NAMES = Self::LOCAL.bits() | Self::GLOBAL.bits();
        const NAMESANDSTATE = Self::NAMES.bits() | Self::STATE.bits();
    }
}

/// Index of a [`Definition`] in its environment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct DefId(u32);

impl DefId {
    const UNASSIGNED: DefId = DefId(u32::MAX);

    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DefKind {
    Type,
    Value,
    Local,
    InstanceVariable,
    Function,
    Operation,
    TypeParameter,
    Class,
}

impl DefKind {
    /// The lookup scope a definition of this kind answers to.
    pub fn scope(self) -> NameScope {
        match self {
            DefKind::Local => NameScope::LOCAL,
            DefKind::Value | DefKind::Function | DefKind::Operation => NameScope::GLOBAL,
            DefKind::InstanceVariable => NameScope::STATE | NameScope::OLDSTATE,
            DefKind::Type | DefKind::TypeParameter => NameScope::TYPENAME,
            DefKind::Class => NameScope::CLASSNAME,
        }
    }

    pub fn is_type(self) -> bool {
        matches!(
            self,
            DefKind::Type | DefKind::TypeParameter | DefKind::Class
        )
    }
}

/// A named definition visible to resolution and binding.
#[derive(Clone, PartialEq, Debug)]
pub struct Definition {
    pub id: DefId,
    pub name: Name,
    pub span: Span,
    pub kind: DefKind,
    pub ty: TypeId,
    pub access: Access,
    pub is_static: bool,
    /// Defining module; filled in by the environment when left empty.
    pub module: Name,
    /// Owning class of a class member.
    pub class: Option<Name>,
}

impl Definition {
    pub fn new(name: Name, kind: DefKind, ty: TypeId, span: Span) -> Self {
        Definition {
            id: DefId::UNASSIGNED,
            name,
            span,
            kind,
            ty,
            access: Access::Private,
            is_static: false,
            module: Name::EMPTY,
            class: None,
        }
    }

    #[must_use]
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A class: its superclasses and member definitions.
#[derive(Clone, PartialEq, Debug)]
pub struct ClassDef {
    pub name: Name,
    pub supers: Vec<Name>,
    pub members: Vec<DefId>,
}

/// Lookup interface used by resolution and binding.
pub trait Environment {
    /// A type, class or type parameter definition visible from module `from`.
    fn find_type(&self, name: Name, from: Name) -> Option<&Definition>;

    /// A definition of `name` whose kind answers to `scope`.
    fn find_name(&self, name: Name, scope: NameScope) -> Option<&Definition>;

    fn definition(&self, id: DefId) -> Option<&Definition>;

    fn class(&self, name: Name) -> Option<&ClassDef>;

    /// Module (or class) whose definitions are being checked.
    fn enclosing_module(&self) -> Name;

    /// Class whose definitions are being checked, if any.
    fn enclosing_class(&self) -> Option<Name>;

    /// One past the largest [`DefId`] this environment hands out.
    fn def_limit(&self) -> u32;

    /// Is `sub` the class `sup` or one of its subclasses?
    fn is_subclass(&self, sub: Name, sup: Name) -> bool {
        let mut pending = vec![sub];
        let mut seen: SmallVec<[Name; 8]> = SmallVec::new();
        while let Some(class) = pending.pop() {
            if class == sup {
                return true;
            }
            if seen.contains(&class) {
                continue;
            }
            seen.push(class);
            if let Some(def) = self.class(class) {
                pending.extend(def.supers.iter().copied());
            }
        }
        false
    }

    /// Member `name` of `class` or of its nearest superclass declaring it.
    fn find_member(&self, class: Name, name: Name) -> Option<&Definition> {
        let mut pending = vec![class];
        let mut seen: SmallVec<[Name; 8]> = SmallVec::new();
        while let Some(current) = pending.first().copied() {
            pending.remove(0);
            if seen.contains(&current) {
                continue;
            }
            seen.push(current);
            let Some(def) = self.class(current) else {
                continue;
            };
            let found = def
                .members
                .iter()
                .filter_map(|&id| self.definition(id))
                .find(|d| d.name == name);
            if found.is_some() {
                return found;
            }
            pending.extend(def.supers.iter().copied());
        }
        None
    }

    /// May code in the enclosing class see `member`?
    fn is_accessible(&self, member: &Definition) -> bool {
        let Some(owner) = member.class else {
            return true;
        };
        match member.access {
            Access::Public => true,
            Access::Protected => self
                .enclosing_class()
                .is_some_and(|caller| self.is_subclass(caller, owner)),
            Access::Private => self.enclosing_class() == Some(owner),
        }
    }
}

/// Flat definition table for one module or class.
#[derive(Clone, Debug, Default)]
pub struct ModuleEnv {
    module: Name,
    class: Option<Name>,
    defs: Vec<Definition>,
    by_name: FxHashMap<Name, SmallVec<[DefId; 2]>>,
    classes: FxHashMap<Name, ClassDef>,
}

impl ModuleEnv {
    pub fn new(module: Name) -> Self {
        ModuleEnv {
            module,
            ..ModuleEnv::default()
        }
    }

    /// Environment for checking the body of class `class`.
    pub fn for_class(class: Name) -> Self {
        ModuleEnv {
            module: class,
            class: Some(class),
            ..ModuleEnv::default()
        }
    }

    fn push(&mut self, mut def: Definition) -> DefId {
        let id = DefId(u32::try_from(self.defs.len()).unwrap_or(u32::MAX - 1));
        def.id = id;
        if def.module == Name::EMPTY {
            def.module = self.module;
        }
        self.defs.push(def);
        id
    }

    /// Add a module-level definition.
    pub fn define(&mut self, def: Definition) -> DefId {
        let name = def.name;
        let id = self.push(def);
        self.by_name.entry(name).or_default().push(id);
        id
    }

    /// Add a class with its members; the class name itself is defined with type `ty`.
    pub fn define_class(
        &mut self,
        name: Name,
        ty: TypeId,
        supers: Vec<Name>,
        members: Vec<Definition>,
        span: Span,
    ) -> DefId {
        let members = members
            .into_iter()
            .map(|mut member| {
                member.class = Some(name);
                member.module = name;
                self.push(member)
            })
            .collect();
        self.classes.insert(
            name,
            ClassDef {
                name,
                supers,
                members,
            },
        );
        self.define(Definition::new(name, DefKind::Class, ty, span).with_access(Access::Public))
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.defs
    }

    fn visible_from(def: &Definition, from: Name) -> bool {
        def.module == from || def.access == Access::Public
    }
}

impl Environment for ModuleEnv {
    fn find_type(&self, name: Name, from: Name) -> Option<&Definition> {
        self.by_name
            .get(&name)?
            .iter()
            .map(|id| &self.defs[id.0 as usize])
            .find(|d| d.kind.is_type() && Self::visible_from(d, from))
    }

    fn find_name(&self, name: Name, scope: NameScope) -> Option<&Definition> {
        let module_level = self.by_name.get(&name).and_then(|ids| {
            ids.iter()
                .map(|id| &self.defs[id.0 as usize])
                .find(|d| d.kind.scope().intersects(scope))
        });
        if module_level.is_some() {
            return module_level;
        }
        let class = self.class?;
        self.find_member(class, name)
            .filter(|d| d.kind.scope().intersects(scope))
    }

    fn definition(&self, id: DefId) -> Option<&Definition> {
        self.defs.get(id.0 as usize)
    }

    fn class(&self, name: Name) -> Option<&ClassDef> {
        self.classes.get(&name)
    }

    fn enclosing_module(&self) -> Name {
        self.module
    }

    fn enclosing_class(&self) -> Option<Name> {
        self.class
    }

    fn def_limit(&self) -> u32 {
        u32::try_from(self.defs.len()).unwrap_or(u32::MAX - 1)
    }
}

/// A frame of local definitions in front of an outer environment.
pub struct ScopedEnv<'a> {
    outer: &'a dyn Environment,
    base: u32,
    locals: Vec<Definition>,
}

impl<'a> ScopedEnv<'a> {
    pub fn new(outer: &'a dyn Environment) -> Self {
        ScopedEnv {
            outer,
            base: outer.def_limit(),
            locals: Vec::new(),
        }
    }

    /// Add a local definition; later locals shadow earlier ones.
    pub fn define(&mut self, mut def: Definition) -> DefId {
        let offset = u32::try_from(self.locals.len()).unwrap_or(0);
        let id = DefId(self.base.saturating_add(offset));
        def.id = id;
        if def.module == Name::EMPTY {
            def.module = self.outer.enclosing_module();
        }
        self.locals.push(def);
        id
    }

    pub fn locals(&self) -> &[Definition] {
        &self.locals
    }
}

impl Environment for ScopedEnv<'_> {
    fn find_type(&self, name: Name, from: Name) -> Option<&Definition> {
        self.locals
            .iter()
            .rev()
            .find(|d| d.name == name && d.kind.is_type())
            .or_else(|| self.outer.find_type(name, from))
    }

    fn find_name(&self, name: Name, scope: NameScope) -> Option<&Definition> {
        self.locals
            .iter()
            .rev()
            .find(|d| d.name == name && d.kind.scope().intersects(scope))
            .or_else(|| self.outer.find_name(name, scope))
    }

    fn definition(&self, id: DefId) -> Option<&Definition> {
        match id.0.checked_sub(self.base) {
            Some(offset) => self.locals.get(offset as usize),
            None => self.outer.definition(id),
        }
    }

    fn class(&self, name: Name) -> Option<&ClassDef> {
        self.outer.class(name)
    }

    fn enclosing_module(&self) -> Name {
        self.outer.enclosing_module()
    }

    fn enclosing_class(&self) -> Option<Name> {
        self.outer.enclosing_class()
    }

    fn def_limit(&self) -> u32 {
        let len = u32::try_from(self.locals.len()).unwrap_or(0);
        self.base.saturating_add(len)
    }
}
