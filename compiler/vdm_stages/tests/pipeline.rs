//! Definition lists through all three stages.

use pretty_assertions::assert_eq;
use vdm_diagnostic::ErrorCode;
use vdm_ir::{Access, Expr, Item, ItemKind, Pattern, Span, StringInterner, TypeId};
use vdm_stages::{
    check_module, generate_obligations, prepare_execution, CheckConfig, PoConfig,
};
use vdm_types::{DefKind, Definition, ModuleEnv, TypePool};

struct Module {
    names: StringInterner,
    pool: TypePool,
    env: ModuleEnv,
}

impl Module {
    fn new() -> Self {
        let names = StringInterner::new();
        let mut env = ModuleEnv::new(names.intern("Stack"));
        env.define(Definition::new(
            names.intern("init"),
            DefKind::Value,
            TypeId::UNKNOWN,
            Span::new(100, 104),
        ));
        Module {
            names,
            pool: TypePool::new(),
            env,
        }
    }

    fn id(&self, s: &str, start: u32) -> Pattern {
        Pattern::identifier(self.names.intern(s), Span::new(start, start + 1))
    }

    fn value(&self, pattern: Pattern, declared: TypeId, from: &str, span: Span) -> Item {
        Item::new(
            ItemKind::Value {
                pattern,
                declared: Some(declared),
                value: Expr::variable(self.names.intern(from), Span::DUMMY),
            },
            Access::Public,
            span,
        )
    }
}

#[test]
fn definitions_flow_through_every_stage() {
    let mut m = Module::new();
    let pair = m.pool.product(vec![TypeId::NAT, TypeId::NAT]);
    let stack = m.pool.seq(TypeId::NAT);
    let step = m.pool.function(vec![TypeId::NAT], TypeId::NAT, false);

    let top = m.value(
        Pattern::concatenation(
            Pattern::seq(vec![m.id("t", 1)], Span::new(0, 3)),
            m.id("rest", 6),
        ),
        stack,
        "s",
        Span::new(0, 20),
    );
    let limits = m.value(
        Pattern::tuple(vec![m.id("lo", 24), Pattern::ignore(Span::new(28, 29))], Span::new(21, 30)),
        pair,
        "bounds",
        Span::new(21, 40),
    );
    let succ = Item::new(
        ItemKind::Function {
            name: m.names.intern("succ"),
            ty: step,
            params: vec![vec![m.id("n", 50)]],
            body: Expr::variable(m.names.intern("n"), Span::DUMMY),
        },
        Access::Public,
        Span::new(45, 60),
    );

    let Ok(checked) = check_module(
        vec![top, limits, succ],
        &mut m.pool,
        &m.env,
        &m.names,
        &CheckConfig::default(),
    ) else {
        panic!("pre-check lowering covers every shape");
    };
    assert!(checked.diagnostics.is_empty());
    let defined: Vec<(&str, String)> = checked
        .definitions
        .iter()
        .map(|b| (m.names.lookup(b.name), m.pool.format_type(b.ty, &m.names)))
        .collect();
    assert_eq!(
        defined,
        vec![
            ("t", "nat".to_owned()),
            ("rest", "seq of nat".to_owned()),
            ("lo", "nat".to_owned()),
            ("succ", "(nat +> nat)".to_owned()),
        ]
    );

    let Ok(pos) = generate_obligations(&checked.items, &mut m.pool, &m.names, &PoConfig::default())
    else {
        panic!("obligation lowering covers every shape");
    };
    let texts: Vec<&str> = pos.obligations.iter().map(|o| o.text.as_str()).collect();
    assert_eq!(texts, vec!["exists [t] ^ rest : seq of nat & [t] ^ rest = s"]);

    let Ok(exec) = prepare_execution(&pos.items) else {
        panic!("execution lowering covers every shape");
    };
    let layouts: Vec<usize> = exec.iter().map(|item| item.data.len()).collect();
    assert_eq!(layouts, vec![2, 1, 1]);
}

#[test]
fn problems_are_collected_not_fatal() {
    let mut m = Module::new();
    let pair = m.pool.product(vec![TypeId::NAT, TypeId::NAT]);
    let missing = m.pool.unresolved(m.names.intern("Elem"), Span::new(70, 74));

    let wrong_arity = m.value(
        Pattern::tuple(vec![m.id("a", 1), m.id("b", 3), m.id("c", 5)], Span::new(0, 7)),
        pair,
        "p",
        Span::new(0, 10),
    );
    let hides = m.value(m.id("init", 20), TypeId::NAT, "z", Span::new(20, 30));
    let unresolved = m.value(m.id("e", 60), missing, "q", Span::new(60, 80));

    let Ok(checked) = check_module(
        vec![wrong_arity, hides, unresolved],
        &mut m.pool,
        &m.env,
        &m.names,
        &CheckConfig::default(),
    ) else {
        panic!("pre-check lowering covers every shape");
    };
    let codes: Vec<ErrorCode> = checked.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1001, ErrorCode::E2001, ErrorCode::W5001]);
    assert!(checked.has_errors());
    assert_eq!(checked.items.len(), 3);

    let Ok(pos) = generate_obligations(&checked.items, &mut m.pool, &m.names, &PoConfig::default())
    else {
        panic!("obligation lowering covers every shape");
    };
    assert!(pos.obligations.is_empty());
}
