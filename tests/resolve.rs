use pretty_assertions::assert_eq;
use watype::types::*;
use watype::*;

fn ref_to(x: u32, nullable: bool) -> ValType {
    ValType::Ref(RefType::new(nullable, HeapType::Def(Var::Syn(x))))
}

fn struct_of(fields: Vec<ValType>) -> SubType {
    SubType::new(StrType::Struct(StructType(
        fields
            .into_iter()
            .map(|t| FieldType(Mut::Const, StorageType::ValType(t)))
            .collect(),
    )))
}

fn i32_struct() -> SubType {
    struct_of(vec![ValType::Num(NumType::Int32)])
}

// the identity a resolved struct's n-th field refers to
fn field_target(x: &SemVar, n: usize) -> SemVar {
    let FieldType(_, StorageType::ValType(ValType::Ref(rt))) = &x.expand().as_struct().0[n] else {
        panic!("field {n} is not a reference");
    };
    match &rt.ht {
        HeapType::Def(Var::Sem(y)) => y.clone(),
        other => panic!("field {n} does not refer to a resolved declaration: {other:?}"),
    }
}

#[test]
fn group_members_share_one_list() {
    let dt = DefType::Rec(vec![i32_struct(), i32_struct(), i32_struct()]);
    let cts = ctx_types_of_def_type(0, &dt);
    assert_eq!(cts.len(), 3);

    let groups: Vec<&RecGroup> = cts
        .iter()
        .enumerate()
        .map(|(i, ct)| match ct {
            CtxType::Rec(group, j) => {
                assert_eq!(*j as usize, i);
                group
            }
            CtxType::Sub(_) => panic!("member {i} lost its group"),
        })
        .collect();
    assert!(groups.iter().all(|g| g.ptr_eq(groups[0])));
}

#[test]
fn flattening_follows_declaration_order() {
    let decl = |n: usize| struct_of(vec![ValType::Num(NumType::Int32); n]);
    let dts = vec![
        DefType::Sub(decl(0)),
        DefType::Rec(vec![decl(1), decl(2), decl(3)]),
        DefType::Sub(decl(4)),
        DefType::Rec(vec![decl(5), decl(6)]),
        DefType::Rec(vec![]),
        DefType::Rec(vec![decl(7)]),
    ];

    let cts = ctx_types_of_def_types(&dts);
    assert_eq!(cts.len(), 8);
    for (i, ct) in cts.iter().enumerate() {
        assert_eq!(ct.expand().as_struct().0.len(), i);
    }

    // members of the second group are denoted by the indices they occupy
    let CtxType::Rec(group, 0) = &cts[1] else {
        panic!("expected the first member of a group");
    };
    let vars: Vec<Var> = group.vars().cloned().collect();
    assert_eq!(vars, vec![Var::Syn(1), Var::Syn(2), Var::Syn(3)]);
}

#[test]
fn separate_declarations_stay_distinct() {
    let dts = vec![
        DefType::Sub(i32_struct()),
        DefType::Sub(i32_struct()),
        DefType::Sub(struct_of(vec![ref_to(0, false), ref_to(0, true), ref_to(1, false)])),
    ];
    let ids = sem_def_types(&dts);
    assert_eq!(ids.len(), 3);

    assert_ne!(ids[0], ids[1]);
    assert_eq!(ids[0].ctx_type(), ids[1].ctx_type());

    assert_eq!(field_target(&ids[2], 0), ids[0]);
    assert_eq!(field_target(&ids[2], 1), ids[0]);
    assert_eq!(field_target(&ids[2], 2), ids[1]);
    assert_ne!(field_target(&ids[2], 0), field_target(&ids[2], 2));
}

#[test]
fn forward_and_self_references_resolve() {
    let dts = vec![
        DefType::Sub(struct_of(vec![ref_to(1, true)])),
        DefType::Sub(struct_of(vec![ref_to(1, true), ref_to(0, true)])),
    ];
    let ids = sem_def_types(&dts);

    assert_eq!(field_target(&ids[0], 0), ids[1]);
    assert_eq!(field_target(&ids[1], 0), ids[1]);
    assert_eq!(field_target(&ids[1], 1), ids[0]);
}

#[test]
fn resolved_group_shares_one_list() {
    let dts = vec![
        DefType::Sub(i32_struct()),
        DefType::Rec(vec![
            struct_of(vec![ref_to(2, true), ref_to(0, false)]),
            struct_of(vec![ref_to(1, true)]),
        ]),
    ];
    let ids = sem_def_types(&dts);

    let (CtxType::Rec(a, 0), CtxType::Rec(b, 1)) = (ids[1].ctx_type(), ids[2].ctx_type()) else {
        panic!("expected two members of one group");
    };
    assert!(a.ptr_eq(b));
    assert_eq!(
        a.vars().cloned().collect::<Vec<_>>(),
        vec![Var::Sem(ids[1].clone()), Var::Sem(ids[2].clone())]
    );

    assert_eq!(field_target(&ids[1], 0), ids[2]);
    assert_eq!(field_target(&ids[1], 1), ids[0]);
    assert_eq!(field_target(&ids[2], 0), ids[1]);
}

#[test]
fn unroll_recovers_declared_supertypes() {
    let dts = vec![
        DefType::Sub(i32_struct()),
        DefType::Rec(vec![SubType {
            supertypes: vec![Var::Syn(0)],
            strtype: StrType::Array(ArrayType(FieldType(
                Mut::Var,
                StorageType::PackType(PackType::I8),
            ))),
        }]),
    ];
    let ids = sem_def_types(&dts);

    assert_eq!(ids[1].unroll().supertypes, vec![Var::Sem(ids[0].clone())]);
    let at = ids[1].expand().as_array();
    assert_eq!(at.0.unpacked(), ValType::Num(NumType::Int32));
}

#[test]
fn module_type_resolves_imports_and_exports() {
    let func = SubType::new(StrType::Func(FuncType {
        parameters: vec![ValType::Num(NumType::Int32)],
        results: vec![],
    }));
    let mt = ModuleType {
        types: vec![DefType::Sub(func.clone()), DefType::Sub(func)],
        imports: vec![ImportType {
            module: Name::from("env"),
            name: Name::from("log"),
            desc: ExternType::Func(Var::Syn(1)),
        }],
        exports: vec![
            ExportType {
                name: Name::from("f"),
                desc: ExternType::Func(Var::Syn(0)),
            },
            ExportType {
                name: Name::from("g"),
                desc: ExternType::Func(Var::Syn(0)),
            },
            ExportType {
                name: Name::from("h"),
                desc: ExternType::Func(Var::Syn(1)),
            },
        ],
    };

    let resolved = sem_module_type(&mt);
    assert!(resolved.types.is_empty());

    let func_var = |desc: &ExternType| match desc {
        ExternType::Func(Var::Sem(x)) => x.clone(),
        other => panic!("expected a resolved function type, got {other:?}"),
    };
    let f = func_var(&resolved.exports[0].desc);
    let g = func_var(&resolved.exports[1].desc);
    let h = func_var(&resolved.exports[2].desc);
    let log = func_var(&resolved.imports[0].desc);

    assert_eq!(f, g);
    assert_ne!(f, h);
    assert_eq!(h, log);
    assert_eq!(f.expand().as_func().parameters, vec![ValType::Num(NumType::Int32)]);
}

#[test]
fn resolution_is_deterministic() {
    let mt = ModuleType {
        types: vec![
            DefType::Rec(vec![
                struct_of(vec![ref_to(1, true)]),
                struct_of(vec![ref_to(0, true), ValType::Num(NumType::Float64)]),
            ]),
            DefType::Sub(struct_of(vec![ref_to(0, false)])),
        ],
        imports: vec![],
        exports: vec![
            ExportType {
                name: Name::from("a"),
                desc: ExternType::Global(GlobalType(Mut::Var, ref_to(2, true))),
            },
            ExportType {
                name: Name::from("b"),
                desc: ExternType::Func(Var::Syn(1)),
            },
        ],
    };

    let first = sem_module_type(&mt);
    let second = sem_module_type(&mt);
    assert_ne!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
#[should_panic(expected = "semantic variable encountered")]
fn resolving_resolved_types_panics() {
    let ids = sem_def_types(&[DefType::Sub(i32_struct())]);
    let already_resolved = SubType {
        supertypes: vec![Var::Sem(ids[0].clone())],
        strtype: StrType::Struct(StructType(vec![])),
    };
    sem_def_types(&[DefType::Sub(already_resolved)]);
}
