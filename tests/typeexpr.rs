//! Tests for the type-expression parser and the import discovery built on it.
use typeflow::prelude::*;
use typeflow::typeexpr::parser::MAX_DEPTH;
use typeflow::typeexpr::{ObjectMember, ReferenceExtractor, TypeExpr, parse_type_expr};

fn reference(path: &[&str], args: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::Reference {
        path: path.iter().map(|s| s.to_string()).collect(),
        args,
    }
}

#[test]
fn test_parses_nested_generic_reference() {
    let expr = parse_type_expr("Objects.MapKeys<Strings.CamelCase>").expect("Failed to parse");
    assert_eq!(
        expr,
        reference(
            &["Objects", "MapKeys"],
            vec![reference(&["Strings", "CamelCase"], vec![])]
        )
    );
}

#[test]
fn test_string_literal_argument_stays_a_literal() {
    let expr = parse_type_expr("Pick<'user.name'>").expect("Failed to parse");
    assert_eq!(
        expr,
        reference(&["Pick"], vec![TypeExpr::StringLiteral("user.name".to_string())])
    );
}

#[test]
fn test_parses_tuples_objects_and_unions() {
    let expr = parse_type_expr("Match<[[true, 'yes'], [false, 'no']]>").expect("Failed to parse");
    let TypeExpr::Reference { args, .. } = expr else {
        panic!("Expected a reference");
    };
    assert!(matches!(&args[0], TypeExpr::Tuple(pairs) if pairs.len() == 2));

    let expr = parse_type_expr("{ readonly id: number; name?: string, 'a-b': -1 }")
        .expect("Failed to parse");
    let TypeExpr::Object(members) = expr else {
        panic!("Expected an object");
    };
    let keys: Vec<&str> = members
        .iter()
        .filter_map(|m| match m {
            ObjectMember::Property { key, .. } => Some(key.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(keys, vec!["id", "name", "a-b"]);
    assert_eq!(
        members[2],
        ObjectMember::Property {
            key: "a-b".to_string(),
            value: TypeExpr::NumberLiteral("-1".to_string()),
        }
    );

    let expr = parse_type_expr("| 'a' | 'b' | keyof T[]").expect("Failed to parse");
    assert!(matches!(expr, TypeExpr::Union(ref members) if members.len() == 3));
}

#[test]
fn test_parses_indexed_access_and_rest_elements() {
    let expr = parse_type_expr("[...Tuples.Tail<T>, U?][0]").expect("Failed to parse");
    let TypeExpr::Indexed { object, index } = expr else {
        panic!("Expected an indexed access");
    };
    assert_eq!(*index, TypeExpr::NumberLiteral("0".to_string()));
    let TypeExpr::Tuple(elements) = *object else {
        panic!("Expected a tuple");
    };
    assert!(matches!(elements[0], TypeExpr::Rest(_)));
}

#[test]
fn test_parses_function_types() {
    let expr = parse_type_expr("(s: string, n?: number, ...rest: T[]) => string")
        .expect("Failed to parse");
    let TypeExpr::Function {
        type_params,
        params,
        ret,
    } = expr
    else {
        panic!("Expected a function type");
    };
    assert!(type_params.is_empty());
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["s", "n", "rest"]);
    assert_eq!(*ret, reference(&["string"], vec![]));

    let expr = parse_type_expr("<T extends Strings.Base = 'x'>(value: T) => value is T")
        .expect("Failed to parse");
    let TypeExpr::Function { type_params, ret, .. } = expr else {
        panic!("Expected a function type");
    };
    assert_eq!(type_params[0].name, "T");
    assert_eq!(
        type_params[0].constraint,
        Some(reference(&["Strings", "Base"], vec![]))
    );
    assert_eq!(
        type_params[0].default,
        Some(TypeExpr::StringLiteral("x".to_string()))
    );
    assert_eq!(*ret, reference(&["T"], vec![]));

    assert!(parse_type_expr("new (...args: any[]) => Box").is_ok());
    assert!(parse_type_expr("() => void").is_ok());
    // A parenthesized type is still a plain group.
    assert_eq!(
        parse_type_expr("(Strings.Trim)[]").expect("Failed to parse"),
        TypeExpr::Array(Box::new(reference(&["Strings", "Trim"], vec![])))
    );
}

#[test]
fn test_parses_conditional_types_with_infer() {
    let expr = parse_type_expr("Strings.Uppercase extends infer X ? X : never")
        .expect("Failed to parse");
    let TypeExpr::Conditional {
        check,
        extends,
        then,
        otherwise,
    } = expr
    else {
        panic!("Expected a conditional type");
    };
    assert_eq!(*check, reference(&["Strings", "Uppercase"], vec![]));
    assert_eq!(*extends, TypeExpr::Infer("X".to_string()));
    assert_eq!(*then, reference(&["X"], vec![]));
    assert_eq!(*otherwise, reference(&["never"], vec![]));

    let nested = parse_type_expr("T extends string ? 'a' : T extends number ? 'b' : 'c'")
        .expect("Failed to parse");
    let TypeExpr::Conditional { otherwise, .. } = nested else {
        panic!("Expected a conditional type");
    };
    assert!(matches!(*otherwise, TypeExpr::Conditional { .. }));
}

#[test]
fn test_parses_index_signatures_and_mapped_members() {
    let expr = parse_type_expr("{ [key: string]: Numbers.Add; method(a: number): Strings.Trim }")
        .expect("Failed to parse");
    let TypeExpr::Object(members) = expr else {
        panic!("Expected an object");
    };
    assert_eq!(
        members[0],
        ObjectMember::Index {
            key: "key".to_string(),
            key_type: reference(&["string"], vec![]),
            value: reference(&["Numbers", "Add"], vec![]),
        }
    );
    assert!(matches!(
        &members[1],
        ObjectMember::Property { key, value: TypeExpr::Function { .. } } if key == "method"
    ));

    let expr = parse_type_expr("{ -readonly [K in keyof T as Strings.Upper<K>]-?: T[K] }")
        .expect("Failed to parse");
    let TypeExpr::Object(members) = expr else {
        panic!("Expected an object");
    };
    let ObjectMember::Mapped {
        key,
        source,
        rename,
        ..
    } = &members[0]
    else {
        panic!("Expected a mapped member");
    };
    assert_eq!(key, "K");
    assert!(matches!(source, TypeExpr::Operator { op, .. } if op == "keyof"));
    assert_eq!(
        rename,
        &Some(reference(
            &["Strings", "Upper"],
            vec![reference(&["K"], vec![])]
        ))
    );
}

#[test]
fn test_parse_errors_are_reported() {
    assert!(matches!(
        parse_type_expr("Strings.Split<"),
        Err(TypeExprError::UnexpectedEof { .. })
    ));
    assert!(matches!(
        parse_type_expr("Pipe<A, B>>"),
        Err(TypeExprError::TrailingInput { position: 10 })
    ));
    assert!(matches!(
        parse_type_expr("Strings.#Bad"),
        Err(TypeExprError::InvalidCharacter { position: 8, .. })
    ));
    assert!(matches!(
        parse_type_expr("Strings.<Upper>"),
        Err(TypeExprError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        parse_type_expr("(s: string) =>"),
        Err(TypeExprError::UnexpectedEof { .. })
    ));
    assert!(matches!(
        parse_type_expr("A extends B ? C"),
        Err(TypeExprError::UnexpectedEof { .. })
    ));
}

#[test]
fn test_deep_nesting_is_rejected() {
    let depth = MAX_DEPTH + 10;
    let source = format!("{}X{}", "Wrap<".repeat(depth), ">".repeat(depth));
    assert_eq!(
        parse_type_expr(&source),
        Err(TypeExprError::TooDeep { limit: MAX_DEPTH })
    );
}

#[test]
fn test_extractor_records_root_namespace_only() {
    let registry = OperationRegistry::with_defaults();
    let extractor = ReferenceExtractor::new(&registry);

    let imports = extractor.extract("Objects.MapKeys<Strings.CamelCase>");
    assert_eq!(imports.names(), vec!["Objects", "Strings"]);
    assert!(imports.operations.is_empty());
}

#[test]
fn test_extractor_ignores_dots_inside_string_literals() {
    let registry = OperationRegistry::with_defaults();
    let extractor = ReferenceExtractor::new(&registry);

    let imports = extractor.extract("Pick<'user.name'>");
    assert!(imports.namespaces.is_empty());
    assert_eq!(imports.names(), vec!["Pick"]);
}

#[test]
fn test_extractor_skips_unknown_bare_identifiers() {
    let registry = OperationRegistry::with_defaults();
    let extractor = ReferenceExtractor::new(&registry);

    let imports = extractor.extract("Pipe<[Strings.CamelCase, T, Identity]>");
    assert_eq!(imports.names(), vec!["Identity", "Pipe", "Strings"]);
}

#[test]
fn test_extractor_treats_unparseable_text_as_empty() {
    let registry = OperationRegistry::with_defaults();
    let extractor = ReferenceExtractor::new(&registry);

    assert!(extractor.extract("Strings.Split<").is_empty());
    assert!(extractor.extract("").is_empty());
}

#[test]
fn test_extractor_aggregates_across_expressions() {
    let mut registry = OperationRegistry::with_defaults();
    registry.register_top_level_export("Custom");
    let extractor = ReferenceExtractor::new(&registry);

    let imports = extractor.extract_all(["Strings.Trim", "Custom", "Numbers.Add", "Strings.Trim"]);
    assert_eq!(imports.names(), vec!["Custom", "Numbers", "Strings"]);
}

#[test]
fn test_extractor_sees_through_function_types() {
    let registry = OperationRegistry::with_defaults();
    let extractor = ReferenceExtractor::new(&registry);

    let imports = extractor.extract("Pipe<[Strings.Trim, (s: string) => string]>");
    assert_eq!(imports.names(), vec!["Pipe", "Strings"]);

    let imports = extractor.extract("<T extends Strings.Base>(value: T) => Arrays.Of<T>");
    assert_eq!(imports.names(), vec!["Arrays", "Strings"]);
}

#[test]
fn test_extractor_handles_conditional_types() {
    let registry = OperationRegistry::with_defaults();
    let extractor = ReferenceExtractor::new(&registry);

    let imports = extractor.extract("Strings.Uppercase extends infer X ? X : never");
    assert_eq!(imports.names(), vec!["Strings"]);

    // The inferred name shadows the library export in the true branch only.
    let imports = extractor.extract("Tuples.Head<T> extends infer Identity ? Identity : Pipe");
    assert_eq!(imports.names(), vec!["Pipe", "Tuples"]);
    let imports = extractor.extract("T extends infer Identity ? never : Identity");
    assert_eq!(imports.names(), vec!["Identity"]);
}

#[test]
fn test_extractor_handles_mapped_and_indexed_objects() {
    let registry = OperationRegistry::with_defaults();
    let extractor = ReferenceExtractor::new(&registry);

    let imports = extractor.extract("Objects.MapKeys<{ [K in keyof Strings.Map]: K }>");
    assert_eq!(imports.names(), vec!["Objects", "Strings"]);

    let imports = extractor.extract("{ [Identity in Keys]: Identity; [k: string]: Numbers.Add }");
    assert_eq!(imports.names(), vec!["Numbers"]);
}
