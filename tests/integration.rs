//! Integration tests for typeflow
//!
//! End-to-end tests that load graphs and configuration from JSON and run the
//! full validate-then-generate pipeline.
//!
mod common;
use common::*;
use std::fs;
use std::path::PathBuf;
use typeflow::editor::graph_from_json;
use typeflow::prelude::*;

fn setup_test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("typeflow-tests")
        .join(format!("{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).expect("Failed to create test directory");
    dir
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_editor_document_end_to_end() {
        let document = EditorDocument::from_json(EDITOR_DOCUMENT_JSON)
            .expect("Failed to parse editor document");
        let graph = document.into_graph().expect("Failed to convert editor document");

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].operation, "Strings.Lowercase");
        assert_eq!(graph.nodes[0].label.as_deref(), Some("Source"));
        assert_eq!(graph.edges[0].source_port(), "out");

        let compiler = Compiler::default();
        assert!(compiler.validate(&graph).is_empty());

        let source = compiler.generate(&graph, "CamelFlow");
        assert!(source.contains("type node_0 = Exec<Strings.Lowercase, { in: \"Hello_World\" }>;"));
        assert!(source.contains("type node_1 = Exec<Strings.CamelCase, { in: Out<node_0, 'out'> }>;"));
        assert!(source.ends_with("type CamelFlow = TypeFlow_1_Result;\n"));
    }

    #[test]
    fn test_graph_from_json_detects_both_formats() {
        let from_editor = graph_from_json(EDITOR_DOCUMENT_JSON).expect("Failed to load editor JSON");

        let canonical = serde_json::to_string(&from_editor).expect("Failed to serialize graph");
        let from_canonical = graph_from_json(&canonical).expect("Failed to load canonical JSON");

        assert_eq!(from_editor, from_canonical);
        assert!(canonical.contains("\"operation\":\"Strings.Lowercase\""));
        assert!(canonical.contains("\"inputValues\""));
    }

    #[test]
    fn test_editor_document_rejects_duplicate_ids() {
        let json = r#"{
            "nodes": [
                { "id": "a", "data": { "nodeType": { "id": "Identity" } } },
                { "id": "a", "data": { "nodeType": { "id": "Partial" } } }
            ],
            "edges": []
        }"#;
        let result = graph_from_json(json);
        assert!(matches!(
            result,
            Err(GraphError::Conversion(GraphConversionError::ValidationError(_)))
        ));
    }

    #[test]
    fn test_editor_edges_get_ids_and_default_ports() {
        let json = r#"{
            "nodes": [
                { "id": "a", "data": { "nodeType": { "id": "Strings.Trim" } } },
                { "id": "b", "data": { "nodeType": { "id": "Strings.Trim" } } }
            ],
            "edges": [ { "source": "a", "target": "b", "sourceHandle": null, "targetHandle": "" } ]
        }"#;
        let graph = graph_from_json(json).expect("Failed to load editor JSON");

        assert_eq!(graph.edges[0].id, "edge_0");
        assert_eq!(graph.edges[0].source_port(), "out");
        assert_eq!(graph.edges[0].target_port(), "in");
    }

    #[test]
    fn test_options_and_registry_files() {
        let test_dir = setup_test_dir("config");

        let options_path = test_dir.join("options.json");
        fs::write(&options_path, r#"{ "module": "my-lib", "componentPrefix": "Part" }"#)
            .expect("Failed to write options");
        let registry_path = test_dir.join("registry.json");
        fs::write(
            &registry_path,
            r#"[
                {
                    "id": "Dates.Format",
                    "name": "Format Date",
                    "category": "dates",
                    "inputs": [ { "id": "in", "label": "Date", "type": "string", "required": true } ],
                    "outputs": [ { "id": "formatted", "label": "Formatted", "type": "string" } ],
                    "tlangType": "Dates.Format<'YYYY-MM-DD'>"
                }
            ]"#,
        )
        .expect("Failed to write registry");

        let options = CompilerOptions::from_file(options_path.to_str().expect("Non-UTF-8 path"))
            .expect("Failed to load options");
        assert_eq!(options.module, "my-lib");
        assert_eq!(options.dag_macro, "DAG");

        let mut registry = OperationRegistry::with_defaults();
        let added = registry
            .extend_from_file(registry_path.to_str().expect("Non-UTF-8 path"))
            .expect("Failed to load registry");
        assert_eq!(added, 1);

        let compiler = Compiler::builder()
            .with_options(options)
            .with_registry(registry)
            .build();
        let graph = Graph::new(vec![node("fmt", "Dates.Format")], vec![]);
        let artifacts = compiler.compile(&graph, "");

        assert_eq!(artifacts.imports, vec!["DAG", "Exec", "Out", "Dates"]);
        assert!(artifacts.source.starts_with("import type { DAG, Exec, Out, Dates } from 'my-lib';"));
        assert!(artifacts.source.contains("type Part_1_Result = Out<fmt, 'formatted'>;"));
        assert!(compiler.validate(&graph).is_empty());

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn test_config_errors_are_reported() {
        let test_dir = setup_test_dir("bad-config");
        let bad_path = test_dir.join("bad.json");
        fs::write(&bad_path, "{ not json").expect("Failed to write file");
        let bad_path = bad_path.to_str().expect("Non-UTF-8 path");

        assert!(matches!(
            CompilerOptions::from_file(bad_path),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            OperationRegistry::new().extend_from_file("missing/registry.json"),
            Err(ConfigError::Io { .. })
        ));

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn test_graph_file_round_trip_through_compiler() {
        let test_dir = setup_test_dir("graph-file");
        let graph_path = test_dir.join("graph.json");
        let graph = create_disconnected_graph();
        fs::write(
            &graph_path,
            serde_json::to_string_pretty(&graph).expect("Failed to serialize graph"),
        )
        .expect("Failed to write graph");

        let loaded = Graph::from_file(graph_path.to_str().expect("Non-UTF-8 path"))
            .expect("Failed to load graph");
        assert_eq!(loaded, graph);
        assert_eq!(
            typeflow::generate(&loaded, ""),
            typeflow::generate(&graph, "")
        );

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn test_registry_catalog_is_consistent() {
        let registry = OperationRegistry::with_defaults();
        assert!(!registry.is_empty());

        for signature in registry.operations() {
            assert!(!signature.tlang_type.is_empty(), "{} has no type text", signature.id);
            assert!(
                typeflow::typeexpr::parse_type_expr(&signature.tlang_type).is_ok(),
                "{} has unparseable type text",
                signature.id
            );
        }
        for name in ["Pick", "Partial", "Required", "Identity", "Match", "Pipe", "Constant"] {
            assert!(registry.is_top_level_export(name));
        }
        assert_eq!(
            registry.get("Numbers.Add").map(|s| s.category.as_str()),
            Some("arithmetic")
        );
    }
}
