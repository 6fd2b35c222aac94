use super::literal::{quote, render_key, render_literal};
use super::plan::{ComponentPlan, InputBinding, NodePlan, OutputRef};
use crate::options::CompilerOptions;
use itertools::Itertools;

/// Renders one component: the DAG declaration, one execute alias per node in
/// topological order and the component's result alias.
pub fn emit_component(plan: &ComponentPlan, options: &CompilerOptions) -> String {
    let indent = options.indent.as_str();
    let inner = indent.repeat(2);
    let mut out = String::new();

    out.push_str(&format!(
        "// Component {} ({} {})\n",
        plan.index + 1,
        plan.nodes.len(),
        if plan.nodes.len() == 1 { "node" } else { "nodes" }
    ));
    out.push_str(&format!("type {} = {}<\n", plan.alias, options.dag_macro));

    // Node map
    if plan.nodes.is_empty() {
        out.push_str(&format!("{indent}{{}},\n"));
    } else {
        out.push_str(&format!("{indent}{{\n"));
        for node in &plan.nodes {
            out.push_str(&format!("{inner}{}: {};\n", node.binding, node.type_text));
        }
        out.push_str(&format!("{indent}}},\n"));
    }

    // Connections
    if plan.connections.is_empty() {
        out.push_str(&format!("{indent}[],\n"));
    } else {
        out.push_str(&format!("{indent}[\n"));
        for connection in &plan.connections {
            out.push_str(&format!(
                "{inner}{{ from: {}; to: {} }},\n",
                render_endpoint(&connection.from),
                render_endpoint(&connection.to)
            ));
        }
        out.push_str(&format!("{indent}],\n"));
    }

    // Initial values
    let seeded: Vec<&NodePlan> = plan
        .nodes
        .iter()
        .filter(|n| n.literal_inputs().next().is_some())
        .collect();
    if seeded.is_empty() {
        out.push_str(&format!("{indent}{{}}\n"));
    } else {
        out.push_str(&format!("{indent}{{\n"));
        for node in seeded {
            let values = node
                .literal_inputs()
                .map(|(port, value)| format!("{}: {}", render_key(port), render_literal(value)))
                .join("; ");
            out.push_str(&format!("{inner}{}: {{ {} }};\n", node.binding, values));
        }
        out.push_str(&format!("{indent}}}\n"));
    }
    out.push_str(">;\n\n");

    for node in plan.steps() {
        tracing::trace!(node = %node.node_id, binding = %node.binding, "emitting execute step");
        out.push_str(&format!(
            "type {} = {}<{}, {}>;\n",
            node.binding,
            options.exec_macro,
            node.type_text,
            render_inputs(node, options)
        ));
    }

    out.push_str(&format!(
        "type {} = {};\n",
        plan.result_alias,
        render_output(&plan.result, options)
    ));
    out
}

fn render_endpoint(endpoint: &OutputRef) -> String {
    format!(
        "{{ node: {}; port: {} }}",
        quote(&endpoint.binding),
        quote(&endpoint.port)
    )
}

fn render_inputs(node: &NodePlan, options: &CompilerOptions) -> String {
    if node.inputs.is_empty() {
        return "{}".to_string();
    }
    let fields = node
        .inputs
        .iter()
        .map(|(port, binding)| {
            let value = match binding {
                InputBinding::Literal(value) => render_literal(value),
                InputBinding::Output(source) => render_output(source, options),
            };
            format!("{}: {}", render_key(port), value)
        })
        .join("; ");
    format!("{{ {} }}", fields)
}

/// `Out<binding, 'port'>`
pub(crate) fn render_output(source: &OutputRef, options: &CompilerOptions) -> String {
    format!(
        "{}<{}, {}>",
        options.out_macro,
        source.binding,
        quote(&source.port)
    )
}
