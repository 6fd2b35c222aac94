use crate::options::CompilerOptions;
use itertools::Itertools;

/// The three macros first, then every discovered library name in sorted order.
pub fn import_names<'a>(options: &'a CompilerOptions, discovered: &[&'a str]) -> Vec<&'a str> {
    options
        .macro_names()
        .into_iter()
        .chain(discovered.iter().copied())
        .unique()
        .collect()
}

/// The final alias: the lone component result, or a tuple of all of them in component order.
pub fn result_expression(result_aliases: &[String]) -> String {
    match result_aliases {
        [single] => single.clone(),
        many => format!("[{}]", many.join(", ")),
    }
}

/// Joins the import statement, the component blocks and the final alias into one file.
pub fn assemble(
    imports: &[&str],
    blocks: &[String],
    final_alias: &str,
    result_aliases: &[String],
    options: &CompilerOptions,
) -> String {
    let mut out = format!(
        "import type {{ {} }} from {};\n\n",
        imports.join(", "),
        super::literal::quote(&options.module)
    );
    for block in blocks {
        out.push_str(block);
        out.push('\n');
    }
    out.push_str(&format!(
        "type {} = {};\n",
        final_alias,
        result_expression(result_aliases)
    ));
    out
}
