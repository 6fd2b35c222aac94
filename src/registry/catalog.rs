//! The default combinator catalog.
//!
//! Every entry is an opaque signature: the compiler only reads its type text and
//! port declarations, never the transformation it stands for.

use super::{OperationRegistry, OperationSignature, PortDef, PortType};

/// Category of the tuple-length arithmetic family.
pub const ARITHMETIC_CATEGORY: &str = "arithmetic";

/// Operations the combinator library exports at top level rather than inside a namespace.
pub const TOP_LEVEL_EXPORTS: &[&str] = &[
    "Pick", "Partial", "Required", "Identity", "Match", "Pipe", "Constant",
];

/// Declares the catalog table and the function that registers it.
macro_rules! define_operations {
    (
        $(
            $category:literal => {
                $(
                    ($id:literal, $name:literal, $tlang:literal, $description:literal,
                        in [ $( ($in_id:literal, $in_label:literal, $in_type:ident, $required:literal) ),* $(,)? ],
                        out [ $( ($out_id:literal, $out_label:literal, $out_type:ident) ),* $(,)? ]
                    )
                ),* $(,)?
            }
        ),* $(,)?
    ) => {
        pub(super) fn register_default_operations(registry: &mut OperationRegistry) {
            $( $(
                registry.register(OperationSignature {
                    id: $id.to_string(),
                    name: $name.to_string(),
                    category: $category.to_string(),
                    description: $description.to_string(),
                    inputs: vec![ $( PortDef::new($in_id, $in_label, PortType::$in_type, $required) ),* ],
                    outputs: vec![ $( PortDef::new($out_id, $out_label, PortType::$out_type, false) ),* ],
                    tlang_type: $tlang.to_string(),
                });
            )* )*
        }
    };
}

define_operations! {
    "strings" => {
        ("Strings.Uppercase", "Uppercase", "Strings.Uppercase", "Converts a string literal to upper case",
            in [("in", "Input", String, true)], out [("out", "Output", String)]),
        ("Strings.Lowercase", "Lowercase", "Strings.Lowercase", "Converts a string literal to lower case",
            in [("in", "Input", String, true)], out [("out", "Output", String)]),
        ("Strings.Capitalize", "Capitalize", "Strings.Capitalize", "Upper-cases the first character",
            in [("in", "Input", String, true)], out [("out", "Output", String)]),
        ("Strings.CamelCase", "Camel Case", "Strings.CamelCase", "Converts snake, kebab or spaced words to camelCase",
            in [("in", "Input", String, true)], out [("out", "Output", String)]),
        ("Strings.SnakeCase", "Snake Case", "Strings.SnakeCase", "Converts words to snake_case",
            in [("in", "Input", String, true)], out [("out", "Output", String)]),
        ("Strings.KebabCase", "Kebab Case", "Strings.KebabCase", "Converts words to kebab-case",
            in [("in", "Input", String, true)], out [("out", "Output", String)]),
        ("Strings.Trim", "Trim", "Strings.Trim", "Removes surrounding whitespace",
            in [("in", "Input", String, true)], out [("out", "Output", String)]),
        ("Strings.Split", "Split", "Strings.Split", "Splits a string literal into a tuple",
            in [("in", "Input", String, true), ("separator", "Separator", String, true)],
            out [("out", "Parts", Array)]),
        ("Strings.Join", "Join", "Strings.Join", "Joins a tuple of strings",
            in [("in", "Parts", Array, true), ("separator", "Separator", String, false)],
            out [("out", "Output", String)]),
        ("Strings.Replace", "Replace", "Strings.Replace", "Replaces every occurrence of a substring",
            in [("in", "Input", String, true), ("from", "From", String, true), ("to", "To", String, true)],
            out [("out", "Output", String)]),
        ("Strings.Concat", "Concat", "Strings.Concat", "Concatenates two string literals",
            in [("left", "Left", String, true), ("right", "Right", String, true)],
            out [("out", "Output", String)]),
    },
    "tuples" => {
        ("Tuples.Length", "Length", "Tuples.Length", "Number of elements in a tuple",
            in [("in", "Tuple", Array, true)], out [("out", "Length", Number)]),
        ("Tuples.Reverse", "Reverse", "Tuples.Reverse", "Reverses a tuple",
            in [("in", "Tuple", Array, true)], out [("out", "Output", Array)]),
        ("Tuples.Head", "Head", "Tuples.Head", "First element of a tuple",
            in [("in", "Tuple", Array, true)], out [("out", "Head", Any)]),
        ("Tuples.Tail", "Tail", "Tuples.Tail", "Every element but the first",
            in [("in", "Tuple", Array, true)], out [("out", "Tail", Array)]),
        ("Tuples.Last", "Last", "Tuples.Last", "Last element of a tuple",
            in [("in", "Tuple", Array, true)], out [("out", "Last", Any)]),
        ("Tuples.Concat", "Concat", "Tuples.Concat", "Concatenates two tuples",
            in [("left", "Left", Array, true), ("right", "Right", Array, true)],
            out [("out", "Output", Array)]),
        ("Tuples.Append", "Append", "Tuples.Append", "Appends one element",
            in [("in", "Tuple", Array, true), ("item", "Item", Any, true)],
            out [("out", "Output", Array)]),
    },
    "arithmetic" => {
        ("Numbers.Add", "Add", "Numbers.Add", "Adds two numbers by tuple length",
            in [("a", "A", Number, true), ("b", "B", Number, true)], out [("out", "Sum", Number)]),
        ("Numbers.Subtract", "Subtract", "Numbers.Subtract", "Subtracts b from a, clamped at zero",
            in [("a", "A", Number, true), ("b", "B", Number, true)], out [("out", "Difference", Number)]),
        ("Numbers.Multiply", "Multiply", "Numbers.Multiply", "Multiplies two numbers by repeated tuple concatenation",
            in [("a", "A", Number, true), ("b", "B", Number, true)], out [("out", "Product", Number)]),
        ("Numbers.Increment", "Increment", "Numbers.Increment", "Adds one",
            in [("in", "Input", Number, true)], out [("out", "Output", Number)]),
        ("Numbers.Decrement", "Decrement", "Numbers.Decrement", "Subtracts one, clamped at zero",
            in [("in", "Input", Number, true)], out [("out", "Output", Number)]),
        ("Numbers.GreaterThan", "Greater Than", "Numbers.GreaterThan", "Compares two numbers",
            in [("a", "A", Number, true), ("b", "B", Number, true)], out [("out", "Result", Boolean)]),
    },
    "objects" => {
        ("Objects.Keys", "Keys", "Objects.Keys", "Tuple of an object's keys",
            in [("in", "Object", Object, true)], out [("out", "Keys", Array)]),
        ("Objects.Values", "Values", "Objects.Values", "Tuple of an object's values",
            in [("in", "Object", Object, true)], out [("out", "Values", Array)]),
        ("Objects.MapKeys.CamelCase", "Camel Case Keys", "Objects.MapKeys<Strings.CamelCase>", "Renames every key to camelCase",
            in [("in", "Object", Object, true)], out [("out", "Output", Object)]),
        ("Objects.MapKeys.SnakeCase", "Snake Case Keys", "Objects.MapKeys<Strings.SnakeCase>", "Renames every key to snake_case",
            in [("in", "Object", Object, true)], out [("out", "Output", Object)]),
        ("Objects.Merge", "Merge", "Objects.Merge", "Merges two objects, right side wins",
            in [("left", "Left", Object, true), ("right", "Right", Object, true)],
            out [("out", "Output", Object)]),
        ("Objects.Get", "Get", "Objects.Get", "Reads one property",
            in [("in", "Object", Object, true), ("key", "Key", String, true)],
            out [("out", "Value", Any)]),
    },
    "utility" => {
        ("Pick.UserName", "Pick user.name", "Pick<'user.name'>", "Reads the user.name path",
            in [("in", "Object", Object, true)], out [("out", "Value", Any)]),
        ("Partial", "Partial", "Partial", "Makes every property optional",
            in [("in", "Object", Object, true)], out [("out", "Output", Object)]),
        ("Required", "Required", "Required", "Makes every property required",
            in [("in", "Object", Object, true)], out [("out", "Output", Object)]),
        ("Identity", "Identity", "Identity", "Passes its input through",
            in [("in", "Input", Any, true)], out [("out", "Output", Any)]),
        ("Constant", "Constant", "Constant", "Ignores its input and yields the configured value",
            in [("value", "Value", Any, true)], out [("out", "Output", Any)]),
        ("Pipe.CamelUpper", "Camel then Upper", "Pipe<[Strings.CamelCase, Strings.Uppercase]>", "Composes two string operations",
            in [("in", "Input", String, true)], out [("out", "Output", String)]),
    },
    "matching" => {
        ("Match.BooleanLabel", "Match Boolean", "Match<[[true, 'yes'], [false, 'no']]>", "Maps a boolean to a label",
            in [("in", "Input", Boolean, true)], out [("out", "Label", String)]),
    },
}
