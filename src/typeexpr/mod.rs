//! A small grammar for the type-expression text attached to operations.
//!
//! Operation signatures carry their emitted type text verbatim
//! (`Objects.MapKeys<Strings.CamelCase>`, `Pick<'user.name'>`). Import discovery
//! needs the structure of that text, so it is lexed and parsed here instead of
//! split on dots.

pub mod lexer;
pub mod parser;
pub mod references;

pub use parser::parse_type_expr;
pub use references::{ImportSet, ReferenceExtractor};

/// Parsed type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// `A`, `Ns.Member`, `Ns.Member<Arg, ...>`
    Reference { path: Vec<String>, args: Vec<TypeExpr> },
    StringLiteral(String),
    NumberLiteral(String),
    Tuple(Vec<TypeExpr>),
    Object(Vec<ObjectMember>),
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    /// `T[]`
    Array(Box<TypeExpr>),
    /// `T[K]`
    Indexed {
        object: Box<TypeExpr>,
        index: Box<TypeExpr>,
    },
    /// `keyof T`, `typeof T`, `readonly T`
    Operator { op: String, operand: Box<TypeExpr> },
    /// `...T` inside a tuple
    Rest(Box<TypeExpr>),
    /// `<T>(a: A, b?: B) => R`, also the signature of a method member
    Function {
        type_params: Vec<TypeParam>,
        params: Vec<Param>,
        ret: Box<TypeExpr>,
    },
    /// `C extends E ? T : F`
    Conditional {
        check: Box<TypeExpr>,
        extends: Box<TypeExpr>,
        then: Box<TypeExpr>,
        otherwise: Box<TypeExpr>,
    },
    /// `infer X`, bound for the true branch of the enclosing conditional
    Infer(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    /// `key?: T` or `key(a: A): R`
    Property { key: String, value: TypeExpr },
    /// `[key: K]: T`
    Index {
        key: String,
        key_type: TypeExpr,
        value: TypeExpr,
    },
    /// `[K in S as R]: T`
    Mapped {
        key: String,
        source: TypeExpr,
        rename: Option<TypeExpr>,
        value: TypeExpr,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub name: String,
    pub constraint: Option<TypeExpr>,
    pub default: Option<TypeExpr>,
}

/// A function parameter. The name is a value binding and never a type reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Option<TypeExpr>,
}

impl TypeExpr {
    /// Calls `visit` on every reference in the expression, outermost first.
    ///
    /// Single-segment references to a name bound inside the expression (a
    /// function's type parameter, an `infer` variable, a mapped key) are skipped.
    pub fn walk_references<'a>(&'a self, visit: &mut impl FnMut(&'a [String])) {
        self.walk_scoped(&mut Vec::new(), visit);
    }

    fn walk_scoped<'a>(&'a self, bound: &mut Vec<&'a str>, visit: &mut impl FnMut(&'a [String])) {
        match self {
            TypeExpr::Reference { path, args } => {
                let shadowed = matches!(path.as_slice(), [name] if bound.contains(&name.as_str()));
                if !shadowed {
                    visit(path);
                }
                for arg in args {
                    arg.walk_scoped(bound, visit);
                }
            }
            TypeExpr::Tuple(items) | TypeExpr::Union(items) | TypeExpr::Intersection(items) => {
                for item in items {
                    item.walk_scoped(bound, visit);
                }
            }
            TypeExpr::Object(members) => {
                for member in members {
                    match member {
                        ObjectMember::Property { value, .. } => value.walk_scoped(bound, visit),
                        ObjectMember::Index {
                            key_type, value, ..
                        } => {
                            key_type.walk_scoped(bound, visit);
                            value.walk_scoped(bound, visit);
                        }
                        ObjectMember::Mapped {
                            key,
                            source,
                            rename,
                            value,
                        } => {
                            source.walk_scoped(bound, visit);
                            bound.push(key);
                            if let Some(rename) = rename {
                                rename.walk_scoped(bound, visit);
                            }
                            value.walk_scoped(bound, visit);
                            bound.pop();
                        }
                    }
                }
            }
            TypeExpr::Array(inner) | TypeExpr::Rest(inner) => inner.walk_scoped(bound, visit),
            TypeExpr::Operator { operand, .. } => operand.walk_scoped(bound, visit),
            TypeExpr::Indexed { object, index } => {
                object.walk_scoped(bound, visit);
                index.walk_scoped(bound, visit);
            }
            TypeExpr::Function {
                type_params,
                params,
                ret,
            } => {
                let mark = bound.len();
                bound.extend(type_params.iter().map(|p| p.name.as_str()));
                for param in type_params {
                    for ty in param.constraint.iter().chain(&param.default) {
                        ty.walk_scoped(bound, visit);
                    }
                }
                for ty in params.iter().filter_map(|p| p.ty.as_ref()) {
                    ty.walk_scoped(bound, visit);
                }
                ret.walk_scoped(bound, visit);
                bound.truncate(mark);
            }
            TypeExpr::Conditional {
                check,
                extends,
                then,
                otherwise,
            } => {
                check.walk_scoped(bound, visit);
                extends.walk_scoped(bound, visit);
                let mark = bound.len();
                extends.collect_inferred(bound);
                then.walk_scoped(bound, visit);
                bound.truncate(mark);
                otherwise.walk_scoped(bound, visit);
            }
            TypeExpr::StringLiteral(_) | TypeExpr::NumberLiteral(_) | TypeExpr::Infer(_) => {}
        }
    }

    /// Names introduced by `infer` within this expression, not descending into
    /// nested conditionals, which scope their own.
    fn collect_inferred<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeExpr::Infer(name) => out.push(name),
            TypeExpr::Reference { args: items, .. }
            | TypeExpr::Tuple(items)
            | TypeExpr::Union(items)
            | TypeExpr::Intersection(items) => {
                items.iter().for_each(|item| item.collect_inferred(out));
            }
            TypeExpr::Object(members) => {
                for member in members {
                    match member {
                        ObjectMember::Property { value, .. }
                        | ObjectMember::Index { value, .. }
                        | ObjectMember::Mapped { value, .. } => value.collect_inferred(out),
                    }
                }
            }
            TypeExpr::Array(inner) | TypeExpr::Rest(inner) => inner.collect_inferred(out),
            TypeExpr::Operator { operand, .. } => operand.collect_inferred(out),
            TypeExpr::Indexed { object, index } => {
                object.collect_inferred(out);
                index.collect_inferred(out);
            }
            TypeExpr::Function { params, ret, .. } => {
                for ty in params.iter().filter_map(|p| p.ty.as_ref()) {
                    ty.collect_inferred(out);
                }
                ret.collect_inferred(out);
            }
            TypeExpr::Conditional { .. } | TypeExpr::StringLiteral(_) | TypeExpr::NumberLiteral(_) => {}
        }
    }
}
