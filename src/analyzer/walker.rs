//! Tree-sitter walk over Python source
//!
//! Collects function and class declarations in depth-first document order,
//! so findings come out with non-decreasing line numbers for flat code.
//! A parse failure is reported as a `ParseError` outcome carrying the first
//! error's location; no declarations are collected from a broken tree.

use tree_sitter::{Node, Parser};

/// A function declaration with the metrics the rules care about
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FunctionDecl {
    pub name: String,
    pub line: u32,
    /// Statements directly in the body (comments excluded)
    pub statement_count: usize,
    /// Declared parameters (splat and separator tokens excluded)
    pub parameter_count: usize,
}

/// A class declaration with its direct method count
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassDecl {
    pub name: String,
    pub line: u32,
    /// Function definitions that are direct children of the class body
    pub method_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Declaration {
    Function(FunctionDecl),
    Class(ClassDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WalkOutcome {
    Declarations(Vec<Declaration>),
    ParseError { line: u32, detail: String },
}

/// Parse `source` and collect every function/class declaration at any
/// nesting depth. Total: malformed input becomes a `ParseError` outcome.
pub(crate) fn walk(source: &str) -> WalkOutcome {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE;
    if parser.set_language(&language.into()).is_err() {
        // Grammar/runtime version mismatch; nothing can be analyzed.
        return WalkOutcome::ParseError {
            line: 1,
            detail: "Python grammar unavailable".to_string(),
        };
    }

    let Some(tree) = parser.parse(source, None) else {
        return WalkOutcome::ParseError {
            line: 1,
            detail: "parser produced no tree".to_string(),
        };
    };

    let root = tree.root_node();
    if root.has_error() {
        let (line, detail) = describe_first_error(root, source.as_bytes());
        return WalkOutcome::ParseError { line, detail };
    }

    let mut declarations = Vec::new();
    collect_declarations(root, source.as_bytes(), &mut declarations);
    WalkOutcome::Declarations(declarations)
}

fn collect_declarations(node: Node, source: &[u8], out: &mut Vec<Declaration>) {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    for child in children {
        match child.kind() {
            "function_definition" => {
                if let Some(decl) = function_decl(child, source) {
                    out.push(Declaration::Function(decl));
                }
            }
            "class_definition" => {
                if let Some(decl) = class_decl(child, source) {
                    out.push(Declaration::Class(decl));
                }
            }
            _ => {}
        }
        // Recurse regardless: nested functions and classes count too.
        collect_declarations(child, source, out);
    }
}

fn function_decl(node: Node, source: &[u8]) -> Option<FunctionDecl> {
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source)
        .ok()?
        .to_string();

    let statement_count = node
        .child_by_field_name("body")
        .map(|body| count_named_children(body, |kind| kind != "comment"))
        .unwrap_or(0);

    let parameter_count = node
        .child_by_field_name("parameters")
        .map(|params| count_named_children(params, is_parameter_kind))
        .unwrap_or(0);

    Some(FunctionDecl {
        name,
        line: node.start_position().row as u32 + 1,
        statement_count,
        parameter_count,
    })
}

fn class_decl(node: Node, source: &[u8]) -> Option<ClassDecl> {
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source)
        .ok()?
        .to_string();

    let method_count = node
        .child_by_field_name("body")
        .map(|body| {
            let mut cursor = body.walk();
            body.named_children(&mut cursor)
                .filter(|child| is_method(*child))
                .count()
        })
        .unwrap_or(0);

    Some(ClassDecl {
        name,
        line: node.start_position().row as u32 + 1,
        method_count,
    })
}

fn count_named_children(node: Node, keep: impl Fn(&str) -> bool) -> usize {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| keep(child.kind()))
        .count()
}

/// Named parameter forms, excluding `*args`/`**kwargs` splats and the bare
/// `*` / `/` separators.
fn is_parameter_kind(kind: &str) -> bool {
    matches!(
        kind,
        "identifier" | "typed_parameter" | "default_parameter" | "typed_default_parameter"
    )
}

/// Direct methods: plain or decorated function definitions in the class body
fn is_method(node: Node) -> bool {
    match node.kind() {
        "function_definition" => true,
        "decorated_definition" => node
            .child_by_field_name("definition")
            .is_some_and(|def| def.kind() == "function_definition"),
        _ => false,
    }
}

/// Locate the first ERROR or missing node in document order and describe it.
fn describe_first_error(root: Node, source: &[u8]) -> (u32, String) {
    match first_error(root) {
        Some(node) if node.is_missing() => (
            node.start_position().row as u32 + 1,
            format!("missing {}", node.kind()),
        ),
        Some(node) => {
            let snippet: String = node
                .utf8_text(source)
                .unwrap_or("")
                .chars()
                .take(24)
                .collect();
            (
                node.start_position().row as u32 + 1,
                format!("unexpected '{}'", snippet.trim()),
            )
        }
        None => (1, "malformed source".to_string()),
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    for child in children {
        if let Some(error) = first_error(child) {
            return Some(error);
        }
    }
    // has_error() without a visible ERROR child; report the container.
    Some(node)
}
