//! Construction helpers for the ECMAScript nodes emitted by the lowering pass.

use swc_core::{
    common::{Span, SyntaxContext},
    ecma::{
        ast::{
            ArrayLit, BindingIdent, BlockStmt, Bool, CallExpr, Callee, Expr, ExprOrSpread, FnExpr,
            Function, Ident, Lit, MemberExpr, MemberProp, Null, Pat, ReturnStmt, Stmt, Str,
            UnaryExpr, UnaryOp, VarDecl, VarDeclKind, VarDeclarator,
        },
        atoms::JsWord,
    },
};

pub fn ident(sym: JsWord, span: Span) -> Ident {
    Ident {
        span,
        ctxt: SyntaxContext::empty(),
        sym,
        optional: false,
    }
}

pub fn ident_expr(sym: JsWord, span: Span) -> Box<Expr> {
    Box::new(Expr::Ident(ident(sym, span)))
}

pub fn str_lit(value: JsWord, span: Span) -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Str(Str {
        span,
        value,
        raw: None,
    })))
}

pub fn null_lit(span: Span) -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Null(Null { span })))
}

pub fn bool_lit(value: bool, span: Span) -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Bool(Bool { span, value })))
}

pub fn empty_array(span: Span) -> Box<Expr> {
    Box::new(Expr::Array(ArrayLit {
        span,
        elems: vec![],
    }))
}

/// `void 0`
pub fn void_zero(span: Span) -> Box<Expr> {
    Box::new(Expr::Unary(UnaryExpr {
        span,
        op: UnaryOp::Void,
        arg: Box::new(Expr::Lit(Lit::Num(swc_core::ecma::ast::Number {
            span,
            value: 0.0,
            raw: None,
        }))),
    }))
}

pub fn member_expr(obj: Box<Expr>, prop: Ident, span: Span) -> Box<Expr> {
    Box::new(Expr::Member(MemberExpr {
        span,
        obj,
        prop: MemberProp::Ident(prop.into()),
    }))
}

/// Parses a dotted path such as `React.createElement` into a member-access
/// expression, one segment at a time. A path without dots stays an identifier.
pub fn member_path(path: &str, span: Span) -> Box<Expr> {
    let mut segments = path.split('.');
    let head = segments.next().unwrap_or(path);
    let mut expr = ident_expr(JsWord::from(head), span);

    for segment in segments {
        expr = member_expr(expr, ident(JsWord::from(segment), span), span);
    }

    expr
}

pub fn call_expr(callee: Box<Expr>, args: Vec<ExprOrSpread>, span: Span) -> CallExpr {
    CallExpr {
        span,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(callee),
        args,
        type_args: None,
    }
}

/// Wraps a statement block into `function () { ... }()`.
pub fn iife(body: BlockStmt, span: Span) -> Expr {
    let wrapper = FnExpr {
        ident: None,
        function: Box::new(Function {
            params: vec![],
            decorators: vec![],
            span,
            ctxt: SyntaxContext::empty(),
            body: Some(body),
            is_generator: false,
            is_async: false,
            type_params: None,
            return_type: None,
        }),
    };

    Expr::Call(CallExpr {
        span,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(Box::new(Expr::Fn(wrapper))),
        args: vec![],
        type_args: None,
    })
}

/// `var <name> = <init>;`
pub fn var_stmt(name: Ident, init: Box<Expr>, span: Span) -> Stmt {
    Stmt::Decl(swc_core::ecma::ast::Decl::Var(Box::new(VarDecl {
        span,
        ctxt: SyntaxContext::empty(),
        kind: VarDeclKind::Var,
        declare: false,
        decls: vec![VarDeclarator {
            span,
            name: Pat::Ident(BindingIdent {
                id: name,
                type_ann: None,
            }),
            init: Some(init),
            definite: false,
        }],
    })))
}

pub fn return_stmt(arg: Option<Box<Expr>>, span: Span) -> Stmt {
    Stmt::Return(ReturnStmt { span, arg })
}

pub fn prepend_stmt(block: &mut BlockStmt, stmt: Stmt) {
    block.stmts.insert(0, stmt);
}

pub fn append_stmt(block: &mut BlockStmt, stmt: Stmt) {
    block.stmts.push(stmt);
}

/// Checks identifier-name syntax only: keywords are allowed, the way
/// markup tag names permit them.
pub fn is_ident_name(value: &str) -> bool {
    let mut chars = value.chars();

    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_alphabetic() && first != '_' && first != '$' {
        return false;
    }

    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

static RESERVED_WORDS: phf::Set<&'static str> = phf::phf_set! {
    "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false",
    "finally", "for", "function", "if", "import", "in", "instanceof", "new",
    "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield",
};

pub fn is_reserved_word(value: &str) -> bool {
    RESERVED_WORDS.contains(value)
}

/// A name usable as a plain (shorthand) identifier, i.e. valid identifier
/// syntax and not a reserved word.
pub fn is_valid_ident(value: &str) -> bool {
    is_ident_name(value) && !is_reserved_word(value)
}
