//! The single-pass depth-first driver.
//!
//! Elements and fragments are lowered on the way out, so a parent always
//! sees its children already lowered. Collecting containers are rewritten
//! on the way in, so nesting is handled outer to inner and a rewritten
//! container acts as an ordinary function boundary for everything processed
//! afterwards inside it.
//!
//! Contextual scopes (constructs that bind their own self-reference) are
//! tracked as an explicit stack. A container rewrite deep inside may claim
//! a self-reference alias from the innermost frame; the matching alias
//! declaration is injected into that scope's body when the driver unwinds
//! past it.

use candent_core::{prepend_stmt, var_stmt, UidGenerator};
use swc_core::{
    common::{Span, DUMMY_SP},
    ecma::{
        ast::{
            Constructor, Expr, Function, GetterProp, Invalid, JSXExpr, JSXExprContainer,
            JSXNamespacedName, Module, SetterProp, StaticBlock, ThisExpr,
        },
        atoms::JsWord,
        visit::{VisitMut, VisitMutWith},
    },
};

use crate::{
    collector::is_collecting_container,
    convert,
    element::ElementHooks,
    error::TransformError,
    options::JsxOptions,
    pragma::ProgramContext,
    JsxTransformResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    Program,
    Function,
}

/// One contextual scope. `this_alias` memoizes the hoisted self-reference
/// alias, so one scope never receives more than one alias declaration.
pub(crate) struct ScopeFrame {
    pub kind: ScopeKind,
    pub this_alias: Option<JsWord>,
}

pub(crate) struct TransformJsxContext<'o> {
    pub options: &'o JsxOptions,
    pub hooks: &'o dyn ElementHooks,
    pub pragma: ProgramContext,
    pub uids: UidGenerator,
    pub scopes: Vec<ScopeFrame>,
    pub pretty_calls: Vec<Span>,
    pub error: Option<TransformError>,
}

impl<'o> TransformJsxContext<'o> {
    pub(crate) fn new(
        module: &Module,
        comments: &[swc_core::common::comments::Comment],
        options: &'o JsxOptions,
        hooks: &'o dyn ElementHooks,
    ) -> Result<Self, TransformError> {
        let pragma = ProgramContext::resolve(comments, options)?;

        Ok(TransformJsxContext {
            options,
            hooks,
            pragma,
            uids: UidGenerator::for_module(module),
            scopes: vec![ScopeFrame {
                kind: ScopeKind::Program,
                this_alias: None,
            }],
            pretty_calls: Vec::new(),
            error: None,
        })
    }

    /// Latches the first fatal error; later ones are dropped, the unit is
    /// already failed.
    pub(crate) fn fail(&mut self, error: TransformError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub(crate) fn finish(self, program_span: Span) -> Result<JsxTransformResult, TransformError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        self.pragma.finish(program_span)?;

        Ok(JsxTransformResult {
            pretty_calls: self.pretty_calls,
        })
    }

    fn enter_function_scope<N>(&mut self, n: &mut N, body_of: impl FnOnce(&mut N) -> Option<&mut swc_core::ecma::ast::BlockStmt>)
    where
        N: VisitMutWith<Self>,
    {
        self.scopes.push(ScopeFrame {
            kind: ScopeKind::Function,
            this_alias: None,
        });

        n.visit_mut_children_with(self);

        let Some(frame) = self.scopes.pop() else {
            return;
        };
        if let Some(alias) = frame.this_alias {
            if let Some(body) = body_of(n) {
                prepend_stmt(
                    body,
                    var_stmt(
                        candent_core::ident(alias, DUMMY_SP),
                        Box::new(Expr::This(ThisExpr { span: DUMMY_SP })),
                        DUMMY_SP,
                    ),
                );
            }
        }
    }
}

impl VisitMut for TransformJsxContext<'_> {
    fn visit_mut_expr(&mut self, n: &mut Expr) {
        if self.error.is_some() {
            return;
        }

        match n {
            Expr::JSXElement(_) | Expr::JSXFragment(_) => {
                // children first, so the parent call sees lowered children
                n.visit_mut_children_with(self);
                if self.error.is_some() {
                    return;
                }

                let jsx = std::mem::replace(n, Expr::Invalid(Invalid { span: DUMMY_SP }));
                match self.lower_jsx_expr(jsx) {
                    Ok(lowered) => *n = lowered,
                    Err(error) => self.fail(error),
                }
            }
            _ => n.visit_mut_children_with(self),
        }
    }

    fn visit_mut_jsx_expr_container(&mut self, n: &mut JSXExprContainer) {
        if self.error.is_some() {
            return;
        }

        if let JSXExpr::Expr(expr) = &mut n.expr {
            if is_collecting_container(expr) {
                let Expr::Fn(fn_expr) = &mut **expr else {
                    return;
                };
                let Some(body) = fn_expr.function.body.take() else {
                    return;
                };

                **expr = self.rewrite_collector(n.span, body);
                if self.error.is_some() {
                    return;
                }

                // descend into the rewritten body: markup inside it still
                // needs lowering, nested containers still need their own
                // rewrite
                expr.visit_mut_with(self);
                return;
            }
        }

        n.visit_mut_children_with(self);
    }

    /// Namespaced markup names are rejected on sight, before any lowering.
    fn visit_mut_jsx_namespaced_name(&mut self, n: &mut JSXNamespacedName) {
        self.fail(convert::namespaced_error(n));
    }

    fn visit_mut_function(&mut self, n: &mut Function) {
        if self.error.is_some() {
            return;
        }
        self.enter_function_scope(n, |function| function.body.as_mut());
    }

    fn visit_mut_constructor(&mut self, n: &mut Constructor) {
        if self.error.is_some() {
            return;
        }
        self.enter_function_scope(n, |constructor| constructor.body.as_mut());
    }

    fn visit_mut_getter_prop(&mut self, n: &mut GetterProp) {
        if self.error.is_some() {
            return;
        }
        self.enter_function_scope(n, |getter| getter.body.as_mut());
    }

    fn visit_mut_setter_prop(&mut self, n: &mut SetterProp) {
        if self.error.is_some() {
            return;
        }
        self.enter_function_scope(n, |setter| setter.body.as_mut());
    }

    fn visit_mut_static_block(&mut self, n: &mut StaticBlock) {
        if self.error.is_some() {
            return;
        }
        self.enter_function_scope(n, |static_block| Some(&mut static_block.body));
    }
}
