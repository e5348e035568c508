//! Grouping of an element's attribute list into the single attributes
//! argument of the lowered call.

use candent_core::{bool_lit, call_expr, ident, ident_expr, member_expr, null_lit};
use smallvec::SmallVec;
use swc_core::{
    common::Span,
    ecma::ast::{
        Expr, ExprOrSpread, JSXAttr, JSXAttrOrSpread, JSXAttrValue, JSXExpr, KeyValueProp, Lit,
        ObjectLit, Prop, PropOrSpread,
    },
};

use crate::{
    atoms,
    convert,
    error::TransformError,
    visitor::TransformJsxContext,
};

impl TransformJsxContext<'_> {
    /// Builds the attributes argument of one element.
    ///
    /// The list is scanned left to right; each spread flushes the current
    /// run of named attributes as one object literal, then contributes its
    /// own expression. Order is significant: a spread must observably
    /// override (or be overridden by) named attributes in document order,
    /// so runs are never coalesced across a spread.
    pub(crate) fn build_attributes(
        &mut self,
        attrs: Vec<JSXAttrOrSpread>,
        span: Span,
    ) -> Result<Box<Expr>, TransformError> {
        let mut props: Vec<PropOrSpread> = Vec::new();
        let mut objs: SmallVec<[Box<Expr>; 2]> = SmallVec::new();

        for attr in attrs {
            match attr {
                JSXAttrOrSpread::SpreadElement(spread) => {
                    if !props.is_empty() {
                        objs.push(Box::new(Expr::Object(ObjectLit {
                            span,
                            props: std::mem::take(&mut props),
                        })));
                    }
                    objs.push(spread.expr);
                }
                JSXAttrOrSpread::JSXAttr(attr) => {
                    props.push(self.convert_attribute(attr)?);
                }
            }
        }

        if !props.is_empty() {
            objs.push(Box::new(Expr::Object(ObjectLit { span, props })));
        }

        // A single run or a single spread needs no merging
        if objs.len() == 1 {
            let Some(only) = objs.pop() else {
                unreachable!()
            };
            return Ok(only);
        }

        // The merge target must always be an object, never a bare spread
        if !matches!(&*objs[0], Expr::Object(_)) {
            objs.insert(
                0,
                Box::new(Expr::Object(ObjectLit {
                    span,
                    props: vec![],
                })),
            );
        }

        let merge_callee = if self.options.use_builtins {
            member_expr(
                ident_expr(atoms::OBJECT.clone(), span),
                ident(atoms::ASSIGN.clone(), span),
                span,
            )
        } else {
            ident_expr(atoms::EXTENDS_HELPER.clone(), span)
        };

        let args = objs
            .into_iter()
            .map(|expr| ExprOrSpread { spread: None, expr })
            .collect();

        Ok(Box::new(Expr::Call(call_expr(merge_callee, args, span))))
    }

    fn convert_attribute(&mut self, attr: JSXAttr) -> Result<PropOrSpread, TransformError> {
        let key = convert::convert_attr_name(attr.name)?;
        let value = self.convert_attribute_value(attr.value, attr.span)?;

        Ok(PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
            key,
            value,
        }))))
    }

    fn convert_attribute_value(
        &mut self,
        value: Option<JSXAttrValue>,
        attr_span: Span,
    ) -> Result<Box<Expr>, TransformError> {
        let Some(value) = value else {
            // a bare attribute means boolean true
            return Ok(bool_lit(true, attr_span));
        };

        match value {
            JSXAttrValue::Lit(Lit::Str(mut value_str)) => {
                convert::fold_line_breaks(&mut value_str);
                Ok(Box::new(Expr::Lit(Lit::Str(value_str))))
            }
            JSXAttrValue::Lit(other) => Ok(Box::new(Expr::Lit(other))),
            JSXAttrValue::JSXExprContainer(container) => match container.expr {
                JSXExpr::Expr(expr) => Ok(expr),
                JSXExpr::JSXEmptyExpr(_) => Ok(null_lit(container.span)),
            },
            JSXAttrValue::JSXElement(el) => Ok(Box::new(self.lower_element(*el)?)),
            JSXAttrValue::JSXFragment(frag) => Ok(Box::new(self.lower_fragment(frag)?)),
        }
    }
}
