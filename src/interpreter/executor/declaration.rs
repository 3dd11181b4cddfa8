use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError, SyntaxError},
    interpreter::{
        evaluator::{array, core::evaluate},
        frame::FrameRef,
        lexer::stitch,
        value::{core::Value, tag::Type},
    },
    util::ident::{has_valid_name, is_reserved},
};

/// Executes a declaration statement: `TYPE[]... NAME = EXPRESSION`.
///
/// The keyword has already been popped by the dispatcher. `[]` suffixes add
/// array dimensions to the declared tag. The name must be well-formed, not
/// reserved, and must not resolve in the scope (there is no shadowing). The
/// evaluated value must carry the declared tag, unless the declaration is
/// the `val` wildcard — or the value is the empty `val[]` literal going into
/// an array slot, in which case the value's element tag is rewritten to the
/// declared one.
pub fn declare(scope: &FrameRef, keyword: &str, tokens: &mut VecDeque<String>, depth: usize,
               line: usize)
               -> EvalResult<()> {
    let dims = array::dimension_suffix(tokens, line)?;
    let declared = Type::base(keyword).expect("dispatcher matched a type keyword")
                                      .wrap_array(dims);

    let Some(name) = tokens.pop_front() else {
        return Err(ErrorStack::new(SyntaxError::MissingName { what: "variable" }, line));
    };
    if !has_valid_name(&name) {
        return Err(ErrorStack::new(SyntaxError::InvalidName { name }, line));
    }
    if is_reserved(&name) {
        return Err(ErrorStack::new(SyntaxError::ReservedName { name }, line));
    }
    if scope.borrow().has(&name) {
        return Err(ErrorStack::new(RuntimeError::AlreadyDeclared { name }, line));
    }

    if tokens.pop_front().as_deref() != Some("=") {
        return Err(ErrorStack::new(SyntaxError::MissingAssignment, line));
    }

    let expression = stitch(tokens);
    if expression.trim().is_empty() {
        return Err(ErrorStack::new(SyntaxError::MissingValue, line));
    }

    let mut value = evaluate(scope, &expression, depth, line)?;
    if declared != Type::Val && value.tag() != declared {
        if declared.is_array() && value.is_empty_wildcard_array() {
            if let Value::Array { elem, .. } = &mut value {
                *elem = declared.elem().expect("declared tag is an array").clone();
            }
        } else {
            return Err(ErrorStack::new(RuntimeError::DeclarationTypeMismatch {
                                           declared,
                                           found: value.tag(),
                                       },
                                       line));
        }
    }

    if scope.borrow().debug_enabled() {
        println!("Created variable {name}({}).", value.tag());
    }
    scope.borrow_mut().variables.insert(name, Rc::new(RefCell::new(value)));
    Ok(())
}
