use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

use crate::interpreter::value::{core::Value, tag::Type};

/// A shared, mutable variable cell. Child frames alias the cells of their
/// creator, which is how block scopes observe and mutate enclosing state.
pub type CellRef = Rc<RefCell<Value>>;

/// A shared handle to a frame. Functions are frames; instances created by
/// `new` are frames whose cells outlive the constructor call.
pub type FrameRef = Rc<RefCell<Frame>>;

/// Default bound for the `_MAX_RECURSION` meta-cell.
pub const DEFAULT_MAX_RECURSION: usize = 5000;

/// A declared parameter: its name and its declared tag. Whatever initial
/// value the slot holds before binding is derived from the tag alone.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// The parameter name.
    pub name: String,
    /// The declared tag; `val` accepts any argument.
    pub tag:  Type,
}

/// A scope record: the variables, arguments, return contract and raw source
/// text of one executing (or executable) body.
///
/// `parent` is the lexical enclosing frame; `None` stands for the
/// intentional self-loop of the root frame and of instances, so `super`
/// falls back to the frame itself without creating a reference cycle for
/// that edge.
pub struct Frame {
    /// Ordered parameter declarations.
    pub arguments:   Vec<Parameter>,
    /// The name → cell map. Lookup never walks `parent`; enclosing names are
    /// present here because invocation copies the lexical parent's cell map.
    pub variables:   HashMap<String, CellRef>,
    /// The declared return tag (`null` for the root frame).
    pub return_type: Type,
    /// The lexical enclosing frame, or `None` for a self-parented frame.
    pub parent:      Option<FrameRef>,
    /// The frame name, used in error frames.
    pub name:        String,
    /// The 1-based source line of the header this body hangs off (0 for the
    /// root frame).
    pub line_index:  usize,
    /// The raw source text of the body.
    pub code:        String,
}

impl Frame {
    /// Creates the root frame for a program, carrying the two meta-cells
    /// every scope inherits: `_DEBUG` and `_MAX_RECURSION`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn root(code: &str) -> FrameRef {
        let mut variables = HashMap::new();
        variables.insert("_DEBUG".to_string(), Rc::new(RefCell::new(Value::Bool(false))));
        variables.insert("_MAX_RECURSION".to_string(),
                         Rc::new(RefCell::new(Value::Int(DEFAULT_MAX_RECURSION as i64))));

        Rc::new(RefCell::new(Self { arguments: Vec::new(),
                                    variables,
                                    return_type: Type::Null,
                                    parent: None,
                                    name: "main".to_string(),
                                    line_index: 0,
                                    code: code.to_string() }))
    }

    /// Creates a block frame for an `if` arm or a `for` body.
    ///
    /// The cell map aliases the creating scope's cells, so mutation inside
    /// the block is observable outside; the return tag is inherited so a
    /// `return` inside the block still honors the enclosing declaration.
    #[must_use]
    pub fn block(scope: &FrameRef, code: String, line_index: usize) -> FrameRef {
        let guard = scope.borrow();
        Rc::new(RefCell::new(Self { arguments: Vec::new(),
                                    variables: guard.variables.clone(),
                                    return_type: guard.return_type.clone(),
                                    parent: Some(scope.clone()),
                                    name: guard.name.clone(),
                                    line_index,
                                    code }))
    }

    /// Clones a function template for an invocation.
    ///
    /// The clone gets a fresh cell map copied from the template's *lexical
    /// parent* as it is right now (closure capture by cell), parameter slots
    /// seeded with their tag's default value, and the same parent edge, so
    /// repeated calls never cross-contaminate.
    #[must_use]
    pub fn clone_for_call(template: &FrameRef) -> FrameRef {
        let guard = template.borrow();
        let mut variables = match &guard.parent {
            Some(parent) => parent.borrow().variables.clone(),
            None => guard.variables.clone(),
        };
        for parameter in &guard.arguments {
            variables.insert(parameter.name.clone(),
                             Rc::new(RefCell::new(Value::default_for(&parameter.tag))));
        }

        Rc::new(RefCell::new(Self { arguments: guard.arguments.clone(),
                                    variables,
                                    return_type: guard.return_type.clone(),
                                    parent: guard.parent.clone(),
                                    name: guard.name.clone(),
                                    line_index: guard.line_index,
                                    code: guard.code.clone() }))
    }

    /// Clones a function template for `new`.
    ///
    /// Unlike a call clone the cell map starts empty (the meta-cells are
    /// injected by the caller through `run`), and the parent self-loops so
    /// `super` inside the instance resolves to the instance itself.
    #[must_use]
    pub fn instantiate(template: &FrameRef) -> FrameRef {
        let guard = template.borrow();
        let mut variables = HashMap::new();
        for parameter in &guard.arguments {
            variables.insert(parameter.name.clone(),
                             Rc::new(RefCell::new(Value::default_for(&parameter.tag))));
        }

        Rc::new(RefCell::new(Self { arguments: guard.arguments.clone(),
                                    variables,
                                    return_type: guard.return_type.clone(),
                                    parent: None,
                                    name: guard.name.clone(),
                                    line_index: guard.line_index,
                                    code: guard.code.clone() }))
    }

    /// The lexical parent of a frame; a self-parented frame is its own
    /// parent.
    #[must_use]
    pub fn parent_of(frame: &FrameRef) -> FrameRef {
        let parent = frame.borrow().parent.clone();
        parent.unwrap_or_else(|| frame.clone())
    }

    /// Whether `name` is present in this frame's cell map.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Looks `name` up in this frame's cell map. Lookup is map-local by
    /// design; see [`Frame::variables`].
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<CellRef> {
        self.variables.get(name).cloned()
    }

    /// The effective recursion bound: the `_MAX_RECURSION` cell when it
    /// holds an `int`, the default otherwise.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn max_recursion(&self) -> usize {
        match self.variables.get("_MAX_RECURSION").map(|cell| cell.borrow().clone()) {
            Some(Value::Int(limit)) if limit >= 0 => limit as usize,
            _ => DEFAULT_MAX_RECURSION,
        }
    }

    /// Whether the `_DEBUG` cell holds `true`.
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        matches!(self.variables.get("_DEBUG").map(|cell| cell.borrow().clone()),
                 Some(Value::Bool(true)))
    }
}

impl std::fmt::Debug for Frame {
    // Frames reference themselves through instances and closures; a derived
    // Debug would recurse forever.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
         .field("name", &self.name)
         .field("line_index", &self.line_index)
         .field("arguments", &self.arguments)
         .field("return_type", &self.return_type)
         .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_carries_the_meta_cells() {
        let root = Frame::root("");
        assert!(root.borrow().has("_DEBUG"));
        assert!(root.borrow().has("_MAX_RECURSION"));
        assert_eq!(root.borrow().max_recursion(), DEFAULT_MAX_RECURSION);
        assert!(!root.borrow().debug_enabled());
    }

    #[test]
    fn block_frames_alias_cells_but_not_maps() {
        let root = Frame::root("");
        root.borrow_mut()
            .variables
            .insert("x".to_string(), Rc::new(RefCell::new(Value::Int(1))));

        let block = Frame::block(&root, String::new(), 1);
        // Writing through the block's cell is visible in the root...
        *block.borrow().lookup("x").unwrap().borrow_mut() = Value::Int(2);
        assert!(matches!(*root.borrow().lookup("x").unwrap().borrow(), Value::Int(2)));

        // ...but a name inserted into the block map is not.
        block.borrow_mut()
             .variables
             .insert("y".to_string(), Rc::new(RefCell::new(Value::Null)));
        assert!(!root.borrow().has("y"));
    }

    #[test]
    fn call_clones_seed_parameter_defaults() {
        let root = Frame::root("");
        let template =
            Rc::new(RefCell::new(Frame { arguments:   vec![Parameter { name: "n".to_string(),
                                                                       tag:  Type::Int, }],
                                         variables:   HashMap::new(),
                                         return_type: Type::Int,
                                         parent:      Some(root),
                                         name:        "f".to_string(),
                                         line_index:  1,
                                         code:        String::new(), }));

        let callee = Frame::clone_for_call(&template);
        assert!(matches!(*callee.borrow().lookup("n").unwrap().borrow(), Value::Int(0)));
        // The clone captured the root's meta-cells through the parent edge.
        assert!(callee.borrow().has("_MAX_RECURSION"));
    }

    #[test]
    fn self_parented_frames_are_their_own_parent() {
        let root = Frame::root("");
        assert!(Rc::ptr_eq(&Frame::parent_of(&root), &root));
    }
}
