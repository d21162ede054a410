//! Ordered method lists with `next` chaining.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use fathom_foundation::{Error, Result};

/// Guard predicate over the call arguments.
pub type Guard<C, A> = Rc<dyn Fn(&C, &A) -> bool>;

/// Method handler.
///
/// Receives the context, the call arguments, and a [`Next`] that resumes
/// the scan just below this method.
pub type Handler<C, A, R> = Rc<dyn Fn(&mut C, &A, Next<C, A, R>) -> Result<R>>;

/// One method in a rulebook: a name, an optional guard, and a handler.
pub struct Method<C, A, R> {
    name: Arc<str>,
    guard: Option<Guard<C, A>>,
    handler: Handler<C, A, R>,
}

impl<C, A, R> Method<C, A, R> {
    /// Creates an unguarded method (always applicable).
    pub fn new(
        name: impl Into<Arc<str>>,
        handler: impl Fn(&mut C, &A, Next<C, A, R>) -> Result<R> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            guard: None,
            handler: Rc::new(handler),
        }
    }

    /// Creates a guarded method; the handler runs only when the guard
    /// passes for the call arguments.
    pub fn guarded(
        name: impl Into<Arc<str>>,
        guard: impl Fn(&C, &A) -> bool + 'static,
        handler: impl Fn(&mut C, &A, Next<C, A, R>) -> Result<R> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            guard: Some(Rc::new(guard)),
            handler: Rc::new(handler),
        }
    }

    /// Returns the method's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn applies(&self, ctx: &C, args: &A) -> bool {
        self.guard.as_ref().is_none_or(|g| g(ctx, args))
    }
}

impl<C, A, R> Clone for Method<C, A, R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            guard: self.guard.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<C, A, R> fmt::Debug for Method<C, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({})", self.name)
    }
}

/// An ordered list of methods for one operation.
///
/// Calling the rulebook scans methods from the tail toward the head;
/// the first method whose guard passes runs. A handler may resume the
/// scan below itself via the [`Next`] it receives, which is how
/// decorator-like layering works. If the scan falls off the head with
/// nothing applicable, a no-applicable-method fault is raised.
///
/// Cloning a rulebook is cheap (the method list is `Rc`-shared), which
/// lets a context clone a rulebook out of itself before calling it with
/// `&mut self`.
pub struct Rulebook<C, A, R> {
    operation: Arc<str>,
    methods: Rc<Vec<Method<C, A, R>>>,
}

impl<C, A, R> Rulebook<C, A, R> {
    /// Creates an empty rulebook for the named operation.
    pub fn new(operation: impl Into<Arc<str>>) -> Self {
        Self {
            operation: operation.into(),
            methods: Rc::new(Vec::new()),
        }
    }

    /// Returns the operation name.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Returns the number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// True if no methods are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Appends a method at the tail (dispatched first).
    pub fn append(&mut self, method: Method<C, A, R>) {
        Rc::make_mut(&mut self.methods).push(method);
    }

    /// Prepends a method at the head (the fallback of last resort).
    pub fn prepend(&mut self, method: Method<C, A, R>) {
        Rc::make_mut(&mut self.methods).insert(0, method);
    }

    /// Inserts a method just before the named one (dispatched after it).
    ///
    /// Appends if no method has that name.
    pub fn insert_before(&mut self, name: &str, method: Method<C, A, R>) {
        let methods = Rc::make_mut(&mut self.methods);
        match methods.iter().position(|m| m.name() == name) {
            Some(i) => methods.insert(i, method),
            None => methods.push(method),
        }
    }

    /// Inserts a method just after the named one (dispatched before it).
    ///
    /// Appends if no method has that name.
    pub fn insert_after(&mut self, name: &str, method: Method<C, A, R>) {
        let methods = Rc::make_mut(&mut self.methods);
        match methods.iter().position(|m| m.name() == name) {
            Some(i) => methods.insert(i + 1, method),
            None => methods.push(method),
        }
    }

    /// Removes every method with the given name.
    pub fn remove(&mut self, name: &str) {
        Rc::make_mut(&mut self.methods).retain(|m| m.name() != name);
    }

    /// Returns the registered method names, head to tail.
    #[must_use]
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(Method::name).collect()
    }

    /// Calls the operation: scans from the tail for the first applicable
    /// method and runs it.
    ///
    /// # Errors
    ///
    /// Raises a no-applicable-method fault if no guard passes, and
    /// propagates whatever the chosen handler returns.
    pub fn call(&self, ctx: &mut C, args: &A) -> Result<R> {
        scan(
            &self.operation,
            &self.methods,
            self.methods.len(),
            ctx,
            args,
        )
    }
}

impl<C, A, R> Clone for Rulebook<C, A, R> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation.clone(),
            methods: self.methods.clone(),
        }
    }
}

impl<C, A, R> fmt::Debug for Rulebook<C, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rulebook({}, {} methods)",
            self.operation,
            self.methods.len()
        )
    }
}

/// Continuation of a dispatch scan.
///
/// Passed to every handler; calling it resumes the scan at the position
/// just below the current method.
pub struct Next<C, A, R> {
    operation: Arc<str>,
    methods: Rc<Vec<Method<C, A, R>>>,
    below: usize,
}

impl<C, A, R> Next<C, A, R> {
    /// Resumes the scan below the current method.
    ///
    /// # Errors
    ///
    /// Raises a no-applicable-method fault when the scan falls off the
    /// head of the list.
    pub fn call(&self, ctx: &mut C, args: &A) -> Result<R> {
        scan(&self.operation, &self.methods, self.below, ctx, args)
    }
}

impl<C, A, R> Clone for Next<C, A, R> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation.clone(),
            methods: self.methods.clone(),
            below: self.below,
        }
    }
}

fn scan<C, A, R>(
    operation: &Arc<str>,
    methods: &Rc<Vec<Method<C, A, R>>>,
    limit: usize,
    ctx: &mut C,
    args: &A,
) -> Result<R> {
    for i in (0..limit).rev() {
        let method = &methods[i];
        if method.applies(ctx, args) {
            let next = Next {
                operation: operation.clone(),
                methods: methods.clone(),
                below: i,
            };
            let handler = method.handler.clone();
            return handler(ctx, args, next);
        }
    }
    Err(Error::no_applicable_method(operation.as_ref()))
}
