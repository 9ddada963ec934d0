//! # Prototype Source
//!
//! The pool never builds instances itself. It asks a [`PrototypeSource`]
//! for "one new instance of this template" during pre-warm and on growth.

use crate::registry::InstanceTemplate;

/// Produces fresh instances for the pool.
///
/// Called with the pool lock held, so `produce` must not call back into the
/// pool.
pub trait PrototypeSource {
    /// The pooled instance type.
    type Instance;

    /// Builds one new instance from `template`.
    fn produce(&self, template: &InstanceTemplate) -> Self::Instance;
}

/// Adapts a closure into a [`PrototypeSource`].
///
/// ```rust,ignore
/// let source = FnPrototypes::new(|t: &InstanceTemplate| t.prototype.clone());
/// ```
pub struct FnPrototypes<F> {
    factory: F,
}

impl<F> FnPrototypes<F> {
    /// Wraps `factory`.
    pub const fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<F, T> PrototypeSource for FnPrototypes<F>
where
    F: Fn(&InstanceTemplate) -> T,
{
    type Instance = T;

    #[inline]
    fn produce(&self, template: &InstanceTemplate) -> T {
        (self.factory)(template)
    }
}

impl<S: PrototypeSource + ?Sized> PrototypeSource for std::sync::Arc<S> {
    type Instance = S::Instance;

    #[inline]
    fn produce(&self, template: &InstanceTemplate) -> Self::Instance {
        (**self).produce(template)
    }
}
