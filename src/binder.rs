use std::sync::Arc;

use crate::*;

/// Fluent registration helper: `binder.bind(identifier).to_instance(value)`
#[derive(Clone, Copy)]
pub struct Binder<'s> {
    scope: &'s Scope,
}

impl<'s> Binder<'s> {
    pub fn new(scope: &'s Scope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &'s Scope {
        self.scope
    }

    pub fn bind(&self, identifier: impl Into<Identifier>) -> Binding<'s> {
        Binding {
            scope: self.scope,
            identifier: identifier.into(),
        }
    }
}

/// A pending binding, registered by one of the `to_*` methods
#[must_use = "a binding is only registered by one of its `to_*` methods"]
pub struct Binding<'s> {
    scope: &'s Scope,
    identifier: Identifier,
}

impl Binding<'_> {
    pub fn to_instance<V: Clone + Send + Sync + 'static>(self, value: V) -> Result<(), WiringError> {
        self.to_provider(InstanceProvider::build(value))
    }

    /// Bind a supplier, called each time the bean is requested
    pub fn to_supplier<V, F>(self, supplier: F) -> Result<(), WiringError>
    where
        V: Send + Sync + 'static,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.to_provider(Arc::new(SupplierProvider::from_fn(supplier)))
    }

    /// Bind a fallible factory with access to the requesting scope
    pub fn to_factory<V, E, F>(self, factory: F) -> Result<(), WiringError>
    where
        V: Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn(&Injector<'_>) -> Result<V, E> + Send + Sync + 'static,
    {
        self.to_provider(Arc::new(SupplierProvider::from_factory(factory)))
    }

    /// Bind an injectable class, instantiated through its injectable constructor
    pub fn to_class<T: Injectable>(self) -> Result<(), WiringError> {
        self.to_provider(Arc::new(ClassProvider::<T>::new()?))
    }

    pub fn to_provider(self, provider: Provider) -> Result<(), WiringError> {
        self.scope.put(self.identifier, provider)
    }
}
