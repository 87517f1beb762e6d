//! Bean providers: fixed instances, supplier functions and injectable classes.
//!
//! All providers share the [Provide] contract: produce an instance, then inject its
//! members. Each provider also checks if it is suitable to an [Identifier] before
//! being registered.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::inject::downcast;
use crate::*;

/// Produce beans for a binding
///
/// This trait allows to use a uniform API for fixed instances, factories and classes.
pub trait Provide: Send + Sync {
    /// Type of the beans natively produced by this provider
    fn bean_type(&self) -> TypeKey;

    /// Check if the produced beans are assignable to the type required by the identifier
    fn suitable_to(&self, identifier: &Identifier) -> bool {
        identifier.accepts(&self.bean_type())
    }

    /// Create a new bean, or hand out the fixed one
    fn produce(&self, injector: &Injector<'_>, identifier: &Identifier)
        -> Result<Bean, WiringError>;

    /// Run the member injection pass on a produced bean
    fn inject_members(&self, bean: Bean, _injector: &Injector<'_>) -> Result<Bean, WiringError> {
        Ok(bean)
    }

    /// Convert a bean to the type required by the identifier
    fn expose(&self, bean: Bean, _identifier: &Identifier) -> Result<Bean, WiringError> {
        Ok(bean)
    }
}

/// Shared trait object implementing [Provide]
pub type Provider = Arc<dyn Provide>;

/// Clone-based provider of an already constructed instance.
///
/// Wrap the instance in an [Arc] to share a single object.
pub struct InstanceProvider<V>(V);

impl<V: Clone + Send + Sync + 'static> InstanceProvider<V> {
    pub fn new(value: V) -> Self {
        Self(value)
    }

    pub fn build(value: V) -> Provider {
        Arc::new(Self(value))
    }
}

impl<V: Clone + Send + Sync + 'static> Provide for InstanceProvider<V> {
    fn bean_type(&self) -> TypeKey {
        TypeKey::of::<V>()
    }

    fn produce(&self, _: &Injector<'_>, _: &Identifier) -> Result<Bean, WiringError> {
        Ok(Box::new(self.0.clone()))
    }
}

type SupplierFn<V> = Box<dyn Fn(&Injector<'_>) -> Result<V, BoxError> + Send + Sync>;

/// Provider calling a factory function for each produced bean.
///
/// Nothing is cached: each resolution creates a new instance.
pub struct SupplierProvider<V> {
    factory: SupplierFn<V>,
    _marker: PhantomData<fn() -> V>,
}

impl<V: Send + Sync + 'static> SupplierProvider<V> {
    /// Wrap a zero-argument supplier
    pub fn from_fn(supplier: impl Fn() -> V + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(move |_: &Injector<'_>| Ok::<V, BoxError>(supplier())),
            _marker: PhantomData,
        }
    }

    /// Wrap a fallible factory with access to the requesting scope
    pub fn from_factory<E: Into<BoxError>>(
        factory: impl Fn(&Injector<'_>) -> Result<V, E> + Send + Sync + 'static,
    ) -> Self {
        Self {
            factory: Box::new(move |injector: &Injector<'_>| factory(injector).map_err(Into::<BoxError>::into)),
            _marker: PhantomData,
        }
    }
}

impl<V: Send + Sync + 'static> Provide for SupplierProvider<V> {
    fn bean_type(&self) -> TypeKey {
        TypeKey::of::<V>()
    }

    fn produce(&self, injector: &Injector<'_>, identifier: &Identifier) -> Result<Bean, WiringError> {
        match (self.factory)(injector) {
            Ok(value) => Ok(Box::new(value)),
            // wiring errors raised by nested lookups are reported as-is
            Err(e) => match e.downcast::<WiringError>() {
                Ok(wiring) => Err(*wiring),
                Err(e) => Err(WiringError::creation(identifier, e)),
            },
        }
    }
}

/// Provider instantiating an [Injectable] class through its injectable constructor
pub struct ClassProvider<T> {
    meta: Arc<ClassMeta<T>>,
}

impl<T: Injectable> ClassProvider<T> {
    /// Return an error if the class metadata is invalid (e.g. ambiguous constructors)
    pub fn new() -> Result<Self, WiringError> {
        Ok(Self {
            meta: ClassMeta::of()?,
        })
    }

    pub fn meta(&self) -> &ClassMeta<T> {
        &self.meta
    }
}

impl<T: Injectable> Provide for ClassProvider<T> {
    fn bean_type(&self) -> TypeKey {
        self.meta.class()
    }

    fn suitable_to(&self, identifier: &Identifier) -> bool {
        self.meta.suitable_to(identifier)
    }

    fn produce(&self, injector: &Injector<'_>, identifier: &Identifier) -> Result<Bean, WiringError> {
        let instance = self.meta.construct(injector, identifier)?;
        Ok(Box::new(instance))
    }

    fn inject_members(&self, bean: Bean, injector: &Injector<'_>) -> Result<Bean, WiringError> {
        let mut instance: T = downcast(bean, &Identifier::Type(self.meta.class()))?;
        self.meta.inject_members(&mut instance, injector)?;
        Ok(Box::new(instance))
    }

    fn expose(&self, bean: Bean, identifier: &Identifier) -> Result<Bean, WiringError> {
        let instance: T = downcast(bean, identifier)?;
        self.meta.expose(instance, identifier)
    }
}
