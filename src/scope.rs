//! Hierarchical scopes owning the bindings.
//!
//! A [Scope] resolves lookups in its own bindings first, then delegates to its parent.
//! Branches are created per unit of work and stopped when the unit completes.
//!
//! Scopes are `Send + Sync`, but the intended use is single-writer: register all bindings
//! of a scope before sharing it, then resolve concurrently.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::*;

/// Unique scope identifier, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u64);

impl ScopeId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope-{}", self.0)
    }
}

struct ScopeInner {
    id: ScopeId,
    depth: usize,
    parent: Option<Scope>,
    config: Arc<ContainerConfig>,
    bindings: RwLock<HashMap<Identifier, Provider>>,
    stopped: AtomicBool,
}

/// Node of the scope tree, cheap to clone.
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::root_scope()
    }
}

impl Scope {
    /// Create a root scope with the default configuration
    pub fn root_scope() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        let scope = Self::create(None, Arc::new(config));
        debug!(scope = %scope.id(), "root scope created");
        scope
    }

    fn create(parent: Option<Scope>, config: Arc<ContainerConfig>) -> Self {
        let depth = parent.as_ref().map_or(0, |p| p.depth() + 1);
        Self {
            inner: Arc::new(ScopeInner {
                id: ScopeId::next(),
                depth,
                parent,
                config,
                bindings: RwLock::default(),
                stopped: AtomicBool::new(false),
            }),
        }
    }

    pub fn id(&self) -> ScopeId {
        self.inner.id
    }

    /// Number of ancestors, 0 for a root scope
    pub fn depth(&self) -> usize {
        self.inner.depth
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.inner.parent.as_ref()
    }

    /// The top of the scope tree
    pub fn root(&self) -> &Scope {
        let mut scope = self;
        while let Some(parent) = scope.parent() {
            scope = parent;
        }
        scope
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::Acquire)
    }

    /// Create a child scope. No binding is copied: lookups fall back to this scope.
    pub fn branch(&self) -> Result<Scope, WiringError> {
        self.ensure_active()?;
        let child = Self::create(Some(self.clone()), self.inner.config.clone());
        debug!(scope = %child.id(), parent = %self.id(), "scope branched");
        Ok(child)
    }

    /// Discard the bindings owned by this scope. Ancestors are left untouched.
    pub fn stop(&self) {
        if self.inner.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        let released = {
            let mut bindings = self.write_bindings();
            let count = bindings.len();
            bindings.clear();
            count
        };
        debug!(scope = %self.id(), released, "scope stopped");
    }

    /// Register a provider under an identifier.
    ///
    /// Return an error if the identifier is already bound (see [DuplicatePolicy])
    /// or if the provider is not suitable to the identifier.
    pub fn put(&self, identifier: impl Into<Identifier>, provider: Provider) -> Result<(), WiringError> {
        let identifier = identifier.into();
        self.ensure_active()?;

        if self.config().duplicate_policy == DuplicatePolicy::Lineage {
            if let Some(parent) = self.parent() {
                if parent.lookup(&identifier)?.is_some() {
                    return Err(WiringError::DuplicateBinding { identifier });
                }
            }
        }

        let mut bindings = self.write_bindings();
        // stop() may have run since the first check
        self.ensure_active()?;
        if bindings.contains_key(&identifier) {
            return Err(WiringError::DuplicateBinding { identifier });
        }
        if !provider.suitable_to(&identifier) {
            return Err(WiringError::TypeMismatch {
                identifier,
                provided: provider.bean_type(),
            });
        }
        debug!(scope = %self.id(), %identifier, provided = %provider.bean_type(), "binding registered");
        bindings.insert(identifier, provider);
        Ok(())
    }

    /// Locate the provider bound to an identifier in this scope or its ancestors
    pub fn lookup(&self, identifier: &Identifier) -> Result<Option<Provider>, WiringError> {
        Ok(self.binding(identifier)?.map(|(_, provider)| provider))
    }

    /// Same as [Scope::lookup], also returning the identifier the provider was registered with
    pub(crate) fn binding(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<(Identifier, Provider)>, WiringError> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            current.ensure_active()?;
            if let Some((bound, provider)) = current.read_bindings().get_key_value(identifier) {
                return Ok(Some((bound.clone(), provider.clone())));
            }
            scope = current.parent();
        }
        Ok(None)
    }

    /// Check if an identifier is bound in this scope or its ancestors
    pub fn contains(&self, identifier: &Identifier) -> Result<bool, WiringError> {
        Ok(self.lookup(identifier)?.is_some())
    }

    /// Resolve a type-erased bean, `None` if nothing is bound
    pub fn resolve(&self, identifier: &Identifier) -> Result<Option<Bean>, WiringError> {
        self.ensure_active()?;
        Injector::new(self).resolve(identifier)
    }

    /// Obtain a bean, `None` if nothing is bound.
    ///
    /// Return an error if the bean cannot be built or is not of type `V`.
    pub fn bean<V: 'static>(&self, identifier: &Identifier) -> Result<Option<V>, WiringError> {
        self.ensure_active()?;
        Injector::new(self).bean(identifier)
    }

    /// Obtain a bean, or the default value if nothing is bound
    pub fn bean_or<V: 'static>(&self, identifier: &Identifier, default: V) -> Result<V, WiringError> {
        Ok(self.bean(identifier)?.unwrap_or(default))
    }

    /// Obtain a bean, failing if nothing is bound
    pub fn require<V: 'static>(&self, identifier: &Identifier) -> Result<V, WiringError> {
        self.ensure_active()?;
        Injector::new(self).require(identifier)
    }

    /// Inject the fields and methods of an object created outside of the container
    pub fn inject<T: Injectable>(&self, target: &mut T) -> Result<(), WiringError> {
        self.ensure_active()?;
        let meta = ClassMeta::<T>::of()?;
        meta.inject_members(target, &Injector::new(self))
    }

    pub fn binder(&self) -> Binder<'_> {
        Binder::new(self)
    }

    /// Shortcut for `self.binder().bind(identifier)`
    pub fn bind(&self, identifier: impl Into<Identifier>) -> Binding<'_> {
        Binder::new(self).bind(identifier)
    }

    fn ensure_active(&self) -> Result<(), WiringError> {
        if self.is_stopped() {
            return Err(WiringError::ClosedScope { scope: self.id() });
        }
        Ok(())
    }

    fn read_bindings(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Identifier, Provider>> {
        self.inner
            .bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_bindings(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Identifier, Provider>> {
        self.inner
            .bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id())
            .field("depth", &self.depth())
            .field("bindings", &self.read_bindings().len())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
