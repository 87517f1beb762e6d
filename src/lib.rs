//! Hierarchical dependency injection container with scoped bindings.
//!
//! # Simple use case
//!
//! ```
//! # use std::sync::Arc;
//! # use kodama::*;
//! // Define traits and implementors
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct GreeterImpl {
//!     name: String,
//! }
//!
//! impl GreeterImpl {
//!     fn new(name: String) -> Self {
//!         Self { name }
//!     }
//! }
//!
//! impl Greeter for GreeterImpl {
//!     fn greet(&self) -> String {
//!         format!("Hello {}", self.name)
//!     }
//! }
//!
//! // Declare the injectable constructor and the exposed trait object
//! impl Injectable for GreeterImpl {
//!     fn describe(class: ClassBuilder<Self>) -> ClassBuilder<Self> {
//!         class
//!             .constructor((Param::<String>::of(),), GreeterImpl::new)
//!             .exposes(|g| Arc::new(g) as Arc<dyn Greeter>)
//!     }
//! }
//!
//! # fn main() -> Result<(), WiringError> {
//! // Register bindings on a scope and request a bean
//! let scope = Scope::root_scope();
//! let greeter = Identifier::for_role(Role::new::<Arc<dyn Greeter>>("Greeter"));
//! scope.bind(Identifier::for_type::<String>()).to_instance("World".to_string())?;
//! scope.bind(&greeter).to_class::<GreeterImpl>()?;
//!
//! let bean: Arc<dyn Greeter> = scope.require(&greeter)?;
//! assert_eq!(bean.greet(), "Hello World");
//! # Ok(())
//! # }
//! ```
//!
//! # Mechanism
//!
//! Beans are registered under an [Identifier]: either a named [Role], which only accepts beans of
//! a suitable type, or a raw [TypeKey]. Each binding associates an identifier with a [Provider],
//! which can be a fixed instance, a supplier function or an [Injectable] class.
//!
//! * The [Provide] trait produces a bean, then injects its members. Providers are checked for
//!   suitability when they are registered, so type errors surface at binding time.
//! * The [Injectable] trait replaces runtime introspection: a class declares its injectable
//!   constructor (at most one), fields and methods on a [ClassBuilder]. The resulting [ClassMeta]
//!   is built once per class and cached.
//! * A [Scope] owns bindings and delegates lookups to its parent. Branches are created for each
//!   unit of work and stopped afterwards. Dependencies are always resolved against the scope
//!   which received the request, so a branch can override what its ancestors' beans receive.
//! * The [Binder] offers a fluent registration surface on top of [Scope::put].

mod binder;
mod config;
mod error;
mod identifier;
mod inject;
mod provider;
mod scope;

pub use binder::{Binder, Binding};
pub use config::{ContainerConfig, DuplicatePolicy, MAX_RESOLUTION_DEPTH};
pub use error::{BoxError, WiringError};
pub use identifier::{Identifier, Role, TypeKey};
pub use inject::{
    Bean, Callable, CallableMut, ClassBuilder, ClassMeta, Dependencies, Dependency, Injectable,
    Injector, Member, MemberKind, MemberSpec, Optional, Param, Visibility,
};
pub use provider::{ClassProvider, InstanceProvider, Provide, Provider, SupplierProvider};
pub use scope::{Scope, ScopeId};
