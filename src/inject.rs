//! Member injection: constructor selection, field and method injection.
//!
//! Classes opt in by implementing [Injectable] and declaring their injectable members
//! on a [ClassBuilder]. The resulting [ClassMeta] is built once per class and cached.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::*;

/// Type-erased bean, as handed out by a [Provide] implementation
pub type Bean = Box<dyn Any + Send + Sync>;

/// One injectable input: a constructor parameter, a field or a method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberSpec {
    pub identifier: Identifier,
    pub mandatory: bool,
}

impl MemberSpec {
    pub fn new(identifier: impl Into<Identifier>, mandatory: bool) -> Self {
        Self {
            identifier: identifier.into(),
            mandatory,
        }
    }
}

/// Resolution context for a single top-level request.
///
/// Dependencies are resolved against the requesting scope, and the chain of
/// identifiers currently being resolved is tracked to detect cycles.
pub struct Injector<'a> {
    scope: &'a Scope,
    path: RefCell<Vec<Identifier>>,
}

/// Pops the resolution path when the bean is complete
struct PathGuard<'p> {
    path: &'p RefCell<Vec<Identifier>>,
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.path.borrow_mut().pop();
    }
}

impl<'a> Injector<'a> {
    pub fn new(scope: &'a Scope) -> Self {
        Self {
            scope,
            path: RefCell::new(Vec::new()),
        }
    }

    /// The scope against which all dependencies are resolved
    pub fn scope(&self) -> &'a Scope {
        self.scope
    }

    /// The bean currently under construction, if any
    pub fn current(&self) -> Option<Identifier> {
        self.path.borrow().last().cloned()
    }

    /// Resolve a bean: locate the nearest provider, produce, inject its members
    /// and convert it to the type required by the binding.
    ///
    /// Returns `None` if no provider is bound on the scope chain.
    pub fn resolve(&self, identifier: &Identifier) -> Result<Option<Bean>, WiringError> {
        let Some((bound, provider)) = self.scope.binding(identifier)? else {
            trace!(scope = %self.scope.id(), %identifier, "no binding");
            return Ok(None);
        };
        let _guard = self.enter(identifier)?;
        trace!(scope = %self.scope.id(), %identifier, "resolving");
        let bean = provider.produce(self, identifier)?;
        let bean = provider.inject_members(bean, self)?;
        // beans take the type declared by the binding, not by the request
        provider.expose(bean, &bound).map(Some)
    }

    /// Resolve and downcast a bean
    pub fn bean<V: 'static>(&self, identifier: &Identifier) -> Result<Option<V>, WiringError> {
        self.resolve(identifier)?
            .map(|bean| downcast(bean, identifier))
            .transpose()
    }

    /// Resolve and downcast a bean, failing if nothing is bound
    pub fn require<V: 'static>(&self, identifier: &Identifier) -> Result<V, WiringError> {
        self.bean(identifier)?
            .ok_or_else(|| WiringError::BeanNotFound {
                identifier: identifier.clone(),
            })
    }

    /// Resolve a single member input, failing if it is mandatory and absent.
    pub fn resolve_spec(&self, spec: &MemberSpec) -> Result<Option<Bean>, WiringError> {
        match self.resolve(&spec.identifier)? {
            Some(bean) => Ok(Some(bean)),
            None if spec.mandatory => Err(self.missing(&spec.identifier)),
            None => Ok(None),
        }
    }

    /// Resolve member inputs in declaration order
    pub fn parameters_for(&self, specs: &[MemberSpec]) -> Result<Vec<Option<Bean>>, WiringError> {
        specs.iter().map(|spec| self.resolve_spec(spec)).collect()
    }

    fn missing(&self, identifier: &Identifier) -> WiringError {
        WiringError::MissingDependency {
            identifier: identifier.clone(),
            required_by: self.current(),
        }
    }

    fn enter(&self, identifier: &Identifier) -> Result<PathGuard<'_>, WiringError> {
        let config = self.scope.config();
        let mut path = self.path.borrow_mut();
        if config.detect_cycles {
            if let Some(start) = path.iter().position(|id| id == identifier) {
                let mut cycle = path[start..].to_vec();
                cycle.push(identifier.clone());
                return Err(WiringError::CyclicDependency { path: cycle });
            }
        }
        if path.len() >= config.max_resolution_depth {
            return Err(WiringError::ResolutionTooDeep {
                identifier: identifier.clone(),
                limit: config.max_resolution_depth,
            });
        }
        path.push(identifier.clone());
        Ok(PathGuard { path: &self.path })
    }
}

pub(crate) fn downcast<V: 'static>(bean: Bean, identifier: &Identifier) -> Result<V, WiringError> {
    bean.downcast::<V>()
        .map(|b| *b)
        .map_err(|_| WiringError::BeanTypeMismatch {
            identifier: identifier.clone(),
            expected: TypeKey::of::<V>(),
        })
}

/// A typed injectable input
pub trait Dependency: Send + Sync + 'static {
    type Output;

    fn spec(&self) -> MemberSpec;

    /// Declared type of the input, used to compare method signatures
    fn param_type(&self) -> TypeKey;

    fn resolve(&self, injector: &Injector<'_>) -> Result<Self::Output, WiringError>;
}

/// Mandatory input of type `X`
pub struct Param<X> {
    identifier: Identifier,
    _marker: PhantomData<fn() -> X>,
}

impl<X: 'static> Param<X> {
    /// Input resolved by its type
    pub fn of() -> Self {
        Self::new(Identifier::for_type::<X>())
    }

    /// Input resolved by an explicit identifier, usually a [Role]
    pub fn new(identifier: impl Into<Identifier>) -> Self {
        Self {
            identifier: identifier.into(),
            _marker: PhantomData,
        }
    }
}

impl<X: 'static> Dependency for Param<X> {
    type Output = X;

    fn spec(&self) -> MemberSpec {
        MemberSpec::new(self.identifier.clone(), true)
    }

    fn param_type(&self) -> TypeKey {
        TypeKey::of::<X>()
    }

    fn resolve(&self, injector: &Injector<'_>) -> Result<X, WiringError> {
        let bean = injector
            .resolve_spec(&self.spec())?
            .ok_or_else(|| injector.missing(&self.identifier))?;
        downcast(bean, &self.identifier)
    }
}

/// Optional input of type `X`, resolved to `None` when nothing is bound
pub struct Optional<X> {
    identifier: Identifier,
    _marker: PhantomData<fn() -> X>,
}

impl<X: 'static> Optional<X> {
    pub fn of() -> Self {
        Self::new(Identifier::for_type::<X>())
    }

    pub fn new(identifier: impl Into<Identifier>) -> Self {
        Self {
            identifier: identifier.into(),
            _marker: PhantomData,
        }
    }
}

impl<X: 'static> Dependency for Optional<X> {
    type Output = Option<X>;

    fn spec(&self) -> MemberSpec {
        MemberSpec::new(self.identifier.clone(), false)
    }

    fn param_type(&self) -> TypeKey {
        TypeKey::of::<X>()
    }

    fn resolve(&self, injector: &Injector<'_>) -> Result<Option<X>, WiringError> {
        injector
            .resolve_spec(&self.spec())?
            .map(|bean| downcast(bean, &self.identifier))
            .transpose()
    }
}

/// An ordered list of typed inputs, implemented for tuples of [Dependency]
pub trait Dependencies: Send + Sync + 'static {
    type Output;

    fn specs(&self) -> Vec<MemberSpec>;

    fn param_types(&self) -> Vec<TypeKey>;

    fn resolve(&self, injector: &Injector<'_>) -> Result<Self::Output, WiringError>;
}

/// A Callable has a ```call``` function with a single argument and a single return type.
///
/// This trait is implemented for all functions with up to 10 arguments, using a tuple to
/// wrap them all in a single type.
pub trait Callable<Args, Ret> {
    fn call(&self, args: Args) -> Ret;
}

/// Same as [Callable] for functions taking the injected instance as first argument
pub trait CallableMut<T, Args> {
    fn call_mut(&self, target: &mut T, args: Args);
}

macro_rules! callable_tuple ({ $($param:ident)* } => {
    impl<Func, Ret, $($param,)*> Callable<($($param,)*), Ret> for Func
    where
        Func: Fn($($param),*) -> Ret,
    {
        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, ($($param,)*): ($($param,)*)) -> Ret {
            (self)($($param,)*)
        }
    }

    impl<Func, T, $($param,)*> CallableMut<T, ($($param,)*)> for Func
    where
        Func: Fn(&mut T, $($param),*),
    {
        #[inline]
        #[allow(non_snake_case)]
        fn call_mut(&self, target: &mut T, ($($param,)*): ($($param,)*)) {
            (self)(target, $($param,)*)
        }
    }

    // A tuple of dependencies resolves to a tuple of values
    #[allow(non_snake_case)]
    #[allow(clippy::unused_unit)]
    impl<$($param: Dependency,)*> Dependencies for ($($param,)*) {
        type Output = ($(<$param as Dependency>::Output,)*);

        fn specs(&self) -> Vec<MemberSpec> {
            let ($($param,)*) = self;
            vec![$($param.spec(),)*]
        }

        fn param_types(&self) -> Vec<TypeKey> {
            let ($($param,)*) = self;
            vec![$($param.param_type(),)*]
        }

        #[inline]
        fn resolve(&self, _injector: &Injector<'_>) -> Result<Self::Output, WiringError> {
            let ($($param,)*) = self;
            Ok(($($param.resolve(_injector)?,)*))
        }
    }
});

callable_tuple! {}
callable_tuple! { A }
callable_tuple! { A B }
callable_tuple! { A B C }
callable_tuple! { A B C D }
callable_tuple! { A B C D E }
callable_tuple! { A B C D E F }
callable_tuple! { A B C D E F G }
callable_tuple! { A B C D E F G H }
callable_tuple! { A B C D E F G H I }
callable_tuple! { A B C D E F G H I J }

/// Mark a type as constructible and injectable by the container.
///
/// This replaces runtime introspection: the implementation declares the injectable
/// constructor, fields and methods of the type.
pub trait Injectable: Sized + Send + Sync + 'static {
    fn describe(class: ClassBuilder<Self>) -> ClassBuilder<Self>;
}

/// Visibility of an injectable method, deciding whether it can be overridden
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    /// Only overridden by classes declared in the same module
    Module,
    /// Never overridden
    Private,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method {
        params: Vec<TypeKey>,
        visibility: Visibility,
    },
}

type ConstructFn<T> =
    Arc<dyn Fn(&Injector<'_>, &Identifier) -> Result<T, WiringError> + Send + Sync>;
type ApplyFn<T> = Arc<dyn Fn(&mut T, &Injector<'_>) -> Result<(), WiringError> + Send + Sync>;
type ExposeFn<T> = Arc<dyn Fn(T) -> Bean + Send + Sync>;

struct Constructor<T> {
    params: Vec<MemberSpec>,
    build: ConstructFn<T>,
}

/// An injectable field or method, as seen from the injected class
pub struct Member<T> {
    name: &'static str,
    kind: MemberKind,
    declaring: TypeKey,
    level: usize,
    specs: Vec<MemberSpec>,
    apply: ApplyFn<T>,
}

impl<T> Clone for Member<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind.clone(),
            declaring: self.declaring,
            level: self.level,
            specs: self.specs.clone(),
            apply: self.apply.clone(),
        }
    }
}

impl<T> Member<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    /// Class declaring this member
    pub fn declaring(&self) -> TypeKey {
        self.declaring
    }

    /// Hierarchy level of the declaring class, 0 for the root
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn specs(&self) -> &[MemberSpec] {
        &self.specs
    }

    fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field)
    }

    /// Check if this method is overridden by another method declared lower in the hierarchy
    fn is_overridden_by(&self, other: &Member<T>) -> bool {
        let (
            MemberKind::Method { params, visibility },
            MemberKind::Method {
                params: other_params,
                ..
            },
        ) = (&self.kind, &other.kind)
        else {
            return false;
        };
        if other.level <= self.level || other.name != self.name || other_params != params {
            return false;
        }
        match visibility {
            Visibility::Public => true,
            Visibility::Module => other.declaring.module() == self.declaring.module(),
            Visibility::Private => false,
        }
    }
}

/// Declare the injectable members of a class
pub struct ClassBuilder<T> {
    class: TypeKey,
    ancestors: Vec<TypeKey>,
    inherited: Vec<Member<T>>,
    constructors: Vec<Constructor<T>>,
    default_constructor: Option<Constructor<T>>,
    members: Vec<Member<T>>,
    exposed: Vec<(TypeKey, ExposeFn<T>)>,
}

impl<T: Injectable> Default for ClassBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Injectable> ClassBuilder<T> {
    pub fn new() -> Self {
        Self {
            class: TypeKey::of::<T>(),
            ancestors: Vec::new(),
            inherited: Vec::new(),
            constructors: Vec::new(),
            default_constructor: None,
            members: Vec::new(),
            exposed: Vec::new(),
        }
    }

    /// Declare an injectable constructor.
    ///
    /// At most one injectable constructor is allowed per class.
    pub fn constructor<D, F>(mut self, deps: D, constructor: F) -> Self
    where
        D: Dependencies,
        F: Callable<D::Output, T> + Send + Sync + 'static,
    {
        let params = deps.specs();
        let build: ConstructFn<T> =
            Arc::new(move |injector: &Injector<'_>, _: &Identifier| -> Result<T, WiringError> {
                Ok(constructor.call(deps.resolve(injector)?))
            });
        self.constructors.push(Constructor { params, build });
        self
    }

    /// Declare an injectable constructor which may fail
    pub fn try_constructor<D, F, E>(mut self, deps: D, constructor: F) -> Self
    where
        D: Dependencies,
        F: Callable<D::Output, Result<T, E>> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let params = deps.specs();
        let build: ConstructFn<T> = Arc::new(move |injector: &Injector<'_>, identifier: &Identifier| -> Result<T, WiringError> {
            constructor
                .call(deps.resolve(injector)?)
                .map_err(|e| WiringError::creation(identifier, e))
        });
        self.constructors.push(Constructor { params, build });
        self
    }

    /// Inject a mandatory field
    pub fn field<X: 'static>(
        self,
        name: &'static str,
        identifier: impl Into<Identifier>,
        setter: impl Fn(&mut T, X) + Send + Sync + 'static,
    ) -> Self {
        self.push_field(name, MemberSpec::new(identifier, true), setter)
    }

    /// Inject a field if a binding exists, leave it unset otherwise
    pub fn optional_field<X: 'static>(
        self,
        name: &'static str,
        identifier: impl Into<Identifier>,
        setter: impl Fn(&mut T, X) + Send + Sync + 'static,
    ) -> Self {
        self.push_field(name, MemberSpec::new(identifier, false), setter)
    }

    /// Inject a public method
    pub fn method<D, F>(self, name: &'static str, deps: D, method: F) -> Self
    where
        D: Dependencies,
        F: CallableMut<T, D::Output> + Send + Sync + 'static,
    {
        self.push_method(name, Visibility::Public, true, deps, method)
    }

    /// Inject a public method, skipped unless all its inputs are bound
    pub fn optional_method<D, F>(self, name: &'static str, deps: D, method: F) -> Self
    where
        D: Dependencies,
        F: CallableMut<T, D::Output> + Send + Sync + 'static,
    {
        self.push_method(name, Visibility::Public, false, deps, method)
    }

    /// Inject a method with an explicit visibility
    pub fn method_with<D, F>(
        self,
        visibility: Visibility,
        name: &'static str,
        deps: D,
        method: F,
    ) -> Self
    where
        D: Dependencies,
        F: CallableMut<T, D::Output> + Send + Sync + 'static,
    {
        self.push_method(name, visibility, true, deps, method)
    }

    /// Inherit the injectable fields and methods of a base class.
    ///
    /// The projection gives access to the embedded base. Constructors are not inherited,
    /// and a later call replaces the previous base.
    pub fn extends<B: Injectable>(mut self, project: fn(&mut T) -> &mut B) -> Self {
        let base = B::describe(ClassBuilder::new());
        let base_level = base.ancestors.len();
        let mut ancestors = base.ancestors;
        ancestors.push(base.class);

        self.inherited = base
            .inherited
            .into_iter()
            .chain(base.members.into_iter().map(|mut m| {
                m.level = base_level;
                m
            }))
            .map(|m| {
                let apply = m.apply;
                Member {
                    name: m.name,
                    kind: m.kind,
                    declaring: m.declaring,
                    level: m.level,
                    specs: m.specs,
                    apply: Arc::new(move |target: &mut T, injector: &Injector<'_>| -> Result<(), WiringError> {
                        apply(project(target), injector)
                    }),
                }
            })
            .collect();
        self.ancestors = ancestors;
        self
    }

    /// Allow the class to be bound under identifiers of another type, typically a trait object.
    pub fn exposes<U: Send + Sync + 'static>(
        mut self,
        cast: impl Fn(T) -> U + Send + Sync + 'static,
    ) -> Self {
        self.exposed
            .push((TypeKey::of::<U>(), Arc::new(move |t: T| Box::new(cast(t)) as Bean)));
        self
    }

    fn push_field<X: 'static>(
        mut self,
        name: &'static str,
        spec: MemberSpec,
        setter: impl Fn(&mut T, X) + Send + Sync + 'static,
    ) -> Self {
        let resolved = spec.clone();
        let apply: ApplyFn<T> = Arc::new(move |target: &mut T, injector: &Injector<'_>| -> Result<(), WiringError> {
            match injector.resolve_spec(&resolved)? {
                Some(bean) => setter(target, downcast(bean, &resolved.identifier)?),
                None => {
                    debug!(field = name, identifier = %resolved.identifier, "optional field left unset");
                }
            }
            Ok(())
        });
        self.members.push(Member {
            name,
            kind: MemberKind::Field,
            declaring: self.class,
            level: 0,
            specs: vec![spec],
            apply,
        });
        self
    }

    fn push_method<D, F>(
        mut self,
        name: &'static str,
        visibility: Visibility,
        mandatory: bool,
        deps: D,
        method: F,
    ) -> Self
    where
        D: Dependencies,
        F: CallableMut<T, D::Output> + Send + Sync + 'static,
    {
        let declared = deps.specs();
        // Optional inputs never gate the method call
        let required: Vec<Identifier> = declared
            .iter()
            .filter(|s| s.mandatory)
            .map(|s| s.identifier.clone())
            .collect();
        let specs: Vec<MemberSpec> = declared
            .into_iter()
            .map(|spec| MemberSpec {
                mandatory: mandatory && spec.mandatory,
                ..spec
            })
            .collect();
        let params = deps.param_types();
        let apply: ApplyFn<T> = Arc::new(move |target: &mut T, injector: &Injector<'_>| -> Result<(), WiringError> {
            if !mandatory {
                for identifier in &required {
                    if !injector.scope().contains(identifier)? {
                        debug!(method = name, %identifier, "optional method skipped");
                        return Ok(());
                    }
                }
            }
            method.call_mut(target, deps.resolve(injector)?);
            Ok(())
        });
        self.members.push(Member {
            name,
            kind: MemberKind::Method {
                params,
                visibility,
            },
            declaring: self.class,
            level: 0,
            specs,
            apply,
        });
        self
    }

    fn build(self) -> Result<ClassMeta<T>, WiringError> {
        if self.constructors.len() > 1 {
            return Err(WiringError::AmbiguousConstructor {
                class: self.class.name(),
                count: self.constructors.len(),
            });
        }
        let constructor = self
            .constructors
            .into_iter()
            .next()
            .or(self.default_constructor);

        let level = self.ancestors.len();
        let mut members: Vec<Member<T>> = self
            .inherited
            .into_iter()
            .chain(self.members.into_iter().map(|mut m| {
                m.level = level;
                m
            }))
            .collect();
        // root level first, fields before methods, declaration order otherwise
        members.sort_by_key(|m| (m.level, !m.is_field()));
        let members = members
            .iter()
            .filter(|m| !members.iter().any(|other| m.is_overridden_by(other)))
            .cloned()
            .collect();

        let mut hierarchy = self.ancestors;
        hierarchy.push(self.class);
        Ok(ClassMeta {
            class: self.class,
            hierarchy,
            constructor,
            members,
            exposed: self.exposed,
        })
    }
}

impl<T: Injectable + Default> ClassBuilder<T> {
    /// Fallback used when no injectable constructor is declared
    pub fn default_constructor(mut self) -> Self {
        self.default_constructor = Some(Constructor {
            params: Vec::new(),
            build: Arc::new(|_: &Injector<'_>, _: &Identifier| Ok(T::default())),
        });
        self
    }
}

/// Injection metadata of a class, derived once from its [Injectable] description
pub struct ClassMeta<T> {
    class: TypeKey,
    hierarchy: Vec<TypeKey>,
    constructor: Option<Constructor<T>>,
    members: Vec<Member<T>>,
    exposed: Vec<(TypeKey, ExposeFn<T>)>,
}

static CLASS_CACHE: Lazy<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> =
    Lazy::new(Default::default);

impl<T: Injectable> ClassMeta<T> {
    /// Obtain the cached metadata of a class, building it on first use.
    ///
    /// Return an error if the class declares more than one injectable constructor.
    pub fn of() -> Result<Arc<Self>, WiringError> {
        let key = TypeId::of::<T>();
        let cached = CLASS_CACHE
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(meta) = cached.and_then(|m| m.downcast::<Self>().ok()) {
            return Ok(meta);
        }

        let meta = Arc::new(T::describe(ClassBuilder::new()).build()?);
        debug!(
            class = meta.class.name(),
            levels = meta.hierarchy.len(),
            members = meta.members.len(),
            "class metadata built"
        );
        let stored = CLASS_CACHE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert_with(|| meta.clone() as Arc<dyn Any + Send + Sync>)
            .clone();
        Ok(stored.downcast::<Self>().unwrap_or(meta))
    }

    pub fn class(&self) -> TypeKey {
        self.class
    }

    /// Ancestor classes, from the root down to the class itself
    pub fn hierarchy(&self) -> &[TypeKey] {
        &self.hierarchy
    }

    pub fn level_of(&self, class: TypeKey) -> Option<usize> {
        self.hierarchy.iter().position(|c| *c == class)
    }

    /// Positional inputs of the selected constructor, `None` if the class has none
    pub fn constructor_specs(&self) -> Option<&[MemberSpec]> {
        self.constructor.as_ref().map(|c| c.params.as_slice())
    }

    /// Injected fields and methods in injection order, overridden methods excluded
    pub fn members(&self) -> &[Member<T>] {
        &self.members
    }

    /// Check if the class or one of its exposed types is accepted by the identifier
    pub fn suitable_to(&self, identifier: &Identifier) -> bool {
        identifier.accepts(&self.class)
            || self.exposed.iter().any(|(key, _)| identifier.accepts(key))
    }

    pub(crate) fn construct(
        &self,
        injector: &Injector<'_>,
        identifier: &Identifier,
    ) -> Result<T, WiringError> {
        let constructor = self.constructor.as_ref().ok_or_else(|| {
            WiringError::creation(
                identifier,
                format!("{} has no injectable or default constructor", self.class),
            )
        })?;
        (constructor.build)(injector, identifier)
    }

    /// Run the field and method injection pass on an instance
    pub fn inject_members(&self, target: &mut T, injector: &Injector<'_>) -> Result<(), WiringError> {
        for member in &self.members {
            trace!(class = self.class.name(), member = member.name, "injecting");
            (member.apply)(target, injector)?;
        }
        Ok(())
    }

    pub(crate) fn expose(&self, value: T, identifier: &Identifier) -> Result<Bean, WiringError> {
        match identifier.required_type() {
            None => Ok(Box::new(value)),
            Some(required) if required == self.class => Ok(Box::new(value)),
            Some(required) => self
                .exposed
                .iter()
                .find(|(key, _)| *key == required)
                .map(|(_, cast)| cast(value))
                .ok_or_else(|| WiringError::TypeMismatch {
                    identifier: identifier.clone(),
                    provided: self.class,
                }),
        }
    }
}
