//! Keys under which beans are registered in a [Scope](crate::Scope).
//!
//! An [Identifier] is either a named [Role], checked against a suitable type,
//! or a raw [TypeKey].

use std::any::{type_name, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime handle on a Rust type, comparable and hashable.
///
/// Equality only considers the [TypeId]; the name is kept for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Module path of the type, used for module-private override rules.
    pub(crate) fn module(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        match base.rfind("::") {
            Some(idx) => &base[..idx],
            None => "",
        }
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A named marker for beans of a given type.
///
/// Two roles are equal when their names are equal.
#[derive(Clone, Debug)]
pub struct Role {
    name: Cow<'static, str>,
    suitable_type: Option<TypeKey>,
}

impl Role {
    /// Role accepting only beans of type `T`.
    pub fn new<T: ?Sized + 'static>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            suitable_type: Some(TypeKey::of::<T>()),
        }
    }

    /// Role accepting beans of any type.
    pub fn any(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            suitable_type: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suitable_type(&self) -> Option<TypeKey> {
        self.suitable_type
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Role {}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Key of a binding: a [Role] or a [TypeKey].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identifier {
    Role(Role),
    Type(TypeKey),
}

impl Identifier {
    pub fn for_role(role: Role) -> Self {
        Identifier::Role(role)
    }

    pub fn for_type<T: ?Sized + 'static>() -> Self {
        Identifier::Type(TypeKey::of::<T>())
    }

    /// Type that bound beans must have, `None` for an "any" role.
    pub fn required_type(&self) -> Option<TypeKey> {
        match self {
            Identifier::Role(role) => role.suitable_type,
            Identifier::Type(key) => Some(*key),
        }
    }

    /// Check if a bean of the given type can be registered under this identifier.
    pub fn accepts(&self, provided: &TypeKey) -> bool {
        self.required_type()
            .map_or(true, |required| required == *provided)
    }
}

impl From<Role> for Identifier {
    fn from(role: Role) -> Self {
        Identifier::Role(role)
    }
}

impl From<TypeKey> for Identifier {
    fn from(key: TypeKey) -> Self {
        Identifier::Type(key)
    }
}

impl From<&Identifier> for Identifier {
    fn from(id: &Identifier) -> Self {
        id.clone()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Role(role) => match role.suitable_type {
                Some(ty) => write!(f, "role '{}' ({})", role.name, ty),
                None => write!(f, "role '{}' (any)", role.name),
            },
            Identifier::Type(ty) => write!(f, "type {}", ty),
        }
    }
}
