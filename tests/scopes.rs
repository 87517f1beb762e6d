//! Scope lifecycle through the public API

use std::sync::Arc;
use std::thread;

use kodama::*;
use rstest::*;

struct Session {
    user: String,
    store: Arc<Store>,
}

struct Store {
    url: String,
}

impl Injectable for Session {
    fn describe(class: ClassBuilder<Self>) -> ClassBuilder<Self> {
        class.constructor(
            (
                Param::<String>::new(Role::new::<String>("user")),
                Param::<Arc<Store>>::of(),
            ),
            |user: String, store: Arc<Store>| Session { user, store },
        )
    }
}

#[fixture]
fn root() -> Scope {
    let root = Scope::root_scope();
    root.bind(Identifier::for_type::<Arc<Store>>())
        .to_instance(Arc::new(Store {
            url: "memory://".to_string(),
        }))
        .unwrap();
    root.bind(Identifier::for_type::<Session>())
        .to_class::<Session>()
        .unwrap();
    root
}

fn user() -> Identifier {
    Identifier::for_role(Role::new::<String>("user"))
}

#[rstest]
fn each_unit_of_work_gets_its_own_bindings(root: Scope) -> Result<(), WiringError> {
    // Arrange
    let alice = root.branch()?;
    let bob = root.branch()?;
    alice.bind(user()).to_instance("alice".to_string())?;
    bob.bind(user()).to_instance("bob".to_string())?;

    // Act
    let a: Session = alice.require(&Identifier::for_type::<Session>())?;
    let b: Session = bob.require(&Identifier::for_type::<Session>())?;

    // Assert
    assert_eq!(a.user, "alice");
    assert_eq!(b.user, "bob");
    assert!(Arc::ptr_eq(&a.store, &b.store));
    assert_eq!(a.store.url, "memory://");
    Ok(())
}

#[rstest]
fn stopping_a_branch_keeps_the_root_usable(root: Scope) -> Result<(), WiringError> {
    // Arrange
    let branch = root.branch()?;
    branch.bind(user()).to_instance("carol".to_string())?;

    // Act
    branch.stop();

    // Assert
    assert!(root.contains(&Identifier::for_type::<Session>())?);
    assert!(!root.contains(&user())?);
    let next = root.branch()?;
    next.bind(user()).to_instance("carol".to_string())?;
    assert_eq!(next.require::<Session>(&Identifier::for_type::<Session>())?.user, "carol");
    Ok(())
}

#[rstest]
fn root_is_shared_across_threads_after_init(root: Scope) {
    // Arrange
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let root = root.clone();
            thread::spawn(move || -> Result<String, WiringError> {
                let scope = root.branch()?;
                scope.bind(user()).to_instance(format!("user-{i}"))?;
                let session: Session = scope.require(&Identifier::for_type::<Session>())?;
                scope.stop();
                Ok(session.user)
            })
        })
        .collect();

    // Act
    let mut users: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    users.sort();

    // Assert
    assert_eq!(users, vec!["user-0", "user-1", "user-2", "user-3"]);
}

#[rstest]
fn errors_report_the_offending_identifier(root: Scope) {
    let Err(err) = root.bean::<Session>(&Identifier::for_type::<Session>()) else {
        panic!("resolution should fail");
    };

    assert_eq!(
        err.to_string(),
        format!(
            "Missing dependency: no binding for {} (required by {})",
            user(),
            Identifier::for_type::<Session>()
        )
    );
}
