use std::process::ExitCode;
use std::sync::Arc;

use kodama::*;
use tracing_subscriber::EnvFilter;

// Define regular traits and implementor structs

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

trait Output: Send + Sync {
    fn write(&self, line: &str);
}

#[derive(Clone, Default)]
struct Stdout;

impl Output for Stdout {
    fn write(&self, line: &str) {
        println!("{}", line);
    }
}

struct GreeterImpl {
    name: String,
}

impl Greeter for GreeterImpl {
    fn greet(&self) -> String {
        format!("Hello {}", self.name)
    }
}

impl Injectable for GreeterImpl {
    fn describe(class: ClassBuilder<Self>) -> ClassBuilder<Self> {
        class
            .constructor((Param::<String>::new(Role::new::<String>("name")),), |name: String| {
                GreeterImpl { name }
            })
            .exposes(|g| Arc::new(g) as Arc<dyn Greeter>)
    }
}

// A top-level command, created outside of the container and injected afterwards

#[derive(Default)]
struct GreetCommand {
    greeter: Option<Arc<dyn Greeter>>,
    output: Option<Arc<dyn Output>>,
}

impl GreetCommand {
    fn run(&self) {
        if let (Some(greeter), Some(output)) = (&self.greeter, &self.output) {
            output.write(&greeter.greet());
        }
    }
}

impl Injectable for GreetCommand {
    fn describe(class: ClassBuilder<Self>) -> ClassBuilder<Self> {
        class
            .field("greeter", greeter(), |c: &mut GreetCommand, g: Arc<dyn Greeter>| {
                c.greeter = Some(g)
            })
            .field(
                "output",
                Identifier::for_type::<Arc<dyn Output>>(),
                |c: &mut GreetCommand, o: Arc<dyn Output>| c.output = Some(o),
            )
    }
}

fn greeter() -> Identifier {
    Identifier::for_role(Role::new::<Arc<dyn Greeter>>("greeter"))
}

fn configure(root: &Scope) -> Result<(), WiringError> {
    let binder = root.binder();
    binder
        .bind(Identifier::for_type::<Arc<dyn Output>>())
        .to_instance(Arc::new(Stdout) as Arc<dyn Output>)?;
    binder.bind(greeter()).to_class::<GreeterImpl>()?;
    binder.bind(Role::new::<String>("name")).to_instance("World".to_string())
}

fn execute(root: &Scope, name: Option<&str>) -> Result<(), WiringError> {
    // one branch per command execution
    let scope = root.branch()?;
    if let Some(name) = name {
        scope.bind(Role::new::<String>("name")).to_instance(name.to_string())?;
    }
    let mut command = GreetCommand::default();
    scope.inject(&mut command)?;
    command.run();
    scope.stop();
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let root = Scope::root_scope();
    let result = configure(&root)
        .and_then(|_| execute(&root, None))
        .and_then(|_| execute(&root, std::env::args().nth(1).as_deref()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wiring error: {}", e);
            ExitCode::FAILURE
        }
    }
}
