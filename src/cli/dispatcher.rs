use crate::{
    cli::handlers::{self, commons::BuiltinError},
    core::tokenizer::ArgumentVector,
    system::executor::{self, ChildOutcome},
};

/// What the shell loop should do after a line has been dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// A command handled inside the shell process instead of being spawned.
struct BuiltinDefinition {
    name: &'static str,
    handler: fn(&[String]) -> Result<Flow, BuiltinError>,
}

/// The single source of truth for built-in commands.
static BUILTIN_REGISTRY: &[BuiltinDefinition] = &[
    BuiltinDefinition {
        name: "cd",
        handler: handlers::cd::handle,
    },
    BuiltinDefinition {
        name: "exit",
        handler: handlers::exit::handle,
    },
];

fn find_builtin(name: &str) -> Option<&'static BuiltinDefinition> {
    BUILTIN_REGISTRY.iter().find(|builtin| builtin.name == name)
}

/// Routes an argument vector to a built-in or to the executor.
///
/// Every error is reported here and the loop goes on; only `exit` changes
/// the flow.
pub fn dispatch(argv: &ArgumentVector) -> Flow {
    let Some(command) = argv.command() else {
        return Flow::Continue;
    };

    if let Some(builtin) = find_builtin(command) {
        log::debug!("Dispatching built-in '{}' with {:?}", command, argv.args());
        return match (builtin.handler)(argv.args()) {
            Ok(flow) => flow,
            Err(e) => {
                handlers::commons::report_error(&e);
                Flow::Continue
            }
        };
    }

    match executor::execute(argv) {
        Ok(ChildOutcome::ExecFailed(_)) => {
            // Already diagnosed by the executor.
        }
        Ok(outcome) => log::debug!("'{}' finished: {}", command, outcome),
        Err(e) => handlers::commons::report_error(&e),
    }
    Flow::Continue
}
