//! Command Adapter
//!
//! One generic adapter serves every operation in the schema table:
//!
//! 1. `surface` flattens the input shape into typed parameters and binds raw values
//! 2. `context` copies bound values into a per-invocation [`Context`]
//! 3. `projector` builds the [`Request`], leaving unset sub-structures absent
//! 4. `invoker` performs the single remote call through an injected client
//! 5. `selector` projects the response into the invocation's output
//!
//! `pipeline` sequences the steps and applies the confirmation gate.

pub mod confirm;
pub mod context;
pub mod envelope;
pub mod invoker;
pub mod pipeline;
pub mod projector;
pub mod selector;
pub mod surface;

pub use confirm::{AutoConfirm, Confirmer, TerminalConfirmer};
pub use context::{BindingWarning, Context, WarningKind};
pub use envelope::{CapturedError, OutputEnvelope};
pub use invoker::invoke_blocking;
pub use pipeline::{CommandAdapter, Invocation, InvocationOptions};
pub use projector::{project, Request};
pub use selector::Selector;
pub use surface::{BoundParameters, Parameter, ParameterSurface};
