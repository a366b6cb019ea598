pub mod collaborators;
pub mod events;
pub mod handle;
pub mod orchestrator;
pub mod state;

pub use collaborators::*;
pub use events::{GateHandle, NavigationEvent};
pub use handle::SuspendedNavigation;
pub use orchestrator::{Collaborators, OrchestratorConfig, ValidationOrchestrator};
pub use state::*;
