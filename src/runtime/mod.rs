//! Interactive runtime: click dispatch, scrolling and timed highlights.
//!
//! - `scheduler`: keyed, cancellable timers on a virtual clock
//! - `viewport`: the scrolling collaborator
//! - `session`: a document plus both of the above

mod scheduler;
mod session;
mod viewport;

pub use scheduler::{Scheduler, TaskKey};
pub use session::{DEFAULT_HIGHLIGHT, Session, SessionEvent, SessionEventKind};
pub use viewport::{RecordingViewport, ScrollBehavior, ScrollBlock, ScrollOptions, Viewport};
