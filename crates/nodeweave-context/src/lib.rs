pub mod error;
pub mod options;
pub mod resolver;
pub mod view;

pub use error::{ContextError, OptionsError};
pub use options::ContextOptions;
pub use resolver::{ContextResolver, resolve_context};
pub use view::{ContextView, Suggestion};
