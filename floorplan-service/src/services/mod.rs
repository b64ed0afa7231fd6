pub mod invoker;
pub mod providers;
pub mod recorder;
pub mod validator;

pub use invoker::GenerationInvoker;
pub use recorder::{ProvenanceRecorder, RecorderError};
pub use validator::ValidationError;
