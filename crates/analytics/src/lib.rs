//! Translation of third-party SDK analytics calls into Google Analytics for
//! Firebase calls.
//!
//! # Modules
//!
//! - [`naming`] — Backend naming rules and name sanitization
//! - [`adapter`] — The [`SdkAdapter`] capability describing a source SDK's vocabulary
//! - [`backend`] — The [`AnalyticsBackend`] capability plus recording and tracing backends
//! - [`translator`] — [`GoogleAnalyticsAdapter`], which maps names and forwards calls

pub mod adapter;
pub mod backend;
pub mod naming;
pub mod translator;

pub use adapter::SdkAdapter;
pub use backend::{AnalyticsBackend, BackendCall, RecordingBackend, TracingBackend};
pub use naming::NameKind;
pub use translator::{GoogleAnalyticsAdapter, TranslatedEvent, WRAPPER_PARAMETER_NAME};
