//! moodchat-classify: sentiment classifier adapters.
//!
//! Two implementations of the core `Classifier` trait: a deterministic
//! lexicon matcher for offline use and tests, and an HTTP adapter for a
//! hosted text-classification model.

pub mod lexicon;
pub mod remote;

pub use lexicon::LexiconClassifier;
pub use remote::RemoteClassifier;
