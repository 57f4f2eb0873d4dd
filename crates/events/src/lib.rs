//! Reactive plumbing: event sources, replaying caches and stateful folds.
//!
//! Nothing in here knows about products. The catalog pipeline composes these
//! pieces into its derived views.

pub mod combine;
pub mod fold;
pub mod multicast;
pub mod subject;

pub use combine::CombineLatest;
pub use fold::{Fold, Reducer};
pub use multicast::Multicast;
pub use subject::{ChannelError, Subject, Subscription};
