//! Notification registry: ordered, non-owning, synchronous broadcast.
//!
//! - [`registry`]: the [`Registry`] itself (register / deregister / broadcast);
//! - [`report`]: per-broadcast [`BroadcastReport`].

mod registry;
mod report;

pub use registry::Registry;
pub use report::BroadcastReport;
