//! Bundler abstraction
//!
//! The orchestrator only knows the [`Bundler`] trait. [`CommandBundler`]
//! drives an external bundler program; tests use the scripted bundler in
//! [`mock`].

pub mod command;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

pub use command::CommandBundler;

use crate::domain::BundleTask;
use crate::error::Result;

/// Produces the output file of one bundle task
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Run the task to completion. Dropping the future must abandon the work.
    async fn bundle(&self, task: &BundleTask) -> Result<()>;
}
