//! Command implementations for the asset-build CLI

pub mod build;
