//! Catpoint home security library.
//!
//! This library provides the alarm decision engine together with the
//! storage and image classification collaborators it works with.

pub mod config;
pub mod error;
pub mod image;
pub mod repository;
pub mod security;
pub mod sensors;
