//! # postboard_core
//!
//! Core domain logic for Postboard: credential and post persistence,
//! schema bootstrap, password hashing and token signing.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod posts;
