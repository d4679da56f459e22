//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `subscription` - Required catalog, conditions, templating and status reconciliation
//! - `webhook` - Delivery envelopes, signatures and canonical channel events
//! - `userauth` - CSRF tokens for the broadcaster authorization handshake
//! - `access` - Admin principals and roles

pub mod access;
pub mod subscription;
pub mod userauth;
pub mod webhook;
