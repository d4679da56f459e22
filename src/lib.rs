//! EventSub Hooks - Twitch EventSub webhook receiver for a single channel
//!
//! This crate keeps the channel's EventSub subscriptions in line with a
//! declared catalog, verifies and translates webhook deliveries into
//! canonical channel events, and runs the broadcaster authorization
//! handshake that grants the scopes those subscriptions need.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
