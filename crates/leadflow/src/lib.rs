//! Lead capture and outbound campaign tooling for a landing-page funnel.
//!
//! - [`intake`]: scores form submissions, appends them to a lead log, and forwards
//!   them to a notification webhook.
//! - [`campaign`]: renders a template per lead and sends it through a [`mail`] relay
//!   with randomized pacing, logging every attempt.

pub mod campaign;
pub mod config;
pub mod error;
pub mod intake;
pub mod journal;
pub mod mail;
pub mod telemetry;
