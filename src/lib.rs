//! bugdash: a dashboard client for a bug-tracking service with optional
//! AI-assisted triage.
//!
//! The crate talks to two external HTTP services (bug persistence and AI
//! suggestions) and presents them through view state shared by a served
//! HTML dashboard and a terminal front end.

pub mod ai;
pub mod api;
pub mod cli;
pub mod config;
pub mod health;
pub mod logging;
pub mod model;
pub mod views;
pub mod web;
