//! Wanderi Insurance Consultation API Library
//!
//! This library provides the consultation booking pipeline for the Wanderi
//! Insurance website: the shared request schema, the submission endpoint,
//! the notification renderer, the mail transport client, and the client-side
//! form controller.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `consultation`: Shared request schema and validation (client and server
//!   both consume this module, so the two rule sets can never drift).
//! - `consultation_handler`: The submission endpoint.
//! - `errors`: Error handling types.
//! - `form`: Client-side form submission controller.
//! - `handlers`: Application state, router assembly, ancillary endpoints.
//! - `mailer`: Resend mail transport client.
//! - `models`: Wire payload and response models.
//! - `notification`: Notification email renderer.

pub mod config;
pub mod consultation;
pub mod consultation_handler;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod notification;
