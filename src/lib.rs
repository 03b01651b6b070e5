//! Appraisal Flow - employee performance appraisal workflow
//!
//! HR defines weighted KPIs for an employee's appraisal, the employee accepts
//! them and scores themselves, and the manager completes the review. The
//! crate is laid out hexagonally: `domain` holds the rules, `ports` the
//! persistence and identity seams, `application` the command handlers, and
//! `adapters` the in-memory, PostgreSQL, JWT and HTTP implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
