//! fontcol CLI library.
//!
//! This crate provides the core functionality for the fontcol CLI,
//! including manifest loading, descriptor dispatch, and the commands.

pub mod commands;
pub mod dispatch;
pub mod input;
