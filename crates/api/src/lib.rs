//! Command and query interface for the plan editor.
//!
//! This crate defines the typed language for driving a [`editor::LayoutEditor`]
//! from outside the window. Commands describe what the operator would do
//! (press here, drag there, rename the selected room) and are:
//! - Serializable (for scripting and the debug socket)
//! - Intent-based (the editor decides selection and commit rules)
//!
//! # Example
//! ```ignore
//! use api::{Command, apply_command};
//!
//! let cmd = Command::DrawRoom {
//!     from: CanvasPoint::new(100, 100),
//!     to: CanvasPoint::new(260, 320),
//! };
//! let mut events = Vec::new();
//! let result = apply_command(&mut editor, cmd, &mut events);
//! ```

mod command;
mod executor;
mod query;
mod server;
mod target;

pub use command::*;
pub use executor::{apply_command, execute_command_in_context, execute_query_in_context, run_query};
pub use query::*;
pub use server::{process_message, socket_path_for, DebugServer, DEBUG_ENV, SOCKET_PREFIX};
pub use target::*;
