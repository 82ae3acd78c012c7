//! `mdlinkcheck-lib` resolves Markdown inputs, merges their configuration and
//! checks their hyperlinks.
//!
//! "Hello world" example:
//! ```
//! use mdlinkcheck_lib::{CheckOptions, Checker, LinkChecker, LinkStatus, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!   let checker = LinkChecker::new()?;
//!   let results = checker
//!       .check("[contact](mailto:team@example.com)", &CheckOptions::default())
//!       .await?;
//!   assert_eq!(results[0].status, LinkStatus::Alive);
//!   Ok(())
//! }
//! ```
//!
//! The command-line tool builds on [`input::resolve`] to turn its arguments
//! into [`Target`]s and on [`config::merge`] to apply a configuration file to
//! each of them before handing the document to a [`Checker`].
#![warn(missing_docs)]

mod checker;
mod types;
mod utils;

pub mod config;
pub mod input;

pub use checker::{Checker, DEFAULT_USER_AGENT, LinkChecker};
pub use input::Input;
pub use types::*;
