//! The library code for the `daybook` static site generator. A run is a single
//! pass through five stages, each feeding the next:
//!
//! 1. Loading raw entries from the source directory ([`crate::parser`])
//! 2. Building immutable [`entry::Entry`] records, including the Markdown
//!    conversion ([`crate::entry`], [`crate::markdown`])
//! 3. Indexing entries by tag ([`crate::tag`])
//! 4. Rendering pages and feeds ([`crate::page`], [`crate::htmlrenderer`],
//!    [`crate::feed`])
//! 5. Writing everything into a staging directory and swapping it onto the
//!    live output directory ([`crate::write`], [`crate::publish`])
//!
//! [`build::build_site`] stitches the stages together.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod entry;
pub mod feed;
pub mod htmlrenderer;
pub mod markdown;
pub mod page;
pub mod parser;
pub mod publish;
pub mod tag;
pub mod write;

#[cfg(test)]
pub(crate) mod test_helpers;
