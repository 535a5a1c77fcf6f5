//! charcard reads roleplay character cards embedded in PNG images.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`character`] walks the PNG chunk stream, locates the `chara`/`ccv3`
//!   payload, normalizes v1, v2 and v3 cards into the v2 layout, and cleans
//!   prose fields down to printable ASCII.
//! - [`core`] owns the on-disk configuration.
//! - [`utils`] holds logging setup shared by the binary.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which loads configuration, installs the
//! tracing subscriber, and dispatches the requested subcommand.

pub mod character;
pub mod cli;
pub mod core;
pub mod utils;
