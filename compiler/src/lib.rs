//! firment-compiler
//!
//! This crate implements the backend of the firment protoc plugins:
//!  1) Decoding `CodeGeneratorRequest`s and encoding responses (`codec`),
//!  2) A schema model rebuilt from every supplied descriptor (`descriptor`),
//!  3) Request verification and a request-wide enum registry,
//!  4) Role classification and field mapping (`classify`, `mapper`),
//!  5) Code generation for React widgets (`gen_widgets`) and C pack/unpack
//!     routines (`gen_can`), assembled into named files,
//!  6) Error types (`FirmentError`) and the `Generator` trait.

pub mod error;
pub mod types;
pub mod utils;
pub mod options;
pub mod codec;
pub mod descriptor;
pub mod verifier;
pub mod registry;
pub mod classify;
pub mod mapper;
pub mod assembler;
pub mod traits;
pub mod compiler;
pub mod gen_widgets;
pub mod gen_can;

pub use compiler::{generate, run};
pub use error::FirmentError;
pub use gen_can::CanGenerator;
pub use gen_widgets::WidgetGenerator;
pub use traits::Generator;
