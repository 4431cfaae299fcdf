//! # conform-renderer
//!
//! Tera-based renderer for the two built-in license headers.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use conform_core::{CopyrightInfo, HeaderTemplate};
//! use conform_renderer::HeaderRenderer;
//!
//! let renderer = HeaderRenderer::new().expect("embedded templates parse");
//! let info = CopyrightInfo { year: 2016, holder: "ACME".to_string() };
//! let header = renderer.render(&info, HeaderTemplate::Apache2).expect("render");
//! assert!(header.starts_with(b"// Copyright 2016 ACME."));
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::HeaderContext;
pub use engine::HeaderRenderer;
pub use error::RenderError;
