//! Tera rendering engine: [`HeaderRenderer`].
//!
//! # Templates
//!
//! | Option      | Template            | First line                                        |
//! |-------------|---------------------|---------------------------------------------------|
//! | `apache2.0` | `apache2.0.tera`    | `// Copyright <year> <holder>. All Rights Reserved.` |
//! | `bsd`       | `bsd.tera`          | `// Copyright <year> <holder>. All rights reserved.` |

use tera::Tera;

use conform_core::{CopyrightInfo, HeaderTemplate};

use crate::context::HeaderContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates, baked in with include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("apache2.0.tera", include_str!("templates/apache2.0.tera")),
    ("bsd.tera", include_str!("templates/bsd.tera")),
];

fn template_name(template: HeaderTemplate) -> &'static str {
    match template {
        HeaderTemplate::Apache2 => "apache2.0.tera",
        HeaderTemplate::Bsd => "bsd.tera",
    }
}

fn build_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TPLS.iter().copied())?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// HeaderRenderer
// ---------------------------------------------------------------------------

/// Renders license headers from the embedded templates.
///
/// Create once with [`HeaderRenderer::new`] and reuse; rendering is pure.
pub struct HeaderRenderer {
    tera: Tera,
}

impl HeaderRenderer {
    pub fn new() -> Result<Self, RenderError> {
        Ok(HeaderRenderer { tera: build_tera()? })
    }

    /// Render the header bytes for `info` using `template`.
    ///
    /// Output uses LF line endings and ends with a blank line, ready to be
    /// prepended to a file.
    pub fn render(
        &self,
        info: &CopyrightInfo,
        template: HeaderTemplate,
    ) -> Result<Vec<u8>, RenderError> {
        let ctx = HeaderContext::from_copyright(info).to_tera_context()?;
        let rendered = self.tera.render(template_name(template), &ctx)?;
        Ok(rendered.replace("\r\n", "\n").into_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn acme(year: i32) -> CopyrightInfo {
        CopyrightInfo {
            year,
            holder: "ACME".to_string(),
        }
    }

    #[test]
    fn renderer_new_succeeds() {
        HeaderRenderer::new().expect("HeaderRenderer::new should succeed with embedded templates");
    }

    #[test]
    fn every_template_has_a_name() {
        let renderer = HeaderRenderer::new().unwrap();
        for t in [HeaderTemplate::Apache2, HeaderTemplate::Bsd] {
            assert!(
                renderer.tera.get_template_names().any(|n| n == template_name(t)),
                "missing template for {t}"
            );
        }
    }

    #[test]
    fn no_crlf_in_any_rendered_output() {
        let renderer = HeaderRenderer::new().unwrap();
        for t in [HeaderTemplate::Apache2, HeaderTemplate::Bsd] {
            let out = renderer.render(&acme(2020), t).unwrap();
            assert!(!out.contains(&b'\r'), "{t} header contains CR");
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = HeaderRenderer::new().unwrap();
        let a = renderer.render(&acme(2001), HeaderTemplate::Bsd).unwrap();
        let b = renderer.render(&acme(2001), HeaderTemplate::Bsd).unwrap();
        assert_eq!(a, b);
    }
}
