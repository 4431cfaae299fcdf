//! Template context: the serializable payload built from [`CopyrightInfo`].

use serde::{Deserialize, Serialize};

use conform_core::CopyrightInfo;

use crate::error::RenderError;

/// The two substitution points every header template uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderContext {
    pub year: i32,
    pub holder: String,
}

impl HeaderContext {
    /// Build a [`HeaderContext`] from [`CopyrightInfo`].
    pub fn from_copyright(info: &CopyrightInfo) -> Self {
        HeaderContext {
            year: info.year,
            holder: info.holder.clone(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
