/// Convenience result type used across the crate.
pub type BulletinResult<T> = Result<T, BulletinError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum BulletinError {
    /// Invalid user-provided board, pin, or dataset configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A fill-mode string is not in the permitted set for its pin kind.
    #[error("invalid {kind} fill mode '{mode}'")]
    InvalidFillMode {
        /// Pin kind the mode was meant for (`text` or `image`).
        kind: &'static str,
        /// The rejected mode string.
        mode: String,
    },

    /// A pin declares neither a source column nor a default value.
    #[error("pin '{0}' needs a source column or a default value")]
    MissingColumnOrDefault(String),

    /// No gallery candidate loaded for an image pin's content under any
    /// probed extension.
    #[error("asset '{name}' not found in gallery '{gallery}'")]
    AssetNotFound {
        /// Gallery directory that was probed.
        gallery: String,
        /// Logical image name that failed to resolve.
        name: String,
    },

    /// The font-fit iteration exceeded its cap without landing in the
    /// tolerance band.
    #[error("font fit did not converge on width {target_width} within {iterations} iterations")]
    FontFitDivergence {
        /// Target width the fit was aiming for.
        target_width: f32,
        /// Iteration cap that was exhausted.
        iterations: u32,
    },

    /// Errors while resolving content or painting a row.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BulletinError {
    /// Build a [`BulletinError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BulletinError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
