use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    /// A transform or projection produced NaN or infinity for this layer.
    #[error("layer `{layer}` produced non-finite coordinates")]
    NonFinite { layer: String },
}
