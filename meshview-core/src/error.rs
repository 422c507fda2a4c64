/// Error types for the viewer core
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshViewError`].
pub type Result<T> = std::result::Result<T, MeshViewError>;

/// Errors raised by mesh loading, view fitting and configuration.
#[derive(Error, Debug)]
pub enum MeshViewError {
    /// An unindexed mesh whose vertices cannot be grouped into triangles.
    #[error("mesh '{mesh}': {count} vertices is not a multiple of 3 and no index buffer is present")]
    VertexCountNotTriangular { mesh: String, count: usize },

    /// An index buffer whose length cannot be grouped into triangles.
    #[error("mesh '{mesh}': index buffer length {count} is not a multiple of 3")]
    IndexCountNotTriangular { mesh: String, count: usize },

    /// A triangle references a vertex that does not exist.
    #[error("mesh '{mesh}': triangle {triangle} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        mesh: String,
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A flat coordinate array that is not made of whole xyz triples.
    #[error("mesh '{mesh}': flat coordinate buffer length {len} is not a multiple of 3")]
    FlatBufferLength { mesh: String, len: usize },

    /// Vertical field of view outside (0, π).
    #[error("invalid vertical field of view {fov} rad: must be finite and within (0, π)")]
    InvalidFieldOfView { fov: f64 },

    /// A view request that needs a loaded mesh arrived before any mesh.
    #[error("no mesh loaded")]
    NoMeshLoaded,

    /// A view name outside `top|bottom|front|back|left|right|reset`.
    #[error("unknown view '{0}'")]
    UnknownView(String),

    /// A configuration value outside its valid range.
    #[error("invalid config: {name} = {value} ({reason})")]
    InvalidConfig {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MeshViewError {
    /// Create an invalid config error.
    pub fn invalid_config<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshViewError::InvalidConfig {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// True for the malformed-mesh family of errors.
    pub fn is_malformed_mesh(&self) -> bool {
        matches!(
            self,
            MeshViewError::VertexCountNotTriangular { .. }
                | MeshViewError::IndexCountNotTriangular { .. }
                | MeshViewError::IndexOutOfRange { .. }
                | MeshViewError::FlatBufferLength { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_mesh() {
        let err = MeshViewError::IndexOutOfRange {
            mesh: "bracket".to_string(),
            triangle: 2,
            index: 9,
            vertex_count: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("bracket"));
        assert!(msg.contains("vertex 9"));
        assert!(err.is_malformed_mesh());
        assert!(!MeshViewError::NoMeshLoaded.is_malformed_mesh());
    }
}
