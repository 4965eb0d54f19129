use std::fmt;
use std::str::FromStr;

/// Which hard-coded scene the pipeline draws.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SceneVariant {
    /// Embedded shader, three vertices generated from the vertex index.
    Triangle,
    /// Shader loaded from the resource directory, six textured vertices.
    #[default]
    Quad,
}

impl SceneVariant {
    /// Vertex count of the single draw call issued per frame.
    pub const fn vertex_count(self) -> u32 {
        match self {
            Self::Triangle => 3,
            Self::Quad => 6,
        }
    }
}

impl fmt::Display for SceneVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triangle => f.write_str("triangle"),
            Self::Quad => f.write_str("quad"),
        }
    }
}

impl FromStr for SceneVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triangle" => Ok(Self::Triangle),
            "quad" => Ok(Self::Quad),
            other => Err(format!("unknown scene variant `{other}` (expected triangle|quad)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts_match_geometry() {
        assert_eq!(SceneVariant::Triangle.vertex_count(), 3);
        assert_eq!(SceneVariant::Quad.vertex_count(), 6);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Triangle".parse(), Ok(SceneVariant::Triangle));
        assert_eq!(" quad ".parse(), Ok(SceneVariant::Quad));
        assert!("hexagon".parse::<SceneVariant>().is_err());
    }
}
