/// Errors raised while loading or validating level data.
#[derive(Debug)]
pub enum LevelError {
    ParseError(String),
    InvalidDimensions { width: f32, height: f32 },
    NoPlatforms,
    DegeneratePlatform(usize),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseError(e) => write!(f, "level parse error: {e}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "level dimensions must be positive: {width}x{height}")
            },
            Self::NoPlatforms => write!(f, "level has no platforms"),
            Self::DegeneratePlatform(i) => {
                write!(f, "platform {i} has non-positive width or height")
            },
        }
    }
}

impl std::error::Error for LevelError {}
