//! Error types for token parsing and validation.

/// Errors produced while loading or validating a catalogue.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid hex color '{0}': expected #RRGGBB")]
    InvalidHex(String),

    #[error("Scale '{0}' is empty")]
    EmptyScale(String),

    #[error("Scale '{name}' is not strictly increasing: {value} follows {previous} at index {index}")]
    NonIncreasing {
        name: String,
        index: usize,
        previous: u32,
        value: u32,
    },

    #[error("Range '{name}' has min {min} greater than max {max}")]
    InvalidRange { name: String, min: u32, max: u32 },

    #[error("Duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("The {kind} name '{name}' has no letters or digits")]
    UnnamedToken { kind: &'static str, name: String },

    #[error("Failed to read catalogue {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse catalogue: {0}")]
    Parse(String),

    #[error("Failed to serialize catalogue: {0}")]
    Serialize(String),

    #[error("Invalid catalogue: {}", join_problems(.0))]
    Invalid(Vec<TokenError>),
}

fn join_problems(problems: &[TokenError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_problem() {
        let err = TokenError::Invalid(vec![
            TokenError::EmptyScale("spacing".to_string()),
            TokenError::InvalidHex("#12".to_string()),
        ]);

        let message = err.to_string();

        assert!(message.contains("Scale 'spacing' is empty"));
        assert!(message.contains("Invalid hex color '#12'"));
    }
}
