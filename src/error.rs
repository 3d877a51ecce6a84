//! Error types shared by the engine, the width layer and the tooling

#[derive(Debug, thiserror::Error)]
pub enum BitwzError {
    #[error("Shift amount {shift} out of range for a {bits}-bit operand")]
    ShiftOutOfRange { shift: i64, bits: u32 },
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    #[error("Unknown width: {0}")]
    UnknownWidth(String),
    #[error("Unknown assertion style: {0}")]
    UnknownStyle(String),
    #[error("Width mismatch: expected {expected}, got {actual}")]
    WidthMismatch { expected: String, actual: String },
    #[error("Missing right operand for {0}")]
    MissingOperand(String),
    #[error("Invalid {width} literal: {text}")]
    InvalidLiteral { width: String, text: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
