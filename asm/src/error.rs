use thiserror::Error;

/// Anything that stops a source file from assembling.
/// `line_no` is 1-based and absent for problems that aren't tied to a line, like I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", located(.line_no, .message))]
pub struct AssemblerError {
    pub message: String,
    pub line_no: Option<usize>,
}

impl AssemblerError {
    pub fn new(message: impl Into<String>, line_no: Option<usize>) -> Self {
        AssemblerError {
            message: message.into(),
            line_no,
        }
    }

    pub fn at(line_no: usize, message: impl Into<String>) -> Self {
        Self::new(message, Some(line_no))
    }
}

fn located(line_no: &Option<usize>, message: &str) -> String {
    match line_no {
        Some(line_no) => format!("line {}: {}", line_no, message),
        None => message.to_string(),
    }
}
