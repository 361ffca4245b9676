/// Exit code for interaction failures (stdin closed mid-prompt, stdout gone).
pub const EXIT_INPUT: u8 = 2;

/// Exit code for a city dataset that cannot be read or parsed.
pub const EXIT_DATA_UNAVAILABLE: u8 = 3;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// The city's backing file is missing or malformed.
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::new(EXIT_DATA_UNAVAILABLE, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn is_data_unavailable(&self) -> bool {
        self.exit_code == EXIT_DATA_UNAVAILABLE
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
