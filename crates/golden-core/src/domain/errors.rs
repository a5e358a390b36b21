use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GoldenResult<T> = Result<T, GoldenError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoldenErrorCategory {
    UsageError,
    PathNotFoundError,
    ExecutorCrashError,
    IoSystemError,
    InternalError,
}

impl GoldenErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsageError => "UsageError",
            Self::PathNotFoundError => "PathNotFoundError",
            Self::ExecutorCrashError => "ExecutorCrashError",
            Self::IoSystemError => "IoSystemError",
            Self::InternalError => "InternalError",
        }
    }

    /// Every category shares exit status 1; callers distinguish them by
    /// category and code, not by exit status.
    pub const fn exit_code(self) -> i32 {
        1
    }
}

impl Display for GoldenErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenError {
    category: GoldenErrorCategory,
    code: &'static str,
    message: String,
}

impl GoldenError {
    pub fn new(
        category: GoldenErrorCategory,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn usage(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(GoldenErrorCategory::UsageError, code, message)
    }

    pub fn path_not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(GoldenErrorCategory::PathNotFoundError, code, message)
    }

    pub fn executor_crash(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(GoldenErrorCategory::ExecutorCrashError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(GoldenErrorCategory::IoSystemError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(GoldenErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> GoldenErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    /// The line logged when a run aborts.
    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.code, self.message)
    }
}

impl Display for GoldenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.category, self.code, self.message)
    }
}

impl Error for GoldenError {}
