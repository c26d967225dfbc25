use std::fmt;

/// Overall outcome of a query, numbered like getdns response statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Good,
    NoName,
    AllTimeout,
    NoSecureAnswers,
    AllBogus,
    Other(u32),
}

impl StatusCode {
    pub const GOOD: u32 = 900;
    pub const NO_NAME: u32 = 901;
    pub const ALL_TIMEOUT: u32 = 902;
    pub const NO_SECURE_ANSWERS: u32 = 903;
    pub const ALL_BOGUS: u32 = 904;

    pub fn from_code(code: u32) -> Self {
        match code {
            Self::GOOD => StatusCode::Good,
            Self::NO_NAME => StatusCode::NoName,
            Self::ALL_TIMEOUT => StatusCode::AllTimeout,
            Self::NO_SECURE_ANSWERS => StatusCode::NoSecureAnswers,
            Self::ALL_BOGUS => StatusCode::AllBogus,
            other => StatusCode::Other(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            StatusCode::Good => Self::GOOD,
            StatusCode::NoName => Self::NO_NAME,
            StatusCode::AllTimeout => Self::ALL_TIMEOUT,
            StatusCode::NoSecureAnswers => Self::NO_SECURE_ANSWERS,
            StatusCode::AllBogus => Self::ALL_BOGUS,
            StatusCode::Other(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Good => "GOOD",
            StatusCode::NoName => "NO_NAME",
            StatusCode::AllTimeout => "ALL_TIMEOUT",
            StatusCode::NoSecureAnswers => "NO_SECURE_ANSWERS",
            StatusCode::AllBogus => "ALL_BOGUS",
            StatusCode::Other(_) => "UNKNOWN",
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, StatusCode::Good)
    }
}

impl From<u32> for StatusCode {
    fn from(code: u32) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.as_str())
    }
}
