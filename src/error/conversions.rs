//! 错误类型转换实现

use super::FrontendError;
use std::io;

impl From<io::Error> for FrontendError {
    fn from(err: io::Error) -> Self {
        FrontendError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for FrontendError {
    fn from(err: toml::de::Error) -> Self {
        FrontendError::Toml(err.to_string())
    }
}

