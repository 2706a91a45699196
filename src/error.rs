// Copyright 2021 Vladimir Melnikov.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This module contains error struct

/// This is represents library error.
///
/// # Generic usage
///
/// All library methods that can fail returns Result<...,FSError>.
/// Comparison itself never fails, only construction of components can.
///
#[derive(Debug)]
pub enum FSError {
    Static(&'static str),
    DynStr(std::string::String),
    /// Prefix has bits set inside the offset region, or offset/length exceeds address width.
    InvalidPrefixEncoding { offset: u8, prefixlen: u8 },
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl FSError {
    /// Wraps static string error message.
    #[inline]
    pub fn static_str(ms: &'static str) -> FSError {
        FSError::Static(ms)
    }
    /// Wraps std String error message.
    #[inline]
    pub fn from_string(s: std::string::String) -> FSError {
        FSError::DynStr(s)
    }
    /// Wraps any error implements std::error::Error. In Box.
    #[inline]
    pub fn from_error(e: Box<dyn std::error::Error + Send + Sync>) -> FSError {
        FSError::Other(e)
    }
    /// Says that offset-aware prefix can not be represented in NLRI.
    pub fn invalid_prefix_encoding(offset: u8, prefixlen: u8) -> FSError {
        FSError::InvalidPrefixEncoding { offset, prefixlen }
    }
    /// Just says that buffer size is too small.
    pub fn insufficient_buffer_size() -> FSError {
        FSError::Static("Insufficient buffer size")
    }
    /// Checks for prefix encoding error.
    pub fn is_invalid_prefix_encoding(&self) -> bool {
        matches!(self, FSError::InvalidPrefixEncoding { .. })
    }
}
impl std::fmt::Display for FSError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FSError::Static(s) => write!(f, "FSError {}", s),
            FSError::DynStr(s) => write!(f, "FSError {}", s),
            FSError::InvalidPrefixEncoding { offset, prefixlen } => write!(
                f,
                "FSError invalid prefix encoding: length {} offset {}",
                prefixlen, offset
            ),
            FSError::Other(e) => write!(f, "FSError {}", e),
        }
    }
}
impl std::error::Error for FSError {}

impl From<std::net::AddrParseError> for FSError {
    #[inline]
    fn from(error: std::net::AddrParseError) -> Self {
        FSError::Other(Box::new(error))
    }
}
impl From<std::num::ParseIntError> for FSError {
    #[inline]
    fn from(error: std::num::ParseIntError) -> Self {
        FSError::Other(Box::new(error))
    }
}
