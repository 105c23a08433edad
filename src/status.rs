// +-----------------------------------------------------------------------------------------------+
// | Copyright 2016 Sean Kerr                                                                      |
// |                                                                                               |
// | Licensed under the Apache License, Version 2.0 (the "License");                               |
// | you may not use this file except in compliance with the License.                              |
// | You may obtain a copy of the License at                                                       |
// |                                                                                               |
// |  http://www.apache.org/licenses/LICENSE-2.0                                                   |
// |                                                                                               |
// | Unless required by applicable law or agreed to in writing, software                           |
// | distributed under the License is distributed on an "AS IS" BASIS,                             |
// | WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.                      |
// | See the License for the specific language governing permissions and                           |
// | limitations under the License.                                                                |
// +-----------------------------------------------------------------------------------------------+
// | Author: Sean Kerr <sean@code-box.org>                                                         |
// +-----------------------------------------------------------------------------------------------+

//! Parse statuses and error codes shared by every parser.

use std::fmt;

/// Parse error codes.
///
/// Errors are sticky: once a parser reports one, further feeds return the same error without
/// consuming input.
#[derive(Clone,Copy,PartialEq)]
pub enum ParseError {
    /// Invalid attribute on byte `u8`.
    BadAttr(u8),

    /// Invalid byte within a token on byte `u8`.
    BadChar(u8),

    /// Invalid structural data on byte `u8`.
    BadData(u8),

    /// Missing or malformed header.
    BadHeader,

    /// Invalid escape or quote sequence on byte `u8`.
    BadSeq(u8),

    /// Invalid UTF-8 data.
    BadUtf8,

    /// Uncategorized failure, e.g. an I/O error while spooling.
    Generic,

    /// A hook requested that parsing be aborted.
    Interrupt,

    /// Conflicting request information, e.g. a multipart content type without a boundary.
    Mismatch,

    /// Requested attribute is absent.
    NoAttr,

    /// Requested header is absent.
    NoHeader,

    /// No parser is available for the content type.
    NoParser,

    /// Requested token is absent.
    NoToken,

    /// A configured limit has been exceeded.
    OverLimit
}

impl ParseError {
    /// Format this for debug and display purposes.
    fn format(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::BadAttr(byte) => {
                write!(formatter, "<ParseError::BadAttr: {}>", byte)
            },
            ParseError::BadChar(byte) => {
                write!(formatter, "<ParseError::BadChar: {}>", byte)
            },
            ParseError::BadData(byte) => {
                write!(formatter, "<ParseError::BadData: {}>", byte)
            },
            ParseError::BadHeader => {
                write!(formatter, "<ParseError::BadHeader>")
            },
            ParseError::BadSeq(byte) => {
                write!(formatter, "<ParseError::BadSeq: {}>", byte)
            },
            ParseError::BadUtf8 => {
                write!(formatter, "<ParseError::BadUtf8>")
            },
            ParseError::Generic => {
                write!(formatter, "<ParseError::Generic>")
            },
            ParseError::Interrupt => {
                write!(formatter, "<ParseError::Interrupt>")
            },
            ParseError::Mismatch => {
                write!(formatter, "<ParseError::Mismatch>")
            },
            ParseError::NoAttr => {
                write!(formatter, "<ParseError::NoAttr>")
            },
            ParseError::NoHeader => {
                write!(formatter, "<ParseError::NoHeader>")
            },
            ParseError::NoParser => {
                write!(formatter, "<ParseError::NoParser>")
            },
            ParseError::NoToken => {
                write!(formatter, "<ParseError::NoToken>")
            },
            ParseError::OverLimit => {
                write!(formatter, "<ParseError::OverLimit>")
            }
        }
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        self.format(formatter)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        self.format(formatter)
    }
}

// -------------------------------------------------------------------------------------------------

/// Parse statuses.
#[derive(Clone,Copy,PartialEq)]
pub enum ParseStatus {
    /// Parsing failed. The wrapped error persists across further feeds.
    Error(ParseError),

    /// Additional stream data is expected.
    Incomplete,

    /// No stream data was available.
    NoData,

    /// Parsing finished successfully.
    Ok
}

impl ParseStatus {
    /// Indicates that this status is an error.
    pub fn is_error(&self) -> bool {
        match *self {
            ParseStatus::Error(_) => true,
            _ => false
        }
    }

    /// Indicates that this status is terminal: parsing either finished successfully, or failed.
    ///
    /// Terminal statuses are sticky. Feeding a parser that holds one is a no-op.
    pub fn is_terminal(&self) -> bool {
        match *self {
            ParseStatus::Ok
            | ParseStatus::Error(_) => true,
            _ => false
        }
    }

    /// Retrieve the wrapped error.
    pub fn error(&self) -> Option<ParseError> {
        match *self {
            ParseStatus::Error(error) => Some(error),
            _ => None
        }
    }
}

impl fmt::Debug for ParseStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseStatus::Error(error) => {
                write!(formatter, "ParseStatus::Error({:?})", error)
            },
            ParseStatus::Incomplete => {
                write!(formatter, "ParseStatus::Incomplete")
            },
            ParseStatus::NoData => {
                write!(formatter, "ParseStatus::NoData")
            },
            ParseStatus::Ok => {
                write!(formatter, "ParseStatus::Ok")
            }
        }
    }
}

impl fmt::Display for ParseStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseStatus::Error(error) => {
                write!(formatter, "{}", error)
            },
            ParseStatus::Incomplete => {
                write!(formatter, "incomplete")
            },
            ParseStatus::NoData => {
                write!(formatter, "no data")
            },
            ParseStatus::Ok => {
                write!(formatter, "ok")
            }
        }
    }
}
