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

//! Character set divination for decoded parameter data.

use std::fmt;
use std::str;

/// Character sets a decoded value can be classified as.
#[derive(Clone,Copy,Eq,PartialEq)]
pub enum Charset {
    /// 7-bit ASCII.
    Ascii,

    /// ISO-8859-1.
    Latin1,

    /// Windows-1252.
    Cp1252,

    /// Unrecognized character set.
    Unknown,

    /// UTF-8.
    Utf8
}

impl Charset {
    /// Map a character set name, e.g. the `charset` attribute of a Content-Type header, onto a
    /// `Charset`.
    pub fn from_name(name: &[u8]) -> Charset {
        if name.eq_ignore_ascii_case(b"utf-8") || name.eq_ignore_ascii_case(b"utf8") {
            Charset::Utf8
        } else if name.eq_ignore_ascii_case(b"iso-8859-1") || name.eq_ignore_ascii_case(b"latin1") {
            Charset::Latin1
        } else if name.eq_ignore_ascii_case(b"windows-1252") || name.eq_ignore_ascii_case(b"cp1252") {
            Charset::Cp1252
        } else if name.eq_ignore_ascii_case(b"us-ascii") {
            Charset::Ascii
        } else {
            Charset::Unknown
        }
    }

    /// Indicates that data classified as this character set has actually been validated, rather
    /// than guessed at.
    ///
    /// Only ASCII and UTF-8 can be validated byte-for-byte. Everything else is a heuristic, and
    /// values carrying it are marked tainted.
    pub fn is_validated(&self) -> bool {
        match *self {
            Charset::Ascii
            | Charset::Utf8 => true,
            _ => false
        }
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Charset::Ascii => write!(formatter, "Charset::Ascii"),
            Charset::Latin1 => write!(formatter, "Charset::Latin1"),
            Charset::Cp1252 => write!(formatter, "Charset::Cp1252"),
            Charset::Unknown => write!(formatter, "Charset::Unknown"),
            Charset::Utf8 => write!(formatter, "Charset::Utf8")
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Charset::Ascii => write!(formatter, "us-ascii"),
            Charset::Latin1 => write!(formatter, "iso-8859-1"),
            Charset::Cp1252 => write!(formatter, "windows-1252"),
            Charset::Unknown => write!(formatter, "unknown"),
            Charset::Utf8 => write!(formatter, "utf-8")
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Divine the character set of `bytes`.
///
/// ASCII and UTF-8 are detected exactly. For anything else this is a guess: bytes within
/// `0x80...0x9F` indicate Windows-1252, which assigns printable characters to the range that
/// ISO-8859-1 reserves for control codes.
pub fn divine(bytes: &[u8]) -> Charset {
    if bytes.iter().all(|&byte| byte < 0x80) {
        return Charset::Ascii;
    }

    if str::from_utf8(bytes).is_ok() {
        return Charset::Utf8;
    }

    if bytes.iter().any(|&byte| byte > 0x7F && byte < 0xA0) {
        Charset::Cp1252
    } else {
        Charset::Latin1
    }
}
