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

//! Byte verification functions.

/// Bytes allowed in non-quoted header fields.
static HEADER_FIELDS: [bool; 255] = [

// NUL SOH    STX    ETX    EOT    ENQ    ACK    BEL    BS     TAB
false, false, false, false, false, false, false, false, false, true,

// LF  VT     FF     CR     SO     SI     DLE    DC1    DC2    DC3
false, false, false, false, false, false, false, false, false, false,

// DC4 NAK    SYN    ETB    CAN    EM     SUB    ESC    FS     GS
false, false, false, false, false, false, false, false, false, false,

// RS  US
false, false,

// space
true,

// !   "      #      $      %      &      '     (      )      *
true,  false, true,  true,  true,  true,  true, true,  true,  true,

// +   ,      -      .      /
true,  true,  true,  true,  true,

// 0   1      2      3      4      5      6      7      8      9
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// :   ;      <      =      >      ?      @
true,  true,  false, true,  false, true,  true,

// A   B      C      D      E      F      G      H      I      J
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// K   L      M      N      O      P      Q      R      S      T
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// U   V      W      X      Y      Z
true,  true,  true,  true,  true,  true,

// [   \      ]      ^      _      `
false, false, false, true,  true,  true,

// a   b      c      d      e      f      g      h      i      j
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// k   l      m      n      o      p      q      r      s      t
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// u   v      w      x      y      z
true,  true,  true,  true,  true,  true,

// {   |      }      ~
false, true,  false, true,

// DEL
false,

// 128 - 255
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true

];

/// Bytes allowed in quoted header fields.
static QUOTED_HEADER_FIELDS: [bool; 255] = [

// NUL SOH    STX    ETX    EOT    ENQ    ACK    BEL    BS     TAB
false, false, false, false, false, false, false, false, false, true,

// LF  VT     FF     CR     SO     SI     DLE    DC1    DC2    DC3
false, false, false, false, false, false, false, false, false, false,

// DC4 NAK    SYN    ETB    CAN    EM     SUB    ESC    FS     GS
false, false, false, false, false, false, false, false, false, false,

// RS  US
false, false,

// space
true,

// !   "      #      $      %      &      '     (      )      *
true,  false, true,  true,  true,  true,  true,  true,  true,  true,

// +   ,      -      .      /
true,  true, true,  true,  true,

// 0   1      2      3      4      5      6      7      8      9
true,  true, true,  true,  true,  true,  true,  true,  true,  true,

// :   ;      <      =      >      ?      @
true,  true, true,  true,  true,  true,  true,

// A   B      C      D      E      F      G      H      I      J
true,  true, true,  true,  true,  true,  true,  true,  true,  true,

// K   L      M      N      O      P      Q      R      S      T
true,  true, true,  true,  true,  true,  true,  true,  true,  true,

// U   V      W      X      Y      Z
true,  true,  true,  true,  true,  true,

// [   \      ]      ^      _      `
true,  false, true,  true,  true,  true,

// a   b      c      d      e      f      g      h      i      j
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// k   l      m      n      o      p      q      r      s      t
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// u   v      w      x      y      z
true,  true,  true,  true,  true,  true,

// {   |      }      ~
true,  true, true,  true,

// DEL
false,

// 128 - 255
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true,  true,  true,  true,
true,  true, true,  true,  true,  true,  true

];

/// Bytes that are considered tokens.
static TOKENS: [bool; 255] = [

// NUL SOH    STX    ETX    EOT    ENQ    ACK    BEL    BS     TAB
false, false, false, false, false, false, false, false, false, false,

// LF  VT     FF     CR     SO     SI     DLE    DC1    DC2    DC3
false, false, false, false, false, false, false, false, false, false,

// DC4 NAK    SYN    ETB    CAN    EM     SUB    ESC    FS     GS
false, false, false, false, false, false, false, false, false, false,

// RS  US
false, false,

// space
false,

// !   "      #      $      %      &      '      (      )      *
true,  false, true,  true,  true,  true,  true,  false, false, true,

// +   ,      -      .      /
true,  false, true,  true,  false,

// 0   1      2      3      4      5      6      7      8      9
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// :   ;      <      =      >      ?      @
false, false, false, false, false, false, false,

// A   B      C      D      E      F      G      H      I      J
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// K   L      M      N      O      P      Q      R      S      T
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// U   V      W      X      Y      Z
true,  true,  true,  true,  true,  true,

// [   \      ]      ^      _      `
false, false, false, true,  true,  true,

// a   b      c      d      e      f      g      h      i      j
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// k   l      m      n      o      p      q      r      s      t
true,  true,  true,  true,  true,  true,  true,  true,  true,  true,

// u   v      w      x      y      z
true,  true,  true,  true,  true,  true,

// {   |      }      ~
false, true,  false, true,

// DEL
false,

// 128 - 255
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false, false, false, false,
false, false, false, false, false, false, false

];

/// Convert a 2-byte hex sequence into a single byte.
///
/// Returns `None` when either byte is not a hex digit.
#[inline]
pub fn hex_to_byte(bytes: &[u8]) -> Option<u8> {
    let mut byte: u8 = 0;

    for &b in &bytes[..2] {
        byte = (byte << 4) + if b > 0x2F && b < 0x3A {
            // digit
            b - b'0'
        } else if b > 0x40 && b < 0x47 {
            // upper-case
            b - 0x37
        } else if b > 0x60 && b < 0x67 {
            // lower-case
            b - 0x57
        } else {
            return None;
        };
    }

    Some(byte)
}

/// Indicates that a byte is allowed in a non-quoted header field.
#[inline]
pub fn is_header_field(byte: u8) -> bool {
    HEADER_FIELDS[byte as usize]
}

/// Indicates that a byte is a hex digit.
#[inline]
pub fn is_hex(byte: u8) -> bool {
    (byte > 0x2F && byte < 0x3A)
    || (byte > 0x40 && byte < 0x47)
    || (byte > 0x60 && byte < 0x67)
}

/// Indicates that a byte is allowed in a quoted header field.
///
/// This excludes `"` and `\`, so that a collection loop will break.
#[inline]
pub fn is_quoted_header_field(byte: u8) -> bool {
    QUOTED_HEADER_FIELDS[byte as usize]
}

/// Indicates that a byte is a HTTP token.
#[inline]
pub fn is_token(byte: u8) -> bool {
    TOKENS[byte as usize]
}
