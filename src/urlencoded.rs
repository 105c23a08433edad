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

//! URL encoded stream parser.
//!
//! Parses `application/x-www-form-urlencoded` data arriving in arbitrary chunks. Both `&` and
//! `;` separate pairs, percent escapes are decoded in names and values, and `+` decodes to a
//! space in the value position only. A pair that is split across chunks is carried in the
//! parser and resumed on the next feed.

use brigade::Brigade;
use charset;
use config::Config;
use fsm::{ ParserValue, Success };
use status::{ ParseError, ParseStatus };
use table::{ Param, Table };

use byte_slice::ByteStream;

/// State function type.
type StateFunction = fn(&mut Parser, &mut Table, &mut ByteStream)
                        -> Result<ParserValue, ParseError>;

/// Parser states.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum ParserState {
    /// Parsing has failed.
    Dead,

    /// Parsing a name.
    Name,

    /// Parsing the first hex byte of a name escape.
    NameHex1,

    /// Parsing the second hex byte of a name escape.
    NameHex2,

    /// Parsing a value.
    Value,

    /// Parsing the first hex byte of a value escape.
    ValueHex1,

    /// Parsing the second hex byte of a value escape.
    ValueHex2
}

// -------------------------------------------------------------------------------------------------

/// URL encoded parser.
pub struct Parser {
    /// Total byte count processed.
    byte_count: usize,

    /// Configured limits.
    config: Config,

    /// High nibble of an escape that was split across chunks.
    hex: u8,

    /// Pending name.
    name: Vec<u8>,

    /// Current state.
    state: ParserState,

    /// Current state function.
    state_function: StateFunction,

    /// Sticky status.
    status: ParseStatus,

    /// Pending value.
    value: Vec<u8>
}

impl Parser {
    /// Create a new `Parser`.
    pub fn new(config: Config) -> Parser {
        Parser{
            byte_count:     0,
            config:         config,
            hex:            0,
            name:           Vec::new(),
            state:          ParserState::Name,
            state_function: Parser::name,
            status:         ParseStatus::Incomplete,
            value:          Vec::new()
        }
    }

    /// Retrieve the total byte count processed.
    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    /// Feed brigade data through the parser, appending finished pairs onto `table`.
    ///
    /// Returns `Incomplete` until the brigade is closed and drained. The terminal status is
    /// sticky: feeding a finished or failed parser is a no-op.
    pub fn feed(&mut self, brigade: &mut Brigade, table: &mut Table) -> ParseStatus {
        if self.status.is_terminal() {
            return self.status;
        }

        if brigade.is_empty() && !brigade.is_closed() {
            return ParseStatus::NoData;
        }

        while let Some(mut chunk) = brigade.pop_chunk() {
            let mut over_limit = false;

            if let Some(max) = self.config.max_body_bytes() {
                let allowed = max.saturating_sub(self.byte_count as u64);

                if chunk.len() as u64 > allowed {
                    chunk.truncate(allowed as usize);

                    over_limit = true;
                }
            }

            if !chunk.is_empty() {
                if let Err(error) = self.resume(table, &chunk) {
                    self.status = ParseStatus::Error(error);

                    return self.status;
                }
            }

            if over_limit {
                set_state!(self, Dead, dead);

                self.status = ParseStatus::Error(ParseError::OverLimit);

                return self.status;
            }
        }

        if brigade.is_closed() {
            self.finish(table)
        } else {
            self.status = ParseStatus::Incomplete;
            self.status
        }
    }

    /// Retrieve the current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Retrieve the sticky status.
    pub fn status(&self) -> ParseStatus {
        self.status
    }

    /// Main parser loop.
    fn parse(&mut self, table: &mut Table, context: &mut ByteStream)
    -> Result<Success, ParseError> {
        loop {
            let state_function = self.state_function;

            match state_function(self, table, context) {
                Ok(ParserValue::Continue) => {
                },
                Ok(ParserValue::Exit(success)) => {
                    self.byte_count += context.stream_index;

                    return Ok(success);
                },
                Err(error) => {
                    self.byte_count += context.stream_index;

                    set_state!(self, Dead, dead);

                    return Err(error);
                }
            }
        }
    }

    /// Resume parsing an additional slice of data.
    fn resume(&mut self, table: &mut Table, stream: &[u8]) -> Result<Success, ParseError> {
        self.parse(table, &mut ByteStream::new(stream))
    }

    /// Finalize parsing once the brigade has been closed and drained.
    fn finish(&mut self, table: &mut Table) -> ParseStatus {
        self.status = match self.state {
            ParserState::NameHex1
            | ParserState::NameHex2
            | ParserState::ValueHex1
            | ParserState::ValueHex2 => {
                // the escape can never complete
                ParseStatus::Error(ParseError::BadSeq(b'%'))
            },
            _ => {
                if self.byte_count > 0 {
                    match self.commit(table) {
                        Ok(()) => ParseStatus::Ok,
                        Err(error) => ParseStatus::Error(error)
                    }
                } else {
                    // nothing was ever fed
                    ParseStatus::Ok
                }
            }
        };

        set_state!(self, Dead, dead);

        self.status
    }

    /// Append the pending pair onto `table`.
    fn commit(&mut self, table: &mut Table) -> Result<(), ParseError> {
        if table.len() as u32 >= self.config.max_params() {
            return Err(ParseError::OverLimit);
        }

        let charset = charset::divine(&self.value);

        let mut param = Param::new(&self.name, &self.value);

        param.set_charset(charset)
             .set_tainted(!charset.is_validated());

        table.push(param);

        self.name.clear();
        self.value.clear();

        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn name(&mut self, table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        collect_visible_7bit!(context,
            // stop on these bytes
               context.byte == b'%'
            || context.byte == b'='
            || context.byte == b'&'
            || context.byte == b';',

            // on end-of-stream
            {
                self.name.extend_from_slice(bs_slice!(context));

                exit_eos!(self, context);
            }
        );

        match context.byte {
            b'%' => {
                self.name.extend_from_slice(bs_slice_ignore!(context));

                transition!(self, context, NameHex1, name_hex1);
            },
            b'=' => {
                self.name.extend_from_slice(bs_slice_ignore!(context));

                transition!(self, context, Value, value);
            },
            b'&' | b';' => {
                self.name.extend_from_slice(bs_slice_ignore!(context));

                self.commit(table)?;

                transition!(self, context, Name, name);
            },
            _ => {
                exit_error!(BadChar, context.byte);
            }
        }
    }

    #[inline]
    fn name_hex1(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        self.hex = if is_digit!(context.byte) {
            (context.byte - b'0') << 4
        } else if context.byte > 0x40 && context.byte < 0x47 {
            (context.byte - 0x37) << 4
        } else if context.byte > 0x60 && context.byte < 0x67 {
            (context.byte - 0x57) << 4
        } else {
            exit_error!(BadSeq, context.byte);
        };

        transition!(self, context, NameHex2, name_hex2);
    }

    #[inline]
    fn name_hex2(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        let byte = self.hex + if is_digit!(context.byte) {
            context.byte - b'0'
        } else if context.byte > 0x40 && context.byte < 0x47 {
            context.byte - 0x37
        } else if context.byte > 0x60 && context.byte < 0x67 {
            context.byte - 0x57
        } else {
            exit_error!(BadSeq, context.byte);
        };

        self.name.push(byte);

        transition!(self, context, Name, name);
    }

    #[inline]
    fn value(&mut self, table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        collect_visible_7bit!(context,
            // stop on these bytes
               context.byte == b'%'
            || context.byte == b'+'
            || context.byte == b'&'
            || context.byte == b';',

            // on end-of-stream
            {
                self.value.extend_from_slice(bs_slice!(context));

                exit_eos!(self, context);
            }
        );

        match context.byte {
            b'%' => {
                self.value.extend_from_slice(bs_slice_ignore!(context));

                transition!(self, context, ValueHex1, value_hex1);
            },
            b'+' => {
                self.value.extend_from_slice(bs_slice_ignore!(context));
                self.value.push(b' ');

                transition!(self, context, Value, value);
            },
            b'&' | b';' => {
                self.value.extend_from_slice(bs_slice_ignore!(context));

                self.commit(table)?;

                transition!(self, context, Name, name);
            },
            _ => {
                exit_error!(BadChar, context.byte);
            }
        }
    }

    #[inline]
    fn value_hex1(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        self.hex = if is_digit!(context.byte) {
            (context.byte - b'0') << 4
        } else if context.byte > 0x40 && context.byte < 0x47 {
            (context.byte - 0x37) << 4
        } else if context.byte > 0x60 && context.byte < 0x67 {
            (context.byte - 0x57) << 4
        } else {
            exit_error!(BadSeq, context.byte);
        };

        transition!(self, context, ValueHex2, value_hex2);
    }

    #[inline]
    fn value_hex2(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        let byte = self.hex + if is_digit!(context.byte) {
            context.byte - b'0'
        } else if context.byte > 0x40 && context.byte < 0x47 {
            context.byte - 0x37
        } else if context.byte > 0x60 && context.byte < 0x67 {
            context.byte - 0x57
        } else {
            exit_error!(BadSeq, context.byte);
        };

        self.value.push(byte);

        transition!(self, context, Value, value);
    }

    #[inline]
    fn dead(&mut self, _table: &mut Table, _context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_error!(Generic);
    }
}
