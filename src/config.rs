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

//! Per-request parser configuration.

use std::env;
use std::path::{ Path, PathBuf };

/// Parser limits and settings.
///
/// A `Config` is shared read-only between a request, its parsers, and any hooks. All limits are
/// enforced with the `OverLimit` error code.
#[derive(Clone,Debug)]
pub struct Config {
    /// Indicates that file uploads are rejected.
    disable_uploads: bool,

    /// Total bytes accepted by a body parser before `OverLimit`. `None` is unbounded.
    max_body_bytes: Option<u64>,

    /// In-memory spool threshold per upload part, before it is promoted to a temporary file.
    max_brigade_bytes: u64,

    /// Cap on headers per multipart part.
    max_headers: u32,

    /// Multipart nesting depth cap.
    max_nesting: u8,

    /// Cap on entries in a single parser's table.
    max_params: u32,

    /// Read size hint for whatever feeds the parser.
    read_block_size: u32,

    /// Directory upload spool files are created in.
    temp_dir: PathBuf
}

impl Config {
    /// Create a new `Config` with default settings.
    pub fn new() -> Config {
        Config{
            disable_uploads:   false,
            max_body_bytes:    None,
            max_brigade_bytes: 256 * 1024,
            max_headers:       64,
            max_nesting:       8,
            max_params:        4096,
            read_block_size:   64 * 1024,
            temp_dir:          env::temp_dir()
        }
    }

    /// Indicates that file uploads are rejected.
    pub fn disable_uploads(&self) -> bool {
        self.disable_uploads
    }

    /// Retrieve the total body byte limit.
    pub fn max_body_bytes(&self) -> Option<u64> {
        self.max_body_bytes
    }

    /// Retrieve the in-memory spool threshold.
    pub fn max_brigade_bytes(&self) -> u64 {
        self.max_brigade_bytes
    }

    /// Retrieve the per-part header cap.
    pub fn max_headers(&self) -> u32 {
        self.max_headers
    }

    /// Retrieve the multipart nesting cap.
    pub fn max_nesting(&self) -> u8 {
        self.max_nesting
    }

    /// Retrieve the table entry cap.
    pub fn max_params(&self) -> u32 {
        self.max_params
    }

    /// Retrieve the read size hint.
    pub fn read_block_size(&self) -> u32 {
        self.read_block_size
    }

    /// Set whether file uploads are rejected.
    pub fn set_disable_uploads(&mut self, disable_uploads: bool) -> &mut Self {
        self.disable_uploads = disable_uploads;
        self
    }

    /// Set the total body byte limit.
    pub fn set_max_body_bytes(&mut self, max_body_bytes: u64) -> &mut Self {
        self.max_body_bytes = Some(max_body_bytes);
        self
    }

    /// Set the in-memory spool threshold.
    pub fn set_max_brigade_bytes(&mut self, max_brigade_bytes: u64) -> &mut Self {
        self.max_brigade_bytes = max_brigade_bytes;
        self
    }

    /// Set the per-part header cap.
    pub fn set_max_headers(&mut self, max_headers: u32) -> &mut Self {
        self.max_headers = max_headers;
        self
    }

    /// Set the multipart nesting cap.
    pub fn set_max_nesting(&mut self, max_nesting: u8) -> &mut Self {
        self.max_nesting = max_nesting;
        self
    }

    /// Set the table entry cap.
    pub fn set_max_params(&mut self, max_params: u32) -> &mut Self {
        self.max_params = max_params;
        self
    }

    /// Set the read size hint.
    pub fn set_read_block_size(&mut self, read_block_size: u32) -> &mut Self {
        self.read_block_size = read_block_size;
        self
    }

    /// Set the upload spool directory.
    pub fn set_temp_dir<T: AsRef<Path>>(&mut self, temp_dir: T) -> &mut Self {
        self.temp_dir = temp_dir.as_ref().to_path_buf();
        self
    }

    /// Retrieve the upload spool directory.
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}
