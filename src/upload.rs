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

//! Upload spooling support.
//!
//! An upload part's body accumulates in memory and is promoted to a temporary file once it
//! crosses the configured threshold. Temporary files are deleted when the upload is dropped,
//! unless the application persists them first.

use config::Config;
use status::{ ParseError, ParseStatus };

use tempfile::NamedTempFile;

use std::fmt;
use std::io::{ Read, Write };
use std::io;
use std::path::Path;

/// Backing store for an upload part's body.
pub enum Spool {
    /// Spooled to a temporary file.
    File(NamedTempFile),

    /// Held in memory.
    Memory(Vec<u8>)
}

impl Spool {
    /// Retrieve the in-memory bytes.
    ///
    /// Returns `None` once the spool has been promoted to a file.
    pub fn bytes(&self) -> Option<&[u8]> {
        match *self {
            Spool::Memory(ref bytes) => Some(bytes),
            Spool::File(_) => None
        }
    }

    /// Read the spool contents, wherever they live.
    pub fn contents(&self) -> io::Result<Vec<u8>> {
        match *self {
            Spool::Memory(ref bytes) => Ok(bytes.clone()),
            Spool::File(ref file) => {
                let mut contents = Vec::new();

                file.reopen()?.read_to_end(&mut contents)?;

                Ok(contents)
            }
        }
    }

    /// Indicates that the spool has been promoted to a file.
    pub fn is_file(&self) -> bool {
        match *self {
            Spool::File(_) => true,
            _ => false
        }
    }

    /// Retrieve the temporary file path.
    ///
    /// The file is deleted when the upload is dropped; rename or link it to keep it.
    pub fn path(&self) -> Option<&Path> {
        match *self {
            Spool::File(ref file) => Some(file.path()),
            _ => None
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// An uploaded file received within a multipart body.
pub struct Upload {
    /// Content type the part was submitted with.
    content_type: Vec<u8>,

    /// Filename the part was submitted with.
    filename: Vec<u8>,

    /// Body byte count.
    size: u64,

    /// Body backing store.
    spool: Spool,

    /// Parse status of this upload.
    status: ParseStatus
}

impl Upload {
    /// Create a new `Upload`.
    pub fn new(filename: &[u8], content_type: &[u8]) -> Upload {
        Upload{
            content_type: content_type.to_vec(),
            filename:     filename.to_vec(),
            size:         0,
            spool:        Spool::Memory(Vec::new()),
            status:       ParseStatus::Incomplete
        }
    }

    /// Append a chunk of body data, promoting the spool to a temporary file when it crosses the
    /// configured threshold.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Generic`](../status/enum.ParseError.html#variant.Generic) on I/O failure
    pub fn append(&mut self, data: &[u8], config: &Config) -> Result<(), ParseError> {
        let promote = match self.spool {
            Spool::Memory(ref bytes) => {
                (bytes.len() + data.len()) as u64 > config.max_brigade_bytes()
            },
            Spool::File(_) => false
        };

        if promote {
            self.promote(data, config)?;
        } else {
            match self.spool {
                Spool::Memory(ref mut bytes) => {
                    bytes.extend_from_slice(data);
                },
                Spool::File(ref mut file) => {
                    file.as_file_mut()
                        .write_all(data)
                        .map_err(|_| ParseError::Generic)?;
                }
            }
        }

        self.size += data.len() as u64;

        Ok(())
    }

    /// Retrieve the content type.
    pub fn content_type(&self) -> &[u8] {
        &self.content_type
    }

    /// Retrieve the filename.
    pub fn filename(&self) -> &[u8] {
        &self.filename
    }

    /// Flush the spool once the part's body is complete.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Generic`](../status/enum.ParseError.html#variant.Generic) on I/O failure
    pub fn finish(&mut self) -> Result<(), ParseError> {
        if let Spool::File(ref mut file) = self.spool {
            file.as_file_mut()
                .flush()
                .map_err(|_| ParseError::Generic)?;
        }

        self.status = ParseStatus::Ok;

        Ok(())
    }

    /// Set the parse status.
    pub fn set_status(&mut self, status: ParseStatus) -> &mut Self {
        self.status = status;
        self
    }

    /// Retrieve the body byte count.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Retrieve the backing store.
    pub fn spool(&self) -> &Spool {
        &self.spool
    }

    /// Retrieve the parse status.
    pub fn status(&self) -> ParseStatus {
        self.status
    }

    /// Promote the in-memory spool to a temporary file and write `data` after the existing
    /// bytes.
    fn promote(&mut self, data: &[u8], config: &Config) -> Result<(), ParseError> {
        let mut file = NamedTempFile::new_in(config.temp_dir())
            .map_err(|_| ParseError::Generic)?;

        debug!("upload {:?}: spooling to {:?}",
               String::from_utf8_lossy(&self.filename),
               file.path());

        if let Spool::Memory(ref bytes) = self.spool {
            file.as_file_mut()
                .write_all(bytes)
                .map_err(|_| ParseError::Generic)?;
        }

        file.as_file_mut()
            .write_all(data)
            .map_err(|_| ParseError::Generic)?;

        self.spool = Spool::File(file);

        Ok(())
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter,
               "Upload(filename={:?}, content_type={:?}, size={}, file={}, status={:?})",
               String::from_utf8_lossy(&self.filename),
               String::from_utf8_lossy(&self.content_type),
               self.size,
               self.spool.is_file(),
               self.status)
    }
}
