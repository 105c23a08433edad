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

//! Parameter and table support.

use charset::Charset;
use header::HeaderBag;
use status::{ ParseError, ParseStatus };
use upload::Upload;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::slice;
use std::str;

/// A single parsed parameter.
///
/// Names and values are byte strings: nothing guarantees that client supplied data is valid
/// UTF-8. [`value_str()`](#method.value_str) converts on demand.
#[derive(Clone)]
pub struct Param {
    /// Divined character set of the value.
    charset: Charset,

    /// Attributes parsed out of the headers this parameter arrived with.
    info: Option<HeaderBag>,

    /// Name, original casing preserved.
    name: Vec<u8>,

    /// Parse status of this entry. Anything other than `ParseStatus::Ok` indicates a truncated
    /// or rejected entry that was kept for inspection.
    status: ParseStatus,

    /// Indicates that the value was not validated as the character set it claims.
    tainted: bool,

    /// Upload details, present when this parameter is a file upload.
    upload: Option<Rc<Upload>>,

    /// Value.
    value: Vec<u8>
}

impl Param {
    /// Create a new `Param`.
    pub fn new(name: &[u8], value: &[u8]) -> Param {
        Param{
            charset: Charset::Ascii,
            info:    None,
            name:    name.to_vec(),
            status:  ParseStatus::Ok,
            tainted: false,
            upload:  None,
            value:   value.to_vec()
        }
    }

    /// Retrieve the character set.
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Retrieve the header attributes.
    pub fn info(&self) -> Option<&HeaderBag> {
        self.info.as_ref()
    }

    /// Indicates that this parameter is a file upload.
    pub fn is_upload(&self) -> bool {
        self.upload.is_some()
    }

    /// Indicates that the value was not validated as the character set it claims.
    pub fn is_tainted(&self) -> bool {
        self.tainted
    }

    /// Retrieve the name.
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Set the character set.
    pub fn set_charset(&mut self, charset: Charset) -> &mut Self {
        self.charset = charset;
        self
    }

    /// Set the header attributes.
    pub fn set_info(&mut self, info: HeaderBag) -> &mut Self {
        self.info = Some(info);
        self
    }

    /// Set the parse status.
    pub fn set_status(&mut self, status: ParseStatus) -> &mut Self {
        self.status = status;
        self
    }

    /// Set the tainted indicator.
    pub fn set_tainted(&mut self, tainted: bool) -> &mut Self {
        self.tainted = tainted;
        self
    }

    /// Set the upload details.
    pub fn set_upload(&mut self, upload: Rc<Upload>) -> &mut Self {
        self.upload = Some(upload);
        self
    }

    /// Retrieve the parse status.
    pub fn status(&self) -> ParseStatus {
        self.status
    }

    /// Retrieve the upload details.
    pub fn upload(&self) -> Option<&Upload> {
        match self.upload {
            Some(ref upload) => Some(upload),
            None => None
        }
    }

    /// Retrieve the value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Retrieve the value as a string.
    ///
    /// # Errors
    ///
    /// - [`ParseError::BadUtf8`](../status/enum.ParseError.html#variant.BadUtf8)
    pub fn value_str(&self) -> Result<&str, ParseError> {
        str::from_utf8(&self.value).map_err(|_| ParseError::BadUtf8)
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter,
               "Param(name={:?}, value={:?}, charset={:?}, tainted={}, upload={}, status={:?})",
               String::from_utf8_lossy(&self.name),
               String::from_utf8_lossy(&self.value),
               self.charset,
               self.tainted,
               self.upload.is_some(),
               self.status)
    }
}

// -------------------------------------------------------------------------------------------------

/// Insertion ordered parameter table with case-insensitive name lookup.
///
/// Duplicate names are allowed and keep their order. Lookups always yield entries in insertion
/// order.
///
/// # Examples
///
/// ```
/// use request_box::table::Table;
///
/// let mut table = Table::new();
///
/// table.insert(b"Key", b"value1");
/// table.insert(b"key", b"value2");
///
/// assert_eq!(2, table.len());
/// assert_eq!(b"value1", table.first(b"KEY").unwrap().value());
///
/// let all: Vec<&[u8]> = table.all(b"key").map(|p| p.value()).collect();
///
/// assert_eq!(vec![&b"value1"[..], &b"value2"[..]], all);
/// ```
#[derive(Clone,Default)]
pub struct Table {
    /// Entries in insertion order.
    entries: Vec<Param>,

    /// Case-folded name to entry indices.
    index: HashMap<Vec<u8>, Vec<usize>>
}

impl Table {
    /// Create a new `Table`.
    pub fn new() -> Table {
        Table{
            entries: Vec::new(),
            index:   HashMap::new()
        }
    }

    /// Retrieve an iterator over every entry whose case-folded name matches `name`, in insertion
    /// order.
    pub fn all<T: AsRef<[u8]>>(&self, name: T) -> ParamIter {
        static EMPTY: [usize; 0] = [];

        let indices = match self.index.get(&fold(name.as_ref())) {
            Some(indices) => &indices[..],
            None => &EMPTY[..]
        };

        ParamIter{
            entries: &self.entries,
            indices: indices.iter()
        }
    }

    /// Retrieve the first entry whose case-folded name matches `name`.
    pub fn first<T: AsRef<[u8]>>(&self, name: T) -> Option<&Param> {
        self.index
            .get(&fold(name.as_ref()))
            .map(|indices| &self.entries[indices[0]])
    }

    /// Retrieve the entry at `index`, in insertion order.
    pub fn get(&self, index: usize) -> Option<&Param> {
        self.entries.get(index)
    }

    /// Indicates that at least one entry matches `name`.
    pub fn has<T: AsRef<[u8]>>(&self, name: T) -> bool {
        self.index.contains_key(&fold(name.as_ref()))
    }

    /// Append a new entry with `name` and `value`.
    pub fn insert(&mut self, name: &[u8], value: &[u8]) -> &mut Self {
        self.push(Param::new(name, value));
        self
    }

    /// Indicates that the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retrieve an iterator over all entries in insertion order.
    pub fn iter(&self) -> slice::Iter<Param> {
        self.entries.iter()
    }

    /// Retrieve the entry count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Produce a new table holding the entries of `self` followed by the entries of `other`.
    ///
    /// Nothing is deduplicated, and neither source table is affected by later changes to the
    /// overlay.
    pub fn merge_overlay(&self, other: &Table) -> Table {
        let mut table = Table::new();

        for param in self.iter().chain(other.iter()) {
            table.push(param.clone());
        }

        table
    }

    /// Append `param`.
    pub fn push(&mut self, param: Param) -> &mut Self {
        let position = self.entries.len();

        self.index
            .entry(fold(&param.name))
            .or_insert_with(Vec::new)
            .push(position);

        self.entries.push(param);
        self
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_list().entries(self.entries.iter()).finish()
    }
}

// -------------------------------------------------------------------------------------------------

/// Iterator over table entries that share a name.
pub struct ParamIter<'a> {
    entries: &'a [Param],
    indices: slice::Iter<'a, usize>
}

impl<'a> Iterator for ParamIter<'a> {
    type Item = &'a Param;

    fn next(&mut self) -> Option<&'a Param> {
        self.indices.next().map(|&index| &self.entries[index])
    }
}

// -------------------------------------------------------------------------------------------------

/// Case-fold `name` for index lookups.
fn fold(name: &[u8]) -> Vec<u8> {
    name.iter().map(|byte| byte.to_ascii_lowercase()).collect()
}
