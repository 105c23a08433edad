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

use brigade::Brigade;
use status::ParseStatus;
use table::Table;

mod brigade;
mod cookie;
mod multipart;

/// Build a closed brigade from `data` split into `step` sized chunks.
pub fn chunked_brigade(data: &[u8], step: usize) -> Brigade {
    let mut brigade = Brigade::new();

    for chunk in data.chunks(step) {
        brigade.append(chunk);
    }

    brigade.close();

    brigade
}

/// Feed `data` through a URL encoded parser in `step` sized chunks.
pub fn parse_urlencoded(data: &[u8], step: usize) -> (Table, ParseStatus) {
    let mut brigade = chunked_brigade(data, step);
    let mut parser  = ::urlencoded::Parser::new(::config::Config::new());
    let mut table   = Table::new();

    let status = parser.feed(&mut brigade, &mut table);

    (table, status)
}

/// Feed `data` through a multipart parser in `step` sized chunks.
pub fn parse_multipart(data: &[u8], boundary: &[u8], step: usize) -> (Table, ParseStatus) {
    let mut brigade = chunked_brigade(data, step);
    let mut parser  = ::multipart::Parser::new(boundary, ::config::Config::new());
    let mut table   = Table::new();

    let status = parser.feed(&mut brigade, &mut table);

    (table, status)
}
