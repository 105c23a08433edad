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

//! Stream collection macros.

/// Collect an unquoted header field value.
///
/// Exit the collection loop upon finding an invalid byte, or when `$stop` is `true`.
macro_rules! collect_field {
    ($context:expr, $stop:expr, $on_eos:expr) => ({
        bs_collect!($context,
            if !is_header_field($context.byte) || $stop {
                break;
            },
            $on_eos
        );
    });

    ($context:expr, $on_eos:expr) => ({
        bs_collect!($context,
            if !is_header_field($context.byte) {
                break;
            },
            $on_eos
        );
    });
}

/// Collect a quoted header field value.
///
/// Exit the collection loop upon finding an invalid byte.
macro_rules! collect_quoted_field {
    ($context:expr, $on_eos:expr) => ({
        bs_collect!($context,
            if !is_quoted_header_field($context.byte) {
                break;
            },
            $on_eos
        );
    });
}

/// Collect all token bytes.
///
/// Exit the collection loop when `$stop` yields `true`.
macro_rules! collect_tokens {
    ($context:expr, $stop:expr, $on_eos:expr) => ({
        bs_collect!($context,
            if !is_token($context.byte) || $stop {
                break;
            },
            $on_eos
        );
    });

    ($context:expr, $on_eos:expr) => ({
        bs_collect!($context,
            if !is_token($context.byte) {
                break;
            },
            $on_eos
        );
    });
}

/// Collect all visible 7-bit bytes. Visible bytes are 0x21 thru 0x7E.
///
/// Exit the collection loop when `$stop` yields `true`.
macro_rules! collect_visible_7bit {
    ($context:expr, $stop:expr, $on_eos:expr) => ({
        bs_collect!($context,
            if is_not_visible_7bit!($context.byte) || $stop {
                break;
            },
            $on_eos
        );
    });

    ($context:expr, $on_eos:expr) => ({
        bs_collect!($context,
            if is_not_visible_7bit!($context.byte) {
                break;
            },
            $on_eos
        );
    });
}

/// Consume all space and tab bytes.
///
/// Exit the loop when a non-space byte is found. The non-space byte is replayed so that the next
/// collection starts on it.
macro_rules! consume_spaces {
    ($context:expr, $on_eos:expr) => ({
        loop {
            if bs_is_eos!($context) {
                $on_eos
            }

            bs_next!($context);

            if $context.byte != b' ' && $context.byte != b'\t' {
                bs_replay!($context);

                break;
            }
        }
    });
}
