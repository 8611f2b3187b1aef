//! URL encoding as done by JavaScript's `encodeURI`
//!
//! Reserved and unreserved URI characters stay as they are, so an already
//! complete URL keeps its structure. Everything else, including `%`, is
//! percent-encoded as UTF-8.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const URI_UNESCAPED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

pub fn encode_uri(url: &str) -> String {
    utf8_percent_encode(url, URI_UNESCAPED).to_string()
}
