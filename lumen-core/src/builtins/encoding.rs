// lumen-core - Encoding built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! String encoding: decode-string, encode-string

use base64::prelude::*;

use lumen_value::{Error, Object, Result, check_arity, ensure_string};

/// (decode-string s) - decodes standard padded base64 into a UTF-8 string
pub(crate) fn builtin_decode_string(args: &[Object]) -> Result<Object> {
    check_arity(args, "decode-string", 1)?;
    let encoded = ensure_string(args, 0, "decode-string")?;
    let bytes = BASE64_STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| Error::MalformedInput(format!("Invalid base64 string: {}", e)))?;
    let decoded = String::from_utf8(bytes)
        .map_err(|e| Error::MalformedInput(format!("Invalid base64 string: {}", e)))?;
    Ok(Object::string(&decoded))
}

/// (encode-string s) - encodes the UTF-8 bytes of s as standard padded base64
pub(crate) fn builtin_encode_string(args: &[Object]) -> Result<Object> {
    check_arity(args, "encode-string", 1)?;
    let s = ensure_string(args, 0, "encode-string")?;
    Ok(Object::string(&BASE64_STANDARD.encode(s.as_bytes())))
}
