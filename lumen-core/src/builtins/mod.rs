// lumen-core - Built-in function registration
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Native functions installed into an environment's namespace registry.

mod encoding;

use tracing::debug;

use crate::env::Env;

use encoding::{builtin_decode_string, builtin_encode_string};

pub const BASE64_NS: &str = "lumen.base64";

/// Register all built-in functions in the given environment.
///
/// Safe to call more than once; later calls rebind the same vars.
pub fn register_builtins(env: &Env) {
    let registry = env.registry();

    // Base64
    let ns = registry.ensure_namespace(BASE64_NS);
    ns.define_native("decode-string", builtin_decode_string);
    ns.define_native("encode-string", builtin_encode_string);

    debug!(namespace = BASE64_NS, count = ns.vars().len(), "registered builtins");
}
