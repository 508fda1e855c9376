//! The fixed runtime text every generated module carries ahead of its own
//! declarations (§4.9): the mock registry, the `call`/`withMock` wrappers,
//! and the sequential async helpers backing `map`/`filter`/`fold`.
//!
//! This text is identical for every module by construction — no module
//! state leaks into it — which is what keeps two compilations of the same
//! module byte-identical (Testable Property 2).

pub(crate) const PREAMBLE: &str = r#"const __ideoMocks = new Map();

function __ideoCall(key, actual, args) {
    const replacement = __ideoMocks.get(key);
    return (replacement ?? actual)(...args);
}

async function __ideoWithMock(key, replacement, body) {
    const hadPrevious = __ideoMocks.has(key);
    const previous = __ideoMocks.get(key);
    if (key.startsWith("extern:")) {
        const actual = hadPrevious ? previous : undefined;
        if (actual !== undefined && actual.length !== replacement.length) {
            throw new Error(
                `extern mock arity mismatch for ${key}: expected ${actual.length}, got ${replacement.length}`,
            );
        }
    }
    __ideoMocks.set(key, replacement);
    try {
        return await body();
    } finally {
        if (hadPrevious) {
            __ideoMocks.set(key, previous);
        } else {
            __ideoMocks.delete(key);
        }
    }
}

async function __ideoMap(list, func) {
    const out = [];
    for (const item of list) {
        out.push(await func(item));
    }
    return out;
}

async function __ideoFilter(list, pred) {
    const out = [];
    for (const item of list) {
        if (await pred(item)) {
            out.push(item);
        }
    }
    return out;
}

async function __ideoFold(list, func, init) {
    let acc = init;
    for (const item of list) {
        acc = await func(acc, item);
    }
    return acc;
}
"#;
