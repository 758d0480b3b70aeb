#![no_main]

//! Fuzz target for function name classification.

use libfuzzer_sys::fuzz_target;

use protocol::{FunctionCategory, FunctionSpec};

fuzz_target!(|data: &[u8]| {
    let Ok(name) = std::str::from_utf8(data) else {
        return;
    };
    let spec = FunctionSpec::decode(name);
    if spec.category() != FunctionCategory::None {
        assert_eq!(spec.name(), name);
    }
});
