#![no_main]
use jsonstream::{Value, encode_to_string};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(s) {
            // Integers beyond i64 have no place in the value model.
            let Ok(value) = Value::try_from(json_value) else {
                return;
            };
            let out = encode_to_string(&value).expect("JSON input always has a textual form");
            // Raw control characters other than the escaped ones are copied
            // through, which strict JSON parsers reject.
            if !out.bytes().any(|b| b < 0x20) {
                if let Err(e) = serde_json::from_str::<serde_json::Value>(&out) {
                    panic!("encoder produced invalid JSON: {}\nInput: {}\nOutput: {}", e, s, out);
                }
            }
        }
    }
});
