#![no_main]

use bezier_path::parse_control_path_json;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_control_path_json(text);
    }
});
