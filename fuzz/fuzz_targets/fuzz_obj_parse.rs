#![no_main]

use libfuzzer_sys::fuzz_target;
use ngcheck_core::analyze_batch;
use ngcheck_core::io::obj::parse_obj;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(objects) = parse_obj(text, "fuzz") {
        // Anything the reader accepts must analyze without panicking.
        let _ = analyze_batch(&objects);
    }
});
