#![no_main]

use libfuzzer_sys::fuzz_target;
use ngcheck_core::CheckConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = CheckConfig::from_json_str(text) {
        assert!((0.0..=1.0).contains(&config.flip_ratio_threshold));
        let _ = serde_json::to_string(&config);
    }
});
