#![no_main]

use libfuzzer_sys::fuzz_target;
use ngcheck_core::analyze_batch;
use ngcheck_core::io::gltf::load_gltf_slice;
use ngcheck_core::io::GltfOptions;

fuzz_target!(|data: &[u8]| {
    if let Ok(objects) = load_gltf_slice(data, "fuzz", &GltfOptions::default()) {
        let _ = analyze_batch(&objects);
    }
});
