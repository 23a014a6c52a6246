#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use saphyr_tree::Node;
use saphyr_tree::options::DuplicateKeyPolicy;

// Mappings with repeated keys under every duplicate-key policy.
fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    let s = String::from_utf8_lossy(data);

    let documents = [
        format!("a: 1\na: 2\nkey: {s}\nkey: {s}\n"),
        format!("outer:\n  inner: {{x: 1, x: 2}}\n  arr: [{{k: {s}}}, {{k: {s}}}]\n"),
        format!("{{'{s}': 1, '{s}': 2}}\n"),
    ];

    for policy in [
        DuplicateKeyPolicy::Error,
        DuplicateKeyPolicy::FirstWins,
        DuplicateKeyPolicy::LastWins,
    ] {
        let options = saphyr_tree::options! { duplicate_keys: policy };
        for yaml in &documents {
            if let Ok(doc) = saphyr_tree::from_str_with_options(yaml, options) {
                if let Some(map) = doc.as_mapping() {
                    let unique: HashSet<&Node> = map.keys().collect();
                    assert_eq!(unique.len(), map.len());
                }
            }
        }
    }
});
