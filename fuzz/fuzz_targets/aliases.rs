#![no_main]

use libfuzzer_sys::fuzz_target;

// Bias inputs toward anchors and aliases, including self references and
// fan-out that would blow up without the alias limits.
fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    let s = String::from_utf8_lossy(data);

    let documents = [
        format!("a: &A {s}\nb: *A\nseq: &S [1, *A]\ncopy: *S\n"),
        format!("&R [{s}, *R]\n"),
        format!("x: &x [{s}, {s}]\ny: &y [*x, *x, *x]\nz: [*y, *y, *y, *y]\n"),
    ];

    let options = saphyr_tree::options! {
        max_nodes: 10_000,
    };
    for yaml in &documents {
        if let Ok(doc) = saphyr_tree::from_str_with_options(yaml, options) {
            assert!(doc.count() <= 10_000);
        }
    }
});
