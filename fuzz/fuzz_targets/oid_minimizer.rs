#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mibgen_config_generator::{is_dotted_prefix, minimize_oids};

#[derive(Debug, Arbitrary)]
struct Input {
    oids: Vec<Vec<u8>>,
}

fuzz_target!(|input: Input| {
    let oids: Vec<String> = input
        .oids
        .iter()
        .filter(|arcs| !arcs.is_empty())
        .map(|arcs| {
            arcs.iter()
                .map(|a| (a % 16).to_string())
                .collect::<Vec<_>>()
                .join(".")
        })
        .collect();

    let minimized = minimize_oids(oids.clone());

    // 모든 입력은 정확히 하나의 결과 OID에 덮여야 함
    for oid in &oids {
        let covering = minimized
            .iter()
            .filter(|kept| is_dotted_prefix(kept, oid))
            .count();
        assert_eq!(covering, 1, "{oid} covered {covering} times");
    }
});
