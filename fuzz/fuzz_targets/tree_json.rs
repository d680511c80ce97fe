#![no_main]

use libfuzzer_sys::fuzz_target;
use mibgen_config_generator::{ModuleGenerator, parse_tree_json, prepare_tree};
use mibgen_core::directives::ModuleConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(root) = parse_tree_json(content, "fuzz/mibs.json") else {
        return;
    };

    // 파싱된 트리는 정규화와 루트 전체 walk에서 패닉이 없어야 함
    let walk = vec![root.oid.clone()];
    let prepared = prepare_tree(root);
    let config = ModuleConfig {
        walk,
        ..ModuleConfig::default()
    };
    let _ = ModuleGenerator::new(&prepared).generate("fuzz", &config);
});
