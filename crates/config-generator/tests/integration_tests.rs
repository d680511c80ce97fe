//! 통합 테스트 -- 트리 로딩부터 모듈 생성까지의 전체 흐름 검증

use std::path::PathBuf;

use mibgen_config_generator::{
    Diagnostic, GeneratorError, JsonTreeFile, ModuleGenerator, TreeSource, generate_config,
    prepare_tree,
};
use mibgen_core::directives::{Directives, LookupRule, ModuleConfig};
use mibgen_core::types::{Access, Lookup, MetricType, Node, OutputConfig};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn if_mib() -> (Node, Directives) {
    let tree = JsonTreeFile::new(fixture("if_mib_tree.json"))
        .load()
        .expect("fixture tree should load");
    let directives =
        Directives::load(fixture("generator.yml")).expect("fixture directives should load");
    (tree, directives)
}

fn leaf(oid: &str, label: &str, node_type: &str, access: Access) -> Node {
    let mut n = Node::new(oid, label);
    n.node_type = node_type.to_owned();
    n.access = access;
    n
}

/// ifInOctets(ifIndex 인덱스), ifIndex, ifDescr만 가진 최소 트리
fn minimal_if_tree() -> Node {
    let mut octets = leaf(
        "1.3.6.1.2.1.2.2.1.10",
        "ifInOctets",
        "COUNTER",
        Access::ReadWrite,
    );
    octets.indexes = vec!["ifIndex".to_owned()];

    let mut root = Node::new("1.3.6.1.2.1.2.2.1", "ifEntry");
    root.children = vec![
        leaf("1.3.6.1.2.1.2.2.1.1", "ifIndex", "INTEGER", Access::ReadOnly),
        leaf(
            "1.3.6.1.2.1.2.2.1.2",
            "ifDescr",
            "DisplayString",
            Access::ReadOnly,
        ),
        octets,
    ];
    root
}

fn walk_only(walk: &[&str]) -> ModuleConfig {
    ModuleConfig {
        walk: walk.iter().map(|s| (*s).to_owned()).collect(),
        ..ModuleConfig::default()
    }
}

// =============================================================================
// 최소 시나리오
// =============================================================================

#[test]
fn end_to_end_single_counter() {
    let prepared = prepare_tree(minimal_if_tree());
    let generated = ModuleGenerator::new(&prepared)
        .generate("if", &walk_only(&["ifInOctets"]))
        .unwrap();

    let module = generated.module;
    assert_eq!(module.metrics.len(), 1);
    let metric = &module.metrics[0];
    assert_eq!(metric.name, "ifInOctets");
    assert_eq!(metric.metric_type, MetricType::Counter);
    assert_eq!(metric.indexes.len(), 1);
    assert_eq!(metric.indexes[0].labelname, "ifIndex");
    assert_eq!(metric.indexes[0].index_type, MetricType::Gauge);
    assert_eq!(module.walk, vec!["1.3.6.1.2.1.2.2.1.10"]);
}

#[test]
fn lookup_replaces_index_with_descr() {
    let prepared = prepare_tree(minimal_if_tree());
    let mut config = walk_only(&["ifInOctets"]);
    config.lookups.push(LookupRule {
        old_index: "ifIndex".to_owned(),
        new_index: "ifDescr".to_owned(),
    });

    let module = ModuleGenerator::new(&prepared)
        .generate("if", &config)
        .unwrap()
        .module;
    let metric = &module.metrics[0];
    assert_eq!(metric.indexes[0].labelname, "ifDescr");
    assert_eq!(metric.lookups.len(), 1);
    assert_eq!(metric.lookups[0].oid, "1.3.6.1.2.1.2.2.1.2");
    assert_eq!(metric.lookups[0].lookup_type, MetricType::DisplayString);
    assert!(module.walk.contains(&"1.3.6.1.2.1.2.2.1.2".to_owned()));
    assert!(module.walk.contains(&"1.3.6.1.2.1.2.2.1.10".to_owned()));
    assert_eq!(module.walk.len(), 2);
}

#[test]
fn unknown_walk_target_aborts_whole_run() {
    let prepared = prepare_tree(minimal_if_tree());
    let mut directives = Directives::default();
    directives
        .modules
        .insert("broken".to_owned(), walk_only(&["doesNotExist"]));

    let err = generate_config(&prepared, &directives).unwrap_err();
    assert!(matches!(err, GeneratorError::UnknownWalkTarget { .. }));
    assert!(err.to_string().contains("doesNotExist"));
}

// =============================================================================
// IF-MIB 픽스처
// =============================================================================

#[test]
fn if_mib_fixture_generates_both_modules() {
    let (tree, directives) = if_mib();
    let prepared = prepare_tree(tree);
    let generation = generate_config(&prepared, &directives).unwrap();

    let names: Vec<_> = generation.config.keys().cloned().collect();
    assert_eq!(names, vec!["if_mib", "system"]);
    assert_eq!(generation.report.modules.len(), 2);
    assert_eq!(generation.report.diagnostic_count(), 0);
}

#[test]
fn if_mib_walk_is_minimized() {
    let (tree, directives) = if_mib();
    let prepared = prepare_tree(tree);
    let generation = generate_config(&prepared, &directives).unwrap();

    // 룩업 OID(ifDescr)는 interfaces 서브트리에 포함됨
    assert_eq!(
        generation.config["if_mib"].walk,
        vec!["1.3.6.1.2.1.1.3", "1.3.6.1.2.1.2", "1.3.6.1.2.1.31.1.1"]
    );
    assert_eq!(generation.config["system"].walk, vec!["1.3.6.1.2.1.1"]);
}

#[test]
fn if_mib_metrics_in_discovery_order() {
    let (tree, directives) = if_mib();
    let prepared = prepare_tree(tree);
    let generation = generate_config(&prepared, &directives).unwrap();

    let names: Vec<_> = generation.config["if_mib"]
        .metrics
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "sysUpTime",
            "ifNumber",
            "ifIndex",
            "ifDescr",
            "ifType",
            "ifPhysAddress",
            "ifInOctets",
            "ifOutOctets",
            "ifName",
            "ifHCInOctets",
            "ifHighSpeed",
        ]
    );
}

#[test]
fn if_mib_types_follow_hints() {
    let (tree, directives) = if_mib();
    let prepared = prepare_tree(tree);
    let generation = generate_config(&prepared, &directives).unwrap();
    let module = &generation.config["if_mib"];

    let type_of = |name: &str| module.find_metric(name).unwrap().metric_type;
    assert_eq!(type_of("ifDescr"), MetricType::DisplayString);
    assert_eq!(type_of("ifPhysAddress"), MetricType::PhysAddress48);
    assert_eq!(type_of("ifName"), MetricType::DisplayString);
    assert_eq!(type_of("ifHCInOctets"), MetricType::Counter);
    assert_eq!(type_of("sysUpTime"), MetricType::Gauge);
    assert!(module.find_metric("ifSpecific").is_none());
}

#[test]
fn if_mib_augmented_table_gets_lookup() {
    let (tree, directives) = if_mib();
    let prepared = prepare_tree(tree);
    let generation = generate_config(&prepared, &directives).unwrap();

    let metric = generation.config["if_mib"].find_metric("ifHCInOctets").unwrap();
    assert_eq!(metric.indexes.len(), 1);
    assert_eq!(metric.indexes[0].labelname, "ifDescr");
    assert_eq!(
        metric.lookups,
        vec![Lookup {
            labels: vec!["ifDescr".to_owned()],
            labelname: "ifDescr".to_owned(),
            oid: "1.3.6.1.2.1.2.2.1.2".to_owned(),
            lookup_type: MetricType::DisplayString,
        }]
    );
}

#[test]
fn if_mib_help_uses_first_sentence() {
    let (tree, directives) = if_mib();
    let prepared = prepare_tree(tree);
    let generation = generate_config(&prepared, &directives).unwrap();

    let metric = generation.config["if_mib"].find_metric("ifInOctets").unwrap();
    assert_eq!(
        metric.help,
        "The total number of octets received on the interface, including framing characters - 1.3.6.1.2.1.2.2.1.10"
    );
}

#[test]
fn if_mib_override_and_walk_params() {
    let (tree, directives) = if_mib();
    let prepared = prepare_tree(tree);
    let generation = generate_config(&prepared, &directives).unwrap();
    let module = &generation.config["if_mib"];

    let if_type = module.find_metric("ifType").unwrap();
    assert_eq!(if_type.regex_extracts[""][0].regex, "^(.*)$");
    assert_eq!(if_type.regex_extracts[""][0].value, "$1");
    assert_eq!(module.walk_params["version"], serde_yaml::Value::from(2));
    assert!(generation.config["system"].walk_params.is_empty());
}

#[test]
fn output_yaml_reparses_identically() {
    let (tree, directives) = if_mib();
    let prepared = prepare_tree(tree);
    let generation = generate_config(&prepared, &directives).unwrap();

    let yaml = serde_yaml::to_string(&generation.config).unwrap();
    assert!(yaml.contains("max_repetitions: 25"));
    assert!(yaml.contains("type: counter"));

    let back: OutputConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, generation.config);
}

// =============================================================================
// 권고성 진단
// =============================================================================

#[test]
fn unresolved_augments_is_reported_in_generation() {
    let mut tree = minimal_if_tree();
    let mut entry = Node::new("1.3.6.1.2.1.2.2.1.99", "orphanEntry");
    entry.augments = Some("missingEntry".to_owned());
    tree.children.push(entry);

    let prepared = prepare_tree(tree);
    let mut directives = Directives::default();
    directives
        .modules
        .insert("if".to_owned(), walk_only(&["ifEntry"]));
    let generation = generate_config(&prepared, &directives).unwrap();

    assert_eq!(generation.report.tree_diagnostics.len(), 1);
    assert!(matches!(
        generation.report.tree_diagnostics.iter().next(),
        Some(Diagnostic::UnresolvedAugments { .. })
    ));
    // 진단은 다른 메트릭 생성에 영향 없음
    assert_eq!(generation.report.modules[0].metric_count, 3);
}
