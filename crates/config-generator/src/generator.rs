//! 모듈 생성기 -- 지시문 하나를 출력 [`Module`] 하나로 변환
//!
//! 처리 순서:
//! 1. walk 대상 해석 → OID 최소화
//! 2. 각 walk 루트 서브트리를 전위 순회하며 메트릭 수집
//! 3. 룩업 규칙을 순서대로 적용
//! 4. override 복사
//! 5. 필요한 OID 집합을 최소화하여 출력 walk 목록 생성
//!
//! 사용자가 명시한 지시문(walk 대상, 룩업 대상)을 만족할 수 없으면
//! [`GeneratorError`]로 전체 실행을 중단합니다. 개별 노드 결함은
//! [`Diagnostics`]에 기록하고 해당 메트릭만 건너뜁니다.

use std::collections::BTreeSet;

use mibgen_core::directives::{Directives, LookupRule, ModuleConfig};
use mibgen_core::types::{Index, Lookup, Metric, Module, OutputConfig};
use serde::Serialize;

use crate::classify::{metric_access, metric_type};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::GeneratorError;
use crate::normalize::PreparedTree;
use crate::oid::minimize_oids;
use crate::sanitize::sanitize_label_name;
use crate::tree::{NodeId, TreeNode};

/// 모듈 하나의 생성 결과
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    /// 생성된 모듈
    pub module: Module,
    /// 생성 중 기록된 권고성 진단
    pub diagnostics: Diagnostics,
}

/// 정규화된 트리를 공유하며 모듈을 생성하는 생성기
pub struct ModuleGenerator<'a> {
    prepared: &'a PreparedTree,
}

impl<'a> ModuleGenerator<'a> {
    pub fn new(prepared: &'a PreparedTree) -> Self {
        Self { prepared }
    }

    /// 지시문 하나로부터 모듈을 생성합니다.
    ///
    /// # Errors
    /// - walk 대상을 찾을 수 없으면 [`GeneratorError::UnknownWalkTarget`]
    /// - 룩업 대상을 찾을 수 없으면 [`GeneratorError::UnknownLookupIndex`]
    /// - 룩업 대상 타입을 분류할 수 없으면 [`GeneratorError::UnsupportedLookupType`]
    pub fn generate(
        &self,
        name: &str,
        config: &ModuleConfig,
    ) -> Result<GeneratedModule, GeneratorError> {
        let mut diagnostics = Diagnostics::new();
        let mut needed: BTreeSet<String> = BTreeSet::new();

        let roots = self.resolve_walk(name, &config.walk)?;

        let mut metrics = Vec::new();
        for root_oid in &roots {
            let Some(root) = self.prepared.resolve_id(root_oid) else {
                continue;
            };
            needed.insert(self.prepared.tree().get(root).oid.clone());
            self.collect_metrics(root, &mut metrics, &mut diagnostics);
        }

        for rule in &config.lookups {
            self.apply_lookup(name, rule, &mut metrics, &mut needed)?;
        }

        for (key, overrides) in &config.overrides {
            let mut matched = false;
            for metric in metrics.iter_mut().filter(|m| &m.name == key || &m.oid == key) {
                metric.regex_extracts = overrides.regex_extracts.clone();
                matched = true;
            }
            if !matched {
                tracing::debug!(module = name, metric = %key, "override matches no metric");
            }
        }

        let module = Module {
            walk: minimize_oids(needed),
            metrics,
            walk_params: config.walk_params.clone(),
        };

        Ok(GeneratedModule {
            module,
            diagnostics,
        })
    }

    fn resolve_walk(&self, module: &str, walk: &[String]) -> Result<Vec<String>, GeneratorError> {
        let mut oids = Vec::with_capacity(walk.len());
        for target in walk {
            let node = self
                .prepared
                .resolve(target)
                .ok_or_else(|| GeneratorError::UnknownWalkTarget {
                    module: module.to_owned(),
                    target: target.clone(),
                })?;
            oids.push(node.oid.clone());
        }
        Ok(minimize_oids(oids))
    }

    fn collect_metrics(
        &self,
        root: NodeId,
        metrics: &mut Vec<Metric>,
        diagnostics: &mut Diagnostics,
    ) {
        for (_, node) in self.prepared.tree().walk(root) {
            let Some(kind) = metric_type(&node.node_type) else {
                continue;
            };
            if !metric_access(node.access) {
                continue;
            }

            let Some(indexes) = self.build_indexes(node, diagnostics) else {
                continue;
            };

            metrics.push(Metric {
                name: sanitize_label_name(&node.label),
                oid: node.oid.clone(),
                metric_type: kind,
                help: format!("{} - {}", node.description, node.oid),
                indexes,
                lookups: Vec::new(),
                regex_extracts: Default::default(),
            });
        }
    }

    /// 노드의 인덱스 라벨을 출력 인덱스로 변환합니다.
    ///
    /// 하나라도 해석/분류에 실패하면 진단을 남기고 `None`을 반환합니다.
    fn build_indexes(&self, node: &TreeNode, diagnostics: &mut Diagnostics) -> Option<Vec<Index>> {
        let mut indexes = Vec::with_capacity(node.indexes.len());
        for label in &node.indexes {
            let Some(index_node) = self.prepared.resolve(label) else {
                diagnostics.push(Diagnostic::UnresolvedIndex {
                    node: node.label.clone(),
                    index: label.clone(),
                });
                return None;
            };
            let Some(index_type) = metric_type(&index_node.node_type) else {
                diagnostics.push(Diagnostic::UnsupportedIndexType {
                    node: node.label.clone(),
                    index: label.clone(),
                    index_type: index_node.node_type.clone(),
                });
                return None;
            };
            indexes.push(Index {
                labelname: sanitize_label_name(label),
                index_type,
                // 0은 가변 길이
                fixed_size: index_node.fixed_size.filter(|&size| size != 0),
            });
        }
        Some(indexes)
    }

    fn apply_lookup(
        &self,
        module: &str,
        rule: &LookupRule,
        metrics: &mut [Metric],
        needed: &mut BTreeSet<String>,
    ) -> Result<(), GeneratorError> {
        let old_label = sanitize_label_name(&rule.old_index);

        for metric in metrics.iter_mut() {
            for index in metric.indexes.iter_mut() {
                if index.labelname != old_label {
                    continue;
                }

                let target = self.prepared.resolve(&rule.new_index).ok_or_else(|| {
                    GeneratorError::UnknownLookupIndex {
                        module: module.to_owned(),
                        index: rule.new_index.clone(),
                    }
                })?;
                let lookup_type = metric_type(&target.node_type).ok_or_else(|| {
                    GeneratorError::UnsupportedLookupType {
                        module: module.to_owned(),
                        index: rule.new_index.clone(),
                        node_type: target.node_type.clone(),
                    }
                })?;

                let labelname = sanitize_label_name(&target.label);
                index.labelname.clone_from(&labelname);
                metric.lookups.push(Lookup {
                    labels: vec![labelname.clone()],
                    labelname,
                    oid: target.oid.clone(),
                    lookup_type,
                });
                needed.insert(target.oid.clone());
            }
        }
        Ok(())
    }
}

/// 모듈별 생성 요약
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    /// 모듈 이름
    pub name: String,
    /// 생성된 메트릭 수
    pub metric_count: usize,
    /// 최소화된 walk OID 수
    pub walk_count: usize,
    /// 모듈 생성 중 기록된 진단
    pub diagnostics: Diagnostics,
}

/// 전체 실행 요약
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    /// 트리 정규화 중 기록된 진단
    pub tree_diagnostics: Diagnostics,
    /// 모듈별 요약 (이름순)
    pub modules: Vec<ModuleReport>,
}

impl GenerationReport {
    /// 전체 메트릭 수
    pub fn total_metrics(&self) -> usize {
        self.modules.iter().map(|m| m.metric_count).sum()
    }

    /// 전체 진단 수 (트리 + 모듈)
    pub fn diagnostic_count(&self) -> usize {
        self.tree_diagnostics.len()
            + self
                .modules
                .iter()
                .map(|m| m.diagnostics.len())
                .sum::<usize>()
    }
}

/// 전체 생성 결과
#[derive(Debug, Clone)]
pub struct Generation {
    /// 모듈 이름 → 생성된 모듈
    pub config: OutputConfig,
    /// 실행 요약
    pub report: GenerationReport,
}

/// 지시문의 모든 모듈을 이름순으로 생성합니다.
///
/// 한 모듈이라도 치명적 에러가 나면 부분 결과 없이 에러를 반환합니다.
pub fn generate_config(
    prepared: &PreparedTree,
    directives: &Directives,
) -> Result<Generation, GeneratorError> {
    let generator = ModuleGenerator::new(prepared);
    let mut config = OutputConfig::new();
    let mut report = GenerationReport {
        tree_diagnostics: prepared.diagnostics().clone(),
        modules: Vec::with_capacity(directives.module_count()),
    };

    for (name, module_config) in &directives.modules {
        tracing::info!(module = %name, "generating config for module");
        let generated = generator.generate(name, module_config)?;
        tracing::info!(
            module = %name,
            metrics = generated.module.metrics.len(),
            walk = generated.module.walk.len(),
            "generated metrics for module"
        );

        report.modules.push(ModuleReport {
            name: name.clone(),
            metric_count: generated.module.metrics.len(),
            walk_count: generated.module.walk.len(),
            diagnostics: generated.diagnostics,
        });
        config.insert(name.clone(), generated.module);
    }

    Ok(Generation { config, report })
}

/// 생성된 설정을 YAML로 직렬화하고 다시 파싱해 검증합니다.
///
/// 재파싱은 exporter가 거부할 출력(예: walk 파라미터가 `walk`/`metrics` 키와
/// 충돌하는 경우)을 파일로 쓰기 전에 걸러냅니다.
pub fn render_yaml(config: &OutputConfig) -> Result<String, GeneratorError> {
    let yaml = serde_yaml::to_string(config)
        .map_err(|e| GeneratorError::Serialize(format!("failed to marshal config: {e}")))?;

    serde_yaml::from_str::<OutputConfig>(&yaml).map_err(|e| {
        GeneratorError::Serialize(format!("generated config does not parse: {e}"))
    })?;

    Ok(yaml)
}
