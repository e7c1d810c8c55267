/// Integration tests for the application layer
mod test_utilities;

use bom_engine::prelude::*;
use std::path::PathBuf;
use test_utilities::mocks::*;

fn line(id: &str, component: &str, component_type: ComponentType, quantity: f64, seq: u32) -> BomItem {
    BomItem::new(
        id,
        ComponentId::new(component).unwrap(),
        component_type,
        quantity,
        "kg",
        seq,
    )
}

fn bread() -> BomSnapshot {
    BomSnapshot::new(
        BomId::new("bread-v1").unwrap(),
        ComponentId::new("bread").unwrap(),
        "1",
        100.0,
        "kg",
        vec![
            line("b1", "flour", ComponentType::Raw, 55.0, 10),
            line("b2", "water", ComponentType::Raw, 35.0, 20),
            line("b3", "salt", ComponentType::Raw, 1.0, 30),
            line("b4", "starter", ComponentType::Wip, 10.0, 40),
            line("b5", "bread", ComponentType::Finished, 100.0, 50).as_output(),
        ],
    )
}

fn starter() -> BomSnapshot {
    BomSnapshot::new(
        BomId::new("starter-v1").unwrap(),
        ComponentId::new("starter").unwrap(),
        "1",
        10.0,
        "kg",
        vec![
            line("s1", "flour", ComponentType::Raw, 5.0, 10),
            line("s2", "water", ComponentType::Raw, 5.0, 20),
            line("s3", "starter", ComponentType::Wip, 10.0, 30).as_output(),
        ],
    )
}

fn error_kind(err: &anyhow::Error) -> Option<ErrorKind> {
    err.downcast_ref::<BomError>().map(BomError::kind)
}

fn fixture_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bakery.yml")
}

#[test]
fn test_explode_happy_path() {
    let reader = MockSnapshotReader::new().with_snapshot(bread());
    let resolver = MockComponentResolver::new().with_sub_bom(starter());
    let progress_reporter = MockProgressReporter::new();

    let use_case = AnalyzeBomUseCase::new(
        reader,
        resolver,
        None::<MockBomWriter>,
        progress_reporter.clone(),
    );

    let response = use_case
        .execute(AnalysisRequest::Explode {
            bom_id: BomId::new("bread-v1").unwrap(),
            max_depth: DEFAULT_MAX_DEPTH,
        })
        .unwrap();

    let AnalysisReport::Explosion(result) = &response.report else {
        panic!("expected an explosion report");
    };
    assert_eq!(result.total_levels, 2);
    assert_eq!(result.total_items, 6);
    assert!(!result.truncated);
    assert_eq!(result.raw_material("flour").unwrap().total_quantity, 60.0);
    assert_eq!(result.raw_material("water").unwrap().total_quantity, 40.0);
    assert_eq!(result.raw_material("salt").unwrap().total_quantity, 1.0);
    assert!(result.raw_material("starter").is_none());

    assert!(!response.is_flagged());
    assert!(progress_reporter.warnings().is_empty());
    assert!(progress_reporter
        .get_messages()
        .iter()
        .any(|m| m.starts_with("Completed: ✅ Exploded bread-v1")));
}

#[test]
fn test_explode_truncation_is_reported_as_warning() {
    let reader = MockSnapshotReader::new().with_snapshot(bread());
    let resolver = MockComponentResolver::new().with_sub_bom(starter());
    let progress_reporter = MockProgressReporter::new();

    let use_case = AnalyzeBomUseCase::new(
        reader,
        resolver,
        None::<MockBomWriter>,
        progress_reporter.clone(),
    );

    let response = use_case
        .execute(AnalysisRequest::Explode {
            bom_id: BomId::new("bread-v1").unwrap(),
            max_depth: 1,
        })
        .unwrap();

    assert!(response.is_flagged());
    assert_eq!(response.warnings.len(), 1);
    assert_eq!(progress_reporter.warnings().len(), 1);
    assert!(progress_reporter.warnings()[0].contains("depth limit"));
}

#[test]
fn test_explode_resolver_failure() {
    let reader = MockSnapshotReader::new().with_snapshot(bread());
    let use_case = AnalyzeBomUseCase::new(
        reader,
        MockComponentResolver::with_failure(),
        None::<MockBomWriter>,
        MockProgressReporter::new(),
    );

    let err = use_case
        .execute(AnalysisRequest::Explode {
            bom_id: BomId::new("bread-v1").unwrap(),
            max_depth: DEFAULT_MAX_DEPTH,
        })
        .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::ResolutionFailed));
}

#[test]
fn test_caching_resolver_shares_lookups_across_requests() {
    let reader = MockSnapshotReader::new().with_snapshot(bread());
    let inner = MockComponentResolver::new().with_sub_bom(starter());
    let use_case = AnalyzeBomUseCase::new(
        reader,
        CachingComponentResolver::new(&inner),
        None::<MockBomWriter>,
        MockProgressReporter::new(),
    );

    for _ in 0..3 {
        use_case
            .execute(AnalysisRequest::Explode {
                bom_id: BomId::new("bread-v1").unwrap(),
                max_depth: DEFAULT_MAX_DEPTH,
            })
            .unwrap();
    }

    assert_eq!(inner.call_count(), 1);
}

#[test]
fn test_compare_versions() {
    let mut v2 = bread();
    v2.bom_id = BomId::new("bread-v2").unwrap();
    v2.items[0].quantity = 60.0;
    v2.items.remove(2);

    let reader = MockSnapshotReader::new()
        .with_snapshot(bread())
        .with_snapshot(v2);
    let use_case = AnalyzeBomUseCase::new(
        reader,
        MockComponentResolver::new(),
        None::<MockBomWriter>,
        MockProgressReporter::new(),
    );

    let response = use_case
        .execute(AnalysisRequest::Compare {
            bom_1: BomId::new("bread-v1").unwrap(),
            bom_2: BomId::new("bread-v2").unwrap(),
        })
        .unwrap();

    let AnalysisReport::Comparison(result) = &response.report else {
        panic!("expected a comparison report");
    };
    assert_eq!(result.summary.total_added, 0);
    assert_eq!(result.summary.total_removed, 1);
    assert_eq!(result.removed[0].component_id.as_str(), "salt");
    assert_eq!(result.summary.total_modified, 1);
    assert_eq!(result.modified[0].field, ItemField::Quantity);
}

#[test]
fn test_scale_apply_persists_through_writer() {
    let reader = MockSnapshotReader::new().with_snapshot(bread());
    let writer = MockBomWriter::new();
    let use_case = AnalyzeBomUseCase::new(
        reader,
        MockComponentResolver::new(),
        Some(writer.clone()),
        MockProgressReporter::new(),
    );

    let response = use_case
        .execute(AnalysisRequest::Scale {
            bom_id: BomId::new("bread-v1").unwrap(),
            target: Some(ScaleTarget::BatchSize(200.0)),
            options: ScaleOptions::apply(),
        })
        .unwrap();

    let AnalysisReport::Scale(result) = &response.report else {
        panic!("expected a scale report");
    };
    assert!(result.applied);
    assert_eq!(result.scale_factor, 2.0);

    let calls = writer.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].bom_id.as_str(), "bread-v1");
    assert_eq!(calls[0].output_quantity, 200.0);
    assert_eq!(calls[0].items[0].quantity, 110.0);
    assert_eq!(calls[0].items.len(), 5);
}

#[test]
fn test_scale_preview_never_writes() {
    let reader = MockSnapshotReader::new().with_snapshot(bread());
    let writer = MockBomWriter::new();
    let use_case = AnalyzeBomUseCase::new(
        reader,
        MockComponentResolver::new(),
        Some(writer.clone()),
        MockProgressReporter::new(),
    );

    let response = use_case
        .execute(AnalysisRequest::Scale {
            bom_id: BomId::new("bread-v1").unwrap(),
            target: Some(ScaleTarget::Factor(0.5)),
            options: ScaleOptions::default(),
        })
        .unwrap();

    let AnalysisReport::Scale(result) = &response.report else {
        panic!("expected a scale report");
    };
    assert!(!result.applied);
    assert_eq!(result.new_batch_size, 50.0);
    assert!(writer.get_calls().is_empty());
}

#[test]
fn test_scale_apply_conflict_surfaces_write_error() {
    let reader = MockSnapshotReader::new().with_snapshot(bread());
    let use_case = AnalyzeBomUseCase::new(
        reader,
        MockComponentResolver::new(),
        Some(MockBomWriter::conflicting()),
        MockProgressReporter::new(),
    );

    let err = use_case
        .execute(AnalysisRequest::Scale {
            bom_id: BomId::new("bread-v1").unwrap(),
            target: Some(ScaleTarget::BatchSize(200.0)),
            options: ScaleOptions::apply(),
        })
        .unwrap_err();

    assert_eq!(error_kind(&err), Some(ErrorKind::WriteError));
    assert!(err.to_string().contains("modified concurrently"));
}

#[test]
fn test_yield_variance_warning_reported() {
    let reader = MockSnapshotReader::new().with_snapshot(bread());
    let progress_reporter = MockProgressReporter::new();
    let use_case = AnalyzeBomUseCase::new(
        reader,
        MockComponentResolver::new(),
        None::<MockBomWriter>,
        progress_reporter.clone(),
    );

    let response = use_case
        .execute(AnalysisRequest::Yield {
            bom_id: BomId::new("bread-v1").unwrap(),
            actual_output: 95.0,
            options: YieldOptions::default().with_expected_yield(90.0),
            planned_quantity: None,
        })
        .unwrap();

    let AnalysisReport::Yield { result, projection } = &response.report else {
        panic!("expected a yield report");
    };
    // 100 / 101 * 100
    assert_eq!(result.theoretical_yield_percent, 99.0);
    assert_eq!(result.variance_percent, Some(9.0));
    assert!(result.variance_warning);
    assert!(projection.is_none());

    assert!(response.is_flagged());
    assert_eq!(progress_reporter.warnings().len(), 1);
}

#[test]
fn test_unknown_bom_is_an_error() {
    let use_case = AnalyzeBomUseCase::new(
        MockSnapshotReader::new(),
        MockComponentResolver::new(),
        None::<MockBomWriter>,
        MockProgressReporter::new(),
    );

    let err = use_case
        .analyze(AnalysisRequest::Explode {
            bom_id: BomId::new("missing").unwrap(),
            max_depth: DEFAULT_MAX_DEPTH,
        })
        .unwrap_err();

    assert!(err.to_string().contains("BOM not found: missing"));
}

#[test]
fn test_fixture_catalog_explosion() {
    let catalog = CatalogFileReader::open(&fixture_catalog()).unwrap();
    let use_case = AnalyzeBomUseCase::new(
        &catalog,
        CachingComponentResolver::new(&catalog),
        None::<CatalogFileWriter>,
        MockProgressReporter::new(),
    );

    let response = use_case
        .execute(AnalysisRequest::Explode {
            bom_id: BomId::new("bread-v2").unwrap(),
            max_depth: DEFAULT_MAX_DEPTH,
        })
        .unwrap();

    let AnalysisReport::Explosion(result) = &response.report else {
        panic!("expected an explosion report");
    };
    assert_eq!(result.raw_material("flour").unwrap().total_quantity, 65.0);
    assert_eq!(result.raw_material("flour").unwrap().occurrences, 2);
    assert_eq!(result.raw_material("yeast").unwrap().component_name, "Dry yeast");
    assert_eq!(result.level(1).unwrap().items.len(), 2);
}
