use labelscope::dataset::{read_class_manifest, DatasetLayout, Split};
use labelscope::stats::{stats_dataset, StatsOptions};
use labelscope::LabelscopeError;

mod common;

use common::DatasetFixture;

fn birds() -> DatasetFixture {
    let fixture = DatasetFixture::new("birds", &["sparrow", "owl", "heron"]);

    fixture.touch_image("train", "a.jpg");
    fixture.touch_image("train", "b.jpg");
    fixture.write_label("train", "a.txt", "0 0.5 0.5 0.2 0.2\n1 0.1 0.1 0.1 0.1\n");
    fixture.write_label("train", "b.txt", "0 0.3 0.3 0.2 0.2\n\n0 0.6 0.6 0.1 0.1\n");

    fixture.touch_image("valid", "c.jpg");
    fixture.write_label("valid", "c.txt", "1 0.5 0.5 0.4 0.4\n");

    fixture.touch_image("test", "d.jpg");
    fixture.write_label("test", "d.txt", "");
    fixture
}

#[test]
fn counts_images_and_classes_per_split() {
    let fixture = birds();
    let layout = DatasetLayout::new(fixture.root());
    let classes = read_class_manifest(&layout.manifest_path()).expect("read manifest");

    let report = stats_dataset(&layout, &classes, &StatsOptions::default()).expect("stats");

    assert_eq!(report.dataset_name, "birds");
    assert_eq!(report.classes, vec!["sparrow", "owl", "heron"]);
    assert_eq!(report.total_images(), 4);

    let train = report.split(Split::Train).expect("train stats");
    assert_eq!(train.images, 2);
    assert_eq!(train.label_files, 2);
    assert_eq!(train.class_counts.get("sparrow"), Some(3));
    assert_eq!(train.class_counts.get("owl"), Some(1));
    assert_eq!(train.class_counts.get("heron"), Some(0));

    let test = report.split(Split::Test).expect("test stats");
    assert_eq!(test.class_counts.total(), 0);
    assert_eq!(test.class_counts.len(), 3);

    assert_eq!(report.totals.get("sparrow"), Some(3));
    assert_eq!(report.totals.get("owl"), Some(2));
    assert_eq!(report.totals.get("heron"), Some(0));
}

#[test]
fn text_report_lists_splits_and_percentages() {
    let fixture = birds();
    let layout = DatasetLayout::new(fixture.root());
    let classes = read_class_manifest(&layout.manifest_path()).expect("read manifest");

    let text = stats_dataset(&layout, &classes, &StatsOptions::default())
        .expect("stats")
        .to_string();

    assert!(text.contains("Dataset Name: birds"));
    assert!(text.contains("Classes: sparrow, owl, heron"));
    assert!(text.contains("Training Images:"));
    assert!(text.contains("50.00%"));
    assert!(text.contains("Validation Set"));
    assert!(text.contains("Total Classes Count"));
}

#[test]
fn out_of_range_class_aborts_stats() {
    let fixture = birds();
    fixture.write_label("valid", "c.txt", "7 0.5 0.5 0.4 0.4\n");
    let layout = DatasetLayout::new(fixture.root());
    let classes = read_class_manifest(&layout.manifest_path()).expect("read manifest");

    let err = stats_dataset(&layout, &classes, &StatsOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        LabelscopeError::ClassIndexOutOfRange {
            index: 7,
            class_count: 3,
            ..
        }
    ));
}

#[test]
fn missing_split_is_reported_by_name() {
    let fixture = birds();
    fixture.remove_split("valid");
    let layout = DatasetLayout::new(fixture.root());
    let classes = read_class_manifest(&layout.manifest_path()).expect("read manifest");

    let err = stats_dataset(&layout, &classes, &StatsOptions::default()).unwrap_err();
    match err {
        LabelscopeError::SplitNotFound { split, .. } => assert_eq!(split, "valid"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn manifest_count_mismatch_is_rejected() {
    let fixture = birds();
    fixture.write_manifest(3, &["sparrow", "owl"]);

    let err = read_class_manifest(&fixture.root().join("data.yaml")).unwrap_err();
    assert!(matches!(
        err,
        LabelscopeError::ClassCountMismatch {
            declared: 3,
            found: 2,
            ..
        }
    ));
}
