#![allow(dead_code)]

use labelscope::dataset::ClassList;
use labelscope::stats::ClassCountMap;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Distinct class names, sorted for stable output.
pub fn arb_classes(max_classes: usize) -> BoxedStrategy<ClassList> {
    assert!(max_classes > 0, "max_classes must be > 0");

    proptest::collection::btree_set(class_name_strategy(), 1..=max_classes)
        .prop_map(ClassList::new)
        .boxed()
}

/// A class list together with `map_count` complete count maps over it.
pub fn arb_count_maps(
    max_classes: usize,
    map_count: usize,
) -> BoxedStrategy<(ClassList, Vec<ClassCountMap>)> {
    arb_classes(max_classes)
        .prop_flat_map(move |classes| {
            let class_count = classes.len();
            (
                Just(classes),
                proptest::collection::vec(
                    proptest::collection::vec(0usize..10_000, class_count..=class_count),
                    map_count..=map_count,
                ),
            )
        })
        .prop_map(|(classes, rows)| {
            let maps = rows
                .into_iter()
                .map(|counts| count_map(&classes, &counts))
                .collect();
            (classes, maps)
        })
        .boxed()
}

pub fn count_map(classes: &ClassList, counts: &[usize]) -> ClassCountMap {
    let mut map = ClassCountMap::zeroed(classes);
    for (class, count) in classes.iter().zip(counts) {
        map.insert(class.clone(), *count);
    }
    map
}

/// One generated label line: `None` is a blank line, `Some` a detection
/// seed (class seed, then four coordinate seeds in thousandths).
pub type LabelLine = Option<(u16, [u16; 4])>;

/// Label files, each a list of detection or blank lines.
pub fn arb_label_files(max_files: usize, max_lines: usize) -> BoxedStrategy<Vec<Vec<LabelLine>>> {
    let line = prop_oneof![
        1 => Just(None::<(u16, [u16; 4])>),
        4 => (any::<u16>(), prop::array::uniform4(0u16..=1000)).prop_map(Some),
    ];
    proptest::collection::vec(proptest::collection::vec(line, 0..=max_lines), 0..=max_files)
        .boxed()
}

/// Label file text for `lines`, adding each detection to `expected` at its
/// class index. Blank lines alternate between empty and whitespace-only.
pub fn render_label_lines(lines: &[LabelLine], class_count: usize, expected: &mut [usize]) -> String {
    let mut out = String::new();
    for (idx, line) in lines.iter().enumerate() {
        match line {
            None if idx % 2 == 0 => out.push('\n'),
            None => out.push_str("  \t \n"),
            Some((class_seed, coords)) => {
                let class_index = *class_seed as usize % class_count;
                expected[class_index] += 1;
                let [cx, cy, w, h] = (*coords).map(|c| f64::from(c) / 1000.0);
                out.push_str(&format!("{class_index} {cx} {cy} {w} {h}\n"));
            }
        }
    }
    out
}

fn class_name_strategy() -> BoxedStrategy<String> {
    proptest::string::string_regex("[a-z]{1,12}")
        .expect("valid class name regex")
        .boxed()
}
