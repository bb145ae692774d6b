//! End-to-end behavior of the engine over realistic catalogs.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::Arc;

use shelf::{transition, Dataset, Engine, EngineConfig, Event, Indicator, QueryState, Rules};
use shelf_ingest::{FileSource, Record, TextSource};
use shelf_seeker::{Dir, Paginator, RankTable};

const HEADER: &str = "Name,Link,Category,License,Tags\n";

fn catalog(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut text = HEADER.to_string();
    for (name, category, license, tags) in rows {
        text.push_str(&format!(
            "{name},https://example.com/{name},{category},{license},\"{tags}\"\n"
        ));
    }
    text
}

fn engine_with(config: &EngineConfig, text: &str) -> Engine {
    let mut engine = Engine::new(config).unwrap();
    engine.load(&mut TextSource::new(text)).unwrap();
    engine
}

fn names(engine: &Engine) -> Vec<String> {
    engine
        .projection()
        .unwrap()
        .records()
        .map(|r| r.name().to_string())
        .collect()
}

#[test]
fn license_order_follows_rank_table() {
    let text = catalog(&[
        ("a", "Tools", "MIT", ""),
        ("b", "Tools", "CC0", ""),
        ("c", "Tools", "Custom", ""),
        ("d", "Tools", "GPL", ""),
    ]);
    let engine = engine_with(&EngineConfig::default(), &text);
    let licenses: Vec<_> = engine
        .projection()
        .unwrap()
        .records()
        .map(|r| r.license().to_string())
        .collect();
    assert_eq!(licenses, ["CC0", "MIT", "GPL", "Custom"]);
}

#[test]
fn unknown_licenses_sort_last_in_input_order() {
    let text = catalog(&[
        ("first", "Tools", "Zlib", ""),
        ("second", "Tools", "MIT", ""),
        ("third", "Tools", "Beerware", ""),
    ]);
    let mut engine = engine_with(&EngineConfig::default(), &text);
    assert_eq!(names(&engine), ["second", "first", "third"]);

    engine.dispatch(Event::sort_by("License"));
    assert_eq!(names(&engine), ["first", "third", "second"]);
}

#[test]
fn tag_filter_is_a_substring_conjunction() {
    let text = catalog(&[
        ("svg pack", "Assets", "CC0", "vector-graphics, icons"),
        ("vectors", "Assets", "CC0", "vector-graphics"),
        ("iconset", "Assets", "CC0", "icons"),
    ]);
    let mut engine = engine_with(&EngineConfig::default(), &text);

    engine.dispatch(Event::tags("vector"));
    assert_eq!(names(&engine), ["svg pack", "vectors"]);

    engine.dispatch(Event::tags("vector, icons"));
    assert_eq!(names(&engine), ["svg pack"]);

    engine.dispatch(Event::tags("VECTOR   icons"));
    assert_eq!(names(&engine), ["svg pack"]);
}

#[test]
fn filters_compose_with_and() {
    let text = catalog(&[
        ("Blender", "Tools", "GPL", "3d"),
        ("Blockbench", "Tools", "GPL", "3d, voxel"),
        ("Blender Kit", "Assets", "CC0", "3d"),
    ]);
    let mut engine = engine_with(&EngineConfig::default(), &text);
    engine.dispatch(Event::category("TOOLS"));
    engine.dispatch(Event::license("gpl"));
    engine.dispatch(Event::name("BLEND"));
    assert_eq!(names(&engine), ["Blender"]);
}

#[test]
fn empty_result_is_page_one_of_one() {
    let text = catalog(&[("Blender", "Tools", "GPL", "3d")]);
    let mut engine = engine_with(&EngineConfig::default(), &text);
    let projection = engine.dispatch(Event::name("nothing matches")).unwrap();
    assert_eq!(projection.page().number, 1);
    assert_eq!(projection.page().total_pages, 1);
    assert_eq!(projection.records().count(), 0);
    assert_eq!(engine.indicator(), Indicator::NoResults);
}

#[test]
fn empty_catalog_is_no_results_not_loading() {
    let engine = engine_with(&EngineConfig::default(), HEADER);
    assert_eq!(engine.indicator(), Indicator::NoResults);
    assert_eq!(engine.projection().unwrap().to_string(), "Page 1 of 1");
}

#[test]
fn out_of_range_page_is_clamped() {
    let rows: Vec<_> = (0..4).map(|i| format!("item{i}")).collect();
    let text = catalog(
        &rows
            .iter()
            .map(|n| (n.as_str(), "Tools", "MIT", ""))
            .collect::<Vec<_>>(),
    );
    let config = EngineConfig {
        page_size: 2,
        ..EngineConfig::default()
    };
    let mut engine = engine_with(&config, &text);
    let projection = engine.dispatch(Event::GoToPage(5)).unwrap();
    assert_eq!(projection.page().number, 2);
    assert_eq!(projection.records().count(), 2);
}

#[test]
fn shrinking_filter_falls_back_to_a_valid_page() {
    let rows: Vec<_> = (0..120).map(|i| format!("asset{i:03}")).collect();
    let text = catalog(
        &rows
            .iter()
            .map(|n| (n.as_str(), "Assets", "CC0", ""))
            .collect::<Vec<_>>(),
    );
    let mut engine = engine_with(&EngineConfig::default(), &text);
    engine.dispatch(Event::GoToPage(3));
    assert_eq!(engine.state().page, 3);

    engine.dispatch(Event::name("asset11"));
    assert_eq!(engine.state().page, 1);
    assert_eq!(engine.projection().unwrap().matched(), 10);
}

#[test]
fn page_navigation_is_guarded_at_both_ends() {
    let rows: Vec<_> = (0..3).map(|i| format!("r{i}")).collect();
    let text = catalog(
        &rows
            .iter()
            .map(|n| (n.as_str(), "Tools", "MIT", ""))
            .collect::<Vec<_>>(),
    );
    let config = EngineConfig {
        page_size: 2,
        ..EngineConfig::default()
    };
    let mut engine = engine_with(&config, &text);

    engine.dispatch(Event::PrevPage);
    assert_eq!(engine.state().page, 1);
    engine.dispatch(Event::NextPage);
    engine.dispatch(Event::NextPage);
    assert_eq!(engine.state().page, 2);
    assert_eq!(names(&engine), ["r2"]);
}

#[test]
fn page_change_alone_does_not_reset() {
    let rows: Vec<_> = (0..6).map(|i| format!("r{i}")).collect();
    let text = catalog(
        &rows
            .iter()
            .map(|n| (n.as_str(), "Tools", "MIT", ""))
            .collect::<Vec<_>>(),
    );
    let config = EngineConfig {
        page_size: 2,
        ..EngineConfig::default()
    };
    let mut engine = engine_with(&config, &text);
    engine.dispatch(Event::GoToPage(3));
    engine.dispatch(Event::license("MIT"));
    assert_eq!(engine.state().page, 1);

    engine.dispatch(Event::GoToPage(3));
    // Re-selecting the same license is not a change.
    engine.dispatch(Event::license("MIT"));
    assert_eq!(engine.state().page, 3);
}

#[test]
fn sort_toggle_and_reset() {
    let text = catalog(&[
        ("beta", "Tools", "MIT", ""),
        ("Alpha", "Assets", "MIT", ""),
        ("gamma", "Libraries", "MIT", ""),
    ]);
    let mut engine = engine_with(&EngineConfig::default(), &text);

    engine.dispatch(Event::sort_by("Name"));
    assert_eq!(names(&engine), ["Alpha", "beta", "gamma"]);
    engine.dispatch(Event::sort_by("Name"));
    assert_eq!(names(&engine), ["gamma", "beta", "Alpha"]);
    assert_eq!(engine.state().sort.dir, Dir::Desc);

    engine.dispatch(Event::sort_by("Category"));
    assert_eq!(engine.state().sort.dir, Dir::Asc);
    assert_eq!(names(&engine), ["Alpha", "gamma", "beta"]);
}

#[test]
fn short_rows_never_reach_the_engine() {
    let text = format!("{HEADER}Name,http://x.com\nBlender,https://blender.org,Tools,GPL,3d\n");
    let engine = engine_with(&EngineConfig::default(), &text);
    assert_eq!(names(&engine), ["Blender"]);
    assert_eq!(engine.summary().unwrap().dropped, 1);
}

#[test]
fn loads_from_file_with_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("shelf.yaml");
    std::fs::write(&config_path, "page_size: 1\nsort:\n  column: Name\n  dir: desc\n").unwrap();

    let mut data = tempfile::NamedTempFile::new().unwrap();
    write!(
        data,
        "{}",
        catalog(&[("Krita", "Tools", "GPL", "paint"), ("GIMP", "Tools", "GPL", "paint")])
    )
    .unwrap();

    let config = EngineConfig::from_path(&config_path).unwrap();
    let mut engine = Engine::new(&config).unwrap();
    let projection = engine.load(&mut FileSource::new(data.path())).unwrap();
    assert_eq!(projection.to_string(), "Page 1 of 2");
    assert_eq!(names(&engine), ["Krita"]);
}

#[test]
fn missing_file_is_a_terminal_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = Engine::new(&EngineConfig::default()).unwrap();
    let seen = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&seen);
    engine.subscribe(move |_| *counter.borrow_mut() += 1);

    assert!(engine
        .load(&mut FileSource::new(dir.path().join("data.csv")))
        .is_err());
    assert_eq!(engine.indicator(), Indicator::LoadFailed);
    assert_eq!(Indicator::LoadFailed.message(), Some("Error loading data."));
    assert!(engine.dispatch(Event::sort_by("Name")).is_none());
    assert!(engine.projection().is_none());
    assert_eq!(*seen.borrow(), 0);
}

#[test]
fn transition_is_pure_and_repeatable() {
    let records = vec![
        Record::new("b", "", "Tools", "GPL", Vec::new()),
        Record::new("a", "", "Tools", "CC0", Vec::new()),
    ];
    let rules = Rules {
        paginator: Paginator::new(50).unwrap(),
        licenses: RankTable::new(["CC0", "GPL"]),
    };
    let dataset = Arc::new(Dataset::new(records, &rules.licenses));
    let state = QueryState::default();

    let (s1, p1) = transition(&rules, &state, &dataset, &Event::ClearFilters);
    let (s2, p2) = transition(&rules, &state, &dataset, &Event::ClearFilters);
    assert_eq!(s1, s2);
    assert_eq!(p1, p2);
    assert_eq!(p1.rows(), &[1, 0]);
    assert_eq!(state, QueryState::default());
}
