use cardscraper::{
    companion::CompanionUpdate,
    fetch::MemoryFetcher,
    pipeline::run_with,
    CardRecord, ScrapeConfig, ScrapeError,
};
use std::{fs, path::Path};
use tempfile::tempdir;

const PAGE: &str = "https://tot.wiki/wiki/Cards";
const FIXTURE: &str = include_str!("fixtures/cards.html");

const ALADDIN_ICON: &str = "https://tot.wiki/images/thumb/Aladdin_Prince.png/40px-Aladdin_Prince.png?width=50";
const JAFAR_ICON: &str = "https://tot.wiki/images/Jafar_Vizier.png?width=80";

fn config(root: &Path) -> ScrapeConfig {
    ScrapeConfig::default()
        .with_url(PAGE)
        .with_icon_dir(root.join("icons"))
        .with_csv_path(root.join("data/cards.csv"))
        .with_companion_page(root.join("index.html"))
}

fn fetcher() -> MemoryFetcher {
    // Genie's icon is deliberately missing to exercise the failure path.
    MemoryFetcher::new()
        .with_body(PAGE, FIXTURE)
        .with_body(ALADDIN_ICON, b"aladdin".to_vec())
        .with_body(JAFAR_ICON, b"jafar".to_vec())
}

fn read_records(path: &Path) -> Vec<CardRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.deserialize().collect::<Result<_, _>>().unwrap()
}

#[test]
fn scrapes_fixture_into_csv() {
    let tmp = tempdir().unwrap();
    let cfg = config(tmp.path());
    fs::write(
        tmp.path().join("index.html"),
        "<p>Cards database updated on 2020-01-01</p>",
    )
    .unwrap();

    let summary = run_with(&cfg, &fetcher()).unwrap();
    assert_eq!(summary.stats.records, 3);
    assert_eq!(summary.stats.malformed, 2);
    assert_eq!(summary.stats.icons_downloaded, 2);
    assert_eq!(summary.stats.icons_failed, 1);
    assert_eq!(summary.companion, CompanionUpdate::Updated(1));

    let records = read_records(&summary.csv_path);
    let names: Vec<_> = records.iter().map(|r| r.card_name.as_str()).collect();
    assert_eq!(names, ["Prince of Thieves", "Royal Vizier", "Phenomenal Power"]);

    let aladdin = &records[0];
    assert_eq!(aladdin.character, "Aladdin");
    assert_eq!(aladdin.rarity, "SSR");
    assert_eq!(aladdin.first_skill_display_name, "Tier=3");
    assert!(aladdin.first_skill_icon.ends_with("Preemptive_Strike_icon.png"));
    let local = tmp.path().join("icons/Aladdin_Prince_of_Thieves.png");
    assert_eq!(aladdin.local_icon_path.as_deref(), local.to_str());
    assert_eq!(fs::read(&local).unwrap(), b"aladdin");

    let jafar = &records[1];
    assert_eq!(jafar.first_skill_display_name, "Tier=1 (3 Turns)");
    assert!(jafar.first_skill_icon.ends_with("Bait_Lure_icon.png"));
    assert_eq!(jafar.icon_url.as_deref(), Some("https://tot.wiki/images/Jafar_Vizier.png?width=80"));

    let genie = &records[2];
    assert_eq!(genie.rarity, "R");
    assert_eq!(genie.first_skill_display_name, "Tier=2 (1 Turn)");
    assert_eq!(genie.icon_url.as_deref(), Some("https://tot.wiki/images/Genie.png"));
    assert_eq!(genie.local_icon_path, None);
}

#[test]
fn second_run_serves_icons_from_disk() {
    let tmp = tempdir().unwrap();
    let cfg = config(tmp.path());

    let first = fetcher();
    run_with(&cfg, &first).unwrap();
    // page + three icon attempts
    assert_eq!(first.request_count(), 4);

    let second = fetcher();
    let summary = run_with(&cfg, &second).unwrap();
    // page + the icon that failed last time
    assert_eq!(second.request_count(), 2);
    assert_eq!(summary.stats.icons_cached, 2);
    assert_eq!(summary.companion, CompanionUpdate::MissingFile);
}

#[test]
fn missing_schema_aborts_without_output() {
    let tmp = tempdir().unwrap();
    let cfg = config(tmp.path());
    let page = FIXTURE.replace("<th>Max Skill(s)</th>", "<th>Skills</th>");
    let fetcher = MemoryFetcher::new().with_body(PAGE, page);

    let err = run_with(&cfg, &fetcher).unwrap_err();
    match err.downcast_ref::<ScrapeError>() {
        Some(ScrapeError::SchemaNotFound { tables }) => assert_eq!(tables.len(), 2),
        other => panic!("unexpected error: {other:?} / {err:#}"),
    }
    assert!(!cfg.csv_path.exists());
    assert!(!cfg.icon_dir.exists());
    assert_eq!(fetcher.request_count(), 1);
}

#[test]
fn unreachable_page_is_fatal() {
    let tmp = tempdir().unwrap();
    let cfg = config(tmp.path());
    let err = run_with(&cfg, &MemoryFetcher::new()).unwrap_err();
    assert!(format!("{err:#}").contains("fetching cards page"));
    assert!(!cfg.csv_path.exists());
    assert!(!cfg.icon_dir.exists());
}
