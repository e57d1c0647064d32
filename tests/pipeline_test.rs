//! End-to-end checks of `compute`: filter, then all seven summaries.

use titanic_eda::pipeline::SurvivalStatus;
use titanic_eda::{compute, compute_with, Cell, Dataset, FilterSelection, PassengerRecord, PipelineOptions};

fn three_passengers() -> Dataset {
    Dataset::from_records(vec![
        PassengerRecord::new(0, "male", 1, 100.0, true),
        PassengerRecord::new(1, "female", 1, 80.0, false),
        PassengerRecord::new(2, "male", 3, 10.0, false),
    ])
}

fn manifest() -> Dataset {
    let rows = [
        ("male", 3, Some(22.0), 7.25, Some("S"), false, 1),
        ("female", 1, Some(38.0), 71.28, Some("C"), true, 1),
        ("female", 3, Some(26.0), 7.92, Some("S"), true, 0),
        ("female", 1, Some(35.0), 53.1, Some("S"), true, 1),
        ("male", 3, Some(35.0), 8.05, Some("S"), false, 0),
        ("male", 3, None, 8.46, Some("Q"), false, 0),
        ("male", 1, Some(54.0), 51.86, Some("S"), false, 0),
        ("male", 3, Some(2.0), 21.08, Some("S"), false, 3),
        ("female", 3, Some(27.0), 11.13, Some("S"), true, 0),
        ("female", 2, Some(14.0), 30.07, Some("C"), true, 1),
        ("female", 1, Some(62.0), 80.0, None, true, 0),
    ];
    Dataset::from_records(
        rows.iter()
            .enumerate()
            .map(|(i, &(sex, pclass, age, fare, port, survived, sib_sp))| {
                let mut rec = PassengerRecord::new(i, sex, pclass, fare, survived)
                    .with_extra("SibSp", Cell::Integer(sib_sp));
                rec.age = age;
                rec.embarked = port.map(str::to_string);
                rec
            })
            .collect(),
    )
}

#[test]
fn male_selection_reproduces_worked_example() {
    let ds = three_passengers();
    let dashboard = compute(&ds, &FilterSelection::all().with_sex("male"));

    assert_eq!(dashboard.matched_rows, 2);
    assert_eq!(dashboard.total_rows, 3);
    let rates: Vec<(i64, f64)> = dashboard
        .summaries
        .survival_rate_by_class
        .into_iter()
        .collect();
    assert_eq!(rates, vec![(1, 1.0), (3, 0.0)]);
    let fares: Vec<(i64, f64)> = dashboard
        .summaries
        .average_fare_by_class
        .into_iter()
        .collect();
    assert_eq!(fares, vec![(1, 100.0), (3, 10.0)]);
}

#[test]
fn absent_class_empties_every_summary() {
    let ds = manifest();
    let dashboard = compute(&ds, &FilterSelection::all().with_pclass(7));

    assert_eq!(dashboard.matched_rows, 0);
    assert!(dashboard.preview.is_empty());
    let s = &dashboard.summaries;
    assert!(s.survival_by_sex.is_empty());
    assert!(s.age_distribution.is_empty());
    assert!(s.age_distribution.histogram.is_empty());
    assert!(s.age_distribution.kde.is_empty());
    assert!(s.survival_rate_by_class.is_empty());
    assert!(s.average_fare_by_class.is_empty());
    assert!(s.embarkation.is_empty());
    assert_eq!(s.embarkation.missing, 0);
    assert!(s.age_by_survival.is_empty());
    assert!(s.correlation.is_empty());
    assert!(s.is_empty());
}

#[test]
fn correlation_is_symmetric_with_unit_diagonal() {
    let ds = manifest();
    let corr = compute(&ds, &FilterSelection::all()).summaries.correlation;

    assert_eq!(corr.columns(), ["Pclass", "Age", "Fare", "Survived", "SibSp"]);
    for i in 0..corr.len() {
        assert_eq!(corr.get(i, i), Some(1.0), "diagonal of {}", corr.columns()[i]);
        for j in 0..corr.len() {
            assert_eq!(corr.get(i, j), corr.get(j, i));
            if let Some(r) = corr.get(i, j) {
                assert!((-1.0..=1.0).contains(&r));
            }
        }
    }
    // Higher class number, cheaper ticket.
    assert!(corr.between("Pclass", "Fare").unwrap() < 0.0);
}

#[test]
fn single_row_correlation_is_undefined_not_an_error() {
    let ds = manifest();
    let corr = compute(&ds, &FilterSelection::all().with_sex("female").with_pclass(2))
        .summaries
        .correlation;
    assert_eq!(corr.len(), 5);
    assert!((0..5).all(|i| (0..5).all(|j| corr.get(i, j).is_none())));
}

#[test]
fn survival_counts_and_age_groups_follow_the_filter() {
    let ds = manifest();
    let s = compute(&ds, &FilterSelection::all().with_pclass(3)).summaries;

    let counts: Vec<(SurvivalStatus, &str, usize)> = s
        .survival_by_sex
        .iter()
        .map(|c| (c.status, c.sex.as_str(), c.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            (SurvivalStatus::DidNotSurvive, "male", 4),
            (SurvivalStatus::Survived, "female", 2),
        ]
    );

    let statuses: Vec<SurvivalStatus> = s.age_by_survival.iter().map(|g| g.status).collect();
    assert_eq!(statuses, SurvivalStatus::ALL);
    // One third-class man has no recorded age.
    assert_eq!(s.age_by_survival[0].ages, vec![22.0, 35.0, 2.0]);
    assert_eq!(s.age_distribution.ages.len(), 5);
}

#[test]
fn embarkation_counts_exclude_missing_port() {
    let ds = manifest();
    let s = compute(&ds, &FilterSelection::all().with_sex("female")).summaries;
    assert_eq!(
        s.embarkation.counts,
        vec![("C".to_string(), 2), ("S".to_string(), 3)]
    );
    assert_eq!(s.embarkation.missing, 1);
}

#[test]
fn preview_is_the_head_of_the_view() {
    let ds = manifest();
    let options = PipelineOptions {
        preview_rows: 3,
        ..PipelineOptions::default()
    };
    let dashboard = compute_with(&ds, &FilterSelection::all().with_sex("male"), &options);
    let indices: Vec<usize> = dashboard.preview.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 4, 5]);
}

#[test]
fn compute_is_a_pure_function_of_its_inputs() {
    let ds = manifest();
    let selection = FilterSelection::all().with_sex("female");
    let first = compute(&ds, &selection);
    let _other = compute(&ds, &FilterSelection::all().with_pclass(3));
    let second = compute(&ds, &selection);
    assert_eq!(first, second);
    assert_eq!(ds.len(), 11);
}
