use chrono::{Days, NaiveDate};
use contrib_maze_core::{ContributionRecord, GridCoord};
use contrib_maze_system_calendar::{normalize, RawCalendar, RawDay, RawWeek};
use contrib_maze_system_traversal::{
    path_position, plan_path, simulate_consumption, TraversalPlan, CONSUMPTION_TOLERANCE,
};

fn date(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 7)
        .and_then(|start| start.checked_add_days(Days::new(offset)))
        .expect("valid date")
}

fn record(column: u32, row: u32, count: u32) -> ContributionRecord {
    ContributionRecord::new(
        date(u64::from(column * 7 + row)),
        count,
        GridCoord::new(column, row),
        None,
    )
}

fn calendar(weeks: &[[i64; 7]]) -> RawCalendar {
    RawCalendar {
        total_contributions: None,
        weeks: weeks
            .iter()
            .enumerate()
            .map(|(week, counts)| RawWeek {
                contribution_days: counts
                    .iter()
                    .enumerate()
                    .map(|(day, count)| RawDay {
                        contribution_count: *count,
                        date: date((week * 7 + day) as u64),
                        weekday: None,
                        color: None,
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[test]
fn path_contains_exactly_the_active_records_in_column_major_order() {
    let normalized = normalize(&calendar(&[[0, 1, 4, 7, 10, 15, 3]])).expect("valid calendar");
    let path = plan_path(normalized.records());

    assert_eq!(path.len(), 6);
    let rows: Vec<u32> = path.points().iter().map(|point| point.cell.row()).collect();
    assert_eq!(rows, vec![1, 2, 3, 4, 5, 6]);
    for point in path.points() {
        assert!(normalized.records()[point.record].is_active());
        assert_eq!(point.timestamp, normalized.records()[point.record].date());
        assert_eq!(point.position, path_position(point.cell));
    }
}

#[test]
fn path_sorts_records_supplied_out_of_order() {
    let records = vec![
        record(2, 0, 1),
        record(0, 5, 3),
        record(1, 1, 0),
        record(0, 2, 9),
        record(1, 3, 2),
    ];
    let path = plan_path(&records);

    let cells: Vec<GridCoord> = path.points().iter().map(|point| point.cell).collect();
    assert_eq!(
        cells,
        vec![
            GridCoord::new(0, 2),
            GridCoord::new(0, 5),
            GridCoord::new(1, 3),
            GridCoord::new(2, 0),
        ]
    );
    let indices: Vec<usize> = path.points().iter().map(|point| point.record).collect();
    assert_eq!(indices, vec![3, 1, 4, 0]);
}

#[test]
fn inactive_calendar_produces_empty_path_and_no_consumption() {
    let normalized = normalize(&calendar(&[[0; 7]])).expect("valid calendar");
    let plan = TraversalPlan::compute(normalized.records());

    assert!(plan.path.is_empty());
    assert!(plan.consumed.is_empty());
    assert_eq!(plan.score().points(), 0);
    assert_eq!(plan.score().level(), 1);
}

#[test]
fn consumption_is_idempotent() {
    let normalized = normalize(&calendar(&[
        [0, 3, 0, 1, 0, 0, 12],
        [2, 0, 0, 0, 5, 0, 0],
        [0, 0, 0, 0, 0, 0, 0],
        [0, 0, 8, 0, 0, 0, 1],
    ]))
    .expect("valid calendar");
    let path = plan_path(normalized.records());

    let first = simulate_consumption(&path, normalized.records());
    let second = simulate_consumption(&path, normalized.records());
    assert_eq!(first, second);
    assert_eq!(first.len(), path.len());
}

#[test]
fn consumption_respects_tolerance_in_both_directions() {
    let normalized = normalize(&calendar(&[
        [1, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 6, 0, 0, 0],
    ]))
    .expect("valid calendar");
    let records = normalized.records();
    let path = plan_path(&records[..7]);
    let consumed = simulate_consumption(&path, records);

    for (index, record) in records.iter().enumerate() {
        let near = record.is_active()
            && path.points().iter().any(|point| {
                point.position.distance(path_position(record.cell())) < CONSUMPTION_TOLERANCE
            });
        assert_eq!(consumed.contains(index), near, "record {index}");
    }
    assert!(consumed.contains(0));
    assert!(!consumed.contains(17), "distant record must stay uneaten");
}

#[test]
fn neighbouring_cells_fall_inside_tolerance_but_diagonals_do_not() {
    let records = vec![record(0, 0, 1), record(1, 0, 1), record(1, 1, 1)];
    let path = plan_path(&records[..1]);
    let consumed = simulate_consumption(&path, &records);

    assert!(consumed.contains(0));
    assert!(consumed.contains(1), "12px away is within tolerance");
    assert!(!consumed.contains(2), "diagonal neighbour is ~17px away");
}

#[test]
fn score_counts_every_eaten_dot() {
    let weeks: Vec<[i64; 7]> = (0..10).map(|_| [1; 7]).collect();
    let normalized = normalize(&calendar(&weeks)).expect("valid calendar");
    let plan = TraversalPlan::compute(normalized.records());

    assert_eq!(plan.consumed.len(), 70);
    assert_eq!(plan.score().points(), 700);
    assert_eq!(plan.score().level(), 2);
}
