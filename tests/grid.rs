mod common;

use chrono::{TimeZone, Utc};
use journey_grid::{
    cell::Cell,
    column_type::RenderedCell,
    config::{FormatContext, GridConfig},
    grid::DataGrid,
    projection::Row,
    sort::parse_sort_directives,
};
use serde_json::json;

use common::{fixture_columns, fixture_rows};

fn ctx() -> FormatContext {
    FormatContext::new(
        GridConfig::default(),
        Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap(),
    )
}

fn column(grid: &DataGrid<'_>, field: &str) -> Vec<String> {
    let idx = grid.column_index(field).expect("column exists");
    grid.plain_rows()
        .into_iter()
        .map(|row| row[idx].clone())
        .collect()
}

#[test]
fn next_milestone_projection_handles_absent_object() {
    let columns = fixture_columns();
    let grid = DataGrid::new(
        &columns,
        vec![
            Row::from_json(json!({"next_milestone": {"title": "Kickoff", "deadline": "2023-05-01"}})),
            Row::from_json(json!({"id": 2})),
        ],
    );
    let idx = grid.column_index("next_milestone_title").unwrap();
    assert_eq!(grid.rows()[0].cells[idx], Cell::Text("Kickoff".to_string()));
    assert_eq!(grid.rows()[1].cells[idx], Cell::Empty);
}

#[test]
fn fixture_renders_formatted_values() {
    let columns = fixture_columns();
    let grid = DataGrid::new(&columns, fixture_rows());
    let display = grid.display_rows(&ctx());

    assert_eq!(display[0][0], "Case #12");
    assert_eq!(display[0][1], "Clara Zetkin");
    assert_eq!(display[0][3], "April 1, 2023");
    assert_eq!(display[0][4], "3 days ago");
    assert_eq!(display[0][5], "Kickoff");
    assert_eq!(display[0][6], "3 days");
    assert_eq!(display[0][8], "World");
    assert_eq!(display[1][1], "August Bebel, Louise Michel");
    assert_eq!(display[1][5], "");
    assert_eq!(display[2][8], "");
}

#[test]
fn plain_rows_use_canonical_text() {
    let columns = fixture_columns();
    let grid = DataGrid::new(&columns, fixture_rows());
    assert_eq!(column(&grid, "id"), vec!["12", "9", "15"]);
    assert_eq!(column(&grid, "intake_answer"), vec!["Hello", "apple", ""]);
    assert_eq!(
        column(&grid, "updated_at"),
        vec![
            "2023-04-28T12:00:00Z",
            "2023-04-30T12:00:00Z",
            "2023-05-01T06:00:00Z"
        ]
    );
}

#[test]
fn sorting_uses_each_column_types_order() {
    let columns = fixture_columns();
    let mut grid = DataGrid::new(&columns, fixture_rows());

    grid.sort(&parse_sort_directives(&["priority".to_string()]).unwrap())
        .unwrap();
    assert_eq!(column(&grid, "id"), vec!["9", "12", "15"]);

    grid.sort(&parse_sort_directives(&["intake_answer".to_string()]).unwrap())
        .unwrap();
    assert_eq!(column(&grid, "id"), vec!["12", "9", "15"]);

    grid.sort(&parse_sort_directives(&["created_at:desc".to_string()]).unwrap())
        .unwrap();
    assert_eq!(column(&grid, "id"), vec!["15", "12", "9"]);
}

#[test]
fn multi_key_sort_breaks_ties_in_order() {
    let columns = fixture_columns();
    let rows = vec![
        Row::from_json(json!({"id": 1, "summary": "b", "priority": 2})),
        Row::from_json(json!({"id": 2, "summary": "a", "priority": 2})),
        Row::from_json(json!({"id": 3, "summary": "c", "priority": 1})),
    ];
    let mut grid = DataGrid::new(&columns, rows);
    let directives =
        parse_sort_directives(&["priority:desc,summary".to_string()]).unwrap();
    grid.sort(&directives).unwrap();
    assert_eq!(column(&grid, "id"), vec!["2", "1", "3"]);
}

#[test]
fn search_matches_individual_people_and_answers() {
    let columns = fixture_columns();

    let mut grid = DataGrid::new(&columns, fixture_rows());
    grid.search("louise");
    assert_eq!(column(&grid, "id"), vec!["9"]);

    let mut grid = DataGrid::new(&columns, fixture_rows());
    grid.search("WORLD");
    assert_eq!(column(&grid, "id"), vec!["12"]);

    let mut grid = DataGrid::new(&columns, fixture_rows());
    grid.search("no such text");
    assert!(grid.is_empty());
}

#[test]
fn rendered_rows_expose_preview_ids() {
    let columns = fixture_columns();
    let grid = DataGrid::new(&columns, fixture_rows());
    let idx = grid.column_index("intake_answer").unwrap();
    let rendered = grid.rendered_rows(&ctx());
    match &rendered[0][idx] {
        RenderedCell::Survey { preview, .. } => {
            assert_eq!(preview.submission_ids(), vec![2, 1]);
        }
        other => panic!("Expected survey rendering, got {other:?}"),
    }
    let link_idx = grid.column_index("case_file").unwrap();
    assert!(matches!(rendered[0][link_idx], RenderedCell::Link { .. }));
    assert_eq!(rendered[1][link_idx], RenderedCell::Empty);
}
