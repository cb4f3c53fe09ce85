//! Tests for the featured-articles HTML table

use pubmed_service::table::{Column, SortDirection, featured_articles};
use pubmed_service::{ArticleRecord, TableView};

fn count_rows(html: &str) -> usize {
    html.matches("<tr>").count()
}

#[test]
fn test_featured_table_renders_every_record() {
    let html = TableView::featured().render();

    assert!(html.starts_with("<table id=\"table1\" class=\"datatable\">"));
    assert!(html.contains("<th>pmcid</th>"));
    assert!(html.contains("<th>title</th>"));
    // header row plus one row per record
    assert_eq!(count_rows(&html), 1 + 18);
    assert!(!html.contains("No records found"));
}

#[test]
fn test_featured_table_keeps_typographic_characters() {
    let html = TableView::featured().render();

    assert!(html.contains("<td>5809435</td>"));
    assert!(html.contains("Explaining the \u{201c}Efficiency Paradox\u{201d}"));
    assert!(html.contains("slow\u{2013}fast systems"));
    assert!(html.contains("The World (of Warcraft) through the eyes of an expert"));
}

#[test]
fn test_rows_follow_record_order() {
    let html = TableView::featured().render();

    let first = html.find("5818267").unwrap();
    let last = html.find("5472770").unwrap();
    assert!(first < last);
}

#[test]
fn test_sort_by_pmcid_ascending() {
    let view = TableView::featured().sorted_by(Column::Pmcid, SortDirection::Ascending);
    let ids: Vec<&str> = view.records().iter().map(|r| r.pmcid.as_str()).collect();

    assert_eq!(ids.first(), Some(&"5472770"));
    assert_eq!(ids.last(), Some(&"5818376"));
    assert_eq!(view.len(), featured_articles().len());
}

#[test]
fn test_sort_by_title_descending() {
    let view = TableView::featured().sorted_by(Column::Title, SortDirection::Descending);

    assert_eq!(
        view.records()[0].title,
        "The World (of Warcraft) through the eyes of an expert"
    );
    assert_eq!(
        view.records()[17].title,
        "A two-dimensional Dirac fermion microscope"
    );
}

#[test]
fn test_empty_table_shows_zero_records_message() {
    let view = TableView::new(Vec::new()).with_table_id("articles");
    let html = view.render();

    assert!(view.is_empty());
    assert!(html.contains("id=\"articles\""));
    assert!(html.contains(
        "<td colspan=\"2\" class=\"dataTables_empty\">No records found</td>"
    ));
}

#[test]
fn test_custom_zero_records_message() {
    let html = TableView::new(Vec::<ArticleRecord>::new())
        .with_zero_records_message("Nothing to show")
        .render();

    assert!(html.contains("Nothing to show"));
    assert!(!html.contains("No records found"));
}
