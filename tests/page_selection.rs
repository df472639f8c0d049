use pdf2docx_bridge::{pages::PageSelection, report::PageTally};

#[test]
fn page_list_wins_over_range() {
    let sel = PageSelection::from_args(Some("0,2"), 1, Some(3)).unwrap();
    assert_eq!(sel, PageSelection::List(vec![0, 2]));
    assert_eq!(sel.converted_pages(PageTally::Count(40)), PageTally::Count(2));
}

#[test]
fn malformed_list_is_invalid_pages() {
    let err = PageSelection::from_args(Some("1,two,3"), 0, None).unwrap_err();
    assert_eq!(err.code(), "INVALID_PAGES");
}

#[test]
fn empty_list_counts_as_absent() {
    let sel = PageSelection::from_args(Some(""), 0, None).unwrap();
    assert_eq!(sel, PageSelection::All);
    assert_eq!(sel.converted_pages(PageTally::Unknown), PageTally::Unknown);
}

#[test]
fn range_is_not_clamped() {
    let sel = PageSelection::from_args(None, 1, Some(3)).unwrap();
    assert_eq!(sel.converted_pages(PageTally::Count(1)), PageTally::Count(2));

    let past_end = PageSelection::from_args(None, 0, Some(50)).unwrap();
    assert_eq!(past_end.converted_pages(PageTally::Count(5)), PageTally::Count(50));
}

#[test]
fn open_ended_range_uses_total() {
    let sel = PageSelection::from_args(None, 2, None).unwrap();
    assert_eq!(sel, PageSelection::Range { start: 2, end: None });
    assert_eq!(sel.converted_pages(PageTally::Count(7)), PageTally::Count(7));
}
