use clap::Parser;
use pdf2docx_bridge::cli::{self, ConvertArgs};

fn example_config() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/pdf2docx.example.toml").to_string()
}

fn parse(extra: &[&str]) -> ConvertArgs {
    let mut argv = vec!["pdf2docx".to_string()];
    argv.extend(extra.iter().map(|s| s.to_string()));
    argv.extend(["--config".to_string(), example_config(), "--json".to_string()]);
    ConvertArgs::try_parse_from(argv).expect("valid arguments")
}

#[test]
fn defaults() {
    let args = parse(&["in.pdf", "out.docx"]);
    assert_eq!(args.start, 0);
    assert_eq!(args.end, None);
    assert!(args.pages.is_none());
    assert!(args.json);
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.pdf");
    let output = dir.path().join("out.docx");
    let args = parse(&[input.to_str().unwrap(), output.to_str().unwrap()]);

    let report = cli::convert(args).unwrap();

    assert!(!report.success);
    assert_eq!(report.code.as_deref(), Some("FILE_NOT_FOUND"));
}

#[test]
fn bad_pages_stop_before_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    std::fs::write(&input, b"%PDF-1.4").unwrap();
    let output = dir.path().join("sub").join("out.docx");
    let args = parse(&[
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--pages",
        "1,two,3",
    ]);

    let report = cli::convert(args).unwrap();

    assert!(!report.success);
    assert_eq!(report.code.as_deref(), Some("INVALID_PAGES"));
    assert!(!dir.path().join("sub").exists());
}

#[test]
fn negative_range_bounds_parse() {
    let args = parse(&["in.pdf", "out.docx", "--start", "-2", "--end", "-1"]);
    assert_eq!((args.start, args.end), (-2, Some(-1)));
}
