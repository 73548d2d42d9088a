use lineref::core::models::{Location, PathStyle};
use lineref::editor::{Position, Selection, TextDocument, WorkspaceRoots};
use lineref::errors::LineRefError;
use lineref::format::reference::{
    file_name, format_line_numbers, format_reference, format_reference_with_lines,
    normalize_path, relative_to_root, resolve_path,
};

const SOURCE: &str = "import { x } from './x';\n\n    \nexport function a() {\n  return x;\n}\n";

fn doc() -> TextDocument {
    TextDocument::new("/p/src/x.ts", "typescript", SOURCE)
}

fn roots() -> WorkspaceRoots {
    WorkspaceRoots::new(["/p"])
}

fn lines(start: u32, end: u32) -> Selection {
    Selection::new(Position::new(start, 0), Position::new(end, 2))
}

#[test]
fn test_normalize_windows_path() {
    assert_eq!(normalize_path(r"a\b\c.ts"), "a/b/c.ts");
    assert_eq!(
        normalize_path(r"C:\Users\dev\project\src\Button.tsx"),
        "C:/Users/dev/project/src/Button.tsx"
    );
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize_path("a/b/c.ts");
    assert_eq!(once, "a/b/c.ts");
    assert_eq!(normalize_path(&once), once);
}

#[test]
fn test_relative_to_root() {
    assert_eq!(relative_to_root("/p", "/p/src/x.ts").as_deref(), Some("src/x.ts"));
    assert_eq!(relative_to_root("/p/", "/p/src/x.ts").as_deref(), Some("src/x.ts"));
    assert_eq!(
        relative_to_root(r"C:\work\app", r"C:\work\app\src\main.rs").as_deref(),
        Some("src/main.rs")
    );
}

#[test]
fn test_relative_to_root_rejects_outside_and_sibling_prefix() {
    assert_eq!(relative_to_root("/p", "/q/src/x.ts"), None);
    // `/project` shares a prefix with `/p` but is not inside it
    assert_eq!(relative_to_root("/p", "/project/x.ts"), None);
}

#[test]
fn test_line_numbers_single_and_range() {
    assert_eq!(format_line_numbers(10, 10, true), "#L10");
    assert_eq!(format_line_numbers(10, 13, true), "#L10-13");
    assert_eq!(format_line_numbers(10, 13, false), "");
}

#[test]
fn test_single_line_selection_renders_one_number() {
    let sel = Selection::new(Position::new(9, 0), Position::new(9, 4));
    let doc = TextDocument::new("/p/a.rs", "rust", &"let a = 1;\n".repeat(20));
    let location = format_reference(&doc, &sel, PathStyle::Relative, &roots()).unwrap();
    assert_eq!(location.to_string(), "a.rs#L10");
}

#[test]
fn test_multi_line_selection_renders_range() {
    let doc = TextDocument::new("/p/a.rs", "rust", &"let a = 1;\n".repeat(20));
    let location = format_reference(&doc, &lines(9, 12), PathStyle::Relative, &roots()).unwrap();
    assert_eq!(location.to_string(), "a.rs#L10-13");
    assert!(location.end_line >= location.start_line);
}

#[test]
fn test_cursor_on_blank_line_drops_anchor() {
    let location =
        format_reference(&doc(), &Selection::cursor(1, 0), PathStyle::Relative, &roots()).unwrap();
    assert_eq!(location.to_string(), "src/x.ts");
    assert!(!location.include_line);
}

#[test]
fn test_cursor_on_whitespace_line_drops_anchor() {
    let location =
        format_reference(&doc(), &Selection::cursor(2, 2), PathStyle::Relative, &roots()).unwrap();
    assert_eq!(location.to_string(), "src/x.ts");
}

#[test]
fn test_cursor_on_code_line_keeps_anchor() {
    let location =
        format_reference(&doc(), &Selection::cursor(3, 5), PathStyle::Relative, &roots()).unwrap();
    assert_eq!(location.to_string(), "src/x.ts#L4");
}

#[test]
fn test_selection_over_blank_lines_keeps_anchor() {
    let sel = Selection::new(Position::new(1, 0), Position::new(2, 4));
    let location = format_reference(&doc(), &sel, PathStyle::Relative, &roots()).unwrap();
    assert_eq!(location.to_string(), "src/x.ts#L2-3");
}

#[test]
fn test_with_lines_never_drops_anchor() {
    let location = format_reference_with_lines(
        &doc(),
        &Selection::cursor(1, 0),
        PathStyle::Relative,
        &roots(),
    )
    .unwrap();
    assert_eq!(location.to_string(), "src/x.ts#L2");
}

#[test]
fn test_absolute_style_normalizes_separators() {
    let doc = TextDocument::new(r"C:\work\app\src\main.rs", "rust", "fn main() {}");
    let location = format_reference(
        &doc,
        &Selection::cursor(0, 0),
        PathStyle::Absolute,
        &WorkspaceRoots::default(),
    )
    .unwrap();
    assert_eq!(location.to_string(), "C:/work/app/src/main.rs#L1");
}

#[test]
fn test_relative_outside_root_fails_without_fallback() {
    let doc = TextDocument::new("/elsewhere/x.ts", "typescript", "let a;");
    let result = format_reference(&doc, &Selection::cursor(0, 0), PathStyle::Relative, &roots());
    assert!(matches!(result, Err(LineRefError::NoWorkspace)));
}

#[test]
fn test_nearest_root_wins() {
    let roots = WorkspaceRoots::new(["/p", "/p/packages/web"]);
    let doc = TextDocument::new("/p/packages/web/src/App.tsx", "typescriptreact", "x");
    assert_eq!(
        resolve_path(&doc, PathStyle::Relative, &roots).unwrap(),
        "src/App.tsx"
    );
}

#[test]
fn test_file_name() {
    let doc = TextDocument::new("/Users/test/project/src/components/Button.tsx", "typescriptreact", "");
    assert_eq!(file_name(&doc), "Button.tsx");

    let doc = TextDocument::new(r"C:\project\src\Button.tsx", "typescriptreact", "");
    assert_eq!(file_name(&doc), "Button.tsx");
}

#[test]
fn test_location_orders_reversed_range() {
    let location = Location::from_zero_based("a.rs".to_string(), 12, 9, true);
    assert_eq!((location.start_line, location.end_line), (10, 13));
    assert!(!location.is_single_line());
}

#[test]
fn test_last_representable_line_does_not_wrap() {
    let location = format_reference_with_lines(
        &doc(),
        &Selection::cursor(u32::MAX, 0),
        PathStyle::Relative,
        &roots(),
    )
    .unwrap();
    assert_eq!(location.start_line, u32::MAX);
    assert_eq!(location.to_string(), format!("src/x.ts#L{}", u32::MAX));

    let range = Location::from_zero_based("a.rs".to_string(), u32::MAX - 1, u32::MAX, true);
    assert_eq!((range.start_line, range.end_line), (u32::MAX, u32::MAX));
}
