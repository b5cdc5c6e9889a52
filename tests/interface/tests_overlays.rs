//! Overlay tests: a primary module importing modules from the search path.

use crate::helpers::fixtures::*;
use crate::helpers::request_helpers::*;
use ifacegen::CompilerArgs;
use ifacegen::ide::AnalysisHost;

const APP: &str = "\
import Kit

public class Widget : Gadget {
    public func attach(to gadget: Gadget) {}
}
";

const KIT: &str = "\
import App

public class Gadget {}

public extension Widget {
    func draw() {}
}
";

fn workspace() -> (Workspace, std::path::PathBuf) {
    let workspace = Workspace::new();
    let app = workspace.write("App.swift", APP);
    workspace.write("Kit.swift", KIT);
    (workspace, app)
}

#[test]
fn test_overlay_extension_is_appended() {
    let (workspace, app) = workspace();
    let mut host = AnalysisHost::new();
    let text = interface_gen(&mut host, &app, workspace.args(&app));
    assert_eq!(
        text,
        "\
import Kit

public class Widget : Gadget {

    public func attach(to gadget: Gadget)
}

public extension Widget {

    public func draw()
}
"
    );
}

#[test]
fn test_overlay_symbols_keep_their_module() {
    let (workspace, app) = workspace();
    let mut host = AnalysisHost::new();
    interface_gen_open(&mut host, "App", &app, workspace.args(&app));

    // `Gadget` in `Widget : Gadget`
    let info = cursor_at(&mut host, "App", 3, 24).unwrap();
    assert_eq!(info.name, "Gadget");
    assert_eq!(info.module, "Kit");
    assert_eq!(info.usr.as_ref(), "s:C3Kit6Gadget");
    assert!(info.location.is_none());

    // `draw` comes from the overlay but lives in `Widget`
    let draw = cursor_at(&mut host, "App", 10, 17).unwrap();
    assert_eq!(draw.name, "draw");
    assert_eq!(draw.module, "Kit");
    assert_eq!(draw.usr.as_ref(), "s:FC3App6Widget4drawFT_T_");
}

#[test]
fn test_missing_overlay_keeps_import_line() {
    let workspace = Workspace::new();
    let app = workspace.write("App.swift", APP);
    let mut host = AnalysisHost::new();
    let text = interface_gen(&mut host, &app, workspace.args(&app));
    assert!(text.starts_with("import Kit\n\npublic class Widget : Gadget {"), "{text}");
}

#[test]
fn test_parallel_generation_matches_sequential() {
    let (workspace, app) = workspace();
    let other = workspace.write("Other.swift", "public enum Mode: String {\n    case on, off\n}\n");

    let jobs = vec![
        (app.clone(), CompilerArgs::parse(&workspace.args(&app))),
        (other.clone(), CompilerArgs::parse(&args_for(&other))),
    ];
    let host = AnalysisHost::new();
    let parallel: Vec<String> = host
        .generate_interfaces(&jobs)
        .into_iter()
        .map(|result| result.unwrap().document.text().to_string())
        .collect();

    let mut sequential = AnalysisHost::new();
    assert_eq!(parallel[0], interface_gen(&mut sequential, &app, workspace.args(&app)));
    assert_eq!(parallel[1], interface_gen(&mut sequential, &other, args_for(&other)));
    assert!(parallel[1].contains("public init?(rawValue: String)"));
}
