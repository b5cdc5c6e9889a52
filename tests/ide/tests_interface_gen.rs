//! `interface-gen` tests against the checked-in inputs.

use crate::helpers::fixtures::*;
use crate::helpers::request_helpers::*;
use ifacegen::ide::{AnalysisHost, DocumentSource, InterfaceRequest, Request, RequestError};

#[test]
fn test_foo2_matches_expected_response() {
    let path = input("Foo2.swift");
    let mut host = AnalysisHost::new();
    let text = interface_gen(&mut host, &path, args_for(&path));
    assert_eq!(text, expected_response("Foo2.swift"));
}

#[test]
fn test_unresolved_extension_is_emitted() {
    let path = input("UnresolvedExtension.swift");
    let mut host = AnalysisHost::new();
    let text = interface_gen(&mut host, &path, args_for(&path));
    assert!(text.contains("extension ET"), "{text}");
    assert!(text.contains("public func foo()"), "{text}");
}

#[test]
fn test_regeneration_is_byte_identical() {
    let path = input("Foo2.swift");
    let mut host = AnalysisHost::new();
    let first = interface_gen(&mut host, &path, args_for(&path));

    host.clear_cache();
    let second = interface_gen(&mut host, &path, args_for(&path));
    let third = interface_gen(&mut AnalysisHost::new(), &path, args_for(&path));
    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn test_ascii_check_passes_for_ascii_output() {
    let path = input("Foo2.swift");
    let mut host = AnalysisHost::new();
    let request = file_request(&path, args_for(&path)).with_ascii_check(true);
    assert!(host.handle(Request::InterfaceGen(request)).is_ok());
}

#[test]
fn test_missing_source_fails_to_load() {
    let mut host = AnalysisHost::new();
    let missing = input("DoesNotExist.swift");
    let result = host.handle(Request::InterfaceGen(file_request(&missing, args_for(&missing))));
    assert!(matches!(result, Err(RequestError::Load(_))));
}

#[test]
fn test_module_interface_from_search_path() {
    let workspace = Workspace::new();
    workspace.write("Kit/Shapes.swift", "public struct Circle {\n    public var radius: Double\n}\n");
    workspace.write("Kit/Lines.swift", "public struct Line {}\n");

    let args = vec!["-I".to_string(), workspace.path().to_string_lossy().to_string()];
    let request = InterfaceRequest::new(DocumentSource::Module("Kit".into()), args);
    let response = AnalysisHost::new().handle(Request::InterfaceGen(request)).unwrap();
    assert_eq!(
        response.to_string(),
        "public struct Line {\n}\n\npublic struct Circle {\n\n    public var radius: Double\n}\n"
    );
}
