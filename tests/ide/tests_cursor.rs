//! Cursor and find-usr tests on opened interfaces.

use crate::helpers::fixtures::*;
use crate::helpers::request_helpers::*;
use ifacegen::ide::{AnalysisHost, CursorPosition, Request, RequestError, Response};
use rstest::rstest;

const FOO2: &str = "Foo2";

fn open_foo2() -> AnalysisHost {
    let path = input("Foo2.swift");
    let mut host = AnalysisHost::new();
    interface_gen_open(&mut host, FOO2, &path, args_for(&path));
    host
}

#[test]
fn test_cursor_on_base_class_in_inheritance_list() {
    let mut host = open_foo2();
    let info = cursor_at(&mut host, FOO2, 18, 49).unwrap();
    assert_eq!(
        Response::Cursor(info).to_string(),
        "\
source.lang.swift.ref.class (3:14-3:33)
FooOverlayClassBase
s:C4Foo219FooOverlayClassBase
FooOverlayClassBase.Type
Foo2
<Declaration>public class FooOverlayClassBase</Declaration>
"
    );
}

#[rstest]
#[case(3, 20, "source.lang.swift.decl.class", "FooOverlayClassBase", "FooOverlayClassBase.Type")]
#[case(18, 20, "source.lang.swift.decl.class", "FooOverlayClassDerived", "FooOverlayClassDerived.Type")]
#[case(18, 1, "source.lang.swift.decl.class", "FooOverlayClassDerived", "FooOverlayClassDerived.Type")]
#[case(7, 16, "source.lang.swift.decl.var.instance", "count", "Int")]
#[case(7, 23, "source.lang.swift.ref.struct", "Int", "Int.Type")]
#[case(11, 17, "source.lang.swift.decl.function.method.instance", "f", "(FooOverlayClassBase) -> () -> ()")]
#[case(5, 12, "source.lang.swift.decl.function.constructor", "init", "FooOverlayClassBase.Type -> () -> FooOverlayClassBase")]
#[case(1, 8, "source.lang.swift.ref.module", "Foo", "module<Foo>")]
fn test_cursor_positions(
    #[case] line: u32,
    #[case] column: u32,
    #[case] kind: &str,
    #[case] name: &str,
    #[case] type_name: &str,
) {
    let mut host = open_foo2();
    let info = cursor_at(&mut host, FOO2, line, column).unwrap();
    assert_eq!(info.kind, kind);
    assert_eq!(info.name, name);
    assert_eq!(info.type_name, type_name);
}

#[test]
fn test_method_usr() {
    let mut host = open_foo2();
    let info = cursor_at(&mut host, FOO2, 11, 17).unwrap();
    assert_eq!(info.usr.as_ref(), "s:FC4Foo219FooOverlayClassBase1fFT_T_");
    assert_eq!(info.location.unwrap().to_string(), "11:17-11:18");
}

#[test]
fn test_find_usr_returns_the_cursor_declaration() {
    let mut host = open_foo2();
    let info = cursor_at(&mut host, FOO2, 18, 49).unwrap();
    let response = host
        .handle(Request::FindUsr {
            name: FOO2.to_string(),
            usr: info.usr.to_string(),
        })
        .unwrap();
    let Response::Usr(location) = response else {
        panic!("expected a USR location");
    };
    assert_eq!(Some(location.span), info.location);
}

#[test]
fn test_offset_past_the_end_is_out_of_range() {
    let mut host = open_foo2();
    let len = expected_response("Foo2.swift").len() as u32;

    assert!(cursor(&mut host, FOO2, CursorPosition::Offset(len)).is_err());
    assert!(matches!(
        cursor(&mut host, FOO2, CursorPosition::Offset(len + 10)),
        Err(RequestError::PositionOutOfRange { offset, len: doc_len }) if offset == len + 10 && doc_len == len
    ));
}

#[test]
fn test_cursor_after_close_is_unknown() {
    let mut host = open_foo2();
    host.handle(Request::Close {
        name: FOO2.to_string(),
    })
    .unwrap();
    assert!(matches!(
        cursor_at(&mut host, FOO2, 18, 49),
        Err(RequestError::UnknownDocument(_))
    ));
}
