//! The built-in `Swift` module.
//!
//! A small declaration-only rendition of the standard library, always loaded
//! so that references like `Int` or `[String]` resolve without an SDK.

use std::path::PathBuf;

use crate::hir::STDLIB_MODULE;

/// Path under which the built-in module is registered; it never exists on disk.
pub fn stdlib_path() -> PathBuf {
    PathBuf::from(format!("<builtin>/{STDLIB_MODULE}.swift"))
}

pub const STDLIB_SOURCE: &str = r#"
public protocol Any {}

public protocol AnyObject {}

public typealias Void = ()

public protocol Equatable {
    static func ==(lhs: Self, rhs: Self) -> Bool
}

public protocol Hashable : Equatable {
    var hashValue: Int { get }
}

public protocol Comparable : Equatable {
    static func <(lhs: Self, rhs: Self) -> Bool
}

public protocol Error {}

public protocol CustomStringConvertible {
    var description: String { get }
}

public protocol RawRepresentable {
    associatedtype RawValue
    init?(rawValue: RawValue)
    var rawValue: RawValue { get }
}

public struct Int : Hashable, Comparable {
    public init() {}
    public var hashValue: Int { return self }
}

public struct Double : Hashable, Comparable {
    public init() {}
    public var hashValue: Int { return 0 }
}

public struct Float : Hashable, Comparable {
    public init() {}
    public var hashValue: Int { return 0 }
}

public struct Bool : Hashable {
    public init() {}
    public var hashValue: Int { return 0 }
}

public struct Character : Hashable, Comparable {
    public var hashValue: Int { return 0 }
}

public struct String : Hashable, Comparable, CustomStringConvertible {
    public init() {}
    public var hashValue: Int { return 0 }
    public var description: String { return self }
    public var isEmpty: Bool { return true }
}

public struct Array<Element> {
    public init() {}
    public var count: Int { return 0 }
    public subscript(index: Int) -> Element { get { fatalError() } set {} }
}

public struct Dictionary<Key : Hashable, Value> {
    public init() {}
    public var count: Int { return 0 }
    public subscript(key: Key) -> Value? { get { return nil } set {} }
}

public struct Set<Element : Hashable> {
    public init() {}
    public var count: Int { return 0 }
}

public enum Optional<Wrapped> {
    case none
    case some(Wrapped)
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_stdlib_parses_cleanly() {
        let parse = parse(STDLIB_SOURCE);
        assert!(parse.ok(), "stdlib errors: {:?}", parse.errors);
    }

    #[test]
    fn test_stdlib_declares_core_types() {
        let parse = parse(STDLIB_SOURCE);
        let result = crate::hir::extract_symbols(&parse.source_file());
        for name in ["Int", "Double", "Float", "String", "Bool", "Character", "Array", "Dictionary", "Set", "Optional", "Void", "Any", "AnyObject", "Error", "Equatable", "Hashable", "Comparable", "RawRepresentable", "CustomStringConvertible"] {
            assert!(
                result.symbols.iter().any(|s| s.name == name && s.parent.is_none()),
                "{name} missing from the stdlib"
            );
        }
    }
}
