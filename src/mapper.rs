//! Metadata-to-identifier mapping.
//!
//! Free functions that turn reflected descriptors into the comment keys the
//! index is built on, plus the display substitutions used for link text.
//! These are pure, total string transformations: they run for every member
//! of every type in a pass, and a malformed descriptor must not abort the
//! run, so nothing here can fail.

use crate::metadata::{MemberDesc, MemberTarget, TypeDesc};
use crate::parser::id::{normalize_key, Identifier};
use regex::Regex;
use std::sync::LazyLock;

static RE_CLR_ARITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`+\d+").unwrap());

/// One-letter kind prefix. Constructors document under `M:` like methods.
pub fn kind_prefix(kind: MemberTarget) -> &'static str {
    match kind {
        MemberTarget::Property => "P",
        MemberTarget::Method | MemberTarget::Constructor => "M",
        MemberTarget::Field => "F",
        MemberTarget::Event => "E",
    }
}

/// Human-readable kind name for headings.
pub fn kind_name(kind: MemberTarget) -> &'static str {
    match kind {
        MemberTarget::Property => "Property",
        MemberTarget::Method => "Method",
        MemberTarget::Constructor => "Constructor",
        MemberTarget::Field => "Field",
        MemberTarget::Event => "Event",
    }
}

/// Comment key for a type: `T:` plus the namespace-qualified name.
pub fn type_key(ty: &TypeDesc) -> String {
    normalize_key(&format!("T:{}", ty.full_name))
}

/// Comment key for a member of `ty`, normalized for index lookup.
pub fn member_key(ty: &TypeDesc, member: &MemberDesc) -> String {
    let display = match &member.display {
        Some(d) => d.clone(),
        None => synthesized_display(member),
    };

    // The reflected display form puts the return type first, separated from
    // the name by the first space. Drop it.
    let mut name = match display.find(' ') {
        Some(pos) => display[pos + 1..].to_string(),
        None => display,
    };

    // '.' in the member name becomes '#' in comment keys (e.g. `#ctor`).
    // Only the part before the argument list is escaped; argument type
    // names keep their dots.
    name = match name.split_once('(') {
        Some((head, tail)) => format!("{}({}", head.replace('.', "#"), tail),
        None => name.replace('.', "#"),
    };

    let qualified = format!("{}:{}.{}", kind_prefix(member.kind), ty.full_name, name);
    normalize_key(&qualified)
}

/// Canonical display form when the reflection layer supplies none:
/// `Name``N(Type1,Type2)`, no return type, no whitespace.
fn synthesized_display(member: &MemberDesc) -> String {
    let mut out = member.name.clone();
    if !member.generic_parameters.is_empty() {
        out.push_str(&format!("``{}", member.generic_parameters.len()));
    }
    out.push('(');
    let types: Vec<&str> = member
        .parameters
        .iter()
        .map(|p| p.type_name.as_str())
        .collect();
    out.push_str(&types.join(","));
    out.push(')');
    out
}

/// Human-readable form of a CLR type name for rendered output: backtick
/// arity markers are dropped and generic-argument brackets become braces
/// (`MyList`1[T]` → `MyList{T}`). Applied to link and signature text only,
/// never to lookup keys.
pub fn display_type_name(clr_name: &str) -> String {
    RE_CLR_ARITY
        .replace_all(clr_name, "")
        .replace('[', "{")
        .replace(']', "}")
}

/// Display text for a cross-reference. Members show the bare member name
/// plus its argument list; types and namespaces show the qualified path
/// with arity markers stripped. A cref that does not parse falls back to
/// the raw string without its kind prefix.
pub fn display_cref(cref: &str) -> String {
    if let Ok(id) = Identifier::parse(cref) {
        if id.kind.is_member() {
            // Comment ids escape '.' in member names as '#' (`#ctor`).
            let mut out = id.name.replace('#', ".");
            if !id.arguments.is_empty() {
                out.push('(');
                out.push_str(&id.arguments);
                out.push(')');
            }
            return out;
        }
        let mut out = String::new();
        for part in [id.namespace.as_str(), id.parent.as_str(), id.name.as_str()] {
            if part.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(part);
        }
        return out;
    }
    let bare = match cref.split_once(':') {
        Some((_, rest)) => rest,
        None => cref,
    };
    display_type_name(bare)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ParamDesc;

    fn ty(full_name: &str) -> TypeDesc {
        serde_json::from_str(&format!(
            r#"{{ "name": "X", "fullName": "{full_name}" }}"#
        ))
        .unwrap()
    }

    fn method(name: &str, display: Option<&str>) -> MemberDesc {
        MemberDesc {
            name: name.to_string(),
            kind: MemberTarget::Method,
            display: display.map(str::to_string),
            parameters: Vec::new(),
            return_type: None,
            generic_parameters: Vec::new(),
            attributes: Vec::new(),
        }
    }

    #[test]
    fn type_key_is_prefixed_full_name() {
        assert_eq!(type_key(&ty("Acme.Widget")), "T:Acme.Widget");
    }

    #[test]
    fn member_key_drops_return_type_and_whitespace() {
        let m = method("Add", Some("System.Int32 Add(System.Int32, System.Int32)"));
        assert_eq!(
            member_key(&ty("Acme.Test"), &m),
            "M:Acme.Test.Add(System.Int32,System.Int32)"
        );
    }

    #[test]
    fn zero_parameter_method_elides_parens() {
        let m = method("Run", Some("System.Void Run()"));
        assert_eq!(member_key(&ty("Acme.Test"), &m), "M:Acme.Test.Run");
    }

    #[test]
    fn constructor_name_is_hash_escaped() {
        let mut m = method(".ctor", Some("Void .ctor(System.String)"));
        m.kind = MemberTarget::Constructor;
        assert_eq!(
            member_key(&ty("Acme.Test"), &m),
            "M:Acme.Test.#ctor(System.String)"
        );
    }

    #[test]
    fn argument_dots_are_not_escaped() {
        let m = method("Load", Some("Void Load(System.IO.Stream)"));
        let key = member_key(&ty("Acme.Test"), &m);
        assert_eq!(key, "M:Acme.Test.Load(System.IO.Stream)");
    }

    #[test]
    fn synthesized_display_from_parameters() {
        let mut m = method("Map", None);
        m.generic_parameters = vec!["T".to_string()];
        m.parameters = vec![ParamDesc {
            name: "input".to_string(),
            type_name: "System.String".to_string(),
        }];
        assert_eq!(
            member_key(&ty("Acme.Test"), &m),
            "M:Acme.Test.Map``1(System.String)"
        );
    }

    #[test]
    fn property_and_field_prefixes() {
        let mut m = method("Count", Some("Int32 Count"));
        m.kind = MemberTarget::Property;
        assert_eq!(member_key(&ty("Acme.Test"), &m), "P:Acme.Test.Count");
        m.kind = MemberTarget::Field;
        assert_eq!(member_key(&ty("Acme.Test"), &m), "F:Acme.Test.Count");
    }

    #[test]
    fn display_type_name_rewrites_generics() {
        assert_eq!(display_type_name("Acme.MyList`1[T]"), "Acme.MyList{T}");
        assert_eq!(display_type_name("System.String"), "System.String");
    }

    #[test]
    fn display_cref_strips_prefix() {
        assert_eq!(display_cref("T:System.Exception"), "System.Exception");
        assert_eq!(display_cref("System.Exception"), "System.Exception");
    }

    #[test]
    fn display_cref_shows_member_name_and_arguments() {
        assert_eq!(
            display_cref("M:Acme.Test.Add(System.Int32,System.Int32)"),
            "Add(System.Int32,System.Int32)"
        );
        assert_eq!(display_cref("M:Acme.Test.#ctor"), ".ctor");
        assert_eq!(display_cref("P:Acme.Test.Count"), "Count");
    }

    #[test]
    fn display_cref_strips_arity_from_generic_types() {
        assert_eq!(display_cref("T:Acme.MyList`1"), "Acme.MyList");
    }

    // Name paths too deep to parse still get readable display text.
    #[test]
    fn display_cref_falls_back_on_deep_paths() {
        assert_eq!(
            display_cref("T:System.Collections.Generic.List`1"),
            "System.Collections.Generic.List"
        );
    }
}
