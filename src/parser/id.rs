//! ID-string parser.
//!
//! Comment documents key every entry by an ID string such as
//! `M:Acme.Widget.Add(System.Int32,System.Int32)`: a one-letter kind prefix,
//! a dotted name path, an optional parenthesized argument list, and backtick
//! arity suffixes for generics (`` `N `` on types and enclosing types,
//! ``` ``N ``` on generic members).

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static RE_TYPE_ARITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)`(\d+)$").unwrap());

static RE_MEMBER_ARITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)``(\d+)$").unwrap());

/// Entity kind, derived solely from the prefix before the first `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Namespace,
    Type,
    Field,
    Property,
    Method,
    Event,
    /// Prefix was not one of N/T/F/P/M/E. Not a parse failure; the compiler
    /// emits `!:` entries for unresolvable crefs.
    Unrecognized,
}

impl MemberKind {
    fn from_prefix(prefix: &str) -> MemberKind {
        match prefix {
            "N" => MemberKind::Namespace,
            "T" => MemberKind::Type,
            "F" => MemberKind::Field,
            "P" => MemberKind::Property,
            "M" => MemberKind::Method,
            "E" => MemberKind::Event,
            _ => MemberKind::Unrecognized,
        }
    }

    /// True for kinds that belong to an enclosing type.
    pub fn is_member(self) -> bool {
        matches!(
            self,
            MemberKind::Field | MemberKind::Property | MemberKind::Method | MemberKind::Event
        )
    }
}

/// Structured form of an ID string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub kind: MemberKind,
    /// Dot-separated namespace path, possibly empty.
    pub namespace: String,
    /// Enclosing type name, empty for top-level types and namespaces.
    pub parent: String,
    /// Bare name with any arity suffix stripped.
    pub name: String,
    /// Generic parameter count on the enclosing type. Rendered output shows
    /// reflected parameter names rather than counts.
    #[allow(dead_code)]
    pub parent_arity: u32,
    /// Generic parameter count on the entity itself.
    #[allow(dead_code)]
    pub arity: u32,
    /// Interior of the parenthesized argument list, verbatim. Empty when no
    /// list is present. Individual argument types are never parsed here;
    /// display matching uses reflected parameter lists instead.
    pub arguments: String,
}

impl Identifier {
    /// Parses an ID string.
    ///
    /// Fails with [`Error::MalformedIdentifier`] when the input has no `:`,
    /// an empty remainder, an unbalanced argument list, a name path of four
    /// or more segments, or a non-numeric arity suffix. An unrecognized kind
    /// prefix is not a failure.
    pub fn parse(raw: &str) -> Result<Identifier> {
        let malformed = || Error::MalformedIdentifier(raw.to_string());

        let (prefix, rest) = raw.split_once(':').ok_or_else(malformed)?;
        if rest.is_empty() {
            return Err(malformed());
        }
        let kind = MemberKind::from_prefix(prefix);

        // Split the name path from the optional argument list at the first
        // '('. A present list must end with ')'.
        let (path, arguments) = match rest.split_once('(') {
            Some((path, args)) => {
                let args = args.strip_suffix(')').ok_or_else(malformed)?;
                (path, args.to_string())
            }
            None => (rest, String::new()),
        };
        if path.is_empty() {
            return Err(malformed());
        }

        let segments: Vec<&str> = path.split('.').collect();
        let (namespace, parent, name) = match segments.as_slice() {
            [name] => (String::new(), "", *name),
            [namespace, name] => (namespace.to_string(), "", *name),
            [namespace, parent, name] => (namespace.to_string(), *parent, *name),
            // Deeper nesting is ambiguous between namespace and enclosing
            // types; reject rather than guess.
            _ => return Err(malformed()),
        };

        let (parent, parent_arity) = if parent.is_empty() {
            (String::new(), 0)
        } else {
            strip_arity(parent, &RE_TYPE_ARITY, raw)?
        };

        // Types carry `N arity; members carry ``N. Namespaces and
        // unrecognized kinds take the name verbatim.
        let (name, arity) = match kind {
            MemberKind::Type => strip_arity(name, &RE_TYPE_ARITY, raw)?,
            k if k.is_member() => strip_arity(name, &RE_MEMBER_ARITY, raw)?,
            _ => (name.to_string(), 0),
        };

        Ok(Identifier {
            kind,
            namespace,
            parent,
            name,
            parent_arity,
            arity,
            arguments,
        })
    }
}

/// Strips a trailing arity suffix matched by `re`, returning the bare
/// segment and the captured count. A backtick that is not part of a valid
/// suffix is malformed.
fn strip_arity(segment: &str, re: &Regex, raw: &str) -> Result<(String, u32)> {
    if let Some(caps) = re.captures(segment) {
        let base = caps[1].to_string();
        if base.contains('`') {
            return Err(Error::MalformedIdentifier(raw.to_string()));
        }
        let arity: u32 = caps[2]
            .parse()
            .map_err(|_| Error::MalformedIdentifier(raw.to_string()))?;
        return Ok((base, arity));
    }
    if segment.contains('`') {
        return Err(Error::MalformedIdentifier(raw.to_string()));
    }
    Ok((segment.to_string(), 0))
}

/// Canonical lookup form of an ID string: all whitespace removed, and an
/// empty argument list `()` elided so that `Foo()` and `Foo` are the same
/// key. Comment documents already omit empty lists and contain no interior
/// whitespace; generated keys are normalized identically before comparison.
pub fn normalize_key(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    stripped.replace("()", "")
}
