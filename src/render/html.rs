//! HTML renderer — a single self-contained page.
//!
//! Layout follows the reference output: optional readme fragment, a striped
//! table of contents, then one section per type with a definition block,
//! member summary tables and member detail blocks. Every type and member
//! gets a stable anchor derived from its comment key.

use crate::anchor::{anchor, href};
use crate::index::CommentIndex;
use crate::mapper::{display_cref, display_type_name, member_key, type_key};
use crate::metadata::{Assembly, MemberDesc, MemberTarget, TypeDesc};
use crate::model::{CommentEntry, DocNode, ListBlock};
use crate::render::RenderOptions;
use std::collections::HashSet;

const MEMBER_GROUPS: &[(MemberTarget, &str)] = &[
    (MemberTarget::Constructor, "Constructors"),
    (MemberTarget::Field, "Fields"),
    (MemberTarget::Property, "Properties"),
    (MemberTarget::Method, "Methods"),
    (MemberTarget::Event, "Events"),
];

/// Browser reset baked into the page so it renders the same standalone.
const CSS_RESET: &str = "/*! normalize.css v8.0.1 | MIT License | github.com/necolas/normalize.css */html{line-height:1.15;-webkit-text-size-adjust:100%}body{margin:0}main{display:block}h1{font-size:2em;margin:.67em 0}hr{box-sizing:content-box;height:0;overflow:visible}pre{font-family:monospace,monospace;font-size:1em}a{background-color:transparent}abbr[title]{border-bottom:none;text-decoration:underline;text-decoration:underline dotted}b,strong{font-weight:bolder}code,kbd,samp{font-family:monospace,monospace;font-size:1em}small{font-size:80%}sub,sup{font-size:75%;line-height:0;position:relative;vertical-align:baseline}sub{bottom:-.25em}sup{top:-.5em}img{border-style:none}button,input,optgroup,select,textarea{font-family:inherit;font-size:100%;line-height:1.15;margin:0}button,input{overflow:visible}button,select{text-transform:none}[type=button],[type=reset],[type=submit],button{-webkit-appearance:button}[type=button]::-moz-focus-inner,[type=reset]::-moz-focus-inner,[type=submit]::-moz-focus-inner,button::-moz-focus-inner{border-style:none;padding:0}[type=button]:-moz-focusring,[type=reset]:-moz-focusring,[type=submit]:-moz-focusring,button:-moz-focusring{outline:1px dotted ButtonText}fieldset{padding:.35em .75em .625em}legend{box-sizing:border-box;color:inherit;display:table;max-width:100%;padding:0;white-space:normal}progress{vertical-align:baseline}textarea{overflow:auto}[type=checkbox],[type=radio]{box-sizing:border-box;padding:0}[type=number]::-webkit-inner-spin-button,[type=number]::-webkit-outer-spin-button{height:auto}[type=search]{-webkit-appearance:textfield;outline-offset:-2px}[type=search]::-webkit-search-decoration{-webkit-appearance:none}::-webkit-file-upload-button{-webkit-appearance:button;font:inherit}details{display:block}summary{display:list-item}template{display:none}[hidden]{display:none}";

const DEFAULT_STYLES: &str = "\
body { font-family: system-ui, sans-serif; max-width: 64em; margin: 2em auto; padding: 0 1em; line-height: 1.5; }
code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }
pre { background: #f4f4f4; padding: 1em; border-radius: 5px; overflow-x: auto; }
pre code { padding: 0; }
table { border-collapse: collapse; width: 100%; margin: 0.5em 0; }
th, td { text-align: left; padding: 0.4em 0.6em; border-bottom: 1px solid #ddd; }
table.striped tbody tr:nth-child(odd) { background: #fafafa; }
h1 { border-bottom: 2px solid #eee; padding-bottom: 0.2em; }
hr { border: none; border-top: 1px solid #ddd; margin: 2em 0; }
";

struct Page<'a> {
    assembly: &'a Assembly,
    index: &'a CommentIndex,
    opts: &'a RenderOptions,
    /// Normalized comment keys of every documented type and member. A
    /// cross-reference resolves to an anchor only when its target is here.
    targets: HashSet<String>,
}

impl<'a> Page<'a> {
    fn new(assembly: &'a Assembly, index: &'a CommentIndex, opts: &'a RenderOptions) -> Page<'a> {
        let mut targets = HashSet::new();
        for ty in assembly.documented_types() {
            targets.insert(type_key(ty));
            // Only members that actually render get anchors; linking to a
            // compiler-generated member would produce a dead reference.
            for member in &ty.members {
                if member.is_compiler_generated() {
                    continue;
                }
                targets.insert(member_key(ty, member));
            }
        }
        Page {
            assembly,
            index,
            opts,
            targets,
        }
    }

    /// Anchor reference for a cref when it names something in this assembly.
    fn resolve(&self, cref: &str) -> Option<String> {
        let key = crate::parser::id::normalize_key(cref);
        self.targets.contains(&key).then(|| href(&key))
    }
}

pub fn render(assembly: &Assembly, index: &CommentIndex, opts: &RenderOptions) -> String {
    let page = Page::new(assembly, index, opts);
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(&assembly.name)));
    out.push_str("<style>\n");
    match opts.styles.as_deref() {
        // A caller stylesheet replaces the built-in one wholesale, reset
        // included.
        Some(css) => out.push_str(css),
        None => {
            out.push_str(CSS_RESET);
            out.push('\n');
            out.push_str(DEFAULT_STYLES);
        }
    }
    out.push_str("</style>\n</head>\n<body>\n");

    if let Some(ref readme) = opts.readme {
        // Caller-supplied HTML fragment, included verbatim.
        out.push_str(readme);
        out.push('\n');
    }

    out.push_str(&format!("<h1>{}</h1>\n", escape(&assembly.name)));
    if let Some(ref version) = assembly.version {
        out.push_str(&format!("<p>Version {}</p>\n", escape(version)));
    }

    out.push_str(&render_toc(&page));

    for ty in assembly.documented_types() {
        out.push_str(&render_type(&page, ty));
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_toc(page: &Page) -> String {
    let mut out = String::new();
    out.push_str("<h2>Contents</h2>\n");
    out.push_str("<table class=\"striped\">\n<thead>\n<tr><th>Type</th><th>Description</th></tr>\n</thead>\n<tbody>\n");
    for ty in page.assembly.documented_types() {
        let key = type_key(ty);
        let summary = page
            .index
            .lookup(&key)
            .map(|entry| render_nodes(page, &entry.summary))
            .unwrap_or_default();
        out.push_str(&format!(
            "<tr><td><a href=\"{}\">{}</a></td><td>{}</td></tr>\n",
            href(&key),
            escape(&type_display(ty)),
            summary
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn render_type(page: &Page, ty: &TypeDesc) -> String {
    let key = type_key(ty);
    let entry = page.index.lookup(&key);
    let mut out = String::new();

    out.push_str("<hr/>\n");
    out.push_str(&format!(
        "<h1 id=\"{}\">{}: {}</h1>\n",
        anchor(&key),
        escape(&capitalize(&ty.kind)),
        escape(&type_display(ty))
    ));

    out.push_str(&render_definition(page, ty));

    match entry {
        Some(entry) => {
            out.push_str(&render_body(page, entry));
        }
        None if page.opts.debug => {
            out.push_str(&format!("<!-- asmdoc: no documentation for {} -->\n", key));
        }
        None => {}
    }

    if !ty.generic_parameters.is_empty() {
        out.push_str(&render_type_params(page, &ty.generic_parameters, entry));
    }

    // Summary tables per member group, then the detail blocks.
    for &(kind, heading) in MEMBER_GROUPS {
        let members = ty.members_of(kind);
        if members.is_empty() {
            continue;
        }
        out.push_str(&format!("<h2>{heading}</h2>\n"));
        out.push_str("<table class=\"striped\">\n<thead>\n<tr><th>Name</th><th>Description</th></tr>\n</thead>\n<tbody>\n");
        for member in &members {
            let mkey = member_key(ty, member);
            let summary = page
                .index
                .lookup(&mkey)
                .map(|entry| render_nodes(page, &entry.summary))
                .unwrap_or_default();
            out.push_str(&format!(
                "<tr><td><a href=\"{}\">{}</a></td><td>{}</td></tr>\n",
                href(&mkey),
                escape(&member_display(ty, member)),
                summary
            ));
        }
        out.push_str("</tbody>\n</table>\n");
    }

    for &(kind, _) in MEMBER_GROUPS {
        for member in ty.members_of(kind) {
            out.push_str(&render_member(page, ty, member));
        }
    }

    out
}

fn render_definition(page: &Page, ty: &TypeDesc) -> String {
    let mut out = String::new();
    out.push_str("<h2>Definition</h2>\n<ul>\n");
    out.push_str(&format!("<li>Namespace: {}</li>\n", escape(&ty.namespace)));
    out.push_str(&format!(
        "<li>Assembly: {}</li>\n",
        escape(&page.assembly.name)
    ));
    if let Some(ref base) = ty.base_type {
        out.push_str(&format!("<li>Inherits: {}</li>\n", type_ref(page, base)));
    }
    if !ty.interfaces.is_empty() {
        let refs: Vec<String> = ty.interfaces.iter().map(|i| type_ref(page, i)).collect();
        out.push_str(&format!("<li>Implements: {}</li>\n", refs.join(", ")));
    }
    let subclasses = page.assembly.subclasses_of(&ty.full_name);
    if !subclasses.is_empty() {
        let refs: Vec<String> = subclasses
            .iter()
            .map(|s| type_ref(page, &s.full_name))
            .collect();
        out.push_str(&format!("<li>Derived: {}</li>\n", refs.join(", ")));
    }
    out.push_str("</ul>\n");
    out
}

/// Link to a type by full name when it lives in this assembly, otherwise
/// plain display text.
fn type_ref(page: &Page, full_name: &str) -> String {
    let display = escape(&display_type_name(full_name));
    match page.resolve(&format!("T:{full_name}")) {
        Some(link) => format!("<a href=\"{link}\">{display}</a>"),
        None => display,
    }
}

fn render_type_params(
    page: &Page,
    names: &[String],
    entry: Option<&CommentEntry>,
) -> String {
    let mut out = String::new();
    out.push_str("<h2>Type parameters</h2>\n");
    out.push_str("<table class=\"striped\">\n<thead>\n<tr><th>Name</th><th>Description</th></tr>\n</thead>\n<tbody>\n");
    for name in names {
        let docs = entry
            .and_then(|e| e.type_param(name))
            .map(|nodes| render_nodes(page, nodes))
            .unwrap_or_default();
        out.push_str(&format!(
            "<tr><td><code>{}</code></td><td>{}</td></tr>\n",
            escape(name),
            docs
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn render_member(page: &Page, ty: &TypeDesc, member: &MemberDesc) -> String {
    let key = member_key(ty, member);
    let entry = page.index.lookup(&key);
    let mut out = String::new();

    out.push_str(&format!(
        "<h3 id=\"{}\">{}: {}</h3>\n",
        anchor(&key),
        crate::mapper::kind_name(member.kind),
        escape(&member_display(ty, member))
    ));
    out.push_str(&format!(
        "<pre><code>{}</code></pre>\n",
        escape(&signature(member))
    ));

    match entry {
        Some(entry) => out.push_str(&render_body(page, entry)),
        None if page.opts.debug => {
            out.push_str(&format!("<!-- asmdoc: no documentation for {} -->\n", key));
        }
        None => {}
    }

    if !member.generic_parameters.is_empty() {
        out.push_str(&render_type_params(page, &member.generic_parameters, entry));
    }

    if !member.parameters.is_empty() {
        out.push_str("<h4>Parameters</h4>\n");
        out.push_str("<table class=\"striped\">\n<thead>\n<tr><th>Name</th><th>Type</th><th>Description</th></tr>\n</thead>\n<tbody>\n");
        for param in &member.parameters {
            // Exact, case-sensitive name match against <param> entries.
            let docs = entry
                .and_then(|e| e.param(&param.name))
                .map(|nodes| render_nodes(page, nodes))
                .unwrap_or_default();
            out.push_str(&format!(
                "<tr><td><code>{}</code></td><td>{}</td><td>{}</td></tr>\n",
                escape(&param.name),
                escape(&display_type_name(&param.type_name)),
                docs
            ));
        }
        out.push_str("</tbody>\n</table>\n");
    }

    if let Some(ref return_type) = member.return_type {
        if return_type != "System.Void" {
            out.push_str("<h4>Returns</h4>\n");
            out.push_str(&format!(
                "<p><code>{}</code>",
                escape(&display_type_name(return_type))
            ));
            if let Some(returns) = entry.map(|e| &e.returns).filter(|r| !r.is_empty()) {
                out.push_str(&format!(" {}", render_nodes(page, returns)));
            }
            out.push_str("</p>\n");
        }
    }

    if let Some(entry) = entry {
        if !entry.exceptions.is_empty() {
            out.push_str("<h4>Exceptions</h4>\n");
            out.push_str("<table class=\"striped\">\n<thead>\n<tr><th>Exception</th><th>Condition</th></tr>\n</thead>\n<tbody>\n");
            for (cref, nodes) in &entry.exceptions {
                let display = escape(&display_cref(cref));
                let name = match page.resolve(cref) {
                    Some(link) => format!("<a href=\"{link}\">{display}</a>"),
                    None => display,
                };
                out.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td></tr>\n",
                    name,
                    render_nodes(page, nodes)
                ));
            }
            out.push_str("</tbody>\n</table>\n");
        }
    }

    out
}

/// Summary, remarks and examples, in that order.
fn render_body(page: &Page, entry: &CommentEntry) -> String {
    let mut out = String::new();
    if !entry.summary.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", render_nodes(page, &entry.summary)));
    }
    if !entry.remarks.is_empty() {
        out.push_str(&format!(
            "<div>{}</div>\n",
            render_nodes(page, &entry.remarks)
        ));
    }
    for example in &entry.examples {
        out.push_str("<h4>Example</h4>\n");
        out.push_str(&render_nodes(page, example));
        out.push('\n');
    }
    out
}

/// Per-variant dispatch over mixed content.
fn render_nodes(page: &Page, nodes: &[DocNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            DocNode::Text(text) => out.push_str(&escape(text)),
            DocNode::InlineCode(code) => {
                out.push_str(&format!("<code>{}</code>", escape(code)));
            }
            DocNode::Code(code) => {
                out.push_str(&format!(
                    "<pre><code>{}</code></pre>",
                    escape(&normalize_code(code))
                ));
            }
            DocNode::Para(children) => {
                out.push_str(&format!("<p>{}</p>", render_nodes(page, children)));
            }
            DocNode::See { cref, text } => {
                let display = if text.is_empty() {
                    display_cref(cref)
                } else {
                    text.clone()
                };
                match page.resolve(cref) {
                    Some(link) => {
                        out.push_str(&format!("<a href=\"{link}\">{}</a>", escape(&display)));
                    }
                    None => out.push_str(&escape(&display)),
                }
            }
            DocNode::List(list) => out.push_str(&render_list(list)),
        }
    }
    out
}

fn render_list(list: &ListBlock) -> String {
    let mut out = String::new();
    if list.kind.is_empty() {
        out.push_str("<table class=\"striped\">\n");
    } else {
        out.push_str(&format!(
            "<table class=\"striped list-{}\">\n",
            escape(&list.kind)
        ));
    }
    if let Some(ref header) = list.header {
        out.push_str(&format!(
            "<thead>\n<tr><th>{}</th><th>{}</th></tr>\n</thead>\n",
            escape(&header.term),
            escape(&header.description)
        ));
    }
    out.push_str("<tbody>\n");
    for item in &list.items {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(&item.term),
            escape(&item.description)
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

/// Code-block cleanup: drop the leading and trailing blank line when both
/// are present, then strip one shared leading indent character from every
/// line.
fn normalize_code(text: &str) -> String {
    // split('\n') keeps the empty segment after a trailing newline, so a
    // final bare newline counts as a blank last line.
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.len() >= 2
        && lines.first().is_some_and(|l| l.trim().is_empty())
        && lines.last().is_some_and(|l| l.trim().is_empty())
    {
        lines.remove(0);
        lines.pop();
    }

    let indent = lines
        .iter()
        .find(|l| !l.trim().is_empty())
        .and_then(|l| l.chars().next())
        .filter(|c| *c == ' ' || *c == '\t');
    if let Some(indent) = indent {
        let uniform = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .all(|l| l.starts_with(indent));
        if uniform {
            lines = lines
                .iter()
                .map(|l| l.strip_prefix(indent).unwrap_or(l))
                .collect();
        }
    }
    lines.join("\n")
}

/// Display name for a type: bare name with generic parameters in braces.
fn type_display(ty: &TypeDesc) -> String {
    let name = display_type_name(&ty.name);
    if ty.generic_parameters.is_empty() {
        name
    } else {
        format!("{}{{{}}}", name, ty.generic_parameters.join(","))
    }
}

/// Display name for a member: constructors show the type name; generic
/// members show their type parameters; methods show their parameter types.
fn member_display(ty: &TypeDesc, member: &MemberDesc) -> String {
    let mut out = match member.kind {
        MemberTarget::Constructor => display_type_name(&ty.name),
        _ => member.name.clone(),
    };
    if !member.generic_parameters.is_empty() {
        out.push_str(&format!("{{{}}}", member.generic_parameters.join(",")));
    }
    if matches!(member.kind, MemberTarget::Method | MemberTarget::Constructor) {
        let types: Vec<String> = member
            .parameters
            .iter()
            .map(|p| display_type_name(&p.type_name))
            .collect();
        out.push_str(&format!("({})", types.join(", ")));
    }
    out
}

/// Signature line for the detail block.
fn signature(member: &MemberDesc) -> String {
    if let Some(ref display) = member.display {
        return display_type_name(display);
    }
    let mut out = String::new();
    if let Some(ref return_type) = member.return_type {
        out.push_str(&display_type_name(return_type));
        out.push(' ');
    }
    out.push_str(&member.name);
    if !member.generic_parameters.is_empty() {
        out.push_str(&format!("{{{}}}", member.generic_parameters.join(",")));
    }
    if matches!(member.kind, MemberTarget::Method | MemberTarget::Constructor) {
        let params: Vec<String> = member
            .parameters
            .iter()
            .map(|p| format!("{} {}", display_type_name(&p.type_name), p.name))
            .collect();
        out.push_str(&format!("({})", params.join(", ")));
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
