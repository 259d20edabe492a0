//! XML comments reader.
//!
//! Loads the whole comments document eagerly into the [`CommentDoc`] model.
//! The expected shape is a `<doc>` root with an `<assembly><name>` element
//! and a `<members>` list; each `<member>` carries a `name` attribute holding
//! the raw ID string plus optional summary/remarks/param/typeparam/returns/
//! exception/example children with mixed text and element content.

use crate::error::{Error, Result};
use crate::model::{CommentDoc, CommentEntry, DocNode, ListBlock, ListItem};
use sxd_document::dom::{ChildOfElement, ChildOfRoot, Element};
use sxd_document::parser;

/// Parses a comments document. Members without a `name` attribute are
/// skipped with a warning; everything else is taken as-is. ID strings are
/// not validated here; that happens when the index is built.
pub fn parse_comments(xml: &str) -> Result<CommentDoc> {
    let package = parser::parse(xml).map_err(|e| Error::InvalidComments(e.to_string()))?;
    let document = package.as_document();

    let root = document
        .root()
        .children()
        .into_iter()
        .find_map(|c| match c {
            ChildOfRoot::Element(e) => Some(e),
            _ => None,
        })
        .ok_or_else(|| Error::InvalidComments("document has no root element".to_string()))?;
    if root.name().local_part() != "doc" {
        return Err(Error::InvalidComments(format!(
            "expected <doc> root, found <{}>",
            root.name().local_part()
        )));
    }

    let mut doc = CommentDoc::default();

    if let Some(assembly) = child_element(root, "assembly") {
        if let Some(name) = child_element(assembly, "name") {
            doc.assembly = text_of(name).trim().to_string();
        }
    }

    if let Some(members) = child_element(root, "members") {
        for member in child_elements(members, "member") {
            match member.attribute_value("name") {
                Some(name) => {
                    doc.members.push((name.to_string(), read_entry(member)));
                }
                None => log::warn!("skipping <member> without a name attribute"),
            }
        }
    }

    Ok(doc)
}

fn read_entry(member: Element<'_>) -> CommentEntry {
    let mut entry = CommentEntry::default();
    for child in member.children() {
        let ChildOfElement::Element(e) = child else {
            continue;
        };
        match e.name().local_part() {
            "summary" => entry.summary = mixed_content(e),
            "remarks" => entry.remarks = mixed_content(e),
            "returns" => entry.returns = mixed_content(e),
            "param" => {
                let name = e.attribute_value("name").unwrap_or_default().to_string();
                entry.params.push((name, mixed_content(e)));
            }
            "typeparam" => {
                let name = e.attribute_value("name").unwrap_or_default().to_string();
                entry.type_params.push((name, mixed_content(e)));
            }
            "exception" => {
                let cref = e.attribute_value("cref").unwrap_or_default().to_string();
                entry.exceptions.push((cref, mixed_content(e)));
            }
            "example" => entry.examples.push(mixed_content(e)),
            other => log::debug!("ignoring unknown comment element <{other}>"),
        }
    }
    entry
}

/// Reads mixed text/element content in document order.
fn mixed_content(element: Element<'_>) -> Vec<DocNode> {
    let mut nodes = Vec::new();
    for child in element.children() {
        match child {
            ChildOfElement::Text(t) => {
                // Skip pure indentation between elements; meaningful text
                // around inline nodes keeps its surrounding spaces.
                if !t.text().trim().is_empty() {
                    nodes.push(DocNode::Text(t.text().to_string()));
                }
            }
            ChildOfElement::Element(e) => match e.name().local_part() {
                "code" => nodes.push(DocNode::Code(text_of(e))),
                "c" => nodes.push(DocNode::InlineCode(text_of(e))),
                "para" => nodes.push(DocNode::Para(mixed_content(e))),
                "see" | "seealso" => nodes.push(DocNode::See {
                    cref: e.attribute_value("cref").unwrap_or_default().to_string(),
                    text: text_of(e).trim().to_string(),
                }),
                "list" => nodes.push(DocNode::List(read_list(e))),
                // Unknown inline markup degrades to its nested content.
                _ => nodes.extend(mixed_content(e)),
            },
            _ => {}
        }
    }
    nodes
}

fn read_list(list: Element<'_>) -> ListBlock {
    let mut block = ListBlock {
        kind: list.attribute_value("type").unwrap_or_default().to_string(),
        ..Default::default()
    };
    for child in list.children() {
        let ChildOfElement::Element(e) = child else {
            continue;
        };
        match e.name().local_part() {
            "listheader" => block.header = Some(read_list_item(e)),
            "item" => block.items.push(read_list_item(e)),
            _ => {}
        }
    }
    block
}

fn read_list_item(item: Element<'_>) -> ListItem {
    let mut out = ListItem::default();
    for child in item.children() {
        let ChildOfElement::Element(e) = child else {
            continue;
        };
        match e.name().local_part() {
            "term" => out.term = text_of(e).trim().to_string(),
            "description" => out.description = text_of(e).trim().to_string(),
            _ => {}
        }
    }
    out
}

/// Concatenated text of all descendant text nodes, verbatim.
fn text_of(element: Element<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        match child {
            ChildOfElement::Text(t) => out.push_str(t.text()),
            ChildOfElement::Element(e) => out.push_str(&text_of(e)),
            _ => {}
        }
    }
    out
}

fn child_element<'d>(parent: Element<'d>, name: &str) -> Option<Element<'d>> {
    parent.children().into_iter().find_map(|c| match c {
        ChildOfElement::Element(e) if e.name().local_part() == name => Some(e),
        _ => None,
    })
}

fn child_elements<'d>(parent: Element<'d>, name: &str) -> Vec<Element<'d>> {
    parent
        .children()
        .into_iter()
        .filter_map(|c| match c {
            ChildOfElement::Element(e) if e.name().local_part() == name => Some(e),
            _ => None,
        })
        .collect()
}
