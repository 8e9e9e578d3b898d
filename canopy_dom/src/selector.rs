// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal CSS-style selector matching over [`ElementData`].
//!
//! ## Grammar
//!
//! A selector is a comma-separated list of compound selectors. A compound selector is an
//! optional tag name (or `*`) followed by any number of `#id` and `.class` segments, with no
//! whitespace inside the compound:
//!
//! ```text
//! selector  = compound ("," compound)*
//! compound  = (tag | "*")? ("#" name | "." name)*
//! ```
//!
//! There are no combinators; matching is against a single element's data. Names are matched
//! case-sensitively. A compound that does not parse (for example a bare `#` or two `#id`
//! segments) matches nothing, as does the empty selector — callers that want "match
//! everything" semantics must handle the empty string themselves before calling in here.

use crate::types::ElementData;

/// Whether `data` matches any compound in the comma-separated `selector` list.
pub fn matches(data: &ElementData, selector: &str) -> bool {
    selector.split(',').any(|compound| {
        let compound = compound.trim();
        !compound.is_empty() && matches_compound(data, compound)
    })
}

struct Compound<'a> {
    tag: Option<&'a str>,
    id: Option<&'a str>,
    classes: Vec<&'a str>,
}

fn matches_compound(data: &ElementData, compound: &str) -> bool {
    let Some(c) = parse_compound(compound) else {
        return false;
    };
    c.tag.is_none_or(|t| t == data.tag)
        && c.id.is_none_or(|i| data.id.as_deref() == Some(i))
        && c.classes.iter().all(|class| data.has_class(class))
}

fn parse_compound(s: &str) -> Option<Compound<'_>> {
    let mut c = Compound {
        tag: None,
        id: None,
        classes: Vec::new(),
    };
    let mut rest = s;
    if !rest.starts_with(['#', '.']) {
        let end = rest.find(['#', '.']).unwrap_or(rest.len());
        let (tag, tail) = rest.split_at(end);
        if tag != "*" {
            c.tag = Some(tag);
        }
        rest = tail;
    }
    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['#', '.']).unwrap_or(body.len());
        let (name, tail) = body.split_at(end);
        if name.is_empty() {
            return None;
        }
        match marker {
            // Two id segments can never match a single element; treat as unparseable.
            '#' => {
                if c.id.replace(name).is_some() {
                    return None;
                }
            }
            '.' => c.classes.push(name),
            _ => return None,
        }
        rest = tail;
    }
    Some(c)
}
