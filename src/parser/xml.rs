//! Small helpers over roxmltree for IDML documents.
//!
//! IDML wraps each file in a namespaced `idPkg:*` root whose content uses
//! un-namespaced elements of the same local name (`idPkg:Spread` holds
//! `Spread`). Lookups here only match un-namespaced elements.

use crate::error::{Error, Result};
use roxmltree::{Document, Node, ParsingOptions};
use std::fs;
use std::path::Path;

/// Read a file as UTF-8 text.
pub(crate) fn read_xml(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| Error::Xml {
        path: path.to_path_buf(),
        message: format!("not valid UTF-8: {}", e),
    })
}

/// Parse XML text read from `path`.
pub(crate) fn parse<'a>(text: &'a str, path: &Path) -> Result<Document<'a>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options).map_err(|e| Error::Xml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Whether `node` is an un-namespaced element named `name`.
pub(crate) fn is(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace().is_none() && node.tag_name().name() == name
}

/// First direct child element named `name`.
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is(n, name))
}

/// Direct child elements named `name`.
pub(crate) fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| is(n, name))
}

/// Descendant elements named `name`, excluding `node` itself, in document order.
pub(crate) fn descendants<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants().skip(1).filter(move |n| is(n, name))
}

/// Attribute value as an owned string.
pub(crate) fn attr(node: Node, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

/// Text of an element, unless it is empty or only whitespace.
pub(crate) fn text(node: Node) -> Option<String> {
    node.text()
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<idPkg:Spread xmlns:idPkg="http://ns.adobe.com/AdobeInDesign/idml/1.0/packaging" DOMVersion="18.0">
  <Spread Self="uc4">
    <Page Self="ud1" Name="1"/>
    <Rectangle Self="u1"><Image Self="u2"><Link Self="u3"/></Image></Rectangle>
    <Properties><Label>  </Label></Properties>
  </Spread>
</idPkg:Spread>"#;

    #[test]
    fn test_namespace_aware_lookup() {
        let path = PathBuf::from("Spread_uc4.xml");
        let doc = parse(SAMPLE, &path).unwrap();
        let root = doc.root_element();
        assert!(!is(&root, "Spread"));

        let spreads: Vec<_> = descendants(root, "Spread").collect();
        assert_eq!(spreads.len(), 1);
        assert_eq!(attr(spreads[0], "Self").as_deref(), Some("uc4"));

        let page = child(spreads[0], "Page").unwrap();
        assert_eq!(attr(page, "Name").as_deref(), Some("1"));
        assert_eq!(children(spreads[0], "Rectangle").count(), 1);

        let link = descendants(root, "Link").next().unwrap();
        let image = link.parent_element().unwrap();
        assert!(is(&image, "Image"));
        let rectangle = image.parent_element().unwrap();
        assert_eq!(attr(rectangle, "Self").as_deref(), Some("u1"));
    }

    #[test]
    fn test_whitespace_text_is_none() {
        let path = PathBuf::from("x.xml");
        let doc = parse(SAMPLE, &path).unwrap();
        let label = descendants(doc.root_element(), "Label").next().unwrap();
        assert_eq!(text(label), None);
    }

    #[test]
    fn test_parse_error_names_file() {
        let path = PathBuf::from("Stories/Story_u1.xml");
        let err = parse("<Story", &path).unwrap_err();
        assert!(matches!(err, Error::Xml { ref path, .. } if path.ends_with("Story_u1.xml")));
    }
}
