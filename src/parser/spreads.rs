//! `Spreads/*.xml` and `MasterSpreads/*.xml`.

use super::xml;
use crate::error::{Error, Result};
use crate::model::{AffineTransform, Link, Spread, TextFrame};
use roxmltree::Node;
use std::path::Path;

/// Graphic elements that may hold pasted content inside a rectangle.
const GRAPHIC_ELEMENTS: [&str; 3] = ["PDF", "EPS", "Image"];

/// Master spread children that are allowed.
const MASTER_ALLOWED: [&str; 2] = ["Properties", "Page"];

/// Parse one spread file.
pub fn parse_spread(path: &Path) -> Result<Spread> {
    let text = xml::read_xml(path)?;
    parse_spread_str(&text, path)
}

pub(crate) fn parse_spread_str(text: &str, path: &Path) -> Result<Spread> {
    let doc = xml::parse(text, path)?;
    let root = doc.root_element();
    let spread_node = if xml::is(&root, "Spread") {
        root
    } else {
        xml::descendants(root, "Spread")
            .next()
            .ok_or_else(|| Error::Xml {
                path: path.to_path_buf(),
                message: "no Spread element".to_string(),
            })?
    };

    let mut spread = Spread::new(xml::attr(spread_node, "Self").unwrap_or_default());
    spread.file_name = file_name(path);

    if let Some(page) = xml::child(spread_node, "Page") {
        spread.page_id = xml::attr(page, "Self");
        spread.page_name = xml::attr(page, "Name");
        spread.geometric_bounds = xml::attr(page, "GeometricBounds");
    }

    spread.links = xml::descendants(root, "Link").map(parse_link).collect();

    spread.pasted_graphics = xml::descendants(root, "Rectangle")
        .filter(|r| is_pasted_graphic(*r))
        .count();

    for node in root.descendants().filter(|n| n.is_element()) {
        if let Some(story_id) = node.attribute("ParentStory").filter(|s| !s.is_empty()) {
            spread.add_child_story(story_id);
        }
    }

    spread.text_frames = xml::descendants(root, "TextFrame")
        .map(parse_text_frame)
        .collect();

    log::debug!(
        "spread {} ({}): {} links, {} frames, {} pasted graphics",
        spread.id,
        spread.file_name,
        spread.links.len(),
        spread.text_frames.len(),
        spread.pasted_graphics
    );
    Ok(spread)
}

/// Build a link from a `Link` element, its graphic and its container.
pub(crate) fn parse_link(node: Node) -> Link {
    let resource_uri = xml::attr(node, "LinkResourceURI")
        .map(|uri| decode_uri(&uri))
        .unwrap_or_default();
    let image_name = resource_uri
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();

    let mut link = Link::new(xml::attr(node, "Self").unwrap_or_default(), image_name);
    link.resource_uri = resource_uri;
    link.stored_state = xml::attr(node, "StoredState");

    if let Some(graphic) = node.parent_element() {
        link.image_object_style = xml::attr(graphic, "AppliedObjectStyle");
        link.item_transform = transform(graphic, &link.id);

        if let Some(container) = graphic.parent_element() {
            link.container_object_style = xml::attr(container, "AppliedObjectStyle");
            link.container_transform = transform(container, &link.id);
            link.rectangle_id = xml::attr(container, "Self");
        }
    }
    link
}

fn transform(node: Node, link_id: &str) -> Option<AffineTransform> {
    let raw = node.attribute("ItemTransform")?;
    match raw.parse::<AffineTransform>() {
        Ok(t) => Some(t),
        Err(e) => {
            log::warn!("ignoring transform of link {}: {}", link_id, e);
            None
        }
    }
}

fn decode_uri(uri: &str) -> String {
    match urlencoding::decode(uri) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => uri.to_string(),
    }
}

/// A rectangle with no link whose graphic carries inline contents.
fn is_pasted_graphic(rectangle: Node) -> bool {
    if xml::descendants(rectangle, "Link").next().is_some() {
        return false;
    }
    GRAPHIC_ELEMENTS.iter().any(|name| {
        xml::children(rectangle, name).any(|graphic| {
            xml::child(graphic, "Properties")
                .and_then(|p| xml::child(p, "Contents"))
                .and_then(|c| c.text())
                .is_some_and(|t| !t.is_empty())
        })
    })
}

fn parse_text_frame(node: Node) -> TextFrame {
    let mut frame = TextFrame {
        id: xml::attr(node, "Self").unwrap_or_default(),
        parent_story_id: xml::attr(node, "ParentStory"),
        applied_object_style: xml::attr(node, "AppliedObjectStyle"),
        linked: is_threaded(node, "PreviousTextFrame") || is_threaded(node, "NextTextFrame"),
        ..Default::default()
    };

    if let Some(pref) = xml::child(node, "TextFramePreference") {
        frame.auto_sizing_type = xml::attr(pref, "AutoSizingType");
        frame.auto_sizing_reference_point = xml::attr(pref, "AutoSizingReferencePoint");
        frame.use_no_line_breaks = xml::attr(pref, "UseNoLineBreaksForAutoSizing");
        frame.text_column_count = xml::attr(pref, "TextColumnCount");
    }
    if let Some(wrap) = xml::child(node, "TextWrapPreference") {
        frame.text_wrap_mode = xml::attr(wrap, "TextWrapMode");
    }
    frame
}

fn is_threaded(node: Node, attribute: &str) -> bool {
    matches!(node.attribute(attribute), Some(v) if v != "n")
}

/// Unexpected elements and links of one master spread file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterSpreadFile {
    pub unexpected_elements: Vec<String>,
    pub links: Vec<Link>,
}

/// Parse one master spread file.
pub fn parse_master_spread(path: &Path) -> Result<MasterSpreadFile> {
    let text = xml::read_xml(path)?;
    parse_master_spread_str(&text, path)
}

pub(crate) fn parse_master_spread_str(text: &str, path: &Path) -> Result<MasterSpreadFile> {
    let doc = xml::parse(text, path)?;
    let root = doc.root_element();
    let mut parsed = MasterSpreadFile::default();

    if let Some(master) = xml::child(root, "MasterSpread") {
        parsed.unexpected_elements = master
            .children()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().name())
            .filter(|name| !MASTER_ALLOWED.contains(name))
            .map(str::to_string)
            .collect();
    }
    parsed.links = xml::descendants(root, "Link").map(parse_link).collect();
    Ok(parsed)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPREAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<idPkg:Spread xmlns:idPkg="http://ns.adobe.com/AdobeInDesign/idml/1.0/packaging" DOMVersion="18.0">
  <Spread Self="ucb" PageCount="1">
    <Page Self="ud0" Name="3" GeometricBounds="0 0 792 612" />
    <TextFrame Self="u120" ParentStory="u11f" PreviousTextFrame="n" NextTextFrame="n"
        AppliedObjectStyle="ObjectStyle/$ID/[Normal Text Frame]">
      <TextFramePreference TextColumnCount="2" AutoSizingType="HeightOnly"
          AutoSizingReferencePoint="CenterPoint" UseNoLineBreaksForAutoSizing="false" />
      <TextWrapPreference TextWrapMode="None" />
    </TextFrame>
    <TextFrame Self="u121" ParentStory="u11f" PreviousTextFrame="u120" NextTextFrame="n" />
    <Rectangle Self="u130" AppliedObjectStyle="ObjectStyle/$ID/[Normal Graphics Frame]"
        ItemTransform="1 0 0 1 10 20">
      <Image Self="u131" AppliedObjectStyle="ObjectStyle/$ID/[None]" ItemTransform="-1 0 0 1 0 0">
        <Link Self="u132" LinkResourceURI="file:/Users/me/Links/My%20Photo.jpg" StoredState="Normal" />
      </Image>
    </Rectangle>
    <Rectangle Self="u140">
      <PDF Self="u141">
        <Properties><Contents>JVBERi0xLjQK</Contents></Properties>
      </PDF>
    </Rectangle>
    <Rectangle Self="u150">
      <EPS Self="u151"><Properties><Contents>  </Contents></Properties></EPS>
    </Rectangle>
    <Group Self="u160"><TextFrame Self="u161" ParentStory="u200" /></Group>
  </Spread>
</idPkg:Spread>"#;

    fn spread() -> Spread {
        parse_spread_str(SPREAD, Path::new("Spreads/Spread_ucb.xml")).unwrap()
    }

    #[test]
    fn test_page_and_stories() {
        let spread = spread();
        assert_eq!(spread.id, "ucb");
        assert_eq!(spread.file_name, "Spread_ucb.xml");
        assert_eq!(spread.page_id.as_deref(), Some("ud0"));
        assert_eq!(spread.page_name.as_deref(), Some("3"));
        assert_eq!(spread.child_story_ids, vec!["u11f", "u200"]);
    }

    #[test]
    fn test_links() {
        let spread = spread();
        assert_eq!(spread.links.len(), 1);
        let link = &spread.links[0];
        assert_eq!(link.image_name, "My Photo.jpg");
        assert_eq!(link.rectangle_id.as_deref(), Some("u130"));
        assert_eq!(link.stored_state.as_deref(), Some("Normal"));
        assert_eq!(link.item_transform.map(|t| t.a), Some(-1.0));
        assert_eq!(link.container_transform.map(|t| t.tx), Some(10.0));
        assert_eq!(
            link.container_object_style.as_deref(),
            Some("ObjectStyle/$ID/[Normal Graphics Frame]")
        );
    }

    #[test]
    fn test_pasted_graphics_count_whitespace_contents() {
        assert_eq!(spread().pasted_graphics, 2);
    }

    #[test]
    fn test_pasted_graphic_needs_contents() {
        let xml = r#"<Spread Self="u1">
    <Rectangle Self="u2"><EPS Self="u3"><Properties><Contents></Contents></Properties></EPS></Rectangle>
    <Rectangle Self="u4"><Image Self="u5"><Properties/></Image></Rectangle>
</Spread>"#;
        let spread = parse_spread_str(xml, Path::new("Spreads/Spread_u1.xml")).unwrap();
        assert_eq!(spread.pasted_graphics, 0);
    }

    #[test]
    fn test_text_frames() {
        let spread = spread();
        assert_eq!(spread.text_frames.len(), 3);

        let first = &spread.text_frames[0];
        assert!(!first.linked);
        assert!(first.is_auto_size());
        assert_eq!(first.text_column_count.as_deref(), Some("2"));
        assert_eq!(first.text_wrap_mode.as_deref(), Some("None"));

        assert!(spread.text_frames[1].linked);
        assert!(!spread.text_frames[2].linked);
    }

    #[test]
    fn test_missing_spread_element() {
        let result = parse_spread_str("<Other/>", Path::new("Spreads/x.xml"));
        assert!(matches!(result, Err(Error::Xml { .. })));
    }

    #[test]
    fn test_master_spread() {
        let text = r#"<idPkg:MasterSpread xmlns:idPkg="urn:x">
  <MasterSpread Self="ucc">
    <Properties />
    <Page Self="ucd" />
    <TextFrame Self="u1" ParentStory="u2" />
    <Rectangle Self="u3"><Image Self="u4"><Link Self="u5" LinkResourceURI="file:/Masters/bg.png" /></Image></Rectangle>
  </MasterSpread>
</idPkg:MasterSpread>"#;
        let parsed = parse_master_spread_str(text, Path::new("MasterSpreads/m.xml")).unwrap();
        assert_eq!(parsed.unexpected_elements, vec!["TextFrame", "Rectangle"]);
        assert_eq!(parsed.links.len(), 1);
        assert_eq!(parsed.links[0].image_name, "bg.png");
    }
}
