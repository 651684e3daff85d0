//! `Stories/*.xml`: text flows, their style runs and resolved properties.

use super::xml;
use crate::error::Result;
use crate::model::{
    CharacterStyleRun, FontRegistry, Overrides, ParagraphProperties, ParagraphStyleRun, Story,
    StyleSheets,
};
use roxmltree::Node;
use std::path::Path;

const APPLIED_PARAGRAPH_STYLE: &str = "AppliedParagraphStyle";
const APPLIED_CHARACTER_STYLE: &str = "AppliedCharacterStyle";

/// Parse one story file.
///
/// Style properties are resolved against `styles`; every applied font is
/// marked as used in `fonts`.
pub fn parse_story_file(
    path: &Path,
    styles: &StyleSheets,
    fonts: &mut FontRegistry,
) -> Result<Vec<Story>> {
    let text = xml::read_xml(path)?;
    parse_story_str(&text, path, styles, fonts)
}

pub(crate) fn parse_story_str(
    text: &str,
    path: &Path,
    styles: &StyleSheets,
    fonts: &mut FontRegistry,
) -> Result<Vec<Story>> {
    let doc = xml::parse(text, path)?;
    let root = doc.root_element();

    let story_nodes: Vec<Node> = if xml::is(&root, "Story") {
        vec![root]
    } else {
        xml::children(root, "Story").collect()
    };

    // Resolve into a scratch registry so a failing story marks nothing.
    let mut used = Vec::new();
    let mut stories = Vec::with_capacity(story_nodes.len());
    for node in story_nodes {
        stories.push(parse_story(node, styles, &mut used)?);
    }
    for font in used {
        fonts.mark_used(&font);
    }
    Ok(stories)
}

fn parse_story(node: Node, styles: &StyleSheets, used_fonts: &mut Vec<String>) -> Result<Story> {
    let mut story = Story::new(xml::attr(node, "Self").unwrap_or_default());

    for (index, para_node) in xml::descendants(node, "ParagraphStyleRange").enumerate() {
        let paragraph = parse_paragraph(para_node, index, styles, used_fonts)?;
        let characters = xml::children(para_node, "CharacterStyleRange")
            .map(|c| parse_character(c, styles, used_fonts))
            .collect::<Result<Vec<_>>>()?;
        story.push_paragraph(paragraph, characters);
    }
    story.group_runs();

    log::debug!(
        "story {}: {} paragraph runs, {} character runs",
        story.id,
        story.paragraph_runs.len(),
        story.character_runs.len()
    );
    Ok(story)
}

fn parse_paragraph(
    node: Node,
    index: usize,
    styles: &StyleSheets,
    used_fonts: &mut Vec<String>,
) -> Result<ParagraphStyleRun> {
    let mut run = ParagraphStyleRun::new(index, xml::attr(node, APPLIED_PARAGRAPH_STYLE));

    for attribute in node.attributes() {
        if attribute.name() != APPLIED_PARAGRAPH_STYLE {
            run.overrides.insert(attribute.name(), attribute.value());
        }
    }

    if let Some(style_id) = run.style_id.clone() {
        run.properties = ParagraphProperties {
            applied_font: styles.resolve(&style_id, "AppliedFont")?,
            hyphenation: styles.resolve(&style_id, "Hyphenation")?,
            grid_alignment: styles.resolve(&style_id, "GridAlignment")?,
            composer: styles.resolve(&style_id, "Composer")?,
            kerning_method: styles.resolve(&style_id, "KerningMethod")?,
            fill_tint: styles.resolve(&style_id, "FillTint")?,
        };
        if let Some(font) = run.properties.applied_font.value() {
            used_fonts.push(font.to_string());
        }
    }
    Ok(run)
}

fn parse_character(
    node: Node,
    styles: &StyleSheets,
    used_fonts: &mut Vec<String>,
) -> Result<CharacterStyleRun> {
    let mut run = CharacterStyleRun::new(xml::attr(node, APPLIED_CHARACTER_STYLE));

    run.content = xml::children(node, "Content")
        .filter_map(|c| c.text())
        .collect();

    let properties = xml::child(node, "Properties");
    run.applied_font = properties
        .and_then(|p| xml::child(p, "AppliedFont"))
        .and_then(xml::text);
    if let Some(font) = &run.applied_font {
        used_fonts.push(font.clone());
    }

    let mut overrides = Overrides::new();
    for attribute in node.attributes() {
        if attribute.name() != APPLIED_CHARACTER_STYLE {
            overrides.insert(attribute.name(), attribute.value());
        }
    }
    if let Some(properties) = properties {
        for property in properties.children().filter(|n| n.is_element()) {
            overrides.insert(
                property.tag_name().name(),
                xml::text(property).unwrap_or_default(),
            );
        }
    }
    run.overrides = overrides;

    run.has_table = xml::child(node, "Table").is_some();

    if let Some(style_id) = run.style_id.as_deref() {
        run.kerning_method = styles.resolve(style_id, "KerningMethod")?;
    }
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{DeclaredFontFamily, StyleDefinition, BASED_ON};

    const STORY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<idPkg:Story xmlns:idPkg="http://ns.adobe.com/AdobeInDesign/idml/1.0/packaging" DOMVersion="18.0">
  <Story Self="u11f" AppliedTOCStyle="n">
    <ParagraphStyleRange AppliedParagraphStyle="ParagraphStyle/Heading">
      <CharacterStyleRange AppliedCharacterStyle="CharacterStyle/$ID/[No character style]">
        <Content>Title</Content>
        <Br />
      </CharacterStyleRange>
    </ParagraphStyleRange>
    <ParagraphStyleRange AppliedParagraphStyle="ParagraphStyle/Body" Justification="CenterAlign">
      <CharacterStyleRange AppliedCharacterStyle="CharacterStyle/$ID/[No character style]" PointSize="14">
        <Properties>
          <AppliedFont type="string">Comic Sans</AppliedFont>
        </Properties>
        <Content>Hello </Content>
        <Content>world</Content>
      </CharacterStyleRange>
      <CharacterStyleRange AppliedCharacterStyle="CharacterStyle/$ID/[No character style]">
        <Table Self="u200" />
      </CharacterStyleRange>
    </ParagraphStyleRange>
  </Story>
</idPkg:Story>"#;

    fn styles() -> StyleSheets {
        let mut sheets = StyleSheets::new();
        sheets.paragraph.insert(
            "ParagraphStyle/Base",
            StyleDefinition::new()
                .with("AppliedFont", "Minion Pro")
                .with("KerningMethod", "$ID/Optical"),
        );
        sheets.paragraph.insert(
            "ParagraphStyle/Heading",
            StyleDefinition::new()
                .with(BASED_ON, "ParagraphStyle/Base")
                .with("Hyphenation", "true"),
        );
        sheets.paragraph.insert(
            "ParagraphStyle/Body",
            StyleDefinition::new()
                .with(BASED_ON, "ParagraphStyle/Base")
                .with("KerningMethod", "$ID/Metrics"),
        );
        sheets
    }

    fn fonts() -> FontRegistry {
        FontRegistry::new(vec![
            DeclaredFontFamily::new("Minion Pro"),
            DeclaredFontFamily::new("Comic Sans"),
            DeclaredFontFamily::new("Unused"),
        ])
    }

    #[test]
    fn test_parse_story_runs() {
        let mut fonts = fonts();
        let stories = parse_story_str(STORY, Path::new("Story_u11f.xml"), &styles(), &mut fonts)
            .unwrap();
        assert_eq!(stories.len(), 1);
        let story = &stories[0];
        assert_eq!(story.id, "u11f");
        assert_eq!(story.paragraph_runs.len(), 2);
        assert_eq!(story.character_runs.len(), 3);
        assert_eq!(story.grouped_runs, vec![0..1, 1..2]);
        assert_eq!(story.content(), "Title\nHello world\n");

        let heading = &story.paragraph_runs[0];
        assert_eq!(heading.normalized_id(), Some("Heading"));
        assert!(heading.overrides.is_empty());
        assert!(heading.properties.has_hyphenation());
        assert_eq!(heading.properties.kerning_method.value(), Some("Optical"));
        assert_eq!(
            heading.properties.kerning_method.inherited_from.as_deref(),
            Some("ParagraphStyle/Base")
        );

        let body = &story.paragraph_runs[1];
        assert_eq!(body.overrides.get("Justification"), Some("CenterAlign"));
        assert_eq!(body.properties.kerning_method.value(), Some("Metrics"));
        assert_eq!(body.content, "Hello world");
    }

    #[test]
    fn test_character_runs() {
        let mut fonts = fonts();
        let stories = parse_story_str(STORY, Path::new("Story_u11f.xml"), &styles(), &mut fonts)
            .unwrap();
        let chars = &stories[0].character_runs;

        assert_eq!(chars[0].content, "Title");
        assert!(chars[0].overrides.is_empty());
        assert_eq!(chars[0].normalized_id(), Some("[No character style]"));

        assert_eq!(chars[1].applied_font.as_deref(), Some("Comic Sans"));
        assert_eq!(chars[1].overrides.get("PointSize"), Some("14"));
        assert_eq!(chars[1].overrides.get("AppliedFont"), Some("Comic Sans"));
        assert!(!chars[1].has_table);
        assert!(chars[2].has_table);
    }

    #[test]
    fn test_used_fonts_registered() {
        let mut fonts = fonts();
        parse_story_str(STORY, Path::new("Story_u11f.xml"), &styles(), &mut fonts).unwrap();
        let used: Vec<&str> = fonts.used().map(|f| f.0.name.as_str()).collect();
        assert_eq!(used, vec!["Minion Pro", "Comic Sans"]);
    }

    #[test]
    fn test_cycle_fails_story_and_marks_nothing() {
        let mut sheets = styles();
        sheets.paragraph.insert(
            "ParagraphStyle/Heading",
            StyleDefinition::new().with(BASED_ON, "ParagraphStyle/Heading"),
        );
        let mut fonts = fonts();
        let result = parse_story_str(STORY, Path::new("Story_u11f.xml"), &sheets, &mut fonts);
        assert!(matches!(result, Err(Error::StyleCycle { .. })));
        assert_eq!(fonts.used_count(), 0);
    }
}
