//! Unpacked package fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const PACKAGING_NS: &str = "http://ns.adobe.com/AdobeInDesign/idml/1.0/packaging";

/// An unpacked package under a temporary directory.
pub struct Fixture {
    _dir: TempDir,
    root: PathBuf,
}

impl Fixture {
    /// Package with every mandatory artifact, empty `Spreads` and `Stories`.
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(name);
        for folder in ["Resources", "Spreads", "Stories", "MasterSpreads", "META-INF", "XML"] {
            fs::create_dir_all(root.join(folder)).unwrap();
        }
        let fixture = Self { _dir: dir, root };
        fixture.fonts(&[]);
        fixture.styles("");
        fixture.preferences("");
        fixture.write("designmap.xml", "<Document/>");
        fixture.write("mimetype", "application/vnd.adobe.indesign-idml-package");
        fixture
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a file relative to the root, creating parent folders.
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn remove(&self, relative: &str) -> &Self {
        let path = self.root.join(relative);
        if path.is_dir() {
            fs::remove_dir_all(path).unwrap();
        } else {
            fs::remove_file(path).unwrap();
        }
        self
    }

    /// `Resources/Fonts.xml` declaring `(family, variable)` pairs.
    pub fn fonts(&self, families: &[(&str, bool)]) -> &Self {
        let body: String = families
            .iter()
            .enumerate()
            .map(|(i, (name, variable))| {
                let axes = if *variable { r#" NumDesignAxes="2""# } else { "" };
                format!(
                    r#"<FontFamily Self="di{i}" Name="{name}"><Font Self="di{i}f" Name="Regular" FontType="OpenTypeCFF"{axes}/></FontFamily>"#
                )
            })
            .collect();
        self.write("Resources/Fonts.xml", package_xml("Fonts", &body))
    }

    /// `Resources/Styles.xml` with the given paragraph styles.
    pub fn styles(&self, paragraph_styles: &str) -> &Self {
        let body = format!(
            r#"<RootCharacterStyleGroup Self="u79"><CharacterStyle Self="CharacterStyle/$ID/[No character style]" Name="$ID/[No character style]"/></RootCharacterStyleGroup><RootParagraphStyleGroup Self="u78"><ParagraphStyle Self="ParagraphStyle/$ID/[No paragraph style]" Name="$ID/[No paragraph style]"/>{paragraph_styles}</RootParagraphStyleGroup>"#
        );
        self.write("Resources/Styles.xml", package_xml("Styles", &body))
    }

    /// `Resources/Preferences.xml` with `DocumentPreference` attributes.
    pub fn preferences(&self, attributes: &str) -> &Self {
        let body = format!("<DocumentPreference {attributes}/>");
        self.write("Resources/Preferences.xml", package_xml("Preferences", &body))
    }

    /// A one-page spread holding `items`.
    pub fn spread(&self, id: &str, page: &str, items: &str) -> &Self {
        let body = format!(
            r#"<Spread Self="{id}"><Page Self="{id}p" Name="{page}"/>{items}</Spread>"#
        );
        self.write(&format!("Spreads/Spread_{id}.xml"), package_xml("Spread", &body))
    }

    pub fn master_spread(&self, id: &str, items: &str) -> &Self {
        let body = format!(r#"<MasterSpread Self="{id}"><Page Self="{id}p" Name="A"/>{items}</MasterSpread>"#);
        self.write(
            &format!("MasterSpreads/MasterSpread_{id}.xml"),
            package_xml("MasterSpread", &body),
        )
    }

    /// A story of `(paragraph style, text)` paragraphs.
    pub fn story(&self, id: &str, paragraphs: &[(&str, &str)]) -> &Self {
        let ranges: String = paragraphs
            .iter()
            .map(|(style, text)| {
                format!(
                    r#"<ParagraphStyleRange AppliedParagraphStyle="{style}"><CharacterStyleRange AppliedCharacterStyle="CharacterStyle/$ID/[No character style]"><Content>{text}</Content></CharacterStyleRange></ParagraphStyleRange>"#
                )
            })
            .collect();
        let body = format!(r#"<Story Self="{id}">{ranges}</Story>"#);
        self.write(&format!("Stories/Story_{id}.xml"), package_xml("Story", &body))
    }

    pub fn link_file(&self, name: &str, bytes: &[u8]) -> &Self {
        self.write(&format!("Links/{name}"), bytes)
    }
}

/// A text frame for story `story`.
pub fn text_frame(id: &str, story: &str) -> String {
    format!(r#"<TextFrame Self="{id}" ParentStory="{story}" PreviousTextFrame="n" NextTextFrame="n"/>"#)
}

/// A rectangle holding a linked image.
pub fn linked_image(rect: &str, name: &str, image_transform: &str, stored_state: &str) -> String {
    format!(
        r#"<Rectangle Self="{rect}" ItemTransform="1 0 0 1 0 0"><Image Self="{rect}i" ItemTransform="{image_transform}"><Link Self="{rect}l" LinkResourceURI="file:/Users/designer/Links/{name}" StoredState="{stored_state}"/></Image></Rectangle>"#
    )
}

fn package_xml(element: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<idPkg:{element} xmlns:idPkg="{PACKAGING_NS}" DOMVersion="18.0">{body}</idPkg:{element}>"#
    )
}
