//! Closed diagnostic taxonomy.
//!
//! Every diagnostic kind carries a stable code, a severity, a report
//! category, a user-facing label and message, and a help article.

use serde::Serialize;
use std::fmt;

const PREPARE_ARTICLE: &str =
    "http://help.frontify.com/en/articles/3768754-prepare-indesign-documents-for-templates";

macro_rules! prepare_anchor {
    ($anchor:literal) => {
        concat!(
            "http://help.frontify.com/en/articles/3768754-prepare-indesign-documents-for-templates#",
            $anchor
        )
    };
}

/// Severity bucket of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Key of the bucket in the report (`errors`, `warnings`, `infos`).
    pub fn bucket(self) -> &'static str {
        match self {
            Severity::Error => "errors",
            Severity::Warning => "warnings",
            Severity::Info => "infos",
        }
    }
}

/// Report section a diagnostic is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    ParStyles,
    CharStyles,
    TextBoxes,
    Fonts,
    Images,
    General,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 6] = [
        Category::ParStyles,
        Category::CharStyles,
        Category::TextBoxes,
        Category::Fonts,
        Category::Images,
        Category::General,
    ];

    /// Key of the section in the report JSON.
    pub fn key(self) -> &'static str {
        match self {
            Category::ParStyles => "par_styles",
            Category::CharStyles => "char_styles",
            Category::TextBoxes => "text_boxes",
            Category::Fonts => "fonts",
            Category::Images => "images",
            Category::General => "general",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Category::ParStyles => "Paragraph Styles",
            Category::CharStyles => "Character Styles",
            Category::TextBoxes => "Text Boxes",
            Category::Fonts => "Fonts",
            Category::Images => "Images",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error-severity diagnostic kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Error,
    Folder,
    Idml,
    Zip,
    Masterpage,
    ParagraphStyle,
    ParagraphStyleTextBox,
    FontsIncluded,
    OtfTtfFont,
    VariableFont,
    ImageIncluded,
    EmbeddedImage,
    ImageTransformation,
    Table,
    PastedGraphics,
    AutoSizeTextBox,
    TextColumns,
    TextWrap,
    LinkedTextFrame,
    ObjectStyleText,
    ObjectStyleImage,
    GridAlignment,
    Kerning,
    KerningChar,
    FillTint,
}

/// Warning-severity diagnostic kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    Warning,
    Hyphenation,
    Override,
    UnusedImage,
    ImageTransformation,
    DocumentBleed,
    Composer,
}

/// Info-severity diagnostic kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoKind {
    EmptyTextFrame,
    LargeImage,
}

/// A diagnostic kind of any severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classifier {
    Error(ErrorKind),
    Warning(WarningKind),
    Info(InfoKind),
}

impl From<ErrorKind> for Classifier {
    fn from(kind: ErrorKind) -> Self {
        Classifier::Error(kind)
    }
}

impl From<WarningKind> for Classifier {
    fn from(kind: WarningKind) -> Self {
        Classifier::Warning(kind)
    }
}

impl From<InfoKind> for Classifier {
    fn from(kind: InfoKind) -> Self {
        Classifier::Info(kind)
    }
}

/// Static payload of one classifier.
struct Payload {
    code: &'static str,
    label: Option<&'static str>,
    message: Option<&'static str>,
    help_article: Option<&'static str>,
    category: Category,
}

const fn payload(
    code: &'static str,
    label: &'static str,
    message: &'static str,
    help_article: &'static str,
    category: Category,
) -> Payload {
    Payload {
        code,
        label: Some(label),
        message: Some(message),
        help_article: Some(help_article),
        category,
    }
}

const fn general(code: &'static str, label: &'static str, message: &'static str) -> Payload {
    Payload {
        code,
        label: Some(label),
        message: Some(message),
        help_article: None,
        category: Category::General,
    }
}

impl ErrorKind {
    fn payload(self) -> Payload {
        use Category::*;
        match self {
            ErrorKind::Error => general("ERROR", "Error", "error (Check tooltip for context)"),
            ErrorKind::Folder => general("FOLDER", "Folder", "Folder error"),
            ErrorKind::Idml => general("IDML", "IDML", "IDML error"),
            ErrorKind::Zip => Payload {
                code: "ZIP",
                label: None,
                message: Some("ZIP file error"),
                help_article: Some("https://help.frontify.com/en/articles/5306557-what-input-formats-do-digital-and-print-templates-support"),
                category: General,
            },
            ErrorKind::Masterpage => payload(
                "MASTERPAGE",
                "Masterpage",
                "Master Page can't be used.",
                prepare_anchor!("h_4bef512504"),
                General,
            ),
            ErrorKind::ParagraphStyle => payload(
                "PARAGRAPH_STYLE",
                "Paragraph Style",
                "Text found missing paragraph styles.",
                prepare_anchor!("h_68e2603775"),
                TextBoxes,
            ),
            ErrorKind::ParagraphStyleTextBox => payload(
                "PARAGRAPH_STYLE_TEXT_BOX",
                "Paragraph Style",
                "No paragraph styles were used.",
                prepare_anchor!("h_68e2603775"),
                TextBoxes,
            ),
            ErrorKind::FontsIncluded => payload(
                "FONTS_INCLUDED",
                "Fonts Included",
                "Package is missing fonts.",
                prepare_anchor!("h_a3094cd981"),
                Fonts,
            ),
            ErrorKind::OtfTtfFont => payload(
                "OTF_TTF_FONT",
                "OTF/TTF Font",
                "Only OTF or TTF fonts are supported.",
                prepare_anchor!("h_a3094cd981"),
                Fonts,
            ),
            ErrorKind::VariableFont => payload(
                "VARIABLE_FONT",
                "Variable Font",
                "Variable fonts are not supported",
                prepare_anchor!("h_a3094cd981"),
                Fonts,
            ),
            ErrorKind::ImageIncluded => payload(
                "IMAGE_INCLUDED",
                "Images Included",
                "Package missing image link.",
                prepare_anchor!("h_eba8d9b8c1"),
                Images,
            ),
            ErrorKind::EmbeddedImage => payload(
                "EMBEDDED_IMAGE",
                "Embedded Image",
                "Embedded images are not supported.",
                prepare_anchor!("h_889cff064d"),
                Images,
            ),
            ErrorKind::ImageTransformation => payload(
                "IMAGE_TRANSFORMATION",
                "Image Transformation",
                "Image transformations are not supported.",
                prepare_anchor!("h_1205c11ca4"),
                Images,
            ),
            ErrorKind::Table => payload(
                "TABLE",
                "Table",
                "Tables are not supported",
                prepare_anchor!("h_b333040b53"),
                TextBoxes,
            ),
            ErrorKind::PastedGraphics => payload(
                "PASTED_GRAPHICS",
                "Pasted Graphics",
                "Pasted graphics are not supported",
                prepare_anchor!("h_889cff064d"),
                Images,
            ),
            ErrorKind::AutoSizeTextBox => payload(
                "AUTO_SIZE_TEXT_BOX",
                "Auto Sizing Text Box",
                "Auto-size text boxes were not set up properly",
                prepare_anchor!("h_e69bd3114b"),
                TextBoxes,
            ),
            ErrorKind::TextColumns => payload(
                "TEXT_COLUMNS",
                "Text Column",
                "Text columns are not supported",
                prepare_anchor!("h_2ea0534af5"),
                TextBoxes,
            ),
            ErrorKind::TextWrap => payload(
                "TEXT_WRAP",
                "Text Wrap",
                "Text Wrap is not supported.",
                PREPARE_ARTICLE,
                TextBoxes,
            ),
            ErrorKind::LinkedTextFrame => payload(
                "LINKED_TEXT_FRAME",
                "Linked Text Frame",
                "Linked (threaded) text frames are not supported.",
                prepare_anchor!("h_befb8c0698"),
                TextBoxes,
            ),
            ErrorKind::ObjectStyleText => payload(
                "OBJECT_STYLE_TEXT",
                "Object Style",
                "Object styles are not supported.",
                prepare_anchor!("h_a92f4cebdf"),
                TextBoxes,
            ),
            ErrorKind::ObjectStyleImage => payload(
                "OBJECT_STYLE_IMAGE",
                "Object Style",
                "Object styles are not supported.",
                prepare_anchor!("h_a92f4cebdf"),
                Images,
            ),
            ErrorKind::GridAlignment => payload(
                "GRID_ALIGNMENT",
                "Grid Alignment",
                "Grid alignment is not supported",
                prepare_anchor!("h_f6aa8d5242"),
                ParStyles,
            ),
            ErrorKind::Kerning => payload(
                "KERNING",
                "Kerning",
                "Kerning must be 'Metrics'",
                prepare_anchor!("h_270ad57d8d"),
                ParStyles,
            ),
            ErrorKind::KerningChar => payload(
                "KERNING_CHAR",
                "Kerning",
                "Kerning must be 'Metrics'",
                prepare_anchor!("h_270ad57d8d"),
                CharStyles,
            ),
            ErrorKind::FillTint => payload(
                "FILL_TINT",
                "Color Fill Tint (Beta)",
                "Fill Tint must be 100. (This may be inaccurate, testing currently)",
                "https://help.frontify.com",
                ParStyles,
            ),
        }
    }
}

impl WarningKind {
    fn payload(self) -> Payload {
        use Category::*;
        match self {
            WarningKind::Warning => Payload {
                code: "WARNING",
                label: None,
                message: None,
                help_article: None,
                category: General,
            },
            WarningKind::Hyphenation => payload(
                "HYPHENATION",
                "Hyphenation",
                "Hyphenation is not supported.",
                prepare_anchor!("h_55fa4b04cf"),
                ParStyles,
            ),
            WarningKind::Override => payload(
                "OVERRIDE",
                "Override",
                "Overrides are not supported.",
                prepare_anchor!("h_68e2603775"),
                TextBoxes,
            ),
            WarningKind::UnusedImage => payload(
                "UNUSED_IMAGE",
                "Unused Image",
                "Image(s) in package are unused making the package larger in size.",
                prepare_anchor!("h_66fcd1c2c2"),
                Images,
            ),
            WarningKind::ImageTransformation => payload(
                "IMAGE_TRANSFORMATION",
                "Image Transformation",
                "Element has been rotated. You may see slight discrepencies between export and editing.",
                prepare_anchor!("h_1205c11ca4"),
                Images,
            ),
            WarningKind::DocumentBleed => payload(
                "DOCUMENT_BLEED",
                "Document Bleed",
                "InDesign defined bleed is applied.",
                "https://help.frontify.com/en/articles/8519462-bleed-settings-and-pdf-presets-for-digital-print-templates-indesign-based",
                General,
            ),
            WarningKind::Composer => payload(
                "COMPOSER",
                "Composer",
                "We recommend defining paragraph style composers as 'Adobe Single-line Composer', as browsers can render this composer. Otherwise, discrepencies between export and editing may occur.",
                prepare_anchor!("h_bfdd4bceb0"),
                ParStyles,
            ),
        }
    }
}

impl InfoKind {
    fn payload(self) -> Payload {
        match self {
            InfoKind::EmptyTextFrame => payload(
                "EMPTY_TEXT_FRAME",
                "Empty Text Frames",
                "Empty text frame found.",
                prepare_anchor!("h_68e2603775"),
                Category::TextBoxes,
            ),
            InfoKind::LargeImage => payload(
                "LARGE_IMAGE",
                "Large Image",
                "Image is large. Verify that this large of an image is needed.",
                prepare_anchor!("h_66fcd1c2c2"),
                Category::Images,
            ),
        }
    }
}

impl Classifier {
    fn payload(self) -> Payload {
        match self {
            Classifier::Error(kind) => kind.payload(),
            Classifier::Warning(kind) => kind.payload(),
            Classifier::Info(kind) => kind.payload(),
        }
    }

    /// Stable code, e.g. `PARAGRAPH_STYLE`.
    pub fn code(self) -> &'static str {
        self.payload().code
    }

    pub fn label(self) -> Option<&'static str> {
        self.payload().label
    }

    /// User-facing message; empty for the bare warning kind.
    pub fn message(self) -> &'static str {
        self.payload().message.unwrap_or("")
    }

    pub fn help_article(self) -> Option<&'static str> {
        self.payload().help_article
    }

    pub fn category(self) -> Category {
        self.payload().category
    }

    pub fn severity(self) -> Severity {
        match self {
            Classifier::Error(_) => Severity::Error,
            Classifier::Warning(_) => Severity::Warning,
            Classifier::Info(_) => Severity::Info,
        }
    }

    /// Descriptor listed under `validation_classifiers`.
    pub fn descriptor(self) -> ClassifierDescriptor {
        let payload = self.payload();
        ClassifierDescriptor {
            label: payload.label,
            message: payload.message.unwrap_or(""),
            help_article: payload.help_article,
        }
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Label, message and help link of a classifier, as serialized in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassifierDescriptor {
    pub label: Option<&'static str>,
    pub message: &'static str,
    pub help_article: Option<&'static str>,
}
