// ============================================================
// Layer 4 — PDF Loader and Token Adapter
// ============================================================
// Two jobs:
//   1. PdfFolder lists the .pdf files in the input directory
//   2. PdfTokenizer turns one PDF into positioned word tokens
//
// How PdfTokenizer reads a page:
//   lopdf resolves the page's fonts (inherited resources included)
//   and builds a text decoder for each one. The content stream is
//   decoded into operations and the text operations are replayed,
//   tracking the current font and the text matrix:
//
//     BT / ET            reset the text matrix
//     Tf Tc Tw TL        select font, size, spacing, leading
//     Td TD Tm T*        move the text position
//     Tj TJ ' "          show text
//
//   A word ends at whitespace, at a font or size change, at any
//   text positioning operator, at a wide TJ kerning gap, or when
//   the next glyph starts at least one space width away from
//   where the previous one ended.
//
// Glyph advances come from the font's /Widths (simple fonts) or
// the descendant CIDFont's /W and /DW (Type0). Fonts without
// metrics fall back to half an em per glyph.
//
// Reference: PDF 32000-1:2008 §9.4 (Text Objects), §9.7.4 (CIDFonts)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::{fs, path::{Path, PathBuf}};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Encoding, Object, ObjectId};

use crate::domain::errors::ExtractionError;
use crate::domain::token::Token;
use crate::domain::traits::TokenSource;

/// Page height used when no MediaBox can be found (US Letter)
const DEFAULT_PAGE_HEIGHT: f64 = 792.0;

/// Glyph width, in thousandths of an em, for fonts without metrics
const FALLBACK_GLYPH_WIDTH: f64 = 500.0;

/// Word gap, in ems, for fonts that do not say how wide a space is
const FALLBACK_SPACE_EM: f64 = 0.25;

/// A TJ adjustment at or below this (thousandths of an em) is a word break
const TJ_WORD_GAP: f64 = -250.0;

/// Baseline shift, in points, that counts as a new line
const BASELINE_TOLERANCE: f64 = 0.5;

/// Bound on the Parent walk for inherited page attributes
const MAX_PAGE_TREE_DEPTH: usize = 32;

// ─── PdfFolder ────────────────────────────────────────────────────────────────
/// Lists the PDF files in a directory.
pub struct PdfFolder {
    dir: PathBuf,
}

impl PdfFolder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every file with a `.pdf` extension (any case), sorted by file name.
    /// A missing directory is treated as empty.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            tracing::warn!(
                "Input directory '{}' does not exist — treating it as empty",
                self.dir.display()
            );
            return Ok(Vec::new());
        }

        let mut pdfs = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read directory '{}'", self.dir.display()))?
        {
            let path = entry?.path();
            let is_pdf = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

            if is_pdf && path.is_file() {
                pdfs.push(path);
            }
        }

        pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        tracing::debug!("Found {} PDF files in '{}'", pdfs.len(), self.dir.display());
        Ok(pdfs)
    }
}

// ─── PdfTokenizer ─────────────────────────────────────────────────────────────
/// lopdf-backed TokenSource.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTokenizer;

impl PdfTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenSource for PdfTokenizer {
    fn extract_tokens(&self, path: &Path) -> Result<Vec<Token>, ExtractionError> {
        let doc = Document::load(path)?;
        let mut tokens = Vec::new();

        for (page_number, page_id) in doc.get_pages() {
            let fonts = doc
                .get_page_fonts(page_id)?
                .into_iter()
                .map(|(resource, font)| {
                    let font = PageFont::from_dict(&doc, &resource, font);
                    (resource, font)
                })
                .collect();
            let page = PageContext {
                number: page_number,
                height: page_height(&doc, page_id),
                fonts,
            };
            let content = Content::decode(&doc.get_page_content(page_id)?)?;
            tokens.extend(tokens_from_operations(&content.operations, &page));
        }

        tracing::debug!("Extracted {} tokens from '{}'", tokens.len(), path.display());
        Ok(tokens)
    }
}

/// What the content-stream replay needs to know about a page.
#[derive(Debug, Default)]
pub struct PageContext<'a> {
    /// 1-based page number
    pub number: u32,
    pub height: f64,
    /// Font resource name → resolved font
    pub fonts: BTreeMap<Vec<u8>, PageFont<'a>>,
}

// ─── Fonts ────────────────────────────────────────────────────────────────────

/// One font resource of a page.
#[derive(Debug)]
pub struct PageFont<'a> {
    pub base_font: String,
    /// None when lopdf has no decoder for the font
    pub encoding: Option<Encoding<'a>>,
    /// Bytes per character code: 2 for composite (Type0) fonts, else 1
    pub code_len: usize,
    /// Glyph widths by character code, in thousandths of an em
    pub widths: BTreeMap<u32, f64>,
    /// Width of codes missing from `widths`
    pub default_width: f64,
}

/// One shown glyph: its decoded text, code and width.
struct Glyph {
    text: String,
    code: u32,
    width: f64,
}

impl<'a> PageFont<'a> {
    /// A font known only by name: one-byte codes, no decoder, no metrics.
    pub fn named(base_font: impl Into<String>) -> Self {
        Self {
            base_font: base_font.into(),
            encoding: None,
            code_len: 1,
            widths: BTreeMap::new(),
            default_width: FALLBACK_GLYPH_WIDTH,
        }
    }

    fn from_dict(doc: &'a Document, resource: &[u8], font: &'a Dictionary) -> Self {
        let base_font = font
            .get(b"BaseFont")
            .and_then(Object::as_name_str)
            .map(str::to_owned)
            .unwrap_or_else(|_| String::from_utf8_lossy(resource).into_owned());
        let mut page_font = Self::named(base_font);

        // lopdf only builds encodings for dictionaries typed /Font
        if font.type_is(b"Font") {
            page_font.encoding = match font.get_font_encoding(doc) {
                Ok(encoding) => Some(encoding),
                Err(e) => {
                    tracing::debug!("No decoder for font '{}': {}", page_font.base_font, e);
                    None
                }
            };
        }

        let composite = font.get(b"Subtype").and_then(Object::as_name).ok() == Some(&b"Type0"[..]);
        if composite {
            page_font.code_len = 2;
            if let Some(cid_font) = descendant_font(doc, font) {
                page_font.default_width = cid_font
                    .get(b"DW")
                    .ok()
                    .and_then(|dw| number_in(doc, dw))
                    .unwrap_or(1000.0);
                page_font.widths = cid_widths(doc, cid_font);
            }
        } else {
            page_font.widths = simple_widths(doc, font);
        }
        page_font
    }

    fn width(&self, code: u32) -> f64 {
        self.widths.get(&code).copied().unwrap_or(self.default_width)
    }

    /// Width of the space glyph, when the font's metrics have one
    fn space_width(&self) -> Option<f64> {
        (self.code_len == 1).then(|| self.widths.get(&32).copied()).flatten()
    }

    fn decode(&self, code: &[u8]) -> Option<String> {
        let encoding = self.encoding.as_ref()?;
        let decoded = match (encoding, code) {
            // ToUnicode maps are keyed by two-byte codes
            (Encoding::UnicodeMapEncoding(_), [byte]) => Document::decode_text(encoding, &[0, *byte]),
            _ => Document::decode_text(encoding, code),
        };
        decoded.ok()
    }

    fn glyphs(&self, bytes: &[u8]) -> Vec<Glyph> {
        if self.encoding.is_none() {
            return plain_glyphs(bytes, |code| self.width(code));
        }
        bytes
            .chunks(self.code_len)
            .map(|chunk| {
                let code = chunk.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
                let text = self
                    .decode(chunk)
                    .unwrap_or_else(|| decode_pdf_string(chunk));
                Glyph { text, code, width: self.width(code) }
            })
            .collect()
    }
}

/// Glyphs for text shown without a decoder: one per char.
fn plain_glyphs(bytes: &[u8], width: impl Fn(u32) -> f64) -> Vec<Glyph> {
    decode_pdf_string(bytes)
        .chars()
        .map(|ch| {
            let code = u32::from(ch);
            Glyph { text: ch.to_string(), code, width: width(code) }
        })
        .collect()
}

fn number_in(doc: &Document, obj: &Object) -> Option<f64> {
    doc.dereference(obj).ok().and_then(|(_, o)| number(o))
}

/// /FirstChar + /Widths of a simple font
fn simple_widths(doc: &Document, font: &Dictionary) -> BTreeMap<u32, f64> {
    let first_char = font
        .get(b"FirstChar")
        .ok()
        .and_then(|o| number_in(doc, o))
        .unwrap_or(0.0) as u32;
    let Ok(widths) = font.get_deref(b"Widths", doc).and_then(Object::as_array) else {
        return BTreeMap::new();
    };
    widths
        .iter()
        .enumerate()
        .filter_map(|(i, w)| Some((first_char + i as u32, number_in(doc, w)?)))
        .collect()
}

fn descendant_font<'a>(doc: &'a Document, font: &'a Dictionary) -> Option<&'a Dictionary> {
    let descendants = font.get_deref(b"DescendantFonts", doc).and_then(Object::as_array).ok()?;
    let (_, cid_font) = doc.dereference(descendants.first()?).ok()?;
    cid_font.as_dict().ok()
}

/// The /W array of a CIDFont. Entries come in two forms:
/// `c [w1 w2 ...]` for consecutive codes from c,
/// `c_first c_last w` for a range sharing one width.
fn cid_widths(doc: &Document, cid_font: &Dictionary) -> BTreeMap<u32, f64> {
    let mut widths = BTreeMap::new();
    let Ok(entries) = cid_font.get_deref(b"W", doc).and_then(Object::as_array) else {
        return widths;
    };
    let entries: Vec<&Object> = entries
        .iter()
        .filter_map(|o| doc.dereference(o).ok().map(|(_, o)| o))
        .collect();

    let mut i = 0;
    while let Some(first) = entries.get(i).and_then(|o| number(o)) {
        let first = first as u32;
        match entries.get(i + 1) {
            Some(Object::Array(run)) => {
                for (offset, w) in run.iter().enumerate() {
                    if let Some(w) = number_in(doc, w) {
                        widths.insert(first + offset as u32, w);
                    }
                }
                i += 2;
            }
            Some(last) => {
                let (Some(last), Some(w)) = (number(last), entries.get(i + 2).and_then(|o| number(o))) else {
                    break;
                };
                for code in first..=last as u32 {
                    widths.insert(code, w);
                }
                i += 3;
            }
            None => break,
        }
    }
    widths
}

// ─── Page geometry ────────────────────────────────────────────────────────────

/// Look up an inheritable page attribute, walking up the Parent chain.
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut dict: &Dictionary = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = dict.get_deref(key, doc) {
            return Some(value);
        }
        dict = dict.get_deref(b"Parent", doc).and_then(Object::as_dict).ok()?;
    }
    None
}

fn page_height(doc: &Document, page_id: ObjectId) -> f64 {
    let Some(Object::Array(bbox)) = inherited(doc, page_id, b"MediaBox") else {
        return DEFAULT_PAGE_HEIGHT;
    };
    let coords: Vec<f64> = bbox.iter().filter_map(|o| number_in(doc, o)).collect();
    match coords.as_slice() {
        [_, y0, _, y1] => (y1 - y0).abs(),
        _ => DEFAULT_PAGE_HEIGHT,
    }
}

// ─── Content-stream replay ────────────────────────────────────────────────────

type Matrix = [f64; 6];
const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn numbers(operands: &[Object]) -> Vec<f64> {
    operands.iter().filter_map(number).collect()
}

/// Decode a PDF string shown without a font decoder: UTF-16BE when
/// it carries a BOM, otherwise one char per byte.
fn decode_pdf_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}

struct PendingWord {
    text: String,
    size: f64,
    fontname: String,
    x0: f64,
    baseline: f64,
    end_x: f64,
}

/// Text state plus the words collected so far on one page.
struct TextReplay<'p, 'a> {
    page: &'p PageContext<'a>,
    font_resource: Vec<u8>,
    font_size: f64,
    char_spacing: f64,
    word_spacing: f64,
    leading: f64,
    tm: Matrix,
    tlm: Matrix,
    pending: Option<PendingWord>,
    tokens: Vec<Token>,
}

impl<'p, 'a> TextReplay<'p, 'a> {
    fn new(page: &'p PageContext<'a>) -> Self {
        Self {
            page,
            font_resource: Vec::new(),
            font_size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            leading: 0.0,
            tm: IDENTITY,
            tlm: IDENTITY,
            pending: None,
            tokens: Vec::new(),
        }
    }

    fn font(&self) -> Option<&'p PageFont<'a>> {
        self.page.fonts.get(&self.font_resource)
    }

    fn fontname(&self) -> String {
        self.font()
            .map(|f| f.base_font.clone())
            .unwrap_or_else(|| String::from_utf8_lossy(&self.font_resource).into_owned())
    }

    /// Font size as rendered, i.e. scaled by the text matrix
    fn rendered_size(&self) -> f64 {
        let scale = self.tm[2].hypot(self.tm[3]);
        self.font_size * if scale > 0.0 { scale } else { 1.0 }
    }

    /// Gap, in points, from which two glyphs belong to different words
    fn word_gap(&self) -> f64 {
        let space_em = self
            .font()
            .and_then(PageFont::space_width)
            .map(|w| w / 1000.0)
            .filter(|&em| em > 0.0)
            .unwrap_or(FALLBACK_SPACE_EM);
        space_em * self.rendered_size()
    }

    fn move_text(&mut self, tx: f64, ty: f64) {
        self.flush();
        let m = self.tlm;
        self.tlm[4] = tx * m[0] + ty * m[2] + m[4];
        self.tlm[5] = tx * m[1] + ty * m[3] + m[5];
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        self.move_text(0.0, -self.leading);
    }

    fn advance(&mut self, text_space_dx: f64) {
        self.tm[4] += text_space_dx * self.tm[0];
        self.tm[5] += text_space_dx * self.tm[1];
    }

    fn flush(&mut self) {
        if let Some(word) = self.pending.take() {
            self.tokens.push(Token {
                text: word.text,
                size: word.size,
                fontname: word.fontname,
                x0: word.x0,
                top: self.page.height - word.baseline - word.size,
                page: self.page.number,
            });
        }
    }

    fn show(&mut self, bytes: &[u8]) {
        let font = self.font();
        let glyphs = match font {
            Some(font) => font.glyphs(bytes),
            None => plain_glyphs(bytes, |_| FALLBACK_GLYPH_WIDTH),
        };
        let single_byte = font.map_or(true, |f| f.code_len == 1);
        let word_gap = self.word_gap();

        for glyph in glyphs {
            let glyph_width = glyph.width / 1000.0 * self.font_size;
            let mut spacing = self.char_spacing;
            if single_byte && glyph.code == 32 {
                spacing += self.word_spacing;
            }

            if glyph.text.chars().all(char::is_whitespace) {
                if !glyph.text.is_empty() {
                    self.flush();
                }
                self.advance(glyph_width + spacing);
                continue;
            }

            let (x, y) = (self.tm[4], self.tm[5]);
            let size = self.rendered_size();
            let fontname = self.fontname();

            let continues = self.pending.as_ref().is_some_and(|w| {
                w.size == size
                    && w.fontname == fontname
                    && (w.baseline - y).abs() <= BASELINE_TOLERANCE
                    && (x - w.end_x).abs() < word_gap
            });
            if !continues {
                self.flush();
            }

            // Character spacing widens the gap to the next glyph, not the glyph
            let end_x = x + glyph_width * self.tm[0];
            self.advance(glyph_width + spacing);
            let word = self.pending.get_or_insert_with(|| PendingWord {
                text: String::new(),
                size,
                fontname,
                x0: x,
                baseline: y,
                end_x,
            });
            word.text.push_str(&glyph.text);
            word.end_x = end_x;
        }
    }

    fn apply(&mut self, op: &Operation) {
        let nums = numbers(&op.operands);
        match op.operator.as_str() {
            "BT" => {
                self.flush();
                self.tm = IDENTITY;
                self.tlm = IDENTITY;
            }
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    self.font_resource = name.clone();
                }
                if let Some(&size) = nums.last() {
                    self.font_size = size;
                }
            }
            "Tc" => {
                if let Some(&spacing) = nums.first() {
                    self.char_spacing = spacing;
                }
            }
            "Tw" => {
                if let Some(&spacing) = nums.first() {
                    self.word_spacing = spacing;
                }
            }
            "TL" => {
                if let Some(&leading) = nums.first() {
                    self.leading = leading;
                }
            }
            "Td" => {
                if let [tx, ty] = nums[..] {
                    self.move_text(tx, ty);
                }
            }
            "TD" => {
                if let [tx, ty] = nums[..] {
                    self.leading = -ty;
                    self.move_text(tx, ty);
                }
            }
            "Tm" => {
                if let [a, b, c, d, e, f] = nums[..] {
                    self.flush();
                    self.tm = [a, b, c, d, e, f];
                    self.tlm = self.tm;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    self.show(bytes);
                }
            }
            "'" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    self.show(bytes);
                }
            }
            "\"" => {
                if let [aw, ac] = nums[..] {
                    self.word_spacing = aw;
                    self.char_spacing = ac;
                }
                self.next_line();
                if let Some(Object::String(bytes, _)) = op.operands.last() {
                    self.show(bytes);
                }
            }
            "TJ" => {
                let Some(Object::Array(items)) = op.operands.first() else {
                    return;
                };
                for item in items {
                    match item {
                        Object::String(bytes, _) => self.show(bytes),
                        other => {
                            if let Some(adjust) = number(other) {
                                if adjust <= TJ_WORD_GAP {
                                    self.flush();
                                }
                                self.advance(-adjust / 1000.0 * self.font_size);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush();
        self.tokens
    }
}

/// Replay a page's content-stream operations and return its words
/// in the order they were shown.
pub fn tokens_from_operations(operations: &[Operation], page: &PageContext<'_>) -> Vec<Token> {
    let mut replay = TextReplay::new(page);
    for op in operations {
        replay.apply(op);
    }
    replay.finish()
}
