//! Markdown to HTML renderer.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::code_block::{CodeBlockProcessor, ExtractedCodeBlock, ProcessResult, parse_fence_info};
use crate::extension::{ExtensionLoadError, ExtensionSetup, MarkdownExtension};
use crate::highlight::CodeHighlighter;
use crate::html::{self, AlertKind};
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, TocEntry, escape_html};
use crate::util::heading_level_to_num;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from first H1 heading (if title extraction was enabled).
    pub title: Option<String>,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
    /// Raw YAML front matter, without the `---` fences.
    pub frontmatter: Option<String>,
    /// Warnings generated during conversion.
    pub warnings: Vec<String>,
}

/// Markdown to HTML renderer.
///
/// A renderer holds per-document state and is used for a single document.
/// Build-wide configuration lives in [`RendererTemplate`](crate::RendererTemplate),
/// which creates one renderer per document.
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    base_path: Option<String>,
    site_base: String,
    pending_image: Option<(String, String)>,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
    highlighter: Option<Arc<CodeHighlighter>>,
    applied_extensions: Vec<String>,
    code_block_index: usize,
    pending_attrs: HashMap<String, String>,
    in_metadata: bool,
    frontmatter: Option<String>,
    gfm: bool,
    /// Stack of alert kinds for nested blockquotes (regular blockquote uses None).
    alert_stack: Vec<Option<AlertKind>>,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::new(false),
            base_path: None,
            site_base: "/".to_owned(),
            pending_image: None,
            processors: Vec::new(),
            highlighter: None,
            applied_extensions: Vec::new(),
            code_block_index: 0,
            pending_attrs: HashMap::new(),
            in_metadata: false,
            frontmatter: None,
            gfm: true,
            alert_stack: Vec::new(),
        }
    }

    /// Enable title extraction from the first H1 heading.
    ///
    /// The heading is still rendered but left out of the table of contents.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.heading = HeadingState::new(true);
        self
    }

    /// Set the directory of the current page, used to resolve relative links.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Set the URL prefix the site is served under (default `/`).
    ///
    /// Prefixed to every site-root-relative link and image source.
    #[must_use]
    pub fn with_site_base(mut self, base: impl Into<String>) -> Self {
        self.site_base = base.into();
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports tables,
    /// strikethrough, task lists and alerts.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let base = Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;
        if self.gfm {
            base | Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            base
        }
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text directly using configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        self.render(self.create_parser(markdown))
    }

    /// Highlight fenced code blocks no processor claimed.
    #[must_use]
    pub fn with_highlighter(self, highlighter: CodeHighlighter) -> Self {
        self.with_shared_highlighter(Arc::new(highlighter))
    }

    pub(crate) fn with_shared_highlighter(mut self, highlighter: Arc<CodeHighlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// Add a code block processor.
    ///
    /// Processors are checked in order when a code block is encountered.
    /// The first processor returning a non-`PassThrough` result wins.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.push_processor(Box::new(processor));
        self
    }

    pub(crate) fn push_processor(&mut self, processor: Box<dyn CodeBlockProcessor>) {
        self.processors.push(processor);
    }

    pub(crate) fn mark_applied(&mut self, name: &str) {
        self.applied_extensions.push(name.to_owned());
    }

    /// Apply a markdown extension to this renderer.
    ///
    /// Each extension may be applied once per renderer; a second application
    /// of the same extension name fails instead of registering its code
    /// block handling twice.
    pub fn apply_extension(
        mut self,
        extension: &dyn MarkdownExtension,
    ) -> Result<Self, ExtensionLoadError> {
        let name = extension.name();
        if self.has_extension(name) {
            return Err(ExtensionLoadError::AlreadyApplied {
                name: name.to_owned(),
            });
        }
        let mut setup = ExtensionSetup::default();
        extension.configure(&mut setup);
        for factory in setup.into_processors() {
            self.push_processor(factory());
        }
        self.mark_applied(name);
        Ok(self)
    }

    /// Whether an extension with this name has been applied.
    #[must_use]
    pub fn has_extension(&self, name: &str) -> bool {
        self.applied_extensions.iter().any(|applied| applied == name)
    }

    /// Names of applied extensions, in application order.
    #[must_use]
    pub fn applied_extensions(&self) -> &[String] {
        &self.applied_extensions
    }

    /// Get all extracted code blocks from all processors.
    pub fn extracted_code_blocks(&self) -> impl Iterator<Item = ExtractedCodeBlock> + '_ {
        self.processors.iter().flat_map(|p| p.extracted()).cloned()
    }

    /// Get all warnings from all processors.
    pub fn processor_warnings(&self) -> impl Iterator<Item = String> + '_ {
        self.processors.iter().flat_map(|p| p.warnings()).cloned()
    }

    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.heading.take_title(),
            toc: self.heading.take_toc(),
            frontmatter: self.frontmatter.take(),
            warnings: self.processor_warnings().collect(),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => html::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn link_href(&self, dest_url: &str) -> String {
        let resolved = self
            .base_path
            .as_deref()
            .and_then(|base| html::resolve_md_link(dest_url, base))
            .unwrap_or_else(|| dest_url.to_owned());
        html::with_site_base(resolved, &self.site_base)
    }

    #[allow(clippy::too_many_lines)]
    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("<p>");
                }
            }
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the ID is known.
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(kind) => {
                if let Some(bq_kind) = kind {
                    let alert_kind = AlertKind::from(bq_kind);
                    self.alert_stack.push(Some(alert_kind));
                    html::alert_start(alert_kind, &mut self.output);
                } else {
                    self.alert_stack.push(None);
                    self.output.push_str("<blockquote>");
                }
            }
            Tag::CodeBlock(kind) => {
                let (lang, attrs) = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => {
                        let (lang, attrs) = parse_fence_info(info);
                        (if lang.is_empty() { None } else { Some(lang) }, attrs)
                    }
                    _ => (None, HashMap::new()),
                };
                self.pending_attrs = attrs;
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, r#"<ol start="{n}">"#);
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::MetadataBlock(_) => self.in_metadata = true,
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let _ = write!(self.output, "<{tag}{align}>");
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link { dest_url, .. } => {
                let href = self.link_href(&dest_url);
                let link_tag = format!(r#"<a href="{}">"#, escape_html(&href));
                self.push_inline(&link_tag);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the image ends.
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("</p>");
                }
            }
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    let _ = write!(
                        self.output,
                        r##"<h{level} id="{id}">{} <a class="header-anchor" href="#{id}" aria-hidden="true">#</a></h{level}>"##,
                        html.trim()
                    );
                }
            }
            TagEnd::BlockQuote(_) => match self.alert_stack.pop() {
                Some(Some(_)) => self.output.push_str("</div>"),
                _ => self.output.push_str("</blockquote>"),
            },
            TagEnd::CodeBlock => self.finish_code_block(),
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::MetadataBlock(_) => self.in_metadata = false,
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock => {}
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    let src = html::with_site_base(src, &self.site_base);
                    html::image(&src, &alt, &title, &mut self.output);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
        }
    }

    fn finish_code_block(&mut self) {
        let (lang, content) = self.code.end();
        let attrs = std::mem::take(&mut self.pending_attrs);
        let index = self.code_block_index;
        self.code_block_index += 1;

        let processed = lang.as_ref().is_some_and(|lang_str| {
            self.processors.iter_mut().any(|processor| {
                match processor.process(lang_str, &attrs, &content, index) {
                    ProcessResult::Inline(html) => {
                        self.output.push_str(&html);
                        true
                    }
                    ProcessResult::PassThrough => false,
                }
            })
        });

        if processed {
            return;
        }
        let highlighted = self
            .highlighter
            .as_deref()
            .zip(lang.as_deref())
            .and_then(|(highlighter, lang)| highlighter.highlight(lang, &content));
        match highlighted {
            Some(html) => self.output.push_str(&html),
            None => html::code_block(lang.as_deref(), &content, &mut self.output),
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_metadata {
            self.frontmatter
                .get_or_insert_with(String::new)
                .push_str(text);
        } else if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        let html = format!("<code>{}</code>", escape_html(code));
        if self.heading.is_active() {
            self.heading.push_text(code);
            self.heading.push_html(&html);
        } else {
            self.output.push_str(&html);
        }
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
        } else {
            self.output.push('\n');
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
