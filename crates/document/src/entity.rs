//! Document-producing entities and the context they render with.

use feedforge_builder::DispatchMode;
use feedforge_core::FeedResult;

use crate::category::CategoryDispatcher;
use crate::serializer::{Document, DocumentSerializer, Emitter};

/// Everything entities need from configuration: output options, category
/// naming, and the dispatch mode their builders should run in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedContext {
    serializer: DocumentSerializer,
    categories: CategoryDispatcher,
    dispatch_mode: DispatchMode,
}

impl FeedContext {
    pub fn new(serializer: DocumentSerializer, categories: CategoryDispatcher) -> Self {
        Self {
            serializer,
            categories,
            dispatch_mode: DispatchMode::default(),
        }
    }

    pub fn with_dispatch_mode(mut self, dispatch_mode: DispatchMode) -> Self {
        self.dispatch_mode = dispatch_mode;
        self
    }

    /// Mode to pass to entity builders (`Product::build_with_mode`, ...).
    pub fn dispatch_mode(&self) -> DispatchMode {
        self.dispatch_mode
    }

    pub fn serializer(&self) -> &DocumentSerializer {
        &self.serializer
    }

    pub fn categories(&self) -> &CategoryDispatcher {
        &self.categories
    }
}

/// A fixed-schema object that renders into one feed message.
///
/// Implementors only write their children, in schema order; the provided
/// methods wrap them in a root element or embed them in a larger document.
/// Rendering takes `&self`, so repeated renders produce identical output.
pub trait FeedEntity {
    /// Root element name used by [`FeedEntity::to_document`].
    fn root_name(&self) -> &'static str;

    /// Write this entity's children into the current node.
    fn write_body(&self, emitter: &mut Emitter<'_>, ctx: &FeedContext) -> FeedResult<()>;

    /// Write `<name>...</name>` into a parent document.
    fn write_into(&self, name: &str, parent: &mut Emitter<'_>, ctx: &FeedContext) -> FeedResult<()> {
        parent.emit_scoped(name, |e| self.write_body(e, ctx))
    }

    /// Render as a standalone document under `name`.
    fn to_document_named(&self, name: &str, ctx: &FeedContext) -> FeedResult<Document> {
        ctx.serializer().render(name, |e| self.write_body(e, ctx))
    }

    fn to_document(&self, ctx: &FeedContext) -> FeedResult<Document> {
        self.to_document_named(self.root_name(), ctx)
    }

    fn to_xml(&self, ctx: &FeedContext) -> FeedResult<String> {
        self.to_document(ctx)?.to_xml_string()
    }
}
