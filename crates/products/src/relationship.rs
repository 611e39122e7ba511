use tracing::debug;

use feedforge_builder::{Args, DispatchMode, DynamicBuilder, FieldTarget};
use feedforge_core::{FeedError, FeedResult};
use feedforge_document::{Emitter, FeedContext, FeedEntity};

/// One child of a parent SKU (`Variation`, `Accessory`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relation {
    sku: String,
    relation_type: String,
    child_detail_page_display: Option<String>,
}

impl Relation {
    pub fn new(sku: impl Into<String>, relation_type: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            relation_type: relation_type.into(),
            child_detail_page_display: None,
        }
    }

    pub fn with_child_detail_page_display(mut self, display: impl Into<String>) -> Self {
        self.child_detail_page_display = Some(display.into());
        self
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn relation_type(&self) -> &str {
        &self.relation_type
    }

    pub fn child_detail_page_display(&self) -> Option<&str> {
        self.child_detail_page_display.as_deref()
    }

    fn validate(&self) -> FeedResult<()> {
        if self.sku.trim().is_empty() {
            return Err(FeedError::validation("relation requires a SKU"));
        }
        if self.relation_type.trim().is_empty() {
            return Err(FeedError::validation(format!(
                "relation `{}` requires a type",
                self.sku
            )));
        }
        Ok(())
    }

    fn write_body(&self, e: &mut Emitter<'_>) -> FeedResult<()> {
        e.emit("SKU", self.sku.as_str())?;
        e.emit_opt("ChildDetailPageDisplay", self.child_detail_page_display.as_deref())?;
        e.emit("Type", self.relation_type.as_str())
    }
}

impl FieldTarget for Relation {
    fn supports_field(&self, name: &str) -> bool {
        matches!(name, "sku" | "type" | "child_detail_page_display")
    }

    fn set_field(&mut self, name: &str, mut args: Args<'_>) -> FeedResult<()> {
        match name {
            "sku" => self.sku = args.text()?,
            "type" => self.relation_type = args.text()?,
            "child_detail_page_display" => self.child_detail_page_display = Some(args.text()?),
            _ => return Err(FeedError::unknown_field(name)),
        }
        args.finish()
    }
}

/// Parent/child links between catalog items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    parent_sku: String,
    relations: Vec<Relation>,
}

impl Relationship {
    pub fn new(parent_sku: impl Into<String>) -> Self {
        Self {
            parent_sku: parent_sku.into(),
            relations: Vec::new(),
        }
    }

    pub fn build<F>(parent_sku: impl Into<String>, block: F) -> FeedResult<Self>
    where
        F: FnOnce(&mut DynamicBuilder<'_>) -> FeedResult<()>,
    {
        Self::build_with_mode(parent_sku, DispatchMode::Lenient, block)
    }

    /// Configure relations through a builder block; each `relation` call
    /// appends one.
    ///
    /// # Errors
    ///
    /// Whatever the block returns, or [`FeedError::Validation`] when a
    /// relation lacks its SKU or type.
    pub fn build_with_mode<F>(
        parent_sku: impl Into<String>,
        mode: DispatchMode,
        block: F,
    ) -> FeedResult<Self>
    where
        F: FnOnce(&mut DynamicBuilder<'_>) -> FeedResult<()>,
    {
        let mut relationship = Self::new(parent_sku);
        block(&mut DynamicBuilder::with_mode(&mut relationship, mode))?;
        relationship.validate()?;
        debug!(
            parent_sku = %relationship.parent_sku,
            relations = relationship.relations.len(),
            "relationship built"
        );
        Ok(relationship)
    }

    pub fn push(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn validate(&self) -> FeedResult<()> {
        if self.parent_sku.trim().is_empty() {
            return Err(FeedError::validation("parent SKU cannot be empty"));
        }
        self.relations.iter().try_for_each(Relation::validate)
    }

    pub fn parent_sku(&self) -> &str {
        &self.parent_sku
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }
}

impl FieldTarget for Relationship {
    fn supports_field(&self, name: &str) -> bool {
        name == "relation"
    }

    /// `relation(sku, type[, child_detail_page_display])`.
    fn set_field(&mut self, name: &str, mut args: Args<'_>) -> FeedResult<()> {
        if name != "relation" {
            return Err(FeedError::unknown_field(name));
        }
        let mut relation = Relation::new(args.text()?, args.text()?);
        relation.child_detail_page_display = args.opt_text()?;
        args.finish()?;
        self.relations.push(relation);
        Ok(())
    }

    fn field_target(&mut self, name: &str) -> Option<&mut dyn FieldTarget> {
        if name != "relation" {
            return None;
        }
        self.relations.push(Relation::default());
        self.relations.last_mut().map(|r| r as &mut dyn FieldTarget)
    }
}

impl FeedEntity for Relationship {
    fn root_name(&self) -> &'static str {
        "Relationship"
    }

    fn write_body(&self, e: &mut Emitter<'_>, _ctx: &FeedContext) -> FeedResult<()> {
        e.emit("ParentSKU", self.parent_sku.as_str())?;
        for relation in &self.relations {
            e.emit_scoped("Relation", |e| relation.write_body(e))?;
        }
        Ok(())
    }
}
