use chrono::NaiveDate;
use tracing::debug;

use feedforge_builder::{Args, DispatchMode, DynamicBuilder, FieldTarget};
use feedforge_core::{AttributeTree, FeedError, FeedResult, Money, Weight};
use feedforge_document::{Emitter, FeedContext, FeedEntity};

use crate::dimensions::Dimensions;

/// Names a product builder block accepts as declared fields.
const PRODUCT_FIELDS: &[&str] = &[
    "upc",
    "upc_type",
    "tax_code",
    "msrp",
    "brand",
    "manufacturer",
    "name",
    "description",
    "item_type",
    "launch_date",
    "condition_type",
    "mfr_part_number",
    "category",
    "item_dimensions",
    "package_dimensions",
    "package_weight",
    "shipping_weight",
    "bullet_point",
    "search_term",
    "used_for",
    "other_item_attribute",
    "target_audience",
    "recommended_browse_node",
    "details",
];

/// Default `StandardProductID/Type` when a UPC is given without a type.
pub const DEFAULT_UPC_TYPE: &str = "UPC";

/// Catalog product message.
///
/// Built once through [`Product::build`]; read-only afterwards. Category data
/// lives in `details`, an [`AttributeTree`] written under `ProductData` with the
/// tag registered for `category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    sku: String,
    upc: Option<String>,
    upc_type: Option<String>,
    tax_code: Option<String>,
    msrp: Option<Money>,
    brand: Option<String>,
    manufacturer: Option<String>,
    name: Option<String>,
    description: Option<String>,
    item_type: Option<String>,
    launch_date: Option<NaiveDate>,
    condition_type: Option<String>,
    mfr_part_number: Option<String>,
    item_dimensions: Option<Dimensions>,
    package_dimensions: Option<Dimensions>,
    package_weight: Option<Weight>,
    shipping_weight: Option<Weight>,
    bullet_points: Vec<String>,
    search_terms: Vec<String>,
    used_fors: Vec<String>,
    other_item_attributes: Vec<String>,
    target_audiences: Vec<String>,
    recommended_browse_nodes: Vec<String>,
    category: Option<String>,
    details: Option<AttributeTree>,
}

impl Product {
    /// Product with only a SKU.
    pub fn new(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            upc: None,
            upc_type: None,
            tax_code: None,
            msrp: None,
            brand: None,
            manufacturer: None,
            name: None,
            description: None,
            item_type: None,
            launch_date: None,
            condition_type: None,
            mfr_part_number: None,
            item_dimensions: None,
            package_dimensions: None,
            package_weight: None,
            shipping_weight: None,
            bullet_points: Vec::new(),
            search_terms: Vec::new(),
            used_fors: Vec::new(),
            other_item_attributes: Vec::new(),
            target_audiences: Vec::new(),
            recommended_browse_nodes: Vec::new(),
            category: None,
            details: None,
        }
    }

    /// Configure a product through a builder block, ignoring unrecognized calls.
    pub fn build<F>(sku: impl Into<String>, block: F) -> FeedResult<Self>
    where
        F: FnOnce(&mut DynamicBuilder<'_>) -> FeedResult<()>,
    {
        Self::build_with_mode(sku, DispatchMode::Lenient, block)
    }

    /// Configure a product through a builder block.
    ///
    /// # Errors
    ///
    /// Whatever the block returns, or [`FeedError::Validation`] when details
    /// were given without a category.
    pub fn build_with_mode<F>(sku: impl Into<String>, mode: DispatchMode, block: F) -> FeedResult<Self>
    where
        F: FnOnce(&mut DynamicBuilder<'_>) -> FeedResult<()>,
    {
        let mut product = Self::new(sku);
        block(&mut DynamicBuilder::with_mode(&mut product, mode))?;
        product.validate()?;
        debug!(sku = %product.sku, category = ?product.category, "product built");
        Ok(product)
    }

    /// Structural invariants checked when construction ends.
    pub fn validate(&self) -> FeedResult<()> {
        if self.sku.trim().is_empty() {
            return Err(FeedError::validation("SKU cannot be empty"));
        }
        if self.details.is_some() && self.category.is_none() {
            return Err(FeedError::validation(
                "product must have a category when details are specified",
            ));
        }
        Ok(())
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn upc(&self) -> Option<&str> {
        self.upc.as_deref()
    }

    pub fn upc_type(&self) -> Option<&str> {
        self.upc_type.as_deref()
    }

    pub fn tax_code(&self) -> Option<&str> {
        self.tax_code.as_deref()
    }

    pub fn msrp(&self) -> Option<&Money> {
        self.msrp.as_ref()
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.manufacturer.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn item_type(&self) -> Option<&str> {
        self.item_type.as_deref()
    }

    pub fn launch_date(&self) -> Option<NaiveDate> {
        self.launch_date
    }

    pub fn condition_type(&self) -> Option<&str> {
        self.condition_type.as_deref()
    }

    pub fn mfr_part_number(&self) -> Option<&str> {
        self.mfr_part_number.as_deref()
    }

    pub fn item_dimensions(&self) -> Option<&Dimensions> {
        self.item_dimensions.as_ref()
    }

    pub fn package_dimensions(&self) -> Option<&Dimensions> {
        self.package_dimensions.as_ref()
    }

    pub fn package_weight(&self) -> Option<&Weight> {
        self.package_weight.as_ref()
    }

    pub fn shipping_weight(&self) -> Option<&Weight> {
        self.shipping_weight.as_ref()
    }

    pub fn bullet_points(&self) -> &[String] {
        &self.bullet_points
    }

    pub fn search_terms(&self) -> &[String] {
        &self.search_terms
    }

    pub fn used_fors(&self) -> &[String] {
        &self.used_fors
    }

    pub fn other_item_attributes(&self) -> &[String] {
        &self.other_item_attributes
    }

    pub fn target_audiences(&self) -> &[String] {
        &self.target_audiences
    }

    pub fn recommended_browse_nodes(&self) -> &[String] {
        &self.recommended_browse_nodes
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn details(&self) -> Option<&AttributeTree> {
        self.details.as_ref()
    }

    fn has_description_data(&self) -> bool {
        self.name.is_some()
            || self.brand.is_some()
            || self.description.is_some()
            || !self.bullet_points.is_empty()
            || self.item_dimensions.is_some()
            || self.package_dimensions.is_some()
            || self.package_weight.is_some()
            || self.shipping_weight.is_some()
            || self.msrp.is_some()
            || self.manufacturer.is_some()
            || self.mfr_part_number.is_some()
            || !self.search_terms.is_empty()
            || !self.used_fors.is_empty()
            || self.item_type.is_some()
            || !self.other_item_attributes.is_empty()
            || !self.target_audiences.is_empty()
            || !self.recommended_browse_nodes.is_empty()
    }

    fn write_description_data(&self, e: &mut Emitter<'_>) -> FeedResult<()> {
        e.emit_opt("Title", self.name.as_deref())?;
        e.emit_opt("Brand", self.brand.as_deref())?;
        e.emit_opt("Description", self.description.as_deref())?;
        e.emit_each("BulletPoint", &self.bullet_points)?;
        if let Some(dimensions) = &self.item_dimensions {
            e.emit_scoped("ItemDimensions", |e| dimensions.write_body(e))?;
        }
        if let Some(dimensions) = &self.package_dimensions {
            e.emit_scoped("PackageDimensions", |e| dimensions.write_body(e))?;
        }
        if let Some(weight) = &self.package_weight {
            e.emit_unit("PackageWeight", weight)?;
        }
        if let Some(weight) = &self.shipping_weight {
            e.emit_unit("ShippingWeight", weight)?;
        }
        if let Some(msrp) = &self.msrp {
            e.emit_unit("MSRP", msrp)?;
        }
        e.emit_opt("Manufacturer", self.manufacturer.as_deref())?;
        e.emit_opt("MfrPartNumber", self.mfr_part_number.as_deref())?;
        e.emit_each("SearchTerms", &self.search_terms)?;
        e.emit_each("UsedFor", &self.used_fors)?;
        e.emit_opt("ItemType", self.item_type.as_deref())?;
        e.emit_each("OtherItemAttributes", &self.other_item_attributes)?;
        e.emit_each("TargetAudience", &self.target_audiences)?;
        e.emit_each("RecommendedBrowseNode", &self.recommended_browse_nodes)
    }
}

impl FieldTarget for Product {
    fn supports_field(&self, name: &str) -> bool {
        PRODUCT_FIELDS.contains(&name)
    }

    fn set_field(&mut self, name: &str, mut args: Args<'_>) -> FeedResult<()> {
        match name {
            "upc" => self.upc = Some(args.text()?),
            "upc_type" => self.upc_type = Some(args.text()?),
            "tax_code" => self.tax_code = Some(args.text()?),
            "msrp" => self.msrp = Some(args.money()?),
            "brand" => self.brand = Some(args.text()?),
            "manufacturer" => self.manufacturer = Some(args.text()?),
            "name" => self.name = Some(args.text()?),
            "description" => self.description = Some(args.text()?),
            "item_type" => self.item_type = Some(args.text()?),
            "launch_date" => self.launch_date = Some(args.date()?),
            "condition_type" => self.condition_type = Some(args.text()?),
            "mfr_part_number" => self.mfr_part_number = Some(args.text()?),
            "category" => self.category = Some(args.text()?),
            "item_dimensions" => self.item_dimensions = Some(Dimensions::default()),
            "package_dimensions" => self.package_dimensions = Some(Dimensions::default()),
            "package_weight" => self.package_weight = Some(args.weight()?),
            "shipping_weight" => self.shipping_weight = Some(args.weight()?),
            "bullet_point" => self.bullet_points.push(args.text()?),
            "search_term" => self.search_terms.push(args.text()?),
            "used_for" => self.used_fors.push(args.text()?),
            "other_item_attribute" => self.other_item_attributes.push(args.text()?),
            "target_audience" => self.target_audiences.push(args.text()?),
            "recommended_browse_node" => self.recommended_browse_nodes.push(args.text()?),
            "details" => self.details = Some(args.tree_or_empty()?),
            _ => return Err(FeedError::unknown_field(name)),
        }
        args.finish()
    }

    fn field_target(&mut self, name: &str) -> Option<&mut dyn FieldTarget> {
        match name {
            "item_dimensions" => {
                Some(self.item_dimensions.insert(Dimensions::default()) as &mut dyn FieldTarget)
            }
            "package_dimensions" => {
                Some(self.package_dimensions.insert(Dimensions::default()) as &mut dyn FieldTarget)
            }
            "details" => {
                Some(self.details.get_or_insert_with(AttributeTree::new) as &mut dyn FieldTarget)
            }
            _ => None,
        }
    }
}

impl FeedEntity for Product {
    fn root_name(&self) -> &'static str {
        "Product"
    }

    fn write_body(&self, e: &mut Emitter<'_>, ctx: &FeedContext) -> FeedResult<()> {
        e.emit("SKU", self.sku.as_str())?;
        if let Some(upc) = &self.upc {
            e.emit_scoped("StandardProductID", |e| {
                e.emit("Type", self.upc_type.as_deref().unwrap_or(DEFAULT_UPC_TYPE))?;
                e.emit("Value", upc.as_str())
            })?;
            e.emit_opt("ProductTaxCode", self.tax_code.as_deref())?;
        }
        e.emit_opt("LaunchDate", self.launch_date)?;
        if let Some(condition) = &self.condition_type {
            e.emit_scoped("Condition", |e| e.emit("ConditionType", condition.as_str()))?;
        }
        if self.has_description_data() {
            e.emit_scoped("DescriptionData", |e| self.write_description_data(e))?;
        }
        if let Some(details) = &self.details {
            let category = self.category.as_deref().ok_or_else(|| {
                FeedError::validation("product must have a category when details are specified")
            })?;
            e.emit_scoped("ProductData", |e| {
                ctx.categories().serialize(category, details, e)
            })?;
        }
        Ok(())
    }
}
