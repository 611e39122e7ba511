//! End-to-end product feed rendering.

use feedforge_builder::{DispatchMode, feed_args};
use feedforge_core::FeedError;
use feedforge_document::{FeedConfig, FeedContext, FeedEntity, RenderOptions};
use feedforge_products::{Product, Relationship};

fn ce_product() -> Product {
    Product::build("SKU1", |b| {
        b.set("category", "ce")?;
        b.node("details", |b| b.set("weight_unit", "kg"))
    })
    .unwrap()
}

#[test]
fn sku_and_category_details_only() {
    let xml = ce_product().to_xml(&FeedContext::default()).unwrap();
    assert_eq!(
        xml,
        "<Product><SKU>SKU1</SKU><ProductData><CE><weight_unit>kg</weight_unit></CE></ProductData></Product>"
    );
}

#[test]
fn rendering_twice_is_byte_identical() {
    let product = ce_product();
    let ctx = FeedContext::default();
    let first = product.to_xml(&ctx).unwrap();
    let second = product.to_xml(&ctx).unwrap();
    assert_eq!(first, second);
}

#[test]
fn nested_node_and_sibling_scalar_coexist() {
    let product = Product::build("SKU1", |b| {
        b.set("category", "ce")?;
        b.node("details", |b| {
            b.node("a", |b| b.set("x", 1))?;
            b.set("b", 2)
        })
    })
    .unwrap();

    let details = product.details().unwrap();
    let keys: Vec<_> = details.keys().collect();
    assert_eq!(keys, vec!["a", "b"]);

    let xml = product.to_xml(&FeedContext::default()).unwrap();
    assert!(xml.contains("<CE><a><x>1</x></a><b>2</b></CE>"), "{xml}");
}

#[test]
fn used_for_calls_repeat_in_call_order() {
    let product = Product::build("SKU1", |b| {
        b.set("used_for", "gift")?;
        b.set("used_for", "travel")?;
        b.set("used_for", "office")
    })
    .unwrap();

    let xml = product.to_xml(&FeedContext::default()).unwrap();
    assert!(
        xml.contains("<UsedFor>gift</UsedFor><UsedFor>travel</UsedFor><UsedFor>office</UsedFor>"),
        "{xml}"
    );
}

#[test]
fn appended_category_list_uses_configured_item_tag() {
    let config = FeedConfig::from_json_str(r#"{ "list_item_tags": { "used_fors": "UsedFor" } }"#)
        .unwrap();
    let product = Product::build("SKU1", |b| {
        b.set("category", "fba")?;
        b.node("details", |b| {
            b.append("used_fors", "gift")?;
            b.append("used_fors", "travel")
        })
    })
    .unwrap();

    let xml = product.to_xml(&config.context()).unwrap();
    assert!(
        xml.contains("<FBA><UsedFor>gift</UsedFor><UsedFor>travel</UsedFor></FBA>"),
        "{xml}"
    );
}

#[test]
fn unregistered_category_fails_render() {
    let product = Product::build("SKU1", |b| {
        b.set("category", "toys")?;
        b.node("details", |b| b.set("age_range", "3+"))
    })
    .unwrap();

    let err = product.to_document(&FeedContext::default()).unwrap_err();
    assert_eq!(err, FeedError::unknown_category("toys"));
}

#[test]
fn registered_category_from_config_renders() {
    let config = FeedConfig::from_json_str(r#"{ "categories": { "toys": "Toys" } }"#).unwrap();
    let product = Product::build("SKU1", |b| {
        b.set("category", "toys")?;
        b.node("details", |b| b.set("age_range", "3+"))
    })
    .unwrap();

    let xml = product.to_xml(&config.context()).unwrap();
    assert!(xml.ends_with("<ProductData><Toys><age_range>3+</age_range></Toys></ProductData></Product>"));
}

#[test]
fn details_without_category_is_a_validation_error() {
    let err = Product::build("SKU1", |b| b.node("details", |b| b.set("x", 1))).unwrap_err();
    assert!(matches!(err, FeedError::Validation(_)));
}

#[test]
fn strict_config_rejects_typos() {
    feedforge_observability::init_with_filter("feedforge_builder=debug");
    let config = FeedConfig::from_json_str(r#"{ "dispatch_mode": "strict" }"#).unwrap();
    assert_eq!(config.dispatch_mode, DispatchMode::Strict);

    let ctx = config.context();
    let err = Product::build_with_mode("SKU1", ctx.dispatch_mode(), |b| b.set("brnad", "Acme"))
        .unwrap_err();
    assert_eq!(err, FeedError::unknown_field("brnad"));
}

#[test]
fn pretty_output_with_declaration() {
    let ctx = FeedConfig {
        render: RenderOptions {
            indent: Some(2),
            xml_declaration: true,
        },
        ..FeedConfig::default()
    }
    .context();

    let xml = ce_product().to_xml(&ctx).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Product>\n  <SKU>SKU1</SKU>"));
}

#[test]
fn products_and_relationships_share_one_envelope() {
    let ctx = FeedContext::default();
    let product = ce_product();
    let relationship = Relationship::build("SKU1", |b| {
        b.call("relation", feed_args!["SKU1-RED", "Variation"])
    })
    .unwrap();

    let doc = ctx
        .serializer()
        .render("Envelope", |e| {
            e.emit_scoped("Message", |e| {
                e.emit("MessageID", 1)?;
                product.write_into("Product", e, &ctx)
            })?;
            e.emit_scoped("Message", |e| {
                e.emit("MessageID", 2)?;
                relationship.write_into("Relationship", e, &ctx)
            })
        })
        .unwrap();

    let xml = doc.to_xml_string().unwrap();
    assert!(xml.starts_with("<Envelope><Message><MessageID>1</MessageID><Product><SKU>SKU1</SKU>"));
    assert!(xml.contains(
        "<Message><MessageID>2</MessageID><Relationship><ParentSKU>SKU1</ParentSKU>\
         <Relation><SKU>SKU1-RED</SKU><Type>Variation</Type></Relation></Relationship></Message>"
    ));
}
