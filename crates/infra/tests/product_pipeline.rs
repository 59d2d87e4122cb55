//! End-to-end: rows → RowProductGateway → ProductService → finished products,
//! with satellite data served by the in-memory catalog store.

use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{Value as JsonValue, json};

use storefront_catalog::{
    Collaborator, CollaboratorError, FetchStrategy, PriceCalculator, ProductGateway,
    ProductService, ProductServiceConfig, ProductServiceError,
};
use storefront_core::{Currency, CustomerGroup, OrderNumber, Shop, ShopContext, ShopId};
use storefront_infra::{
    DefaultMarketingService, InMemoryCatalogStore, InMemoryRowSource, MarketingConfig,
    ProductHydrator, ProductRow, RowProductGateway, StorefrontConfig,
    VARIANT_ORDER_NUMBER_COLUMN, collaborators_from_store, in_memory_product_service,
};
use storefront_products::{
    Link, LinkTarget, Media, Price, PriceRule, ProductBuilder, ProductState, PropertyGroup,
    PropertyOption, PropertySet, Vote,
};

/// Applies the customer group discount and, for gross display, the tax rate.
struct DiscountingPriceCalculator;

impl DiscountingPriceCalculator {
    fn price(product: &ProductBuilder, rule: &PriceRule, context: &ShopContext) -> Price {
        let group = context.current_customer_group();
        let mut value = rule.price as f64 * (1.0 - group.discount / 100.0);
        if group.display_gross_prices {
            value *= 1.0 + product.tax().rate / 100.0;
        }
        Price::new(rule.clone(), value.round() as u64)
    }
}

impl PriceCalculator for DiscountingPriceCalculator {
    fn calculate_product(
        &self,
        product: &mut ProductBuilder,
        context: &ShopContext,
    ) -> Result<(), CollaboratorError> {
        let prices = product
            .price_rules()
            .iter()
            .map(|rule| Self::price(product, rule, context))
            .collect();
        let cheapest = product
            .cheapest_price_rule()
            .map(|rule| Self::price(product, rule, context));
        product.set_prices(prices);
        product.set_cheapest_price(cheapest);
        Ok(())
    }
}

struct RejectingPriceCalculator;

impl PriceCalculator for RejectingPriceCalculator {
    fn calculate_product(
        &self,
        _product: &mut ProductBuilder,
        _context: &ShopContext,
    ) -> Result<(), CollaboratorError> {
        Err(CollaboratorError::new(
            Collaborator::PriceCalculation,
            "currency not supported",
        ))
    }
}

fn number(raw: &str) -> OrderNumber {
    OrderNumber::new(raw).unwrap()
}

fn context() -> ShopContext {
    let group = CustomerGroup {
        key: "EK".to_string(),
        name: "Shop customers".to_string(),
        display_gross_prices: true,
        discount: 0.0,
    };
    ShopContext::new(
        Shop {
            id: ShopId::new(1),
            name: "Main".to_string(),
            locale: "de_DE".to_string(),
        },
        Currency {
            id: 1,
            code: "EUR".to_string(),
            factor: 1.0,
        },
        group.clone(),
        group,
    )
}

fn row(value: JsonValue) -> ProductRow {
    match value {
        JsonValue::Object(map) => map,
        _ => panic!("row must be a JSON object"),
    }
}

fn product_row(raw: &str, name: &str) -> ProductRow {
    row(json!({
        "__product_id": 1,
        "__variant_id": 1,
        "__variant_ordernumber": raw,
        "__product_name": name,
        "__tax_id": 1,
        "__tax_tax": 19,
        "__product_sales": 150,
        "__product_datum": "2024-06-10",
    }))
}

fn rule(price: u64) -> PriceRule {
    PriceRule {
        id: price,
        from: 1,
        to: None,
        price,
        pseudo_price: None,
        customer_group: "EK".to_string(),
        unit: None,
    }
}

fn marketing() -> DefaultMarketingService {
    DefaultMarketingService::new(MarketingConfig::default())
        .at(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
}

fn service_with(
    rows: Vec<ProductRow>,
    store: Arc<InMemoryCatalogStore>,
    strategy: FetchStrategy,
) -> ProductService {
    let gateway: Arc<dyn ProductGateway> = Arc::new(RowProductGateway::new(Arc::new(
        InMemoryRowSource::with_rows(rows),
    )));
    ProductService::new(
        gateway,
        collaborators_from_store(store, marketing(), Arc::new(DiscountingPriceCalculator)),
        ProductServiceConfig::default().with_fetch_strategy(strategy),
    )
}

fn populated_store() -> Arc<InMemoryCatalogStore> {
    let store = Arc::new(InMemoryCatalogStore::new());
    store.set_graduated_prices(number("SW10001"), vec![rule(1000), rule(800)]);
    store.set_cheapest_price(number("SW10001"), rule(800));
    store.set_votes(
        number("SW10001"),
        vec![Vote {
            id: 1,
            name: "Kim".to_string(),
            headline: "Great".to_string(),
            comment: "Keeps coffee hot".to_string(),
            points: 4.0,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            email: None,
            answer: None,
            answered_at: None,
        }],
    );
    store.set_links(
        number("SW10001"),
        vec![Link {
            id: 1,
            description: "Manufacturer".to_string(),
            link: "https://example.com".to_string(),
            target: LinkTarget::SameWindow,
        }],
    );
    store.set_cover(
        number("SW10001"),
        Media {
            id: 9,
            name: "cup".to_string(),
            description: None,
            path: "media/image/cup.jpg".to_string(),
            extension: "jpg".to_string(),
            preview: true,
            thumbnails: Vec::new(),
        },
    );
    store.set_property_set(
        number("SW10001"),
        PropertySet {
            id: 1,
            name: "Tableware".to_string(),
            groups: vec![PropertyGroup {
                id: 1,
                name: "Colour".to_string(),
                filterable: true,
                options: vec![PropertyOption {
                    id: 1,
                    name: "White".to_string(),
                }],
            }],
        },
    );
    store
}

#[tokio::test]
async fn assembles_products_in_request_order() -> Result<()> {
    let rows = vec![
        product_row("SW10001", "Espresso cup"),
        product_row("SW10002", "Saucer"),
    ];
    let service = service_with(rows, populated_store(), FetchStrategy::Concurrent);

    let products = service
        .get_list(&[number("SW10002"), number("SW99999"), number("SW10001")], &context())
        .await?;

    let keys: Vec<&str> = products.keys().map(OrderNumber::as_str).collect();
    assert_eq!(keys, ["SW10002", "SW10001"]);

    let cup = &products["SW10001"];
    assert!(cup.has_state(ProductState::PriceCalculated));
    assert_eq!(cup.price_rules().len(), 2);
    assert_eq!(cup.votes().len(), 1);
    assert_eq!(cup.links()[0].target, LinkTarget::SameWindow);
    assert_eq!(cup.cover().map(|m| m.id), Some(9));
    assert_eq!(
        cup.property_set().and_then(|s| s.group("Colour")).map(|g| g.options.len()),
        Some(1)
    );

    let calculated: Vec<u64> = cup.prices().iter().map(|p| p.calculated).collect();
    assert_eq!(calculated, [1190, 952]);
    assert_eq!(cup.cheapest_price().map(|p| p.calculated), Some(952));

    let flags = cup.marketing();
    assert!(flags.is_new);
    assert!(flags.is_top_seller);
    assert!(!flags.coming_soon);

    Ok(())
}

#[tokio::test]
async fn products_without_satellite_data_get_empty_defaults() -> Result<()> {
    let service = service_with(
        vec![product_row("SW10002", "Saucer")],
        populated_store(),
        FetchStrategy::Concurrent,
    );

    let saucer = service
        .get(&number("SW10002"), &context())
        .await?
        .expect("saucer exists");

    assert!(saucer.price_rules().is_empty());
    assert!(saucer.prices().is_empty());
    assert!(saucer.cheapest_price().is_none());
    assert!(saucer.votes().is_empty());
    assert!(saucer.related_products().is_empty());
    assert!(saucer.similar_products().is_empty());
    assert!(saucer.downloads().is_empty());
    assert!(saucer.links().is_empty());
    assert!(saucer.media().is_empty());
    assert!(saucer.cover().is_none());
    assert!(saucer.property_set().is_none());
    assert!(saucer.configuration().is_empty());
    assert!(saucer.has_state(ProductState::PriceCalculated));

    Ok(())
}

#[tokio::test]
async fn last_duplicate_row_wins() -> Result<()> {
    let rows = vec![
        product_row("SW10001", "Espresso cup (old)"),
        product_row("SW10001", "Espresso cup"),
    ];
    let service = service_with(rows, populated_store(), FetchStrategy::Sequential);

    let products = service.get_list(&[number("SW10001")], &context()).await?;

    assert_eq!(products.len(), 1);
    assert_eq!(products["SW10001"].name(), "Espresso cup");
    Ok(())
}

#[tokio::test]
async fn strategies_agree() -> Result<()> {
    let rows = || {
        vec![
            product_row("SW10001", "Espresso cup"),
            product_row("SW10002", "Saucer"),
        ]
    };
    let request = [number("SW10001"), number("SW10002")];
    let store = populated_store();

    let concurrent = service_with(rows(), store.clone(), FetchStrategy::Concurrent)
        .get_list(&request, &context())
        .await?;
    let sequential = service_with(rows(), store, FetchStrategy::Sequential)
        .get_list(&request, &context())
        .await?;

    assert_eq!(concurrent, sequential);
    Ok(())
}

#[tokio::test]
async fn customer_group_settings_reach_the_price_calculator() -> Result<()> {
    let service = service_with(
        vec![product_row("SW10001", "Espresso cup")],
        populated_store(),
        FetchStrategy::Concurrent,
    );
    let group = CustomerGroup {
        key: "H".to_string(),
        name: "Dealers".to_string(),
        display_gross_prices: false,
        discount: 10.0,
    };
    let dealer = ShopContext::new(
        context().shop().clone(),
        context().currency().clone(),
        group,
        context().fallback_customer_group().clone(),
    );

    let cup = service
        .get(&number("SW10001"), &dealer)
        .await?
        .expect("cup exists");

    let calculated: Vec<u64> = cup.prices().iter().map(|p| p.calculated).collect();
    assert_eq!(calculated, [900, 720]);
    Ok(())
}

#[tokio::test]
async fn price_calculation_failure_propagates() {
    let gateway: Arc<dyn ProductGateway> = Arc::new(RowProductGateway::new(Arc::new(
        InMemoryRowSource::with_rows(vec![product_row("SW10001", "Espresso cup")]),
    )));
    let service = ProductService::new(
        gateway,
        collaborators_from_store(
            populated_store(),
            marketing(),
            Arc::new(RejectingPriceCalculator),
        ),
        ProductServiceConfig::default(),
    );

    let err = service
        .get_list(&[number("SW10001")], &context())
        .await
        .unwrap_err();

    match err {
        ProductServiceError::Collaborator(e) => {
            assert_eq!(e.collaborator, Collaborator::PriceCalculation)
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn keyless_rows_fail_the_request() {
    let mut broken = product_row("SW10001", "Espresso cup");
    broken.remove(VARIANT_ORDER_NUMBER_COLUMN);
    let service = service_with(vec![broken], populated_store(), FetchStrategy::Concurrent);

    let err = service
        .get_list(&[number("SW10001")], &context())
        .await
        .unwrap_err();

    assert!(matches!(err, ProductServiceError::DataAccess(_)));
}

#[tokio::test]
async fn in_memory_wiring_serves_requests() -> Result<()> {
    storefront_observability::init();

    let config = StorefrontConfig::from_lookup(|key| match key {
        "STOREFRONT_FETCH_STRATEGY" => Some("sequential".to_string()),
        "STOREFRONT_TOP_SELLER_THRESHOLD" => Some("1000".to_string()),
        _ => None,
    })?;
    let service = in_memory_product_service(
        Arc::new(InMemoryRowSource::with_rows(vec![product_row("SW10001", "Espresso cup")])),
        populated_store(),
        Arc::new(DiscountingPriceCalculator),
        &config,
    );

    assert_eq!(service.config().fetch_strategy, FetchStrategy::Sequential);
    assert!(service.get_list(&[], &context()).await?.is_empty());

    let cup = service
        .get(&number("SW10001"), &context())
        .await?
        .expect("cup exists");
    assert!(!cup.marketing().is_top_seller);
    assert_eq!(cup.cheapest_price().map(|p| p.calculated), Some(952));
    Ok(())
}

#[test]
fn creation_dates_parse_from_rows() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let product = storefront_infra::JsonProductHydrator
        .hydrate_product(&product_row("SW10001", "Espresso cup"))
        .unwrap();
    assert_eq!(product.created_at(), Some(date));
}
