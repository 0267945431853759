use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::suppliers::create_supplier,
        api::products::list_products,
        api::products::create_product,
        api::products::get_product,
        api::products::update_product,
        api::products::delete_product,
        api::products::quote_product,
        api::catalog::list_options,
        api::catalog::add_option,
        api::cart::get_cart,
        api::cart::add_item,
        api::cart::checkout,
        api::orders::list_orders,
        api::orders::payment_webhook,
    ),
    tags(
        (name = "souq", description = "Souq marketplace API")
    )
)]
pub struct ApiDoc;
