//! View models for storefront pages and the functions that render them.
//!
//! Rendering is a pure function of its inputs; handlers do the loading.

use serde::Serialize;

use crate::features::categories::dtos::{CategoryResponseDto, CategorySummaryDto};
use crate::features::orders::dtos::{order_detail_url, order_review_url, OrderDetailDto};
use crate::features::products::dtos::ProductResponseDto;
use crate::shared::constants::{CATEGORY_ROUTE, HOME_ROUTE};
use crate::shared::pages::{render_page, TemplateError};

pub const NOT_FOUND_MESSAGE: &str = "Không tìm thấy trang bạn yêu cầu.";
pub const ORDER_NOT_FOUND_MESSAGE: &str = "Không tìm thấy đơn hàng bạn yêu cầu.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Hệ thống đang gặp sự cố, vui lòng thử lại sau.";

#[derive(Debug, Serialize)]
struct MessageView<'a> {
    store_name: &'a str,
    home_route: &'static str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct OrderView<'a> {
    store_name: &'a str,
    home_route: &'static str,
    order: &'a OrderDetailDto,
    ordered_at: String,
    review_url: String,
    detail_url: String,
}

#[derive(Debug, Serialize)]
struct LinkView<'a> {
    name: &'a str,
    url: String,
}

impl<'a> From<&'a CategorySummaryDto> for LinkView<'a> {
    fn from(summary: &'a CategorySummaryDto) -> Self {
        Self {
            name: &summary.name,
            url: category_url(&summary.slug),
        }
    }
}

#[derive(Debug, Serialize)]
struct CategoryView<'a> {
    store_name: &'a str,
    home_route: &'static str,
    category: &'a CategoryResponseDto,
    parent: Option<LinkView<'a>>,
    children: Vec<LinkView<'a>>,
    products: &'a [ProductResponseDto],
}

pub fn category_url(slug: &str) -> String {
    format!("{}/{}", CATEGORY_ROUTE, urlencoding::encode(slug))
}

fn order_view<'a>(store_name: &'a str, order: &'a OrderDetailDto) -> OrderView<'a> {
    OrderView {
        store_name,
        home_route: HOME_ROUTE,
        order,
        ordered_at: order.created_at.format("%d/%m/%Y %H:%M").to_string(),
        review_url: order_review_url(&order.id),
        detail_url: order_detail_url(&order.id),
    }
}

/// Not-found page; always links back to the home route
pub fn render_not_found(store_name: &str, message: &str) -> Result<String, TemplateError> {
    render_page(
        "not_found.html",
        MessageView {
            store_name,
            home_route: HOME_ROUTE,
            message,
        },
    )
}

pub fn render_error(store_name: &str, message: &str) -> Result<String, TemplateError> {
    render_page(
        "error.html",
        MessageView {
            store_name,
            home_route: HOME_ROUTE,
            message,
        },
    )
}

pub fn render_order_detail(
    store_name: &str,
    order: &OrderDetailDto,
) -> Result<String, TemplateError> {
    render_page("order_detail.html", order_view(store_name, order))
}

pub fn render_order_review(
    store_name: &str,
    order: &OrderDetailDto,
) -> Result<String, TemplateError> {
    render_page("order_review.html", order_view(store_name, order))
}

pub fn render_category(
    store_name: &str,
    category: &CategoryResponseDto,
    products: &[ProductResponseDto],
) -> Result<String, TemplateError> {
    render_page(
        "category.html",
        CategoryView {
            store_name,
            home_route: HOME_ROUTE,
            category,
            parent: category.parent.as_ref().map(LinkView::from),
            children: category.children.iter().map(LinkView::from).collect(),
            products,
        },
    )
}
