//! Pure renderers: records in, HTML fragments out.
//!
//! Each function returns the complete new content of its region.

use std::fmt::Write;

use super::text::{escape_html, format_price, or_fallback, NO_DESCRIPTION, NO_IMAGE, NO_NAME};
use super::ViewMode;
use crate::domain::{Food, Order, OrderStatus, Restaurant};

pub const NO_FOODS: &str = "Nenhum item encontrado";
pub const NO_RESTAURANTS: &str = "Nenhum restaurante encontrado";
pub const NO_PENDING_ORDERS: &str = "Nenhum pedido pendente";

pub const PENDING_HEADING: &str = "🕐 Pedidos Pendentes";
pub const COMPLETED_HEADING: &str = "✅ Pedidos Concluídos";
pub const CANCELLED_HEADING: &str = "❌ Pedidos Cancelados";

fn empty_state(message: &str) -> String {
    format!(
        r#"<div class="empty-state" style="grid-column: 1/-1; text-align: center; padding: 2rem; color: #5c5c5c;"><p>{}</p></div>"#,
        escape_html(message)
    )
}

fn tag_list(tags: Option<&[String]>) -> String {
    tags.unwrap_or_default()
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape_html(tag)))
        .collect()
}

fn add_button(food: &Food) -> String {
    format!(
        r#"<button class="add-btn" data-food-id="{}" data-name="{}" data-price="{}">+ Adicionar</button>"#,
        food.id,
        escape_html(food.name.as_deref().unwrap_or_default()),
        food.price.unwrap_or(0.0),
    )
}

/// One card per food, or the "nothing found" placeholder.
pub fn food_cards(foods: Option<&[Food]>, mode: ViewMode) -> String {
    let foods = match foods {
        Some(foods) if !foods.is_empty() => foods,
        _ => return empty_state(NO_FOODS),
    };

    foods.iter().map(|food| food_card(food, mode)).collect()
}

fn food_card(food: &Food, mode: ViewMode) -> String {
    let image = escape_html(or_fallback(food.image.as_deref(), NO_IMAGE));
    let name = escape_html(or_fallback(food.name.as_deref(), NO_NAME));
    let description = escape_html(or_fallback(food.description.as_deref(), NO_DESCRIPTION));
    let tags = tag_list(food.tags.as_deref());
    let price = format_price(food.price);
    let button = add_button(food);

    match mode {
        ViewMode::Dish => format!(
            concat!(
                r#"<div class="dish-card">"#,
                r#"<div class="dish-image" style="background-image: url('{image}')"></div>"#,
                r#"<div class="dish-content">"#,
                r#"<h3 class="dish-title">{name}</h3>"#,
                r#"<p class="dish-description">{description}</p>"#,
                r#"<div class="dish-tags">{tags}</div>"#,
                r#"<div class="dish-footer"><span class="price">R$ {price}</span>{button}</div>"#,
                "</div></div>"
            ),
            image = image,
            name = name,
            description = description,
            tags = tags,
            price = price,
            button = button,
        ),
        ViewMode::Card => {
            let alt = escape_html(or_fallback(food.name.as_deref(), "Produto"));
            format!(
                concat!(
                    r#"<div class="card">"#,
                    r#"<img src="{image}" alt="{alt}">"#,
                    r#"<div class="card-content">"#,
                    r#"<div class="card-title">{name}</div>"#,
                    r#"<div class="card-desc">{description}</div>"#,
                    r#"<div class="tags">{tags}</div>"#,
                    r#"<div class="price-add"><div class="price">R$ {price}</div>{button}</div>"#,
                    "</div></div>"
                ),
                image = image,
                alt = alt,
                name = name,
                description = description,
                tags = tags,
                price = price,
                button = button,
            )
        }
    }
}

pub fn restaurant_cards(restaurants: Option<&[Restaurant]>) -> String {
    let restaurants = match restaurants {
        Some(restaurants) if !restaurants.is_empty() => restaurants,
        _ => return empty_state(NO_RESTAURANTS),
    };

    let mut html = String::new();
    for restaurant in restaurants {
        let _ = write!(
            html,
            concat!(
                r#"<div class="restaurant-card">"#,
                r#"<div class="restaurant-image" style="background-image: url('{}')"></div>"#,
                r#"<div class="restaurant-content">"#,
                r#"<h3 class="restaurant-name">{}</h3>"#,
                r#"<p class="restaurant-description">{}</p>"#,
                r#"<div class="restaurant-tags">{}</div>"#,
                "</div></div>"
            ),
            escape_html(or_fallback(restaurant.image.as_deref(), NO_IMAGE)),
            escape_html(or_fallback(restaurant.name.as_deref(), NO_NAME)),
            escape_html(or_fallback(restaurant.description.as_deref(), NO_DESCRIPTION)),
            tag_list(restaurant.tags.as_deref()),
        );
    }
    html
}

/// Orders split by lifecycle, each group in input order.
#[derive(Debug, Default, PartialEq)]
pub struct OrderBoard<'a> {
    pub pending: Vec<&'a Order>,
    pub completed: Vec<&'a Order>,
    pub cancelled: Vec<&'a Order>,
}

pub fn partition_orders(orders: &[Order]) -> OrderBoard<'_> {
    let mut board = OrderBoard::default();
    for order in orders {
        match order.status {
            OrderStatus::Delivered => board.completed.push(order),
            OrderStatus::Cancelled => board.cancelled.push(order),
            _ => board.pending.push(order),
        }
    }
    board
}

/// Pending section (always present), then completed and cancelled when
/// non-empty.
pub fn order_board(orders: &[Order]) -> String {
    let board = partition_orders(orders);
    let mut html = format!("<h2>{PENDING_HEADING}</h2>");

    if board.pending.is_empty() {
        let _ = write!(
            html,
            r#"<div class="pedido"><p style="text-align: center; color: #5c5c5c;">{NO_PENDING_ORDERS}</p></div>"#
        );
    } else {
        html.extend(board.pending.iter().map(|order| order_card(order)));
    }

    if !board.completed.is_empty() {
        let _ = write!(html, "<h2>{COMPLETED_HEADING}</h2>");
        html.extend(board.completed.iter().map(|order| order_card(order)));
    }

    if !board.cancelled.is_empty() {
        let _ = write!(html, "<h2>{CANCELLED_HEADING}</h2>");
        html.extend(board.cancelled.iter().map(|order| order_card(order)));
    }

    html
}

fn order_card(order: &Order) -> String {
    let mut lines = format!(
        "<li>Pedido #{} - R$ {}</li><li>Horário: {}</li>",
        order.id,
        format_price(order.total),
        escape_html(or_fallback(order.created_at.as_deref(), "Horário não informado")),
    );
    match order.items.as_deref() {
        Some(items) if !items.is_empty() => {
            for item in items {
                let _ = write!(
                    lines,
                    "<li>{} - R$ {}</li>",
                    escape_html(or_fallback(item.name.as_deref(), "Item")),
                    format_price(item.price),
                );
            }
        }
        _ => lines.push_str("<li>Itens não especificados</li>"),
    }

    let actions = if order.status.is_pending() {
        [
            (OrderStatus::OUT_FOR_DELIVERY, "Marcar como Saiu", ""),
            (OrderStatus::DELIVERED, "Marcar como Entregue", ""),
            (OrderStatus::CANCELLED, "Cancelar", r#" style="background: #e74c3c;""#),
        ]
        .iter()
        .map(|(status, label, style)| {
            format!(r#"<button data-order-id="{}" data-status="{status}"{style}>{label}</button>"#, order.id)
        })
        .collect::<String>()
    } else {
        format!(r#"<button data-view-order="{}">Visualizar</button>"#, order.id)
    };

    format!(
        concat!(
            r#"<div class="pedido">"#,
            "<h3>Cliente: {customer}</h3>",
            "<ul>{lines}</ul>",
            r#"<div class="status {class}">Status: {status}</div>"#,
            r#"<div class="actions">{actions}</div>"#,
            "</div>"
        ),
        customer = escape_html(or_fallback(order.customer_name.as_deref(), "Nome não informado")),
        lines = lines,
        class = order.status.css_class(),
        status = escape_html(order.status.as_str()),
        actions = actions,
    )
}

pub fn loading() -> String {
    concat!(
        r#"<div class="loading" style="text-align: center; padding: 2rem;">"#,
        r#"<div class="spinner"></div>"#,
        r#"<p style="margin-top: 1rem; color: #5c5c5c;">Carregando...</p>"#,
        "</div>"
    )
    .to_string()
}

pub fn error_block(message: &str) -> String {
    format!(
        concat!(
            r#"<div class="error" style="text-align: center; padding: 2rem; background: #ffe6e6; border-radius: 10px; color: #c22b37;">"#,
            "<p><strong>Erro:</strong> {}</p>",
            r#"<button data-action="reload">Tentar novamente</button>"#,
            "</div>"
        ),
        escape_html(message)
    )
}

/// Badge on the cart icon; hidden while the cart is empty.
pub fn cart_badge(count: u32) -> String {
    let display = if count == 0 { "none" } else { "flex" };
    format!(r#"<span class="cart-count" style="display: {display};">{count}</span>"#)
}

pub fn cart_notification(name: &str, price: f64) -> String {
    format!(
        r#"<div class="cart-notification"><strong>✅ Adicionado ao carrinho!</strong><br>{} - R$ {}</div>"#,
        escape_html(name),
        format_price(Some(price)),
    )
}

pub fn alert(message: &str) -> String {
    format!(r#"<div class="alert">{}</div>"#, escape_html(message).replace('\n', "<br>"))
}
