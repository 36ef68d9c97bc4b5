//! Order business logic - Orders, their line items, and totals.
//!
//! An order belongs to one customer and is taken by one staff user. Its lines copy
//! each item's price at the moment they are added, and `amount_total` is recomputed
//! from those lines inside the same database transaction whenever lines change.
//! `amount_received` is recorded as given; paying less or more than the total is allowed.
//!
//! Deleting an order removes its lines with it. Customers, items and users referenced
//! by the order are never touched.

use crate::{
    core::{check_money, item::get_item, user::get_user},
    entities::{Customer, Order, OrderItem, order, order_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, Unchanged, prelude::*};
use tracing::{debug, info, instrument};

const MAX_CODE_LEN: usize = 20;

/// One requested line of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub item_id: i64,
    pub quantity: i32,
}

/// Input for [`create_order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: i64,
    pub taken_by: i64,
    pub date: Date,
    pub code: String,
    pub amount_received: Decimal,
    pub lines: Vec<NewOrderLine>,
}

/// An order together with its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithItems {
    pub order: order::Model,
    pub items: Vec<order_item::Model>,
}

/// `quantity × price` for a single line.
#[must_use]
pub fn line_total(quantity: i32, price: Decimal) -> Decimal {
    Decimal::from(quantity) * price
}

/// Sum of all line totals.
#[must_use]
pub fn order_total(lines: &[order_item::Model]) -> Decimal {
    lines.iter().map(order_item::Model::line_total).sum()
}

fn check_quantity(quantity: i32) -> Result<()> {
    if quantity < 1 {
        return Err(Error::InvalidQuantity { quantity });
    }
    Ok(())
}

fn check_code(code: &str) -> Result<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(Error::validation("Order code is required"));
    }
    if code.chars().count() > MAX_CODE_LEN {
        return Err(Error::validation(format!(
            "Ensure order code has at most {MAX_CODE_LEN} characters"
        )));
    }
    Ok(code.to_string())
}

async fn find_order<C>(db: &C, order_id: i64) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })
}

async fn lines_of<C>(db: &C, order_id: i64) -> Result<Vec<order_item::Model>>
where
    C: ConnectionTrait,
{
    OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts one line, snapshotting the item's current price.
async fn insert_line<C>(db: &C, order_id: i64, line: NewOrderLine) -> Result<order_item::Model>
where
    C: ConnectionTrait,
{
    check_quantity(line.quantity)?;
    let item = get_item(db, line.item_id).await?;
    if !item.is_available {
        return Err(Error::ItemUnavailable { id: item.id });
    }

    let order_item = order_item::ActiveModel {
        order_id: Set(order_id),
        item_id: Set(item.id),
        quantity: Set(line.quantity),
        price: Set(item.price),
        ..Default::default()
    };
    order_item.insert(db).await.map_err(Into::into)
}

/// Recomputes `amount_total` from the stored lines and persists it.
async fn refresh_total<C>(db: &C, order_id: i64) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    let total = check_money(order_total(&lines_of(db, order_id).await?))?;
    let order = order::ActiveModel {
        id: Unchanged(order_id),
        amount_total: Set(total),
        ..Default::default()
    };
    let updated = order.update(db).await?;
    debug!("Order {} total is now {}", order_id, updated.amount_total);
    Ok(updated)
}

/// Creates an order and its lines in a single transaction.
///
/// Each line's price is copied from the item, and `amount_total` is set to the sum
/// of the lines. If any line fails, nothing is stored.
///
/// # Errors
/// Returns [`Error::Validation`] for a blank or over-long code,
/// [`Error::InvalidAmount`] for an invalid `amount_received`,
/// [`Error::InvalidQuantity`] for a line quantity below 1,
/// [`Error::CustomerNotFound`], [`Error::UserNotFound`] or [`Error::ItemNotFound`]
/// for missing references, [`Error::ItemUnavailable`] for an unavailable item, or a
/// database error.
#[instrument(skip(db, input), fields(customer_id = input.customer_id, lines = input.lines.len()))]
pub async fn create_order(db: &DatabaseConnection, input: NewOrder) -> Result<OrderWithItems> {
    let code = check_code(&input.code)?;
    let amount_received = check_money(input.amount_received)?;
    for line in &input.lines {
        check_quantity(line.quantity)?;
    }

    let txn = db.begin().await?;

    Customer::find_by_id(input.customer_id)
        .one(&txn)
        .await?
        .ok_or(Error::CustomerNotFound {
            id: input.customer_id,
        })?;
    get_user(&txn, input.taken_by).await?;

    let order = order::ActiveModel {
        customer_id: Set(input.customer_id),
        date: Set(input.date),
        code: Set(code),
        amount_total: Set(Decimal::ZERO),
        amount_received: Set(amount_received),
        taken_by: Set(input.taken_by),
        ..Default::default()
    };
    let order = order.insert(&txn).await?;

    let mut items = Vec::with_capacity(input.lines.len());
    for line in input.lines {
        items.push(insert_line(&txn, order.id, line).await?);
    }
    let order = refresh_total(&txn, order.id).await?;

    txn.commit().await?;

    info!(
        "Created order {} with {} line(s), total {}",
        order.display_name(),
        items.len(),
        order.amount_total
    );
    Ok(OrderWithItems { order, items })
}

/// Retrieves an order by ID.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if no order has this ID, or a database error.
pub async fn get_order(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    find_order(db, order_id).await
}

/// Retrieves an order and its lines.
pub async fn get_order_with_items(db: &DatabaseConnection, order_id: i64) -> Result<OrderWithItems> {
    let order = find_order(db, order_id).await?;
    let items = lines_of(db, order_id).await?;
    Ok(OrderWithItems { order, items })
}

/// Retrieves all orders, newest date first.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    Order::find()
        .order_by_desc(order::Column::Date)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a customer's orders, newest date first.
pub async fn list_orders_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .order_by_desc(order::Column::Date)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the lines of an order in the order they were added.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if the order does not exist, or a database error.
pub async fn get_order_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_item::Model>> {
    find_order(db, order_id).await?;
    lines_of(db, order_id).await
}

/// Adds a line to an existing order and updates its total.
#[instrument(skip(db))]
pub async fn add_order_item(
    db: &DatabaseConnection,
    order_id: i64,
    line: NewOrderLine,
) -> Result<OrderWithItems> {
    check_quantity(line.quantity)?;

    let txn = db.begin().await?;
    find_order(&txn, order_id).await?;
    insert_line(&txn, order_id, line).await?;
    let order = refresh_total(&txn, order_id).await?;
    let items = lines_of(&txn, order_id).await?;
    txn.commit().await?;

    Ok(OrderWithItems { order, items })
}

/// Removes a single line and updates the order total.
///
/// # Errors
/// Returns [`Error::OrderItemNotFound`] if the line does not exist, or a database error.
#[instrument(skip(db))]
pub async fn remove_order_item(db: &DatabaseConnection, order_item_id: i64) -> Result<OrderWithItems> {
    let txn = db.begin().await?;
    let line = OrderItem::find_by_id(order_item_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderItemNotFound { id: order_item_id })?;
    let order_id = line.order_id;

    line.delete(&txn).await?;
    let order = refresh_total(&txn, order_id).await?;
    let items = lines_of(&txn, order_id).await?;
    txn.commit().await?;

    Ok(OrderWithItems { order, items })
}

/// Recomputes and stores `amount_total` from the order's lines.
pub async fn recalculate_order_total(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    let txn = db.begin().await?;
    find_order(&txn, order_id).await?;
    let order = refresh_total(&txn, order_id).await?;
    txn.commit().await?;
    Ok(order)
}

/// Records how much the customer has paid for an order.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] for a negative amount or one with more than two
/// decimal places, [`Error::OrderNotFound`], or a database error.
#[instrument(skip(db))]
pub async fn record_payment(
    db: &DatabaseConnection,
    order_id: i64,
    amount_received: Decimal,
) -> Result<order::Model> {
    let amount_received = check_money(amount_received)?;
    find_order(db, order_id).await?;

    let order = order::ActiveModel {
        id: Unchanged(order_id),
        amount_received: Set(amount_received),
        ..Default::default()
    };
    order.update(db).await.map_err(Into::into)
}

/// Deletes an order together with all of its lines.
///
/// Returns the number of lines removed.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if the order does not exist, or a database error.
#[instrument(skip(db))]
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<u64> {
    let txn = db.begin().await?;
    let order = find_order(&txn, order_id).await?;

    let removed = OrderItem::delete_many()
        .filter(order_item::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await?
        .rows_affected;
    order.delete(&txn).await?;
    txn.commit().await?;

    info!("Deleted order {} and {} line(s)", order_id, removed);
    Ok(removed)
}
