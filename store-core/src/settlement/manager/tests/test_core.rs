//! Single-operation coverage through the public manager API

use super::*;

// ========================================================================
// Ledger
// ========================================================================

#[test]
fn test_balance_starts_at_zero() {
    let (manager, _catalog) = create_test_manager();
    assert_eq!(manager.balance(42).unwrap(), uah(0));
}

#[test]
fn test_top_up_raises_balance() {
    let (manager, _catalog) = create_test_manager();
    credit(&manager, 42, uah(10_000));
    credit(&manager, 42, uah(500));
    assert_eq!(manager.balance(42).unwrap(), uah(10_500));
}

#[test]
fn test_top_up_requires_manager() {
    let (manager, _catalog) = create_test_manager();
    let result = manager.top_up(&Actor::client(42), 42, uah(100));
    assert!(matches!(result, Err(ManagerError::Unauthorized(_))));
    assert_eq!(manager.balance(42).unwrap(), uah(0));
}

#[test]
fn test_top_up_in_foreign_currency_is_rejected() {
    let (manager, _catalog) = create_test_manager();
    let eur = Money::new(Decimal::from(100), Currency::Eur);
    let result = manager.top_up(&manager_actor(), 42, eur);
    assert!(matches!(result, Err(ManagerError::CurrencyMismatch { .. })));
}

// ========================================================================
// Orders
// ========================================================================

#[test]
fn test_create_order_prices_the_cart() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah(2940));
    seed_product(&catalog, 2, uah(385));
    seed_product(&catalog, 3, uah(3731));

    let order = manager
        .create_order(42, Currency::Uah, cart(&[(1, 1), (2, 1), (3, 1)]))
        .unwrap();

    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.amount, uah(7056));
    assert_eq!(order.items.len(), 3);
    assert_eq!(manager.get_order(order.id).unwrap().unwrap(), order);
}

#[test]
fn test_create_order_with_unknown_product_fails() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah(100));

    let result = manager.create_order(42, Currency::Uah, cart(&[(1, 1), (99, 1)]));
    assert!(matches!(result, Err(ManagerError::ProductNotFound(99))));
    assert!(manager.orders_for_client(42).unwrap().is_empty());
}

#[test]
fn test_create_order_in_foreign_currency_is_rejected() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah(100));

    let result = manager.create_order(42, Currency::Eur, cart(&[(1, 1)]));
    assert!(matches!(result, Err(ManagerError::CurrencyMismatch { .. })));
}

#[test]
fn test_pay_order_charges_the_ledger() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah(100));
    credit(&manager, 42, uah(150));

    let order = manager.create_order(42, Currency::Uah, cart(&[(1, 1)])).unwrap();
    let payment = manager.pay_order(42, order.id).unwrap();

    assert_eq!(payment.amount, uah(100));
    assert_eq!(manager.balance(42).unwrap(), uah(50));
    assert_eq!(
        manager.get_order(order.id).unwrap().unwrap().status,
        OrderStatus::Paid
    );
}

#[test]
fn test_pay_missing_order_fails() {
    let (manager, _catalog) = create_test_manager();
    let result = manager.pay_order(42, 7);
    assert!(matches!(result, Err(ManagerError::OrderNotFound(7))));
}

// ========================================================================
// Inventory
// ========================================================================

#[test]
fn test_availability_tracks_stock_and_reservations() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah(100));
    stock(&manager, 1, 10);
    assert_eq!(manager.available_quantity(1).unwrap(), 10);

    manager.create_order(42, Currency::Uah, cart(&[(1, 3)])).unwrap();
    assert_eq!(manager.available_quantity(1).unwrap(), 7);
}

#[test]
fn test_record_invoice_requires_manager() {
    let (manager, _catalog) = create_test_manager();
    let result = manager.record_invoice(
        &Actor::client(42),
        vec![InvoiceItemInput {
            product_id: 1,
            quantity: 5,
            unit_cost: uah(10),
        }],
    );
    assert!(matches!(result, Err(ManagerError::Unauthorized(_))));
    assert_eq!(manager.available_quantity(1).unwrap(), 0);
}

// ========================================================================
// Queries
// ========================================================================

#[test]
fn test_client_history_is_newest_first() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah(10));
    credit(&manager, 42, uah(100));

    let first = manager.create_order(42, Currency::Uah, cart(&[(1, 1)])).unwrap();
    let second = manager.create_order(42, Currency::Uah, cart(&[(1, 2)])).unwrap();
    manager.pay_order(42, first.id).unwrap();
    manager.pay_order(42, second.id).unwrap();

    let orders = manager.orders_for_client(42).unwrap();
    assert_eq!(
        orders.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );

    let payments = manager.payments_for_client(42).unwrap();
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0].order_id, second.id);
}
