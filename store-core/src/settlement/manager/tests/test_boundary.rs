//! Boundary values, rounding and error surface mapping

use super::*;
use shared::{ApiError, ErrorKind};

#[test]
fn test_quantity_bounds() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah(1));

    let result = manager.create_order(42, Currency::Uah, cart(&[(1, 0)]));
    assert!(matches!(
        result,
        Err(ManagerError::InvalidQuantity { product_id: 1, count: 0 })
    ));

    let result = manager.create_order(42, Currency::Uah, cart(&[(1, 10_000)]));
    assert!(matches!(
        result,
        Err(ManagerError::InvalidQuantity { count: 10_000, .. })
    ));

    // 9999 is the last admissible count
    let order = manager.create_order(42, Currency::Uah, cart(&[(1, 9999)])).unwrap();
    assert_eq!(order.amount, uah(9999));
}

#[test]
fn test_empty_cart_is_rejected() {
    let (manager, _catalog) = create_test_manager();
    let result = manager.create_order(42, Currency::Uah, vec![]);
    assert!(matches!(result, Err(ManagerError::InvalidAmount)));
}

#[test]
fn test_non_positive_top_up_is_rejected() {
    let (manager, _catalog) = create_test_manager();
    assert!(matches!(
        manager.top_up(&manager_actor(), 42, uah(0)),
        Err(ManagerError::InvalidAmount)
    ));
    assert!(matches!(
        manager.top_up(&manager_actor(), 42, uah(-100)),
        Err(ManagerError::InvalidAmount)
    ));
}

#[test]
fn test_discount_rounds_half_up_per_unit() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah_str("99.99"));
    catalog.push_price_action(price_action(1, (2024, 6, 1), 15, true));

    // 99.99 * 0.85 = 84.9915, rounded once to 84.99, then multiplied
    let order = manager.create_order(42, Currency::Uah, cart(&[(1, 3)])).unwrap();
    assert_eq!(order.items[0].amount, uah_str("254.97"));
    assert_eq!(order.amount, uah_str("254.97"));
}

#[test]
fn test_full_discount_prices_at_zero() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah(500));
    catalog.push_price_action(price_action(1, (2024, 6, 1), 100, true));

    let order = manager.create_order(42, Currency::Uah, cart(&[(1, 2)])).unwrap();
    assert_eq!(order.amount, uah(0));

    // A zero-amount order settles against an empty ledger
    manager.pay_order(42, order.id).unwrap();
    assert_eq!(manager.balance(42).unwrap(), uah(0));
}

#[test]
fn test_availability_never_goes_negative() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah(10));
    stock(&manager, 1, 2);

    // Reservations may exceed recorded stock; the floor holds
    manager.create_order(42, Currency::Uah, cart(&[(1, 5)])).unwrap();
    assert_eq!(manager.available_quantity(1).unwrap(), 0);
}

#[test]
fn test_errors_map_to_api_kinds() {
    let (manager, catalog) = create_test_manager();
    seed_product(&catalog, 1, uah(500));

    let err = manager.create_order(42, Currency::Uah, cart(&[(9, 1)])).unwrap_err();
    let api: ApiError = err.into();
    assert_eq!(api.kind, ErrorKind::ProductNotFound);

    let order = manager.create_order(42, Currency::Uah, cart(&[(1, 1)])).unwrap();
    let err = manager.pay_order(42, order.id).unwrap_err();
    let api: ApiError = err.into();
    assert_eq!(api.kind, ErrorKind::InsufficientFunds);
    assert_eq!(api.field.as_deref(), Some("client"));

    let err = manager.reject_order(&Actor::client(7), order.id).unwrap_err();
    let api: ApiError = err.into();
    assert_eq!(api.kind, ErrorKind::Unauthorized);
}
