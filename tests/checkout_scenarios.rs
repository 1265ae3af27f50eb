//! End-to-end checkout scenarios: catalog records through cart mutation to totals.

use rust_decimal::Decimal;
use testresult::TestResult;

use replay::{
    cart::Cart,
    catalog::Game,
    pricing::CartTotals,
};

fn plain(id: &str, price: i64) -> TestResult<Game> {
    // Score 90 keeps the game clear of the flash sale.
    Ok(Game::new(id, format!("Game {id}"), "PS4", Decimal::from(price))?.with_metacritic_score(90))
}

fn flash(id: &str, price: i64) -> TestResult<Game> {
    Ok(Game::new(id, format!("Game {id}"), "PS4", Decimal::from(price))?.with_metacritic_score(60))
}

fn intro(id: &str, price: i64) -> TestResult<Game> {
    Ok(Game::new(id, format!("Game {id}"), "Xbox One", Decimal::from(price))?
        .with_metacritic_score(90))
}

#[test]
fn empty_cart_checks_out_at_zero() {
    let cart = Cart::new();

    let totals = cart.totals();

    assert_eq!(totals, CartTotals::default());
    assert!(!totals.flash_sale_active);
    assert_eq!(totals.flash_sale_eligible_count, 0);
}

#[test]
fn single_plain_item_pays_full_price() -> TestResult {
    let mut cart = Cart::new();
    cart.add(&plain("a", 20)?);

    let totals = cart.totals();

    assert_eq!(totals.subtotal, Decimal::from(20));
    assert_eq!(totals.total, Decimal::from(20));
    assert_eq!(totals.flash_sale_discount, Decimal::ZERO);
    assert_eq!(totals.intro_sale_discount, Decimal::ZERO);
    assert_eq!(totals.volume_discount, Decimal::ZERO);
    assert_eq!(totals.bundle_discount, Decimal::ZERO);

    Ok(())
}

#[test]
fn three_flash_items_activate_the_sale() -> TestResult {
    let mut cart = Cart::new();
    cart.add(&flash("a", 10)?);
    cart.add(&flash("b", 10)?);
    cart.add(&flash("c", 10)?);

    let totals = cart.totals();

    assert_eq!(totals.flash_sale_eligible_count, 3);
    assert!(totals.flash_sale_active);
    assert_eq!(totals.flash_sale_discount, Decimal::new(750, 2));
    // The 10% volume tier has no base left once flash-active items are excluded.
    assert_eq!(totals.volume_discount, Decimal::ZERO);
    assert_eq!(totals.total, Decimal::new(2250, 2));

    Ok(())
}

#[test]
fn two_intro_items_earn_the_ten_percent_tier() -> TestResult {
    let mut cart = Cart::new();
    cart.add(&intro("a", 15)?);
    cart.add(&intro("b", 15)?);

    let totals = cart.totals();

    assert_eq!(totals.intro_sale_discount, Decimal::from(3));
    assert_eq!(totals.volume_discount, Decimal::ZERO);
    assert_eq!(totals.total, Decimal::from(27));

    Ok(())
}

#[test]
fn pure_bundle_of_four_earns_fifteen_percent() -> TestResult {
    let games = [
        plain("a", 30)?,
        plain("b", 30)?,
        plain("c", 20)?,
        plain("d", 20)?,
    ];

    let mut cart = Cart::new();
    cart.add_bundle(games.iter());

    let totals = cart.totals();

    assert_eq!(totals.subtotal, Decimal::from(100));
    assert_eq!(totals.bundle_discount, Decimal::from(15));
    assert_eq!(totals.flash_sale_discount, Decimal::ZERO);
    assert_eq!(totals.intro_sale_discount, Decimal::ZERO);
    assert_eq!(totals.volume_discount, Decimal::ZERO);
    assert_eq!(totals.total, Decimal::from(85));

    Ok(())
}

#[test]
fn breaking_a_bundle_forfeits_its_discount() -> TestResult {
    let games = [
        plain("a", 30)?,
        plain("b", 30)?,
        plain("c", 20)?,
        plain("d", 20)?,
    ];

    let mut cart = Cart::new();
    cart.add_bundle(games.iter());
    cart.add(&plain("e", 10)?);

    assert_eq!(cart.totals().bundle_discount, Decimal::ZERO);

    cart.remove("e")?;
    assert_eq!(cart.totals().bundle_discount, Decimal::from(15));

    cart.remove("d")?;
    assert_eq!(cart.totals().bundle_discount, Decimal::ZERO);

    Ok(())
}

#[test]
fn dual_eligible_item_takes_the_better_deal() -> TestResult {
    // Xbox One game with a weak score: both intro- and flash-eligible.
    let dual = Game::new("dual", "Ryse: Son of Rome", "Xbox One", Decimal::from(10))?
        .with_metacritic_score(60);

    let mut cart = Cart::new();
    cart.add(&dual);
    cart.add(&flash("b", 10)?);
    cart.add(&flash("c", 10)?);

    let totals = cart.totals();

    // Flash is active (3 eligible units); the intro tier sits at 5% for one unit.
    // 25% of 10 beats 5% of 10, so the whole line lands in the flash bucket.
    assert!(totals.flash_sale_active);
    assert_eq!(totals.flash_sale_discount, Decimal::new(750, 2));
    assert_eq!(totals.intro_sale_discount, Decimal::ZERO);

    Ok(())
}

#[test]
fn quantity_changes_move_the_discount_tiers() -> TestResult {
    let mut cart = Cart::new();
    cart.add(&plain("a", 10)?);

    assert_eq!(cart.totals().volume_discount, Decimal::ZERO);

    // 2 units -> 5%.
    cart.set_quantity("a", 2)?;
    assert_eq!(cart.totals().volume_discount, Decimal::new(100, 2));

    // 5 units -> 20%.
    cart.set_quantity("a", 5)?;
    assert_eq!(cart.totals().volume_discount, Decimal::from(10));

    Ok(())
}

#[test]
fn computing_totals_leaves_the_cart_untouched() -> TestResult {
    let mut cart = Cart::new();
    cart.add(&flash("a", 10)?);
    cart.add(&intro("b", 15)?);

    let before = cart.clone();
    let first = cart.totals();
    let second = cart.totals();

    assert_eq!(cart, before);
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn totals_do_not_depend_on_add_order() -> TestResult {
    let games = [flash("a", 10)?, intro("b", 15)?, plain("c", 25)?];

    let mut forward = Cart::new();
    for game in &games {
        forward.add(game);
    }

    let mut backward = Cart::new();
    for game in games.iter().rev() {
        backward.add(game);
    }

    let forward_totals = forward.totals();
    let backward_totals = backward.totals();

    assert_eq!(forward_totals.subtotal, backward_totals.subtotal);
    assert_eq!(forward_totals.total, backward_totals.total);
    assert_eq!(
        forward_totals.flash_sale_discount,
        backward_totals.flash_sale_discount
    );
    assert_eq!(
        forward_totals.intro_sale_discount,
        backward_totals.intro_sale_discount
    );

    Ok(())
}

#[test]
fn discounts_never_push_the_total_above_the_subtotal() -> TestResult {
    // A busy mixed cart exercising every bucket at once.
    let mut cart = Cart::new();
    cart.add(&flash("a", 10)?);
    cart.add(&flash("b", 12)?);
    cart.add(&flash("c", 9)?);
    cart.add(&intro("d", 15)?);
    cart.add(&intro("e", 18)?);
    cart.add(&plain("f", 25)?);
    cart.set_quantity("f", 3)?;

    let totals = cart.totals();

    assert!(totals.total >= Decimal::ZERO, "total is never negative");
    assert!(totals.total <= totals.subtotal, "discounts only subtract");
    assert_eq!(
        totals.total,
        totals.subtotal
            - totals.flash_sale_discount
            - totals.intro_sale_discount
            - totals.volume_discount
            - totals.bundle_discount,
        "buckets account for the whole difference"
    );

    Ok(())
}
