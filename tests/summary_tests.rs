use chrono::NaiveDate;
use ledger_core::ledger::{
    analyze, BalanceCard, GiftCard, IncomeSource, InstrumentRef, PaymentMethod, Transaction,
    TransactionKind, REFUND_CATEGORY,
};
use rust_decimal::Decimal;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

fn income(source: IncomeSource, category: &str, amount: i64) -> Transaction {
    Transaction::new(
        TransactionKind::Income { source },
        category,
        dec(amount),
        date(2025, 8, 5),
    )
    .unwrap()
}

fn expense(method: PaymentMethod, amount: i64) -> Transaction {
    Transaction::new(
        TransactionKind::Expense { method },
        "Food",
        dec(amount),
        date(2025, 8, 5),
    )
    .unwrap()
}

fn instrument(name: &str) -> InstrumentRef {
    InstrumentRef {
        id: Uuid::new_v4(),
        name: name.into(),
    }
}

#[test]
fn totals_split_by_payment_method() {
    let transactions = vec![
        income(IncomeSource::Salary, "Salary", 3_000_000),
        expense(PaymentMethod::Cash, 10_000),
        expense(PaymentMethod::Card, 50_000),
        expense(PaymentMethod::BalanceCard, 5_000).with_instrument(instrument("T-money")),
    ];

    let summary = analyze(&transactions, &[], &[]);
    assert_eq!(summary.cash_income, dec(3_000_000));
    assert_eq!(summary.cash_expense, dec(10_000));
    assert_eq!(summary.card_expense, dec(50_000));
    assert_eq!(summary.actual_card_expense, dec(50_000));
    assert_eq!(summary.settlement_income, Decimal::ZERO);
}

#[test]
fn refund_income_is_excluded_from_cash_income() {
    let transactions = vec![
        income(IncomeSource::Salary, "Salary", 100_000),
        income(IncomeSource::Refund, REFUND_CATEGORY, 3_000),
    ];
    assert_eq!(transactions[1].kind.source(), Some(IncomeSource::Refund));

    let summary = analyze(&transactions, &[], &[]);
    assert_eq!(summary.cash_income, dec(100_000));
}

#[test]
fn dutch_pay_substitutes_the_out_of_pocket_share() {
    let shared_dinner = expense(PaymentMethod::Card, 30_000).with_settlement(dec(10_000), dec(20_000));
    let transactions = vec![shared_dinner, expense(PaymentMethod::Card, 50_000)];

    let summary = analyze(&transactions, &[], &[]);
    assert_eq!(summary.card_expense, dec(80_000));
    assert_eq!(summary.actual_card_expense, dec(60_000));
    assert_eq!(summary.settlement_income, dec(20_000));
}

#[test]
fn instruments_report_window_activity_with_current_balance() {
    let mut card = BalanceCard::new("T-money", dec(50_000), date(2025, 1, 1)).unwrap();
    card.current_balance = dec(3_000);

    let transactions = vec![
        expense(PaymentMethod::BalanceCard, 5_000).with_instrument(InstrumentRef {
            id: card.id,
            name: card.name.clone(),
        }),
        income(IncomeSource::Refund, REFUND_CATEGORY, 2_000).with_instrument(InstrumentRef {
            id: card.id,
            name: card.name.clone(),
        }),
    ];

    let summary = analyze(&transactions, &[card], &[]);
    assert_eq!(summary.instruments.len(), 1);
    let entry = &summary.instruments[0];
    assert_eq!(entry.name, "T-money");
    assert_eq!(entry.expense, dec(5_000));
    assert_eq!(entry.income, dec(2_000));
    assert_eq!(entry.current_balance, dec(3_000));
}

#[test]
fn zero_balance_instruments_are_dropped() {
    // The retired gift card had window activity but holds nothing now.
    let retired = expense(PaymentMethod::GiftCard, 7_000).with_instrument(instrument("Gift"));
    let summary = analyze(&[retired], &[], &[]);
    assert!(summary.instruments.is_empty());

    let mut drained = BalanceCard::new("T-money", dec(10_000), date(2025, 1, 1)).unwrap();
    drained.current_balance = Decimal::ZERO;
    let summary = analyze(&[], &[drained], &[]);
    assert!(summary.instruments.is_empty());
}

#[test]
fn idle_active_instruments_still_appear() {
    let card = BalanceCard::new("Idle", dec(20_000), date(2025, 1, 1)).unwrap();
    let gift = GiftCard::new("Voucher", dec(30_000), date(2025, 1, 1)).unwrap();

    let summary = analyze(&[], &[card], &[gift]);
    assert_eq!(summary.instruments.len(), 2);
    assert_eq!(summary.instruments[0].name, "Idle");
    assert_eq!(summary.instruments[0].current_balance, dec(20_000));
    assert_eq!(summary.instruments[1].name, "Voucher");
    assert_eq!(summary.instruments[1].current_balance, dec(30_000));
    assert_eq!(summary.instruments[1].income, Decimal::ZERO);
}
