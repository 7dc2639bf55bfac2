//! Property-based tests for the account form.

use dre_shared::types::{AccountId, CategoryId, IndicatorId};
use proptest::prelude::*;

use super::code::next_account_code;
use super::form::{AccountForm, AccountFormType, save_enabled};
use super::types::{AccountKind, AccountRow, DreAccount, Sign};

fn form_type() -> impl Strategy<Value = AccountFormType> {
    prop_oneof![
        Just(AccountFormType::Category),
        Just(AccountFormType::Indicator),
        Just(AccountFormType::Total),
        Just(AccountFormType::Blank),
    ]
}

fn filled_form() -> impl Strategy<Value = AccountForm> {
    (
        form_type(),
        "[A-Za-z ]{0,12}",
        0usize..3,
        any::<bool>(),
        0usize..3,
        any::<bool>(),
    )
        .prop_map(
            |(account_type, name, categories, indicator, accounts, negative)| AccountForm {
                account_type,
                name,
                selected_categories: (0..categories).map(|_| CategoryId::new()).collect(),
                selected_indicator: indicator.then(IndicatorId::new),
                selected_accounts: (0..accounts).map(|_| AccountId::new()).collect(),
                sign: if negative { Sign::Negative } else { Sign::Positive },
                ..AccountForm::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After a type switch, the form builds an account carrying only the
    /// payload of the new type, or fails the guard.
    #[test]
    fn prop_switch_leaves_single_payload(mut form in filled_form(), next in form_type()) {
        form.set_account_type(next);
        if let Ok(kind) = form.kind() {
            let row = AccountRow::from(&DreAccount {
                id: AccountId::new(),
                code: "A001".into(),
                name: form.name.clone(),
                kind,
                display_order: 1,
                company_id: dre_shared::types::CompanyId::new(),
                is_active: true,
                parent_account_id: None,
            });
            let populated = [
                row.category_ids.is_some(),
                row.indicator_id.is_some(),
                row.selected_accounts.is_some(),
                row.sign.is_some(),
            ];
            prop_assert_eq!(populated.iter().filter(|p| **p).count(), 1);
        }
    }

    /// The form's guard agrees with the pure guard on the same inputs.
    #[test]
    fn prop_can_save_matches_pure_guard(form in filled_form()) {
        prop_assert_eq!(
            form.can_save(),
            save_enabled(
                form.account_type,
                &form.name,
                &form.selected_categories,
                form.selected_indicator,
                &form.selected_accounts,
            )
        );
        prop_assert_eq!(form.can_save(), form.kind().is_ok());
    }

    /// Blank accounts never need more than a name, even one of spaces only.
    #[test]
    fn prop_blank_needs_only_name(name in "[A-Za-z ]{1,10}") {
        prop_assert!(save_enabled(AccountFormType::Blank, &name, &[], None, &[]));
        let mut form = AccountForm { name, ..AccountForm::default() };
        form.set_account_type(AccountFormType::Blank);
        let is_positive_blank = matches!(form.kind(), Ok(AccountKind::Blank { sign: Sign::Positive }));
        prop_assert!(is_positive_blank);
    }

    /// A generated code is never one already in use.
    #[test]
    fn prop_generated_code_is_fresh(counters in proptest::collection::vec(0u32..2000, 0..30)) {
        let existing: Vec<String> = counters.iter().map(|n| format!("A{n:03}")).collect();
        let code = next_account_code("A", existing.iter().map(String::as_str));
        prop_assert!(!existing.contains(&code));
    }
}
