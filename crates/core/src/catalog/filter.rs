//! Picker filters.
//!
//! Filters only narrow what a picker shows. They never touch the selection,
//! so a selected category stays selected while hidden by the search text.

use dre_shared::types::CompanyId;

use super::types::{Category, CategoryType, Indicator};

/// Case-insensitive substring match; an empty search matches everything.
#[must_use]
pub fn matches_search(name: &str, search: &str) -> bool {
    name.to_lowercase().contains(&search.to_lowercase())
}

/// Categories of `company` with the given type whose name contains `search`.
#[must_use]
pub fn filter_categories<'a>(
    categories: &'a [Category],
    company_id: CompanyId,
    category_type: CategoryType,
    search: &str,
) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|c| {
            c.company_id == company_id
                && c.category_type == category_type
                && matches_search(&c.name, search)
        })
        .collect()
}

/// Indicators of `company` whose name contains `search`.
#[must_use]
pub fn filter_indicators<'a>(
    indicators: &'a [Indicator],
    company_id: CompanyId,
    search: &str,
) -> Vec<&'a Indicator> {
    indicators
        .iter()
        .filter(|i| i.company_id == company_id && matches_search(&i.name, search))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dre_shared::types::{CategoryId, IndicatorId};
    use rstest::rstest;

    fn category(name: &str, company_id: CompanyId, category_type: CategoryType) -> Category {
        Category {
            id: CategoryId::new(),
            code: "1.01".to_string(),
            name: name.to_string(),
            company_id,
            category_type,
        }
    }

    #[rstest]
    #[case("Receita de Vendas", "receita", true)]
    #[case("Receita de Vendas", "VENDAS", true)]
    #[case("Receita de Vendas", "", true)]
    #[case("Receita de Vendas", "custo", false)]
    fn test_matches_search(#[case] name: &str, #[case] search: &str, #[case] expected: bool) {
        assert_eq!(matches_search(name, search), expected);
    }

    #[test]
    fn test_categories_scoped_to_company() {
        let ours = CompanyId::new();
        let theirs = CompanyId::new();
        let categories = vec![
            category("Vendas", ours, CategoryType::Revenue),
            category("Vendas", theirs, CategoryType::Revenue),
        ];

        let shown = filter_categories(&categories, ours, CategoryType::Revenue, "vendas");
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].company_id, ours);
    }

    #[test]
    fn test_categories_filtered_by_type() {
        let company = CompanyId::new();
        let categories = vec![
            category("Vendas", company, CategoryType::Revenue),
            category("Aluguel", company, CategoryType::Expense),
        ];

        let shown = filter_categories(&categories, company, CategoryType::Expense, "");
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name, "Aluguel");
    }

    #[test]
    fn test_indicators_scoped_and_case_insensitive() {
        let ours = CompanyId::new();
        let indicators = vec![
            Indicator {
                id: IndicatorId::new(),
                code: "IND01".into(),
                name: "Ticket Médio".into(),
                company_id: ours,
            },
            Indicator {
                id: IndicatorId::new(),
                code: "IND02".into(),
                name: "Ticket Médio".into(),
                company_id: CompanyId::new(),
            },
        ];

        let shown = filter_indicators(&indicators, ours, "TICKET");
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].code, "IND01");
    }
}
