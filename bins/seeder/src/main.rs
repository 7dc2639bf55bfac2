//! Seeds a sample company catalog and DRE structure for development.
//!
//! Writes a handful of categories and indicators for a fixed demo company,
//! then builds a template, a section, its lines, and the company's accounts
//! by driving the editors, so every record goes through the same validation
//! as interactive edits.
//!
//! Usage:
//!   seeder            - Seed the configured PostgreSQL database
//!   seeder --dry-run  - Run against an in-memory store without touching the database

use std::sync::Arc;

use anyhow::Context;
use dre_core::account::{AccountEditor, AccountFormType};
use dre_core::catalog::{Category, CategoryType, Indicator};
use dre_core::line::{LineEditor, LineType};
use dre_core::section::SectionEditor;
use dre_core::store::{MemoryStore, Query, RecordStore, Table, to_record};
use dre_core::template::TemplateEditor;
use dre_db::PgRecordStore;
use dre_shared::AppConfig;
use dre_shared::config::DreConfig;
use dre_shared::types::{CategoryId, CompanyId, IndicatorId};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Demo company ID (consistent for all seeds)
const DEMO_COMPANY_ID: Uuid = Uuid::from_u128(1);
/// Name of the seeded template, used to detect an earlier run.
const TEMPLATE_NAME: &str = "DRE Gerencial";
/// Log filter used when `RUST_LOG` is unset. Covers this binary and the editors.
const DEFAULT_LOG_FILTER: &str = "seeder=info,dre=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dry_run = std::env::args().any(|arg| arg == "--dry-run");
    let (store, dre_config): (Arc<dyn RecordStore>, DreConfig) = if dry_run {
        info!("Dry run: seeding an in-memory store");
        (Arc::new(MemoryStore::new()), DreConfig::default())
    } else {
        let config = AppConfig::load().context("Failed to load configuration")?;
        let db = dre_db::connect(&config.database)
            .await
            .context("Failed to connect to database")?;
        info!("Connected to database");
        (Arc::new(PgRecordStore::new(db)), config.dre)
    };

    let existing = store
        .query(Table::DreTemplates, &Query::new().eq("name", TEMPLATE_NAME))
        .await?;
    if !existing.is_empty() {
        info!(template = TEMPLATE_NAME, "Template already exists, skipping");
        return Ok(());
    }

    let company_id = CompanyId::from_uuid(DEMO_COMPANY_ID);
    let catalog = seed_catalog(store.as_ref(), company_id).await?;
    seed_structure(&store, company_id, &catalog, &dre_config).await?;
    seed_accounts(&store, company_id, &catalog, &dre_config).await?;

    info!("Seeding complete");
    Ok(())
}

struct Catalog {
    revenue: Vec<CategoryId>,
    expense: Vec<CategoryId>,
    ebitda: IndicatorId,
}

async fn seed_catalog(store: &dyn RecordStore, company_id: CompanyId) -> anyhow::Result<Catalog> {
    let categories = [
        ("1.01", "Venda de produtos", CategoryType::Revenue),
        ("1.02", "Prestação de serviços", CategoryType::Revenue),
        ("2.01", "Impostos sobre vendas", CategoryType::Expense),
        ("2.02", "Folha de pagamento", CategoryType::Expense),
    ];
    let mut catalog = Catalog {
        revenue: Vec::new(),
        expense: Vec::new(),
        ebitda: IndicatorId::new(),
    };

    for (code, name, category_type) in categories {
        let category = Category {
            id: CategoryId::new(),
            code: code.to_string(),
            name: name.to_string(),
            company_id,
            category_type,
        };
        store
            .insert(Table::Categories, to_record(Table::Categories, &category)?)
            .await?;
        match category_type {
            CategoryType::Revenue => catalog.revenue.push(category.id),
            CategoryType::Expense => catalog.expense.push(category.id),
        }
    }

    for (code, name) in [("I01", "EBITDA"), ("I02", "Headcount")] {
        let indicator = Indicator {
            id: IndicatorId::new(),
            code: code.to_string(),
            name: name.to_string(),
            company_id,
        };
        store
            .insert(Table::Indicators, to_record(Table::Indicators, &indicator)?)
            .await?;
        if code == "I01" {
            catalog.ebitda = indicator.id;
        }
    }

    info!(
        categories = catalog.revenue.len() + catalog.expense.len(),
        "Seeded catalog"
    );
    Ok(catalog)
}

async fn seed_structure(
    store: &Arc<dyn RecordStore>,
    company_id: CompanyId,
    catalog: &Catalog,
    config: &DreConfig,
) -> anyhow::Result<()> {
    let mut templates = TemplateEditor::new(store.clone());
    templates.open_create();
    templates.name = TEMPLATE_NAME.to_string();
    templates.description = "Estrutura padrão para análise gerencial".to_string();
    let template = templates.save().await?;

    let mut sections = SectionEditor::new(store.clone(), company_id);
    sections.open_create().await;
    sections.name = "Resultado Operacional".to_string();
    sections.code = "RO".to_string();
    sections.template_id = Some(template.id);
    let section = sections.save().await?;

    let mut roots = LineEditor::new(store.clone(), section.id, None)
        .with_max_indent_level(config.max_indent_level);
    roots.open_create();
    roots.name = "Receita Operacional Bruta".to_string();
    roots.code = "1".to_string();
    roots.is_bold = true;
    let gross = roots.save().await?;

    let mut children = LineEditor::new(store.clone(), section.id, Some(gross.id))
        .with_max_indent_level(config.max_indent_level);
    children.open_create();
    children.name = "Vendas".to_string();
    children.code = "1.1".to_string();
    children.set_type(LineType::Category).await;
    for id in &catalog.revenue {
        children.toggle_category(*id);
    }
    children.set_indent_level(1);
    children.save().await?;

    roots.open_create();
    roots.name = "Receita Líquida".to_string();
    roots.code = "3".to_string();
    roots.set_type(LineType::Calculation).await;
    roots.formula = "L1 - L2".to_string();
    roots.show_percentage = true;
    roots.highlight_color = "#2e7d32".to_string();
    roots.save().await?;

    info!(template_id = %template.id, section_id = %section.id, "Seeded DRE structure");
    Ok(())
}

async fn seed_accounts(
    store: &Arc<dyn RecordStore>,
    company_id: CompanyId,
    catalog: &Catalog,
    config: &DreConfig,
) -> anyhow::Result<()> {
    let mut editor = AccountEditor::new(store.clone(), company_id).with_config(config);

    editor.open_create().await;
    editor.form.name = "Receita Bruta".to_string();
    editor.form.category_type = CategoryType::Revenue;
    editor.form.selected_categories.clone_from(&catalog.revenue);
    let revenue = editor.save().await?;

    editor.open_create().await;
    editor.form.name = "Custos e Despesas".to_string();
    editor.form.category_type = CategoryType::Expense;
    editor.form.selected_categories.clone_from(&catalog.expense);
    let expense = editor.save().await?;

    editor.open_create().await;
    editor.form.name = "EBITDA".to_string();
    editor.form.set_account_type(AccountFormType::Indicator);
    editor.form.selected_indicator = Some(catalog.ebitda);
    editor.save().await?;

    editor.open_create().await;
    editor.form.name = "Resultado".to_string();
    editor.form.set_account_type(AccountFormType::Total);
    editor.form.toggle_source_account(revenue.id);
    editor.form.toggle_source_account(expense.id);
    let total = editor.save().await?;

    editor.open_create().await;
    editor.form.name = "Ajustes manuais".to_string();
    editor.form.set_account_type(AccountFormType::Blank);
    editor.form.parent_account_id = Some(total.id);
    editor.save().await?;

    info!(accounts = editor.accounts().len(), "Seeded DRE accounts");
    Ok(())
}
