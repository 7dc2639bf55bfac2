//! DRE record tables.
//!
//! Every table stores the record as a JSONB document next to its id. The
//! document carries the id as well, so reads return it unchanged.

use dre_core::store::Table;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in Table::ALL {
            db.execute_unprepared(&record_table_sql(table.as_str())).await?;
        }
        db.execute_unprepared(INDEXES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in Table::ALL.iter().rev() {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS {table} CASCADE;"))
                .await?;
        }
        Ok(())
    }
}

fn record_table_sql(table: &str) -> String {
    format!(
        r"
CREATE TABLE IF NOT EXISTS {table} (
    id UUID PRIMARY KEY,
    data JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_{table}_data_object CHECK (jsonb_typeof(data) = 'object')
);
"
    )
}

const INDEXES_SQL: &str = r"
-- Company-scoped pickers and code generation
CREATE INDEX IF NOT EXISTS idx_categories_company ON categories ((data -> 'company_id'));
CREATE INDEX IF NOT EXISTS idx_indicators_company ON indicators ((data -> 'company_id'));
CREATE INDEX IF NOT EXISTS idx_dre_sections_company ON dre_sections ((data -> 'company_id'));
CREATE INDEX IF NOT EXISTS idx_dre_accounts_company ON dre_accounts ((data -> 'company_id'));

-- Section lines, read for parent-cycle checks
CREATE INDEX IF NOT EXISTS idx_dre_lines_section ON dre_lines ((data -> 'section_id'));

-- Active template list
CREATE INDEX IF NOT EXISTS idx_dre_templates_active ON dre_templates ((data -> 'is_active'));
";
