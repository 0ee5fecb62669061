//! Flattened views of an extracted statement.
//!
//! Downstream storage keeps one header record per statement and one detail
//! record per table row, numbered from 1 within each table.

use serde::{Deserialize, Serialize};

use crate::types::ExtractedStatement;

/// Statement-level fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementHeader {
    pub account_number: String,
    pub statement_number: String,
    pub statement_date: String,
    pub title: String,
}

/// One table row tagged with its statement and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementDetail {
    pub statement_number: String,
    /// 1-based position inside its table.
    pub sr_no: usize,
    pub description: String,
    pub amount: String,
}

impl From<&ExtractedStatement> for StatementHeader {
    fn from(statement: &ExtractedStatement) -> Self {
        StatementHeader {
            account_number: statement.account_number.clone(),
            statement_number: statement.statement_number.clone(),
            statement_date: statement.statement_date.clone(),
            title: statement.title.clone(),
        }
    }
}

impl From<&ExtractedStatement> for Vec<StatementDetail> {
    fn from(statement: &ExtractedStatement) -> Self {
        statement
            .tables
            .iter()
            .flat_map(|table| {
                table.iter().enumerate().map(move |(index, row)| StatementDetail {
                    statement_number: statement.statement_number.clone(),
                    sr_no: index + 1,
                    description: row.description().trim().to_string(),
                    amount: row.amount().trim().to_string(),
                })
            })
            .collect()
    }
}
