//! CSV export of statement detail rows.
//!
//! One record per table row: `statement_number,sr_no,description,amount`.

use csv::Writer;
use std::io::Write;

use crate::conversion::StatementDetail;
use crate::error::Result;
use crate::types::ExtractedStatement;

/// An extracted statement written as CSV detail rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvStatement {
    /// The extracted statement data.
    pub statement: ExtractedStatement,
}

impl CsvStatement {
    /// Write the detail rows to any destination implementing `Write`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use statement_extract::csv_format::CsvStatement;
    /// use statement_extract::types::ExtractedStatement;
    ///
    /// let csv = CsvStatement { statement: ExtractedStatement::default() };
    /// let mut file = File::create("details.csv")?;
    /// csv.write_to(&mut file)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut csv_writer = Writer::from_writer(writer);

        let details: Vec<StatementDetail> = (&self.statement).into();
        if details.is_empty() {
            // serialize() only emits the header alongside a record
            csv_writer.write_record(["statement_number", "sr_no", "description", "amount"])?;
        }
        for detail in details {
            csv_writer.serialize(detail)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
